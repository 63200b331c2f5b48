use crate::config::Params;
use crate::layout::Layout;
use crate::raster::Surface;
use crate::rng::Rng;

use super::{Side, count};

/// Slightly lighter than the frame so uneven trimming reads as a shade step.
pub const PATCH: [u8; 4] = [0x1a, 0x1a, 0x1a, 255];

/// Paint `floor(variations)` thin patches simulating uneven trimming.
/// Top and left patches sit on the outer edge; right and bottom patches
/// start at the inner edge of their frame side.
pub fn apply_thickness_variations(surface: &mut Surface, layout: &Layout, params: &Params, rng: &mut Rng) {
    let n = count(params.variations);
    let w = layout.width as f32;
    let h = layout.height as f32;

    for _ in 0..n {
        let side = Side::pick(rng);
        let depth = rng.range_f32(1.0, 4.0);
        let along = match side {
            Side::Top | Side::Bottom => rng.range_f32(0.0, w),
            Side::Right | Side::Left => rng.range_f32(0.0, h),
        };
        let len = rng.range_f32(10.0, 50.0);

        match side {
            Side::Top => surface.fill_rect(along, 0.0, len, depth, PATCH),
            Side::Right => surface.fill_rect(w - layout.right as f32, along, depth, len, PATCH),
            Side::Bottom => surface.fill_rect(along, h - layout.bottom as f32, len, depth, PATCH),
            Side::Left => surface.fill_rect(0.0, along, depth, len, PATCH),
        }
    }
}
