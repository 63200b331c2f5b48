use serde::Serialize;

use crate::config::Params;
use crate::layout::Layout;
use crate::raster::{BLACK, Surface};
use crate::rng::Rng;

use super::{Side, count};

pub const SCRATCH: [u8; 4] = [0x33, 0x33, 0x33, 255];
pub const SCRATCH_WIDTH: f32 = 0.5;

/// Specks land within this many pixels of the outer edge.
const SPECK_BAND: f32 = 2.0;

/// One drawn scratch segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Scratch {
    pub from: [f32; 2],
    pub to: [f32; 2],
}

/// Edge specks followed by scratches. Returns the scratches actually drawn.
///
/// A scratch candidate whose start point falls in the closed photo rectangle
/// is skipped. The far end is not clipped and may run into the photo.
pub fn apply_wear(surface: &mut Surface, layout: &Layout, params: &Params, rng: &mut Rng) -> Vec<Scratch> {
    let w = layout.width as f32;
    let h = layout.height as f32;

    for _ in 0..count(params.imperfections) {
        let side = Side::pick(rng);
        let r = rng.range_f32(0.5, 2.5);
        let (cx, cy) = match side {
            Side::Top => {
                let x = rng.range_f32(0.0, w);
                (x, rng.range_f32(0.0, SPECK_BAND))
            }
            Side::Right => {
                let y = rng.range_f32(0.0, h);
                (w - rng.range_f32(0.0, SPECK_BAND), y)
            }
            Side::Bottom => {
                let x = rng.range_f32(0.0, w);
                (x, h - rng.range_f32(0.0, SPECK_BAND))
            }
            Side::Left => {
                let y = rng.range_f32(0.0, h);
                (rng.range_f32(0.0, SPECK_BAND), y)
            }
        };
        surface.fill_circle(cx, cy, r, BLACK);
    }

    let mut drawn = Vec::new();
    if params.scratches > 0.0 {
        for _ in 0..count(params.scratches) {
            let x1 = rng.range_f32(0.0, w);
            let y1 = rng.range_f32(0.0, h);
            let len = rng.range_f32(5.0, 25.0);
            let angle = rng.range_f32(0.0, std::f32::consts::TAU);
            if layout.in_photo(x1, y1) {
                continue;
            }
            let scratch = Scratch {
                from: [x1, y1],
                to: [x1 + angle.cos() * len, y1 + angle.sin() * len],
            };
            surface.stroke_line(scratch.from, scratch.to, SCRATCH_WIDTH, SCRATCH);
            drawn.push(scratch);
        }
    }

    tracing::trace!(scratches = drawn.len(), "wear applied");
    drawn
}
