use rayon::prelude::*;

use crate::config::Params;
use crate::layout::Layout;
use crate::raster::Surface;
use crate::rng::{Rng, SALT_TEXTURE, hash2, seed_u32, unit_f32};

/// Add grain to pure-black frame pixels: each gets an independent offset in
/// `[-texture/2, texture/2)` applied equally to R, G and B. Anything not
/// exactly black, and the photo rectangle itself, is left alone.
///
/// Noise is a hash of the pixel coordinate and a seed drawn once from `rng`,
/// so rows can be processed in parallel without changing the result.
pub fn apply_texture(surface: &mut Surface, layout: &Layout, params: &Params, rng: &mut Rng) {
    let intensity = params.texture;
    if !(intensity.is_finite() && intensity > 0.0) || surface.w == 0 {
        return;
    }
    let seed = seed_u32(rng.next_u64(), SALT_TEXTURE);
    let photo = layout.photo();
    let w = surface.w;

    surface
        .rgba
        .par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                if px[0] != 0 || px[1] != 0 || px[2] != 0 || photo.contains(x, y) {
                    continue;
                }
                let noise = (unit_f32(hash2(x as i32, y as i32, seed)) - 0.5) * intensity;
                // Starting from zero, only the positive half survives the clamp.
                let v = noise.round().clamp(0.0, 255.0) as u8;
                px[0] = v;
                px[1] = v;
                px[2] = v;
            }
        });
}
