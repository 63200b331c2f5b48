use rayon::prelude::*;

use crate::grid::Grid;

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// Sub-samples per axis for circle and line coverage.
const SS: usize = 4;

/// RGBA8 pixel buffer, row-major, straight alpha. Only the photo area can
/// hold translucent pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub w: usize,
    pub h: usize,
    pub rgba: Vec<u8>,
}

#[inline]
fn blend_channel(src: u8, dst: u8, a: f32) -> u8 {
    (dst as f32 + (src as f32 - dst as f32) * a).round() as u8
}

impl Surface {
    pub fn new(w: usize, h: usize, fill: [u8; 4]) -> Self {
        let mut rgba = vec![0u8; w * h * 4];
        for px in rgba.chunks_exact_mut(4) {
            px.copy_from_slice(&fill);
        }
        Self { w, h, rgba }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.w + x) * 4;
        [self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]]
    }

    #[inline]
    pub fn put(&mut self, x: usize, y: usize, color: [u8; 4]) {
        let i = (y * self.w + x) * 4;
        self.rgba[i..i + 4].copy_from_slice(&color);
    }

    /// Source-over with `color` at `coverage` (0..1) on top of an opaque pixel.
    #[inline]
    pub fn blend(&mut self, x: usize, y: usize, color: [u8; 4], coverage: f32) {
        let a = (coverage * color[3] as f32 / 255.0).clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let i = (y * self.w + x) * 4;
        let px = &mut self.rgba[i..i + 4];
        for c in 0..3 {
            px[c] = blend_channel(color[c], px[c], a);
        }
        px[3] = blend_channel(255, px[3], a);
    }

    /// Copy `layer` onto the surface wherever `mask` is false.
    pub fn copy_outside_mask(&mut self, layer: [u8; 4], mask: &Grid<bool>) {
        debug_assert!(mask.w == self.w && mask.h == self.h);
        let w = self.w;
        if w == 0 {
            return;
        }
        self.rgba
            .par_chunks_mut(w * 4)
            .zip(mask.data.par_chunks(w))
            .for_each(|(row, mrow)| {
                for (px, &inside) in row.chunks_exact_mut(4).zip(mrow) {
                    if !inside {
                        px.copy_from_slice(&layer);
                    }
                }
            });
    }

    /// Copy an RGBA image verbatim, alpha included, with its top-left corner
    /// at `(x0, y0)`. Parts falling outside the surface are dropped.
    pub fn copy_image(&mut self, img: &image::RgbaImage, x0: usize, y0: usize) {
        let iw = img.width() as usize;
        let cols = iw.min(self.w.saturating_sub(x0));
        if cols == 0 {
            return;
        }
        let src = img.as_raw();
        for y in 0..(img.height() as usize).min(self.h.saturating_sub(y0)) {
            let s = y * iw * 4;
            let d = ((y0 + y) * self.w + x0) * 4;
            self.rgba[d..d + cols * 4].copy_from_slice(&src[s..s + cols * 4]);
        }
    }

    /// Fill an axis-aligned rectangle given in continuous coordinates,
    /// weighting edge pixels by exact area coverage.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [u8; 4]) {
        let (x0, x1) = (x.max(0.0), (x + w).min(self.w as f32));
        let (y0, y1) = (y.max(0.0), (y + h).min(self.h as f32));
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for py in y0.floor() as usize..(y1.ceil() as usize).min(self.h) {
            let cy = (y1.min(py as f32 + 1.0) - y0.max(py as f32)).max(0.0);
            for px in x0.floor() as usize..(x1.ceil() as usize).min(self.w) {
                let cx = (x1.min(px as f32 + 1.0) - x0.max(px as f32)).max(0.0);
                self.blend(px, py, color, cx * cy);
            }
        }
    }

    /// Filled disc, antialiased by supersampling.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
        if r <= 0.0 {
            return;
        }
        let r2 = r * r;
        self.cover_bbox(cx - r, cy - r, cx + r, cy + r, color, |sx, sy| {
            let (dx, dy) = (sx - cx, sy - cy);
            dx * dx + dy * dy <= r2
        });
    }

    /// Straight segment of the given width with butt caps, antialiased by
    /// supersampling. Nothing is clipped except by the surface bounds.
    pub fn stroke_line(&mut self, a: [f32; 2], b: [f32; 2], width: f32, color: [u8; 4]) {
        let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
        let len2 = dx * dx + dy * dy;
        if len2 <= 0.0 || width <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let inv_len = 1.0 / len2.sqrt();
        self.cover_bbox(
            a[0].min(b[0]) - half,
            a[1].min(b[1]) - half,
            a[0].max(b[0]) + half,
            a[1].max(b[1]) + half,
            color,
            |sx, sy| {
                let (rx, ry) = (sx - a[0], sy - a[1]);
                let t = (rx * dx + ry * dy) / len2;
                let dist = (rx * dy - ry * dx).abs() * inv_len;
                (0.0..=1.0).contains(&t) && dist <= half
            },
        );
    }

    fn cover_bbox(
        &mut self,
        minx: f32,
        miny: f32,
        maxx: f32,
        maxy: f32,
        color: [u8; 4],
        inside: impl Fn(f32, f32) -> bool,
    ) {
        if maxx < 0.0 || maxy < 0.0 || self.w == 0 || self.h == 0 {
            return;
        }
        let x_lo = minx.max(0.0).floor() as usize;
        let y_lo = miny.max(0.0).floor() as usize;
        let x_hi = (maxx.ceil() as usize).min(self.w);
        let y_hi = (maxy.ceil() as usize).min(self.h);
        let step = 1.0 / SS as f32;
        for py in y_lo..y_hi {
            for px in x_lo..x_hi {
                let mut hits = 0;
                for j in 0..SS {
                    let sy = py as f32 + (j as f32 + 0.5) * step;
                    for i in 0..SS {
                        let sx = px as f32 + (i as f32 + 0.5) * step;
                        if inside(sx, sy) {
                            hits += 1;
                        }
                    }
                }
                if hits > 0 {
                    self.blend(px, py, color, hits as f32 / (SS * SS) as f32);
                }
            }
        }
    }
}
