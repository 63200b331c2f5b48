use serde::Serialize;

use crate::config::Params;
use crate::rng::Rng;

/// Bounding box the source image is scaled into.
pub const MAX_WIDTH: u32 = 800;
pub const MAX_HEIGHT: u32 = 600;

/// Scale `(w, h)` down to fit within `max_w`×`max_h`, never up.
/// Returns whole-pixel dimensions, each at least 1.
pub fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (w, h);
    }
    let scale = (max_w as f64 / w as f64)
        .min(max_h as f64 / h as f64)
        .min(1.0);
    let sw = ((w as f64 * scale).round() as u32).clamp(1, w);
    let sh = ((h as f64 * scale).round() as u32).clamp(1, h);
    (sw, sh)
}

/// Four independently rolled edge thicknesses, in pixels. May be negative
/// when asymmetry exceeds thickness.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FrameGeometry {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl FrameGeometry {
    /// Roll each edge as `thickness ± asymmetry/2`.
    pub fn roll(params: &Params, rng: &mut Rng) -> Self {
        let mut edge = || params.thickness + rng.jitter(params.asymmetry);
        let top = edge();
        let right = edge();
        let bottom = edge();
        let left = edge();
        Self { top, right, bottom, left }
    }
}

#[inline]
fn snap(edge: f32) -> usize {
    if edge.is_finite() && edge > 0.0 {
        edge.round() as usize
    } else {
        0
    }
}

/// Whole-pixel placement of the photo inside the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub image_w: usize,
    pub image_h: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

/// Half-open pixel rectangle `[x0, x1) × [y0, y1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
}

impl Layout {
    /// Edges that rolled to zero or below become zero-width.
    pub fn new(image_w: usize, image_h: usize, geom: &FrameGeometry) -> Self {
        let (top, right, bottom, left) = (
            snap(geom.top),
            snap(geom.right),
            snap(geom.bottom),
            snap(geom.left),
        );
        Self {
            image_w,
            image_h,
            top,
            right,
            bottom,
            left,
            width: image_w + left + right,
            height: image_h + top + bottom,
        }
    }

    /// Where the scaled photo sits. The cutout is jittered around this.
    pub fn photo(&self) -> PixelRect {
        PixelRect {
            x0: self.left,
            y0: self.top,
            x1: self.width - self.right,
            y1: self.height - self.bottom,
        }
    }

    /// True when a continuous point lies in the closed photo rectangle.
    pub fn in_photo(&self, x: f32, y: f32) -> bool {
        let r = self.photo();
        x >= r.x0 as f32 && x <= r.x1 as f32 && y >= r.y0 as f32 && y <= r.y1 as f32
    }
}
