pub mod thickness;
pub mod texture;
pub mod wear;

pub use thickness::apply_thickness_variations;
pub use texture::apply_texture;
pub use wear::{Scratch, apply_wear};

use crate::rng::Rng;

/// Side of the print an imperfection is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Uniform over the four sides.
    pub fn pick(rng: &mut Rng) -> Self {
        match rng.range_usize(4) {
            0 => Side::Top,
            1 => Side::Right,
            2 => Side::Bottom,
            _ => Side::Left,
        }
    }
}

/// Whole-count parameters are floored; negatives and NaN give zero.
#[inline]
pub(crate) fn count(v: f32) -> usize {
    if v.is_finite() && v > 0.0 { v.floor() as usize } else { 0 }
}
