use image::RgbaImage;

use crate::config::{ParamOverrides, Params, Preset};
use crate::error::FrameResult;
use crate::rng::Rng;
use crate::{FramedImage, render};

/// Interactive state: the loaded photo, the current parameters and the
/// random stream. Every change re-renders when a photo is loaded.
pub struct Session {
    image: Option<RgbaImage>,
    params: Params,
    rng: Rng,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Rng::from_entropy())
    }
}

impl Session {
    pub fn new(rng: Rng) -> Self {
        Self {
            image: None,
            params: Params::default(),
            rng,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Load a photo and render it with the current parameters.
    pub fn load(&mut self, image: RgbaImage) -> FrameResult<Option<FramedImage>> {
        self.image = Some(image);
        self.regenerate()
    }

    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn apply_preset(&mut self, preset: Preset) -> FrameResult<Option<FramedImage>> {
        self.params = preset.params();
        self.regenerate()
    }

    pub fn set(&mut self, overrides: &ParamOverrides) -> FrameResult<Option<FramedImage>> {
        self.params = self.params.with_overrides(overrides);
        self.regenerate()
    }

    /// Re-roll the frame. `None` when no photo is loaded.
    pub fn regenerate(&mut self) -> FrameResult<Option<FramedImage>> {
        let Some(image) = &self.image else {
            return Ok(None);
        };
        let (framed, _) = render(image, &self.params, &mut self.rng)?;
        Ok(Some(framed))
    }
}
