use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// All tunable parameters — exposed as sliders by the clients.
///
/// The core never validates these. Zero in any field disables the
/// corresponding effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    // Geometry
    /// Nominal edge thickness in pixels.
    pub thickness: f32,
    /// Jitter amplitude of the cutout boundary, in pixels.
    pub roughness: f32,
    /// Spread of the per-edge thickness roll, in pixels.
    pub asymmetry: f32,

    // Imperfections
    pub scratches: f32,
    /// Grain intensity, roughly 0..25.
    pub texture: f32,
    pub variations: f32,
    pub imperfections: f32,
}

impl Default for Params {
    fn default() -> Self {
        Preset::Classic.params()
    }
}

impl Params {
    /// Every field at zero: the render degenerates to a pass-through.
    pub const ZERO: Params = Params {
        thickness: 0.0,
        roughness: 0.0,
        asymmetry: 0.0,
        scratches: 0.0,
        texture: 0.0,
        variations: 0.0,
        imperfections: 0.0,
    };

    /// Replace non-finite or negative values with zero. Callers use this
    /// before handing untrusted input to the renderer.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            thickness: fix(self.thickness),
            roughness: fix(self.roughness),
            asymmetry: fix(self.asymmetry),
            scratches: fix(self.scratches),
            texture: fix(self.texture),
            variations: fix(self.variations),
            imperfections: fix(self.imperfections),
        }
    }

    pub fn with_overrides(mut self, o: &ParamOverrides) -> Self {
        let apply = |slot: &mut f32, v: Option<f32>| {
            if let Some(v) = v {
                *slot = v;
            }
        };
        apply(&mut self.thickness, o.thickness);
        apply(&mut self.roughness, o.roughness);
        apply(&mut self.asymmetry, o.asymmetry);
        apply(&mut self.scratches, o.scratches);
        apply(&mut self.texture, o.texture);
        apply(&mut self.variations, o.variations);
        apply(&mut self.imperfections, o.imperfections);
        self
    }
}

/// Per-field overrides layered on top of a preset.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ParamOverrides {
    pub thickness: Option<f32>,
    pub roughness: Option<f32>,
    pub asymmetry: Option<f32>,
    pub scratches: Option<f32>,
    pub texture: Option<f32>,
    pub variations: Option<f32>,
    pub imperfections: Option<f32>,
}

/// Slider range for one parameter, as the clients present it.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Range {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

pub const RANGES: [Range; 7] = [
    Range { name: "thickness", min: 0.0, max: 60.0, step: 1.0 },
    Range { name: "roughness", min: 0.0, max: 3.0, step: 0.1 },
    Range { name: "scratches", min: 0.0, max: 25.0, step: 1.0 },
    Range { name: "texture", min: 0.0, max: 30.0, step: 1.0 },
    Range { name: "variations", min: 0.0, max: 25.0, step: 1.0 },
    Range { name: "imperfections", min: 0.0, max: 30.0, step: 1.0 },
    Range { name: "asymmetry", min: 0.0, max: 15.0, step: 1.0 },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Minimal,
    Classic,
    Vintage,
    Distressed,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Minimal,
        Preset::Classic,
        Preset::Vintage,
        Preset::Distressed,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Minimal => "minimal",
            Preset::Classic => "classic",
            Preset::Vintage => "vintage",
            Preset::Distressed => "distressed",
        }
    }

    pub fn params(self) -> Params {
        match self {
            Preset::Minimal => Params {
                thickness: 15.0,
                roughness: 0.2,
                scratches: 2.0,
                texture: 5.0,
                variations: 3.0,
                imperfections: 5.0,
                asymmetry: 1.0,
            },
            Preset::Classic => Params {
                thickness: 25.0,
                roughness: 0.8,
                scratches: 8.0,
                texture: 15.0,
                variations: 10.0,
                imperfections: 15.0,
                asymmetry: 5.0,
            },
            Preset::Vintage => Params {
                thickness: 35.0,
                roughness: 1.2,
                scratches: 12.0,
                texture: 20.0,
                variations: 15.0,
                imperfections: 20.0,
                asymmetry: 8.0,
            },
            Preset::Distressed => Params {
                thickness: 45.0,
                roughness: 2.0,
                scratches: 18.0,
                texture: 25.0,
                variations: 18.0,
                imperfections: 25.0,
                asymmetry: 12.0,
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown preset '{s}' (expected minimal, classic, vintage or distressed)"))
    }
}
