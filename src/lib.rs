pub mod compositor;
pub mod config;
pub mod cutout;
pub mod error;
pub mod export;
pub mod grid;
pub mod imperfections;
pub mod layout;
pub mod raster;
pub mod rng;
pub mod session;

use std::time::Instant;

use image::RgbaImage;
use image::imageops::{self, FilterType};

pub use config::{ParamOverrides, Params, Preset};
pub use error::{FrameError, FrameResult};
pub use imperfections::Scratch;
pub use layout::{FrameGeometry, Layout};
pub use raster::Surface;
pub use rng::Rng;

/// A finished print.
#[derive(Clone, Debug)]
pub struct FramedImage {
    pub surface: Surface,
    pub geometry: FrameGeometry,
    pub layout: Layout,
    pub scratches: Vec<Scratch>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// Frame `source` according to `params`.
///
/// Passes run in a fixed order: sizing, base frame and cutout, photo,
/// thickness patches, grain, then specks and scratches. Grain only touches
/// pixels that are still pure black, so it must run before anything that
/// tints the frame.
#[tracing::instrument(skip_all, fields(w = source.width(), h = source.height()))]
pub fn render(source: &RgbaImage, params: &Params, rng: &mut Rng) -> FrameResult<(FramedImage, Vec<Timing>)> {
    let (sw, sh) = (source.width(), source.height());
    if sw == 0 || sh == 0 {
        return Err(FrameError::EmptyImage { width: sw, height: sh });
    }

    let mut timings = Vec::new();
    let total_start = Instant::now();
    let mut mark = |name: &'static str, t: Instant| {
        let ms = t.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(pass = name, ms, "pass done");
        timings.push(Timing { name, ms });
    };

    // 1. Size the photo and roll the frame edges
    let t = Instant::now();
    let (iw, ih) = layout::fit_within(sw, sh, layout::MAX_WIDTH, layout::MAX_HEIGHT);
    let photo = if (iw, ih) == (sw, sh) {
        source.clone()
    } else {
        imageops::resize(source, iw, ih, FilterType::Triangle)
    };
    let geometry = FrameGeometry::roll(params, rng);
    let layout = Layout::new(iw as usize, ih as usize, &geometry);
    mark("sizing", t);

    // 2. Base frame, cutout window and photo
    let t = Instant::now();
    let outline = cutout::build_cutout(&layout.photo(), params.roughness, cutout::SEGMENTS, rng);
    let mut surface = compositor::compose(&layout, &outline, &photo);
    mark("compose", t);

    // 3. Uneven trimming
    let t = Instant::now();
    imperfections::apply_thickness_variations(&mut surface, &layout, params, rng);
    mark("thickness", t);

    // 4. Grain on whatever is still pure black
    let t = Instant::now();
    imperfections::apply_texture(&mut surface, &layout, params, rng);
    mark("texture", t);

    // 5. Edge specks and scratches
    let t = Instant::now();
    let scratches = imperfections::apply_wear(&mut surface, &layout, params, rng);
    mark("wear", t);

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
    timings.push(Timing {
        name: "TOTAL",
        ms: total_ms,
    });
    tracing::debug!(
        width = layout.width,
        height = layout.height,
        scratches = scratches.len(),
        total_ms,
        "frame rendered"
    );

    let framed = FramedImage {
        surface,
        geometry,
        layout,
        scratches,
    };

    Ok((framed, timings))
}
