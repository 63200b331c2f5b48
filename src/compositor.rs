use image::RgbaImage;

use crate::cutout;
use crate::layout::Layout;
use crate::raster::{BLACK, Surface, WHITE};

/// Build the base print: white background, black frame layer with the
/// cutout window removed, and the scaled photo in the nominal rectangle.
/// The window is erased under the photo, so photo pixels land verbatim,
/// alpha included. Window pixels outside the photo stay white.
///
/// `photo` must already be scaled to `layout.image_w`×`layout.image_h`.
pub fn compose(layout: &Layout, cutout_points: &[[f32; 2]], photo: &RgbaImage) -> Surface {
    let mut surface = Surface::new(layout.width, layout.height, WHITE);

    let window = cutout::rasterize(cutout_points, layout.width, layout.height);
    surface.copy_outside_mask(BLACK, &window);

    surface.copy_image(photo, layout.left, layout.top);
    surface
}
