use crate::grid::Grid;
use crate::layout::PixelRect;
use crate::rng::Rng;

/// Samples per edge of the inner rectangle.
pub const SEGMENTS: usize = 100;

/// Closed polygon tracing the jittered window, clockwise from the top-left
/// corner. Top and bottom samples are jittered in y, left and right in x.
/// Returns `4 * segments` vertices; the closing edge is implicit.
pub fn build_cutout(rect: &PixelRect, roughness: f32, segments: usize, rng: &mut Rng) -> Vec<[f32; 2]> {
    let segments = segments.max(1);
    let x0 = rect.x0 as f32;
    let y0 = rect.y0 as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    let n = segments as f32;

    let mut points = Vec::with_capacity(4 * segments);

    // Top, left to right (both corners).
    for i in 0..=segments {
        points.push([x0 + i as f32 / n * w, y0 + rng.jitter(roughness)]);
    }
    // Right, top to bottom.
    for i in 1..=segments {
        points.push([x0 + w + rng.jitter(roughness), y0 + i as f32 / n * h]);
    }
    // Bottom, right to left.
    for i in (0..segments).rev() {
        points.push([x0 + i as f32 / n * w, y0 + h + rng.jitter(roughness)]);
    }
    // Left, bottom to top, stopping short of the first point.
    for i in (1..segments).rev() {
        points.push([x0 + rng.jitter(roughness), y0 + i as f32 / n * h]);
    }

    points
}

/// Rasterize a closed polygon into a `w`×`h` mask. A pixel is set when its
/// centre is inside under the non-zero winding rule.
pub fn rasterize(points: &[[f32; 2]], w: usize, h: usize) -> Grid<bool> {
    let mut mask = Grid::<bool>::new(w, h);
    if points.len() < 3 {
        return mask;
    }

    let mut crossings: Vec<(f32, i32)> = Vec::new();
    for y in 0..h {
        let sy = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = &points[(i + 1) % points.len()];
            // Half-open in y so shared vertices count once.
            let dir = if a[1] <= sy && b[1] > sy {
                1
            } else if b[1] <= sy && a[1] > sy {
                -1
            } else {
                continue;
            };
            let t = (sy - a[1]) / (b[1] - a[1]);
            crossings.push((a[0] + t * (b[0] - a[0]), dir));
        }
        if crossings.is_empty() {
            continue;
        }
        crossings.sort_by(|p, q| p.0.total_cmp(&q.0));

        let row = mask.row_mut(y);
        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }
            // Pixel centres in [pair[0].0, pair[1].0).
            let lo = (pair[0].0 - 0.5).ceil().max(0.0) as usize;
            let hi = ((pair[1].0 - 0.5).ceil().max(0.0) as usize).min(w);
            for cell in row.iter_mut().take(hi).skip(lo) {
                *cell = true;
            }
        }
    }

    mask
}
