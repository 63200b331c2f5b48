use image::{Rgba, RgbaImage};

use instaframe::imperfections::thickness::PATCH;
use instaframe::imperfections::{apply_texture, apply_thickness_variations, apply_wear};
use instaframe::raster::BLACK;
use instaframe::{FrameError, FrameGeometry, Layout, Params, Preset, Rng, compositor, cutout, render};

/// Opaque gradient that never contains pure black.
fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        Rgba([
            (40 + x * 200 / w.max(1)) as u8,
            (40 + y * 200 / h.max(1)) as u8,
            180,
            255,
        ])
    })
}

fn random_params(rng: &mut Rng) -> Params {
    Params {
        thickness: rng.range_f32(0.0, 60.0),
        roughness: rng.range_f32(0.0, 3.0),
        scratches: rng.range_f32(0.0, 25.0),
        texture: rng.range_f32(0.0, 30.0),
        variations: rng.range_f32(0.0, 25.0),
        imperfections: rng.range_f32(0.0, 30.0),
        asymmetry: rng.range_f32(0.0, 15.0),
    }
}

#[test]
fn classic_on_large_photo() {
    let source = gradient(1600, 1200);
    let (framed, timings) = render(&source, &Preset::Classic.params(), &mut Rng::new(42)).unwrap();
    let l = framed.layout;

    assert_eq!((l.image_w, l.image_h), (800, 600));
    for edge in [l.top, l.right, l.bottom, l.left] {
        assert!((22..=28).contains(&edge), "edge {edge} outside classic spread");
    }
    assert!((840..=860).contains(&l.width));
    assert!((640..=660).contains(&l.height));
    assert_eq!(framed.surface.w, l.width);
    assert_eq!(framed.surface.h, l.height);
    assert_eq!(timings.last().map(|t| t.name), Some("TOTAL"));

    // Frame band well away from the cutout and the outer edge is dark.
    let s = &framed.surface;
    for x in (10..l.width - 10).step_by(7) {
        let px = s.get(x, l.top / 2);
        assert!(px[0] <= 0x33 && px[0] == px[1] && px[1] == px[2], "top band pixel {px:?}");
        assert_eq!(px[3], 255);
    }

    // Grain reached the frame.
    let mut lifted = 0;
    for y in 4..l.top.saturating_sub(3) {
        for x in 4..l.width - 4 {
            let px = s.get(x, y);
            if px != BLACK && px[0] < 0x1a {
                lifted += 1;
            }
        }
    }
    assert!(lifted > 100);
}

#[test]
fn photo_interior_is_untouched_by_grain() {
    // No scratches, so only the grain pass could alter the photo.
    let params = Params {
        scratches: 0.0,
        ..Preset::Distressed.params()
    };
    let source = gradient(300, 200);
    let (framed, _) = render(&source, &params, &mut Rng::new(7)).unwrap();
    let r = framed.layout.photo();
    for y in r.y0..r.y1 {
        for x in r.x0..r.x1 {
            let want = source.get_pixel((x - r.x0) as u32, (y - r.y0) as u32).0;
            assert_eq!(framed.surface.get(x, y), want, "photo pixel ({x}, {y}) changed");
        }
    }
}

#[test]
fn black_photo_pixels_stay_black() {
    let source = RgbaImage::from_pixel(120, 90, Rgba([0, 0, 0, 255]));
    let params = Params {
        scratches: 0.0,
        ..Preset::Vintage.params()
    };
    let (framed, _) = render(&source, &params, &mut Rng::new(8)).unwrap();
    let r = framed.layout.photo();
    for y in r.y0..r.y1 {
        for x in r.x0..r.x1 {
            assert_eq!(framed.surface.get(x, y), BLACK);
        }
    }
}

#[test]
fn all_zero_params_pass_the_photo_through() {
    let source = gradient(320, 240);
    let (framed, _) = render(&source, &Params::ZERO, &mut Rng::new(1)).unwrap();
    assert_eq!((framed.surface.w, framed.surface.h), (320, 240));
    assert_eq!(framed.layout.photo().x0, 0);
    assert!(framed.scratches.is_empty());
    assert_eq!(&framed.surface.rgba, source.as_raw());
}

#[test]
fn translucent_photo_passes_through_untouched() {
    let source = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 128]));
    let (framed, _) = render(&source, &Params::ZERO, &mut Rng::new(1)).unwrap();
    assert_eq!(&framed.surface.rgba, source.as_raw());
}

#[test]
fn render_matches_passes_replayed_in_order() {
    let source = gradient(120, 90);
    let params = Preset::Distressed.params();
    let mut rng = Rng::new(31);
    let mut replay = rng.clone();
    let (framed, _) = render(&source, &params, &mut rng).unwrap();

    let geometry = FrameGeometry::roll(&params, &mut replay);
    let layout = Layout::new(120, 90, &geometry);
    let outline = cutout::build_cutout(&layout.photo(), params.roughness, cutout::SEGMENTS, &mut replay);
    let mut surface = compositor::compose(&layout, &outline, &source);
    apply_thickness_variations(&mut surface, &layout, &params, &mut replay);
    apply_texture(&mut surface, &layout, &params, &mut replay);
    let scratches = apply_wear(&mut surface, &layout, &params, &mut replay);

    assert_eq!(framed.surface, surface);
    assert_eq!(framed.scratches, scratches);
}

#[test]
fn patches_are_not_grained() {
    let params = Params {
        variations: 25.0,
        texture: 30.0,
        scratches: 0.0,
        imperfections: 0.0,
        ..Preset::Classic.params()
    };
    let (framed, _) = render(&gradient(200, 150), &params, &mut Rng::new(12)).unwrap();
    let exact = framed.surface.rgba.chunks(4).filter(|p| *p == PATCH).count();
    assert!(exact > 0, "no untinted patch pixels");
}

#[test]
fn specks_land_on_top_of_grain() {
    let params = Params {
        texture: 30.0,
        imperfections: 30.0,
        variations: 0.0,
        scratches: 0.0,
        ..Preset::Classic.params()
    };
    let source = gradient(160, 120);
    let mut covered_grain = 0;
    for seed in 0..10 {
        let mut rng = Rng::new(seed);
        let geometry = FrameGeometry::roll(&params, &mut rng);
        let layout = Layout::new(160, 120, &geometry);
        let outline = cutout::build_cutout(&layout.photo(), params.roughness, cutout::SEGMENTS, &mut rng);
        let mut surface = compositor::compose(&layout, &outline, &source);
        apply_thickness_variations(&mut surface, &layout, &params, &mut rng);
        apply_texture(&mut surface, &layout, &params, &mut rng);
        let grained = surface.clone();
        apply_wear(&mut surface, &layout, &params, &mut rng);

        for (after, before) in surface.rgba.chunks(4).zip(grained.rgba.chunks(4)) {
            if after != before {
                assert!(after[0] < before[0], "speck brightened {before:?} -> {after:?}");
                if after == BLACK {
                    covered_grain += 1;
                }
            }
        }
    }
    assert!(covered_grain > 0);
}

#[test]
fn dimensions_follow_layout_for_random_params() {
    let mut meta = Rng::new(2024);
    for _ in 0..40 {
        let params = random_params(&mut meta);
        let w = 1 + meta.range_usize(1500) as u32;
        let h = 1 + meta.range_usize(1500) as u32;
        let (framed, _) = render(&gradient(w, h), &params, &mut Rng::new(meta.next_u64())).unwrap();
        let l = framed.layout;
        assert!(l.image_w <= 800 && l.image_h <= 600);
        assert!(l.image_w <= w as usize && l.image_h <= h as usize);
        assert_eq!(framed.surface.w, l.image_w + l.left + l.right);
        assert_eq!(framed.surface.h, l.image_h + l.top + l.bottom);
        assert_eq!(framed.surface.rgba.len(), framed.surface.w * framed.surface.h * 4);
        assert!(framed.surface.rgba.chunks(4).all(|p| p[3] == 255));
    }
}

#[test]
fn scratches_never_start_in_the_photo() {
    let mut meta = Rng::new(77);
    let mut total = 0;
    for _ in 0..60 {
        let mut params = random_params(&mut meta);
        params.scratches += 5.0;
        let (framed, _) = render(&gradient(200, 150), &params, &mut Rng::new(meta.next_u64())).unwrap();
        let l = framed.layout;
        let (x0, y0) = (l.left as f32, l.top as f32);
        let (x1, y1) = ((l.width - l.right) as f32, (l.height - l.bottom) as f32);
        for sc in &framed.scratches {
            let [x, y] = sc.from;
            assert!(!(x >= x0 && x < x1 && y >= y0 && y < y1), "scratch origin ({x}, {y}) in photo");
        }
        total += framed.scratches.len();
    }
    assert!(total > 0);
}

#[test]
fn extreme_asymmetry_is_tolerated() {
    let params = Params {
        thickness: 2.0,
        asymmetry: 40.0,
        ..Preset::Distressed.params()
    };
    let mut rng = Rng::new(5);
    for _ in 0..20 {
        let (framed, _) = render(&gradient(64, 48), &params, &mut rng).unwrap();
        let l = framed.layout;
        assert_eq!(framed.surface.w, 64 + l.left + l.right);
    }
}

#[test]
fn same_seed_same_print() {
    let source = gradient(200, 100);
    let params = Preset::Distressed.params();
    let (a, _) = render(&source, &params, &mut Rng::new(9)).unwrap();
    let (b, _) = render(&source, &params, &mut Rng::new(9)).unwrap();
    let (c, _) = render(&source, &params, &mut Rng::new(10)).unwrap();
    assert_eq!(a.surface, b.surface);
    assert_eq!(a.scratches, b.scratches);
    assert_ne!(a.surface, c.surface);
}

#[test]
fn empty_source_is_rejected() {
    let empty = RgbaImage::new(0, 10);
    let err = render(&empty, &Params::default(), &mut Rng::new(1)).err();
    assert!(matches!(err, Some(FrameError::EmptyImage { width: 0, height: 10 })));
}
