mod common;

use rand::rngs::StdRng;
use rand::SeedableRng;

use lumen_core::buffer::PixelBuffer;
use lumen_core::filters::box_blur::box_blur;
use lumen_core::filters::edge_detect::edge_detect;
use lumen_core::filters::emboss::emboss;
use lumen_core::filters::hue::{hsl_to_rgb, hue_shift, rgb_to_hsl};
use lumen_core::filters::levels::{brightness, contrast};
use lumen_core::filters::neon_glow::neon_glow;
use lumen_core::filters::tone::{grayscale, saturation, sepia};
use lumen_core::filters::vintage::vintage;

use common::{border_pixels, checkerboard, pattern, solid, split_vertical, WHITE};

fn single(rgba: [u8; 4]) -> PixelBuffer {
    solid(1, 1, rgba)
}

/// Row of hand-picked pixels whose luma is far from a rounding boundary.
fn sample_row() -> PixelBuffer {
    let px = [
        [200, 100, 50, 255],
        [10, 240, 90, 128],
        [255, 0, 128, 7],
    ];
    PixelBuffer::from_fn(3, 1, |x, _| px[x as usize]).unwrap()
}

// ---------------------------------------------------------------------------
// grayscale
// ---------------------------------------------------------------------------

#[test]
fn test_grayscale_zero_strength_is_identity() {
    let src = pattern(9, 7);
    assert_eq!(grayscale(src.clone(), 0.0), src);
}

#[test]
fn test_grayscale_full_strength_equalizes_channels() {
    let out = grayscale(sample_row(), 1.0);
    let expected = [[124, 124, 124, 255], [154, 154, 154, 128], [91, 91, 91, 7]];
    for (x, want) in expected.iter().enumerate() {
        assert_eq!(out.pixel(x as u32, 0), *want);
    }
}

#[test]
fn test_grayscale_white_stays_white() {
    let src = solid(2, 2, WHITE);
    assert_eq!(grayscale(src.clone(), 1.0), src);
}

#[test]
fn test_grayscale_half_strength() {
    // luma(200,100,50) = 124.2 → 200 + (124.2-200)/2 = 162.1
    let out = grayscale(single([200, 100, 50, 255]), 0.5);
    assert_eq!(out.pixel(0, 0), [162, 112, 87, 255]);
}

// ---------------------------------------------------------------------------
// sepia
// ---------------------------------------------------------------------------

#[test]
fn test_sepia_zero_warmth_is_identity() {
    let src = pattern(6, 6);
    assert_eq!(sepia(src.clone(), 0.0), src);
}

#[test]
fn test_sepia_on_white_caps_targets() {
    // Red and green targets exceed 255 and are capped; the blue row sums to
    // 0.937, so blue settles at 238.9.
    let out = sepia(solid(2, 2, WHITE), 1.0);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(out.pixel(x, y), [255, 255, 239, 255]);
        }
    }
}

#[test]
fn test_sepia_full_warmth_matrix() {
    // (100, 50, 20): targets 81.53, 72.56, 56.52
    let out = sepia(single([100, 50, 20, 99]), 1.0);
    assert_eq!(out.pixel(0, 0), [82, 73, 57, 99]);
}

// ---------------------------------------------------------------------------
// brightness / contrast / saturation
// ---------------------------------------------------------------------------

#[test]
fn test_brightness_one_is_identity() {
    let src = pattern(8, 8);
    assert_eq!(brightness(src.clone(), 1.0), src);
}

#[test]
fn test_brightness_zero_blacks_out_keeping_alpha() {
    let src = pattern(8, 8);
    let out = brightness(src.clone(), 0.0);
    for y in 0..8 {
        for x in 0..8 {
            let [r, g, b, a] = out.pixel(x, y);
            assert_eq!([r, g, b], [0, 0, 0]);
            assert_eq!(a, src.pixel(x, y)[3]);
        }
    }
}

#[test]
fn test_brightness_clamps() {
    let out = brightness(single([100, 200, 0, 50]), 2.0);
    assert_eq!(out.pixel(0, 0), [200, 255, 0, 50]);
}

#[test]
fn test_contrast_formula() {
    assert_eq!(contrast(single([100, 200, 0, 255]), 0.5).pixel(0, 0), [114, 164, 64, 255]);
    assert_eq!(contrast(single([100, 200, 0, 255]), 0.0).pixel(0, 0), [128, 128, 128, 255]);
    let src = pattern(5, 5);
    assert_eq!(contrast(src.clone(), 1.0), src);
}

#[test]
fn test_contrast_high_level_clamps() {
    // 200*3 - 256 = 344 → 255; 20*3 - 256 < 0 → 0
    assert_eq!(contrast(single([200, 20, 128, 1]), 3.0).pixel(0, 0), [255, 0, 128, 1]);
}

#[test]
fn test_saturation_one_is_identity() {
    let src = pattern(7, 5);
    assert_eq!(saturation(src.clone(), 1.0), src);
}

#[test]
fn test_saturation_zero_is_luma() {
    let out = saturation(sample_row(), 0.0);
    assert_eq!(out.pixel(0, 0), [124, 124, 124, 255]);
    assert_eq!(out.pixel(1, 0), [154, 154, 154, 128]);
}

#[test]
fn test_saturation_boost() {
    // luma 124.2; 200 → 124.2 + 75.8*2 = 275.8 → 255; 100 → 75.8; 50 → -24.6 → 0
    let out = saturation(single([200, 100, 50, 255]), 2.0);
    assert_eq!(out.pixel(0, 0), [255, 76, 0, 255]);
}

// ---------------------------------------------------------------------------
// hue_shift
// ---------------------------------------------------------------------------

fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
    for c in 0..4 {
        let diff = (actual[c] as i32 - expected[c] as i32).abs();
        assert!(diff <= 1, "channel {c}: {actual:?} vs {expected:?}");
    }
}

#[test]
fn test_hue_shift_primaries() {
    assert_close(hue_shift(single([255, 0, 0, 200]), 120.0).pixel(0, 0), [0, 255, 0, 200]);
    assert_close(hue_shift(single([255, 0, 0, 200]), -120.0).pixel(0, 0), [0, 0, 255, 200]);
    assert_close(hue_shift(single([0, 0, 255, 9]), 120.0).pixel(0, 0), [255, 0, 0, 9]);
}

#[test]
fn test_hue_shift_wraps_full_turns() {
    let a = hue_shift(single([200, 80, 40, 255]), 30.0).pixel(0, 0);
    let b = hue_shift(single([200, 80, 40, 255]), 390.0).pixel(0, 0);
    let c = hue_shift(single([200, 80, 40, 255]), -330.0).pixel(0, 0);
    assert_close(a, b);
    assert_close(a, c);
}

#[test]
fn test_hue_shift_leaves_achromatic_pixels() {
    let src = PixelBuffer::from_fn(4, 1, |x, _| {
        let v = (x * 80) as u8;
        [v, v, v, 255]
    })
    .unwrap();
    assert_eq!(hue_shift(src.clone(), 90.0), src);
}

#[test]
fn test_hue_shift_zero_is_near_identity() {
    let src = pattern(10, 10);
    let out = hue_shift(src.clone(), 0.0);
    for y in 0..10 {
        for x in 0..10 {
            assert_close(out.pixel(x, y), src.pixel(x, y));
        }
    }
}

#[test]
fn test_hsl_conversion() {
    let (h, s, l) = rgb_to_hsl(255, 0, 0).unwrap();
    approx::assert_abs_diff_eq!(h, 0.0, epsilon = 1e-4);
    approx::assert_abs_diff_eq!(s, 1.0, epsilon = 1e-4);
    approx::assert_abs_diff_eq!(l, 0.5, epsilon = 1e-4);
    assert!(rgb_to_hsl(90, 90, 90).is_none());
    assert_eq!(hsl_to_rgb(240.0, 1.0, 0.5), [0, 0, 255]);
    assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), [128, 128, 128]);
}

// ---------------------------------------------------------------------------
// blur
// ---------------------------------------------------------------------------

/// Reference box blur written the slow way.
fn naive_blur(src: &PixelBuffer, r: u32) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    PixelBuffer::from_fn(w, h, |x, y| {
        if x < r || y < r || x + r >= w || y + r >= h {
            return src.pixel(x, y);
        }
        let mut sums = [0u32; 4];
        for yy in y - r..=y + r {
            for xx in x - r..=x + r {
                let px = src.pixel(xx, yy);
                for c in 0..4 {
                    sums[c] += px[c] as u32;
                }
            }
        }
        let n = ((2 * r + 1) * (2 * r + 1)) as f64;
        sums.map(|s| (s as f64 / n).round_ties_even() as u8)
    })
    .unwrap()
}

#[test]
fn test_blur_radius_zero_is_identity() {
    let src = pattern(6, 6);
    assert_eq!(box_blur(src.clone(), 0), src);
}

#[test]
fn test_blur_matches_reference_window_mean() {
    let src = pattern(12, 9);
    for r in 1..=3 {
        assert_eq!(box_blur(src.clone(), r), naive_blur(&src, r), "radius {r}");
    }
}

#[test]
fn test_blur_border_within_radius_unchanged() {
    let src = pattern(11, 11);
    let out = box_blur(src.clone(), 2);
    for (x, y) in border_pixels(11, 11, 2) {
        assert_eq!(out.pixel(x, y), src.pixel(x, y), "pixel ({x}, {y})");
    }
}

#[test]
fn test_blur_averages_alpha() {
    let src = PixelBuffer::from_fn(3, 3, |x, y| {
        if x == 1 && y == 1 {
            [0, 0, 0, 0]
        } else {
            [90, 90, 90, 90]
        }
    })
    .unwrap();
    // 8 * 90 / 9 = 80
    assert_eq!(box_blur(src, 1).pixel(1, 1), [80, 80, 80, 80]);
}

#[test]
fn test_blur_window_larger_than_image_is_identity() {
    let src = pattern(4, 10);
    assert_eq!(box_blur(src.clone(), 2), src);
}

// ---------------------------------------------------------------------------
// edge_detect
// ---------------------------------------------------------------------------

#[test]
fn test_edge_detect_checkerboard() {
    let out = edge_detect(&checkerboard(4, 4, 2), 0.1);
    for (x, y) in border_pixels(4, 4, 1) {
        assert_eq!(out.pixel(x, y), [0, 0, 0, 0], "border ({x}, {y})");
    }
    for y in 1..3 {
        for x in 1..3 {
            assert_eq!(out.pixel(x, y), WHITE, "interior ({x}, {y})");
        }
    }
}

#[test]
fn test_edge_detect_uniform_regions_black() {
    let out = edge_detect(&split_vertical(8, 8), 0.1);
    for y in 1..7 {
        for x in [1, 2, 5, 6] {
            assert_eq!(out.pixel(x, y), [0, 0, 0, 255], "flat ({x}, {y})");
        }
        for x in [3, 4] {
            assert_eq!(out.pixel(x, y), WHITE, "edge ({x}, {y})");
        }
    }
}

#[test]
fn test_edge_detect_keeps_interior_alpha() {
    let src = PixelBuffer::from_fn(5, 5, |x, _| {
        if x < 2 {
            [0, 0, 0, 40]
        } else {
            [255, 255, 255, 40]
        }
    })
    .unwrap();
    let out = edge_detect(&src, 0.1);
    assert_eq!(out.pixel(2, 2), [255, 255, 255, 40]);
    assert_eq!(out.pixel(0, 2), [0, 0, 0, 0]);
}

#[test]
fn test_edge_detect_threshold_above_max_is_all_black() {
    let out = edge_detect(&split_vertical(8, 8), 5.0);
    for y in 1..7 {
        for x in 1..7 {
            assert_eq!(out.pixel(x, y), [0, 0, 0, 255]);
        }
    }
}

#[test]
fn test_edge_detect_tiny_image_is_all_border() {
    let out = edge_detect(&solid(2, 3, WHITE), 0.1);
    assert!(out.samples().iter().all(|&v| v == 0));
}

// ---------------------------------------------------------------------------
// emboss
// ---------------------------------------------------------------------------

#[test]
fn test_emboss_border_copied() {
    let src = pattern(7, 6);
    let out = emboss(&src, 1.0);
    for (x, y) in border_pixels(7, 6, 1) {
        assert_eq!(out.pixel(x, y), src.pixel(x, y));
    }
}

#[test]
fn test_emboss_uniform_interior() {
    // Kernel weights sum to 1: 100 * 1 + 128 = 228.
    let out = emboss(&solid(4, 4, [100, 10, 200, 77]), 1.0);
    assert_eq!(out.pixel(1, 1), [228, 138, 255, 77]);
    let flat = emboss(&solid(4, 4, [100, 10, 200, 77]), 0.0);
    assert_eq!(flat.pixel(2, 2), [128, 128, 128, 77]);
}

#[test]
fn test_emboss_diagonal_edge() {
    // Bright bottom-right neighbours push the sum up, dark ones pull it down.
    let src = PixelBuffer::from_fn(3, 3, |x, y| {
        if x + y >= 3 {
            [60, 60, 60, 255]
        } else {
            [0, 0, 0, 255]
        }
    })
    .unwrap();
    // Weights on bright pixels: (2,1)=1, (1,2)=1, (2,2)=2 → 4 * 60 = 240 → 368 → 255
    assert_eq!(emboss(&src, 1.0).pixel(1, 1), [255, 255, 255, 255]);
    // Half strength: 120 + 128 = 248
    assert_eq!(emboss(&src, 0.5).pixel(1, 1), [248, 248, 248, 255]);
}

// ---------------------------------------------------------------------------
// vintage
// ---------------------------------------------------------------------------

#[test]
fn test_vintage_without_grain_is_fixed_sepia() {
    let src = pattern(6, 6);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(vintage(src.clone(), 0.0, &mut rng), sepia(src, 0.7));
}

#[test]
fn test_vintage_seeded_is_reproducible() {
    let src = pattern(16, 16);
    let a = vintage(src.clone(), 0.5, &mut StdRng::seed_from_u64(42));
    let b = vintage(src.clone(), 0.5, &mut StdRng::seed_from_u64(42));
    let c = vintage(src, 0.5, &mut StdRng::seed_from_u64(43));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_vintage_grain_is_bounded_and_shared_per_pixel() {
    let src = solid(16, 16, [120, 120, 120, 255]);
    let base = sepia(src.clone(), 0.7).pixel(0, 0);
    let out = vintage(src, 0.2, &mut StdRng::seed_from_u64(7));
    // ±0.2*255/2 = ±25.5, plus one for rounding.
    for y in 0..16 {
        for x in 0..16 {
            let px = out.pixel(x, y);
            let deltas: Vec<i32> = (0..3).map(|c| px[c] as i32 - base[c] as i32).collect();
            for d in &deltas {
                assert!(d.abs() <= 26, "delta {d} at ({x}, {y})");
            }
            assert!((deltas[0] - deltas[1]).abs() <= 1);
            assert!((deltas[1] - deltas[2]).abs() <= 1);
            assert_eq!(px[3], 255);
        }
    }
}

// ---------------------------------------------------------------------------
// neon_glow
// ---------------------------------------------------------------------------

#[test]
fn test_neon_glow_only_boosts_bright_pixels() {
    assert_eq!(neon_glow(single([200, 200, 200, 3]), 1.2).pixel(0, 0), [240, 240, 240, 3]);
    assert_eq!(neon_glow(single([100, 100, 100, 3]), 1.2).pixel(0, 0), [100, 100, 100, 3]);
    // Mean exactly 128 is not above the threshold.
    assert_eq!(neon_glow(single([128, 128, 128, 3]), 2.0).pixel(0, 0), [128, 128, 128, 3]);
    assert_eq!(neon_glow(single([250, 200, 120, 3]), 1.5).pixel(0, 0), [255, 255, 180, 3]);
}

// ---------------------------------------------------------------------------
// large buffers (row-parallel path)
// ---------------------------------------------------------------------------

#[test]
fn test_parallel_path_matches_formula() {
    let src = pattern(300, 240);
    let out = brightness(src.clone(), 0.5);
    for (y, x) in [(0, 0), (17, 211), (239, 299), (120, 150)] {
        let s = src.pixel(x, y);
        let o = out.pixel(x, y);
        for c in 0..3 {
            assert_eq!(o[c], (s[c] as f32 * 0.5).round_ties_even() as u8);
        }
        assert_eq!(o[3], s[3]);
    }
}

#[test]
fn test_parallel_blur_matches_reference() {
    let src = pattern(260, 256);
    let out = box_blur(src.clone(), 1);
    let reference = naive_blur(&src, 1);
    assert_eq!(out, reference);
}
