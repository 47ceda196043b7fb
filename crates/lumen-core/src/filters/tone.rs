use crate::buffer::PixelBuffer;
use crate::consts::SEPIA_MATRIX;

use super::{luma, map_pixels, store};

/// Blend each channel toward luma by `strength` (0 = identity, 1 = grey).
pub fn grayscale(buffer: PixelBuffer, strength: f32) -> PixelBuffer {
    map_pixels(buffer, move |[r, g, b, a]| {
        let y = luma(r, g, b);
        let blend = |c: u8| {
            let c = c as f32;
            store(c + (y - c) * strength)
        };
        [blend(r), blend(g), blend(b), a]
    })
}

/// Blend each channel toward the sepia matrix target by `warmth`.
pub fn sepia(buffer: PixelBuffer, warmth: f32) -> PixelBuffer {
    map_pixels(buffer, move |px| sepia_pixel(px, warmth))
}

/// Sepia for one pixel. Targets are capped at 255 before blending.
pub(crate) fn sepia_pixel([r, g, b, a]: [u8; 4], warmth: f32) -> [u8; 4] {
    let rgb = [r as f32, g as f32, b as f32];
    let mut out = [0u8, 0, 0, a];
    for (i, row) in SEPIA_MATRIX.iter().enumerate() {
        let target = (row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]).min(255.0);
        out[i] = store(rgb[i] + (target - rgb[i]) * warmth);
    }
    out
}

/// Scale each channel's distance from luma by `level`.
///
/// `level` 0 gives grey, 1 is the identity, above 1 boosts saturation.
pub fn saturation(buffer: PixelBuffer, level: f32) -> PixelBuffer {
    map_pixels(buffer, move |[r, g, b, a]| {
        let y = luma(r, g, b);
        let scale = |c: u8| store(y + (c as f32 - y) * level);
        [scale(r), scale(g), scale(b), a]
    })
}
