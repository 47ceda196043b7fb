use crate::buffer::PixelBuffer;
use crate::consts::MID_GREY;

use super::{map_pixels, store};

/// Multiply R, G, B by `level`. Alpha is untouched.
pub fn brightness(buffer: PixelBuffer, level: f32) -> PixelBuffer {
    map_pixels(buffer, move |[r, g, b, a]| {
        [
            store(r as f32 * level),
            store(g as f32 * level),
            store(b as f32 * level),
            a,
        ]
    })
}

/// Scale R, G, B around mid grey: `c * level + 128 * (1 - level)`.
pub fn contrast(buffer: PixelBuffer, level: f32) -> PixelBuffer {
    let offset = MID_GREY * (1.0 - level);
    map_pixels(buffer, move |[r, g, b, a]| {
        [
            store(r as f32 * level + offset),
            store(g as f32 * level + offset),
            store(b as f32 * level + offset),
            a,
        ]
    })
}
