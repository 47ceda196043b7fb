use crate::buffer::PixelBuffer;
use crate::consts::NEON_GLOW_THRESHOLD;

use super::{map_pixels, store};

/// Multiply R, G, B by `glow` for pixels whose RGB mean exceeds 128.
pub fn neon_glow(buffer: PixelBuffer, glow: f32) -> PixelBuffer {
    map_pixels(buffer, move |[r, g, b, a]| {
        let mean = (r as f32 + g as f32 + b as f32) / 3.0;
        if mean <= NEON_GLOW_THRESHOLD {
            return [r, g, b, a];
        }
        [
            store(r as f32 * glow),
            store(g as f32 * glow),
            store(b as f32 * glow),
            a,
        ]
    })
}
