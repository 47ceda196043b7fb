use rand::Rng;

use crate::buffer::PixelBuffer;
use crate::consts::VINTAGE_SEPIA_WARMTH;

use super::tone::sepia_pixel;
use super::{map_pixels, store};

/// Fixed-warmth sepia followed by film grain.
///
/// One noise sample per pixel, uniform in `[-grain*255/2, +grain*255/2)`,
/// is added to R, G and B. Output differs between runs unless `rng` is seeded.
pub fn vintage<R: Rng + ?Sized>(buffer: PixelBuffer, grain: f32, rng: &mut R) -> PixelBuffer {
    let mut buffer = map_pixels(buffer, |px| sepia_pixel(px, VINTAGE_SEPIA_WARMTH));
    let amplitude = grain * 255.0;
    {
        let mut data = buffer.data_mut();
        for mut row in data.outer_iter_mut() {
            for mut px in row.outer_iter_mut() {
                let noise = (rng.gen::<f32>() - 0.5) * amplitude;
                for c in 0..3 {
                    px[c] = store(px[c] as f32 + noise);
                }
            }
        }
    }
    buffer
}
