use ndarray::Array2;

use crate::buffer::PixelBuffer;
use crate::consts::{SOBEL_X, SOBEL_Y};

use super::{luma, map_neighborhood};

/// Sobel edge detection on luma.
///
/// Interior pixels become white when the gradient magnitude exceeds
/// `threshold * 255`, black otherwise, keeping the source alpha. The 1-pixel
/// border is written as `(0, 0, 0, 0)`.
pub fn edge_detect(buffer: &PixelBuffer, threshold: f32) -> PixelBuffer {
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let src = buffer.data();
    let lum = Array2::from_shape_fn((h, w), |(y, x)| {
        luma(src[[y, x, 0]], src[[y, x, 1]], src[[y, x, 2]])
    });
    let cutoff = threshold * 255.0;

    map_neighborhood(w, h, |x, y| {
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return [0, 0, 0, 0];
        }
        let mut gx = 0.0f32;
        let mut gy = 0.0f32;
        for ky in 0..3 {
            for kx in 0..3 {
                let v = lum[[y + ky - 1, x + kx - 1]];
                gx += SOBEL_X[ky][kx] * v;
                gy += SOBEL_Y[ky][kx] * v;
            }
        }
        let v = if (gx * gx + gy * gy).sqrt() > cutoff { 255 } else { 0 };
        [v, v, v, src[[y, x, 3]]]
    })
}
