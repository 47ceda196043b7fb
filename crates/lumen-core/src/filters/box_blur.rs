use ndarray::Array3;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::consts::CHANNELS;

use super::map_neighborhood;

/// Box blur over a `(2r+1)²` window, all four channels.
///
/// Only pixels at least `radius` away from every edge are blurred; the rest
/// are copied unchanged. `radius == 0` is the identity.
pub fn box_blur(buffer: PixelBuffer, radius: u32) -> PixelBuffer {
    let r = radius as usize;
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    if r == 0 || 2 * r + 1 > w || 2 * r + 1 > h {
        debug!(radius, w, h, "Blur window leaves no interior pixels");
        return buffer;
    }

    let sums = integral_image(&buffer);
    let count = ((2 * r + 1) * (2 * r + 1)) as f64;
    let src = buffer.data();

    map_neighborhood(w, h, |x, y| {
        if x < r || y < r || x + r >= w || y + r >= h {
            return [src[[y, x, 0]], src[[y, x, 1]], src[[y, x, 2]], src[[y, x, 3]]];
        }
        let (top, left, bottom, right) = (y - r, x - r, y + r + 1, x + r + 1);
        let mut px = [0u8; 4];
        for (c, out) in px.iter_mut().enumerate() {
            let total = sums[[bottom, right, c]] + sums[[top, left, c]]
                - sums[[top, right, c]]
                - sums[[bottom, left, c]];
            *out = (total as f64 / count).round_ties_even().min(255.0) as u8;
        }
        px
    })
}

/// Summed-area table with a zero row and column: `s[y][x]` is the sum of all
/// samples above and left of `(x, y)`, exclusive.
fn integral_image(buffer: &PixelBuffer) -> Array3<u64> {
    let src = buffer.data();
    let (h, w, _) = src.dim();
    let mut sums = Array3::<u64>::zeros((h + 1, w + 1, CHANNELS));
    for y in 0..h {
        for x in 0..w {
            for c in 0..CHANNELS {
                sums[[y + 1, x + 1, c]] = src[[y, x, c]] as u64 + sums[[y, x + 1, c]]
                    + sums[[y + 1, x, c]]
                    - sums[[y, x, c]];
            }
        }
    }
    sums
}
