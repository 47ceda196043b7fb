use crate::buffer::PixelBuffer;
use crate::consts::{EMBOSS_KERNEL, MID_GREY};

use super::{map_neighborhood, store};

/// 3x3 emboss on R, G, B: `sum * strength + 128`.
///
/// Alpha is copied, and the 1-pixel border is copied unchanged.
pub fn emboss(buffer: &PixelBuffer, strength: f32) -> PixelBuffer {
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let src = buffer.data();

    map_neighborhood(w, h, |x, y| {
        let mut px = [src[[y, x, 0]], src[[y, x, 1]], src[[y, x, 2]], src[[y, x, 3]]];
        if x == 0 || y == 0 || x + 1 >= w || y + 1 >= h {
            return px;
        }
        for (c, out) in px.iter_mut().take(3).enumerate() {
            let mut sum = 0.0f32;
            for (ky, row) in EMBOSS_KERNEL.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    sum += weight * src[[y + ky - 1, x + kx - 1, c]] as f32;
                }
            }
            *out = store(sum * strength + MID_GREY);
        }
        px
    })
}
