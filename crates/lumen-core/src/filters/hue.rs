use crate::buffer::PixelBuffer;

use super::{map_pixels, store};

/// Rotate hue by `degrees` in HSL space, wrapping into [0, 360).
///
/// Achromatic pixels (max == min) have no hue and are left unchanged.
pub fn hue_shift(buffer: PixelBuffer, degrees: f32) -> PixelBuffer {
    map_pixels(buffer, move |[r, g, b, a]| {
        let Some((h, s, l)) = rgb_to_hsl(r, g, b) else {
            return [r, g, b, a];
        };
        let h = (h + degrees).rem_euclid(360.0);
        let [r, g, b] = hsl_to_rgb(h, s, l);
        [r, g, b, a]
    })
}

/// RGB to HSL with hue in degrees [0, 360), saturation and lightness in [0, 1].
///
/// Returns `None` for achromatic input.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Option<(f32, f32, f32)> {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return None;
    }
    let l = (max + min) / 2.0;
    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    Some((h * 60.0, s, l))
}

/// HSL (hue in degrees) back to 8-bit RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [u8; 3] {
    if s == 0.0 {
        let v = store(l * 255.0);
        return [v, v, v];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h / 360.0;
    [
        store(hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0),
        store(hue_to_channel(p, q, h) * 255.0),
        store(hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
