pub mod box_blur;
pub mod edge_detect;
pub mod emboss;
pub mod hue;
pub mod levels;
pub mod neon_glow;
pub mod tone;
pub mod vintage;

use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayViewMut2, Axis};
use rand::Rng;

use crate::buffer::PixelBuffer;
use crate::catalog::{FilterKind, ParamValue};
use crate::chain::FilterInstance;
use crate::consts::{CHANNELS, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{LumenError, Result};

/// A filter with its effective parameters resolved to concrete types.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterStep {
    Grayscale { strength: f32 },
    Sepia { warmth: f32 },
    Blur { radius: u32 },
    Brightness { level: f32 },
    Contrast { level: f32 },
    Saturation { level: f32 },
    HueShift { degrees: f32 },
    EdgeDetect { threshold: f32 },
    Emboss { strength: f32 },
    /// `vignette` is carried but has no effect.
    Vintage { grain: f32, vignette: ParamValue },
    /// `color` is carried but has no effect.
    NeonGlow { glow: f32, color: ParamValue },
}

impl FilterStep {
    /// Resolve an instance's effective parameters.
    ///
    /// Fails with `InvalidParameter` when an active numeric parameter is
    /// missing, unparsable or non-finite, or when a blur radius is negative.
    pub fn resolve(instance: &FilterInstance) -> Result<Self> {
        let kind = instance.kind;
        let num = |name: &str| number(instance, name);
        let step = match kind {
            FilterKind::Grayscale => Self::Grayscale {
                strength: num("strength")?,
            },
            FilterKind::Sepia => Self::Sepia {
                warmth: num("warmth")?,
            },
            FilterKind::Blur => {
                let radius = num("radius")?;
                if radius < 0.0 {
                    return Err(invalid(kind, "radius", format!("{radius} is negative")));
                }
                Self::Blur {
                    radius: radius.floor() as u32,
                }
            }
            FilterKind::Brightness => Self::Brightness {
                level: num("level")?,
            },
            FilterKind::Contrast => Self::Contrast {
                level: num("level")?,
            },
            FilterKind::Saturation => Self::Saturation {
                level: num("level")?,
            },
            FilterKind::HueShift => Self::HueShift {
                degrees: num("degrees")?,
            },
            FilterKind::EdgeDetect => Self::EdgeDetect {
                threshold: num("threshold")?,
            },
            FilterKind::Emboss => Self::Emboss {
                strength: num("strength")?,
            },
            FilterKind::Vintage => Self::Vintage {
                grain: num("grain")?,
                vignette: passthrough(instance, "vignette"),
            },
            FilterKind::NeonGlow => Self::NeonGlow {
                glow: num("glow")?,
                color: passthrough(instance, "color"),
            },
        };
        Ok(step)
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Grayscale { .. } => FilterKind::Grayscale,
            Self::Sepia { .. } => FilterKind::Sepia,
            Self::Blur { .. } => FilterKind::Blur,
            Self::Brightness { .. } => FilterKind::Brightness,
            Self::Contrast { .. } => FilterKind::Contrast,
            Self::Saturation { .. } => FilterKind::Saturation,
            Self::HueShift { .. } => FilterKind::HueShift,
            Self::EdgeDetect { .. } => FilterKind::EdgeDetect,
            Self::Emboss { .. } => FilterKind::Emboss,
            Self::Vintage { .. } => FilterKind::Vintage,
            Self::NeonGlow { .. } => FilterKind::NeonGlow,
        }
    }
}

fn invalid(kind: FilterKind, name: &str, reason: impl Into<String>) -> LumenError {
    LumenError::InvalidParameter {
        kind,
        name: name.to_string(),
        reason: reason.into(),
    }
}

fn number(instance: &FilterInstance, name: &str) -> Result<f32> {
    let kind = instance.kind;
    let value = instance
        .effective(name)
        .ok_or_else(|| invalid(kind, name, "missing"))?;
    let n = value
        .as_number()
        .ok_or_else(|| invalid(kind, name, format!("expected a number, got {value}")))?;
    if !n.is_finite() {
        return Err(invalid(kind, name, format!("{n} is not finite")));
    }
    Ok(n as f32)
}

fn passthrough(instance: &FilterInstance, name: &str) -> ParamValue {
    instance
        .effective(name)
        .unwrap_or_else(|| ParamValue::Text(String::new()))
}

/// Apply a single resolved filter step.
///
/// `rng` is only consulted by `Vintage`.
pub fn apply_filter_step<R: Rng + ?Sized>(
    buffer: PixelBuffer,
    step: &FilterStep,
    rng: &mut R,
) -> PixelBuffer {
    match step {
        FilterStep::Grayscale { strength } => tone::grayscale(buffer, *strength),
        FilterStep::Sepia { warmth } => tone::sepia(buffer, *warmth),
        FilterStep::Blur { radius } => box_blur::box_blur(buffer, *radius),
        FilterStep::Brightness { level } => levels::brightness(buffer, *level),
        FilterStep::Contrast { level } => levels::contrast(buffer, *level),
        FilterStep::Saturation { level } => tone::saturation(buffer, *level),
        FilterStep::HueShift { degrees } => hue::hue_shift(buffer, *degrees),
        FilterStep::EdgeDetect { threshold } => edge_detect::edge_detect(&buffer, *threshold),
        FilterStep::Emboss { strength } => emboss::emboss(&buffer, *strength),
        FilterStep::Vintage { grain, .. } => vintage::vintage(buffer, *grain, rng),
        FilterStep::NeonGlow { glow, .. } => neon_glow::neon_glow(buffer, *glow),
    }
}

/// BT.601 luma of an 8-bit RGB triple, unrounded.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f32 {
    LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32
}

/// Store a computed channel value: round half to even, then clamp to [0, 255].
#[inline]
pub(crate) fn store(v: f32) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

/// Rewrite every pixel in place.
pub(crate) fn map_pixels<F>(mut buffer: PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn([u8; 4]) -> [u8; 4] + Sync + Send,
{
    let parallel = buffer.pixel_count() >= PARALLEL_PIXEL_THRESHOLD;
    {
        let mut data = buffer.data_mut();
        if parallel {
            data.axis_iter_mut(Axis(0))
                .into_par_iter()
                .for_each(|mut row| map_row(&mut row, &f));
        } else {
            for mut row in data.axis_iter_mut(Axis(0)) {
                map_row(&mut row, &f);
            }
        }
    }
    buffer
}

fn map_row<F>(row: &mut ArrayViewMut2<'_, u8>, f: &F)
where
    F: Fn([u8; 4]) -> [u8; 4],
{
    for mut px in row.axis_iter_mut(Axis(0)) {
        let out = f([px[0], px[1], px[2], px[3]]);
        for (c, v) in out.into_iter().enumerate() {
            px[c] = v;
        }
    }
}

/// Build a new buffer of the same size where pixel (x, y) is `f(x, y)`.
pub(crate) fn map_neighborhood<F>(width: usize, height: usize, f: F) -> PixelBuffer
where
    F: Fn(usize, usize) -> [u8; 4] + Sync + Send,
{
    let mut out = Array3::<u8>::zeros((height, width, CHANNELS));
    let fill = |(y, mut row): (usize, ArrayViewMut2<'_, u8>)| {
        for x in 0..width {
            let px = f(x, y);
            for (c, v) in px.into_iter().enumerate() {
                row[[x, c]] = v;
            }
        }
    };
    if width * height >= PARALLEL_PIXEL_THRESHOLD {
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(fill);
    } else {
        out.axis_iter_mut(Axis(0)).enumerate().for_each(fill);
    }
    PixelBuffer::from_array(out)
}
