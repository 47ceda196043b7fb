//! Static registry of the filter kinds the pipeline knows about.
//!
//! The table is immutable and process-wide: adding a kind means adding an
//! entry here and a transform in [`crate::filters`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LumenError;

/// Every supported filter kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Grayscale,
    Sepia,
    Blur,
    Brightness,
    Contrast,
    Saturation,
    HueShift,
    EdgeDetect,
    Emboss,
    Vintage,
    NeonGlow,
}

impl FilterKind {
    pub const ALL: [FilterKind; 11] = [
        Self::Grayscale,
        Self::Sepia,
        Self::Blur,
        Self::Brightness,
        Self::Contrast,
        Self::Saturation,
        Self::HueShift,
        Self::EdgeDetect,
        Self::Emboss,
        Self::Vintage,
        Self::NeonGlow,
    ];

    /// Identifier used in configs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::HueShift => "hue_shift",
            Self::EdgeDetect => "edge_detect",
            Self::Emboss => "emboss",
            Self::Vintage => "vintage",
            Self::NeonGlow => "neon_glow",
        }
    }

    pub fn descriptor(self) -> &'static FilterDescriptor {
        descriptor(self)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = LumenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| LumenError::UnknownFilter(s.to_string()))
    }
}

/// A parameter value as supplied by a collaborator: a number or a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Numeric view. Text is parsed leniently (surrounding whitespace ignored).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Number(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Default value of a parameter, stored in the static table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamDefault {
    Number(f64),
    Text(&'static str),
}

impl ParamDefault {
    pub fn to_value(self) -> ParamValue {
        match self {
            Self::Number(n) => ParamValue::Number(n),
            Self::Text(s) => ParamValue::Text(s.to_string()),
        }
    }
}

/// Whether a parameter influences the transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamEffect {
    Active,
    /// Accepted and round-tripped, but the transform does not read it.
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub default: ParamDefault,
    /// Suggested slider range for the UI. Not enforced by the pipeline.
    pub range: Option<(f64, f64)>,
    pub effect: ParamEffect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterCategory {
    Color,
    Blur,
    Detect,
    Stylize,
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => write!(f, "Color"),
            Self::Blur => write!(f, "Blur"),
            Self::Detect => write!(f, "Detect"),
            Self::Stylize => write!(f, "Stylize"),
        }
    }
}

/// Catalog entry for one filter kind.
#[derive(Debug)]
pub struct FilterDescriptor {
    pub kind: FilterKind,
    pub display_name: &'static str,
    pub description: &'static str,
    pub category: FilterCategory,
    pub params: &'static [ParamSpec],
}

impl FilterDescriptor {
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn default_value(&self, name: &str) -> Option<ParamValue> {
        self.param(name).map(|p| p.default.to_value())
    }
}

const fn active(
    name: &'static str,
    label: &'static str,
    default: f64,
    min: f64,
    max: f64,
) -> ParamSpec {
    ParamSpec {
        name,
        label,
        default: ParamDefault::Number(default),
        range: Some((min, max)),
        effect: ParamEffect::Active,
    }
}

static CATALOG: [FilterDescriptor; 11] = [
    FilterDescriptor {
        kind: FilterKind::Grayscale,
        display_name: "Grayscale",
        description: "Blend each pixel toward its luma",
        category: FilterCategory::Color,
        params: &[active("strength", "Strength", 1.0, 0.0, 1.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Sepia,
        display_name: "Sepia",
        description: "Warm brown tone from the classic sepia matrix",
        category: FilterCategory::Color,
        params: &[active("warmth", "Warmth", 0.8, 0.0, 1.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Blur,
        display_name: "Blur",
        description: "Box blur; pixels within the radius of an edge are kept",
        category: FilterCategory::Blur,
        params: &[active("radius", "Radius", 5.0, 0.0, 20.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Brightness,
        display_name: "Brightness",
        description: "Multiply every color channel",
        category: FilterCategory::Color,
        params: &[active("level", "Level", 1.2, 0.0, 3.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Contrast,
        display_name: "Contrast",
        description: "Scale channels around mid grey",
        category: FilterCategory::Color,
        params: &[active("level", "Level", 1.2, 0.0, 3.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Saturation,
        display_name: "Saturation",
        description: "Push channels away from (or toward) luma",
        category: FilterCategory::Color,
        params: &[active("level", "Level", 1.5, 0.0, 3.0)],
    },
    FilterDescriptor {
        kind: FilterKind::HueShift,
        display_name: "Hue Shift",
        description: "Rotate hue in HSL space",
        category: FilterCategory::Color,
        params: &[active("degrees", "Degrees", 30.0, -180.0, 180.0)],
    },
    FilterDescriptor {
        kind: FilterKind::EdgeDetect,
        display_name: "Edge Detect",
        description: "Sobel edges on luma, white on black",
        category: FilterCategory::Detect,
        params: &[active("threshold", "Threshold", 0.1, 0.0, 1.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Emboss,
        display_name: "Emboss",
        description: "Directional relief around mid grey",
        category: FilterCategory::Stylize,
        params: &[active("strength", "Strength", 1.0, 0.0, 3.0)],
    },
    FilterDescriptor {
        kind: FilterKind::Vintage,
        display_name: "Vintage",
        description: "Fixed sepia with film grain",
        category: FilterCategory::Stylize,
        params: &[
            active("grain", "Grain", 0.2, 0.0, 1.0),
            ParamSpec {
                name: "vignette",
                label: "Vignette",
                default: ParamDefault::Number(0.5),
                range: Some((0.0, 1.0)),
                effect: ParamEffect::Ignored,
            },
        ],
    },
    FilterDescriptor {
        kind: FilterKind::NeonGlow,
        display_name: "Neon Glow",
        description: "Boost bright pixels",
        category: FilterCategory::Stylize,
        params: &[
            active("glow", "Glow", 1.5, 0.0, 3.0),
            ParamSpec {
                name: "color",
                label: "Tint",
                default: ParamDefault::Text("#00ffff"),
                range: None,
                effect: ParamEffect::Ignored,
            },
        ],
    },
];

/// Catalog entry for `kind`.
pub fn descriptor(kind: FilterKind) -> &'static FilterDescriptor {
    &CATALOG[kind as usize]
}

/// All catalog entries, in declaration order.
pub fn all() -> &'static [FilterDescriptor] {
    &CATALOG
}
