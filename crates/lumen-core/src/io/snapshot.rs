use std::fmt;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::consts::DEFAULT_JPEG_QUALITY;
use crate::error::{LumenError, Result};

/// Container format of an exported snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy, alpha is dropped.
    Jpeg,
    Bmp,
}

impl SnapshotFormat {
    /// Pick a format from a file extension, defaulting to PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Self::Jpeg,
            Some("bmp") => Self::Bmp,
            _ => Self::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Bmp => "image/bmp",
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Jpeg => write!(f, "JPEG"),
            Self::Bmp => write!(f, "BMP"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub format: SnapshotFormat,
    /// JPEG quality, 1-100. Ignored by other formats.
    pub jpeg_quality: u8,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            format: SnapshotFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// A self-contained encoded still image, ready for display or download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub format: SnapshotFormat,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl Snapshot {
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Encode a buffer into a snapshot.
pub fn encode_snapshot(buffer: &PixelBuffer, config: &SnapshotConfig) -> Result<Snapshot> {
    let (w, h) = (buffer.width(), buffer.height());
    let mut bytes = Vec::new();
    let encoded = match config.format {
        SnapshotFormat::Png => PngEncoder::new(&mut bytes).write_image(
            buffer.samples(),
            w,
            h,
            ExtendedColorType::Rgba8,
        ),
        SnapshotFormat::Bmp => BmpEncoder::new(&mut bytes).write_image(
            buffer.samples(),
            w,
            h,
            ExtendedColorType::Rgba8,
        ),
        SnapshotFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(buffer.to_rgba_image()).to_rgb8();
            let quality = config.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut bytes, quality).write_image(
                rgb.as_raw(),
                w,
                h,
                ExtendedColorType::Rgb8,
            )
        }
    };
    encoded.map_err(|e| LumenError::Encode(e.to_string()))?;

    Ok(Snapshot {
        format: config.format,
        width: w,
        height: h,
        bytes,
    })
}
