use std::path::{Path, PathBuf};

use crate::buffer::PixelBuffer;
use crate::error::{LumenError, Result};

use super::snapshot::{encode_snapshot, SnapshotConfig, SnapshotFormat};

const FRAME_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Decode an image file into an RGBA buffer.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| LumenError::DecodeFailure(format!("{}: {e}", path.display())))?;
    PixelBuffer::try_from(img.to_rgba8())
}

/// Decode an in-memory encoded image into an RGBA buffer.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer> {
    let img =
        image::load_from_memory(bytes).map_err(|e| LumenError::DecodeFailure(e.to_string()))?;
    PixelBuffer::try_from(img.to_rgba8())
}

/// Save a buffer, choosing the format from the file extension (PNG otherwise).
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    let config = SnapshotConfig {
        format: SnapshotFormat::from_path(path),
        ..Default::default()
    };
    encode_snapshot(buffer, &config)?.save(path)
}

/// Image files in `dir`, sorted by name. Used to build frame sequences.
pub fn frame_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| FRAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();
    Ok(paths)
}
