use thiserror::Error;

use crate::catalog::FilterKind;

#[derive(Error, Debug)]
pub enum LumenError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filter chain is full ({max} filters)")]
    CapacityExceeded { max: usize },

    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Invalid parameter `{name}` for {kind}: {reason}")]
    InvalidParameter {
        kind: FilterKind,
        name: String,
        reason: String,
    },

    #[error("Unknown filter kind: {0}")]
    UnknownFilter(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Sample buffer has {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Snapshot encoding failed: {0}")]
    Encode(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("No frame available")]
    NoFrame,
}

pub type Result<T> = std::result::Result<T, LumenError>;
