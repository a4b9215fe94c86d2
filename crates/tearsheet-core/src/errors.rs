use std::time::Duration;
use thiserror::Error;

/// Errors surfaced while assembling a board into a document backend.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("document backend rejected the operation: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors from fetching or decoding image bytes.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset load failed: {0}")]
    LoadFailed(String),
    #[error("asset decode failed: {0}")]
    DecodeFailed(String),
}

/// A requested font face is not installed in the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("font unavailable: {family} {style}")]
pub struct FontUnavailable {
    pub family: String,
    pub style: String,
}

/// Errors from the vector rasterization bridge.
#[derive(Error, Debug)]
pub enum RasterError {
    /// The rendering context processed the request and reported a failure.
    #[error("rasterization failed: {0}")]
    Failed(String),
    /// No matching response arrived before the deadline.
    #[error("rasterization timed out after {0:?}")]
    Timeout(Duration),
    /// The rendering context is gone.
    #[error("rasterization context disconnected")]
    Disconnected,
}
