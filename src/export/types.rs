//! Data types for image export.

use crate::draw::RenderError;
use std::path::PathBuf;
use thiserror::Error;

/// Result of a successful export.
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Encoded image bytes.
    pub image_data: Vec<u8>,
    /// Pixel width of the exported image (after cropping).
    pub width: u32,
    /// Pixel height of the exported image (after cropping).
    pub height: u32,
    /// Path the sink wrote to, if it writes files.
    pub saved_path: Option<PathBuf>,
}

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No image loaded")]
    NoImage,

    #[error("Crop region does not overlap the image")]
    EmptyRegion,

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Failed to save image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export sink failed: {0}")]
    Sink(String),
}
