//! Export of the composited annotation image.
//!
//! This module provides:
//! - PNG encoding of rendered pixel buffers
//! - File delivery with chrono-templated filenames
//! - Trait seams so the shell (or tests) can swap the encoder and the sink

pub mod dependencies;
pub mod file;
pub mod types;

pub use dependencies::{ExportEncoder, ExportSink, FileSink, PngEncoder};
pub use file::FileSaveConfig;
pub use types::{ExportError, ExportResult};
