use std::path::{Path, PathBuf};

use crate::draw::PixelBuffer;
use crate::export::{
    file::{self, FileSaveConfig},
    types::ExportError,
};

/// Abstraction over turning rendered pixels into file bytes.
pub trait ExportEncoder {
    fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, ExportError>;
}

/// Abstraction over where encoded bytes end up (file, clipboard, download).
///
/// Returns the written path when the sink produces one.
pub trait ExportSink {
    fn deliver(&self, image_data: &[u8]) -> Result<Option<PathBuf>, ExportError>;
}

/// PNG encoding through Cairo's writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl ExportEncoder for PngEncoder {
    fn encode(&self, pixels: &PixelBuffer) -> Result<Vec<u8>, ExportError> {
        let surface = pixels.to_surface()?;
        let mut bytes = Vec::new();
        surface
            .write_to_png(&mut bytes)
            .map_err(|e| ExportError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

/// Writes exports to disk.
#[derive(Debug, Clone)]
pub enum FileSink {
    /// Always write to this exact path
    Path(PathBuf),
    /// Write into a directory under a generated, timestamped name
    Directory(FileSaveConfig),
}

impl FileSink {
    pub fn to_path(path: impl AsRef<Path>) -> Self {
        FileSink::Path(path.as_ref().to_path_buf())
    }
}

impl Default for FileSink {
    fn default() -> Self {
        FileSink::Directory(FileSaveConfig::default())
    }
}

impl ExportSink for FileSink {
    fn deliver(&self, image_data: &[u8]) -> Result<Option<PathBuf>, ExportError> {
        match self {
            FileSink::Path(path) => {
                if path.is_dir() {
                    return Err(ExportError::Sink(format!(
                        "{} is a directory, not an image file",
                        path.display()
                    )));
                }
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    file::ensure_directory_exists(parent)?;
                }
                file::write_image(image_data, path)?;
                Ok(Some(path.clone()))
            }
            FileSink::Directory(config) => file::save_image(image_data, config).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn png_encoder_writes_png_signature() {
        let pixels = PixelBuffer {
            width: 2,
            height: 2,
            stride: 8,
            data: vec![0xff; 16],
        };
        let bytes = PngEncoder.encode(&pixels).unwrap();
        assert_eq!(bytes[..8], PNG_SIGNATURE);
    }

    #[test]
    fn file_sink_writes_fixed_path() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sub").join("out.png");
        let sink = FileSink::to_path(&target);
        let written = sink.deliver(b"bytes").unwrap();
        assert_eq!(written.as_deref(), Some(target.as_path()));
        assert_eq!(std::fs::read(&target).unwrap(), b"bytes");
    }

    #[test]
    fn file_sink_rejects_directory_as_fixed_path() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::to_path(dir.path());
        let err = sink.deliver(b"bytes").unwrap_err();
        assert!(matches!(err, ExportError::Sink(_)));
        assert!(err.to_string().contains("is a directory"));
    }
}
