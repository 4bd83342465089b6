//! Decoded base image handed to the annotator by the image source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Margin kept around the image when fitting it into a viewport.
const VIEWPORT_MARGIN: f64 = 40.0;

/// Smallest zoom the fit calculation will request.
const MIN_FIT_SCALE: f64 = 0.1;

/// Errors that can occur while loading a base image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode PNG: {0}")]
    Decode(#[from] cairo::IoError),

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("could not borrow surface pixels: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

/// Raster image the annotations are drawn over.
///
/// Wraps a Cairo image surface so it can be painted at (0, 0) by the render
/// pipeline without conversion.
#[derive(Debug, Clone)]
pub struct BaseImage {
    surface: cairo::ImageSurface,
}

impl BaseImage {
    /// Decodes a PNG file from disk.
    pub fn from_png_file(path: &Path) -> Result<Self, ImageError> {
        let file = File::open(path)?;
        let image = Self::from_png_reader(&mut BufReader::new(file))?;
        log::info!(
            "Loaded {}x{} image from {}",
            image.width(),
            image.height(),
            path.display()
        );
        Ok(image)
    }

    /// Decodes a PNG stream.
    pub fn from_png_reader<R: Read>(reader: &mut R) -> Result<Self, ImageError> {
        let surface = cairo::ImageSurface::create_from_png(reader)?;
        Self::from_surface(surface)
    }

    /// Builds an image from straight (non-premultiplied) RGBA8 pixels, row-major.
    pub fn from_rgba(width: u32, height: u32, pixels: &[u8]) -> Result<Self, ImageError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let mut surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
        let stride = surface.stride() as usize;
        {
            let mut data = surface.data()?;
            for (row, src_row) in pixels.chunks_exact(width as usize * 4).enumerate() {
                let dst_row = &mut data[row * stride..row * stride + width as usize * 4];
                for (dst, src) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
                    dst.copy_from_slice(&premultiply(src[0], src[1], src[2], src[3]).to_ne_bytes());
                }
            }
        }

        Ok(Self { surface })
    }

    fn from_surface(surface: cairo::ImageSurface) -> Result<Self, ImageError> {
        let (width, height) = (surface.width(), surface.height());
        if width <= 0 || height <= 0 {
            return Err(ImageError::InvalidDimensions {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }
        Ok(Self { surface })
    }

    pub fn width(&self) -> u32 {
        self.surface.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height() as u32
    }

    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Zoom that fits the whole image inside a viewport.
    ///
    /// Never upscales, keeps a 40px margin, rounds down to one decimal and
    /// never goes below 0.1.
    pub fn fit_scale(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        let scale_x = (viewport_width - VIEWPORT_MARGIN) / self.width() as f64;
        let scale_y = (viewport_height - VIEWPORT_MARGIN) / self.height() as f64;
        let scale = scale_x.min(scale_y).min(1.0);
        ((scale * 10.0).floor() / 10.0).max(MIN_FIT_SCALE)
    }
}

/// Packs one straight RGBA pixel as premultiplied native-endian ARGB32.
fn premultiply(r: u8, g: u8, b: u8, a: u8) -> u32 {
    let scale = |c: u8| ((c as u32 * a as u32 + 127) / 255) & 0xff;
    ((a as u32) << 24) | (scale(r) << 16) | (scale(g) << 8) | scale(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_rejects_wrong_buffer_length() {
        let err = BaseImage::from_rgba(2, 2, &[0; 12]).unwrap_err();
        assert!(matches!(
            err,
            ImageError::BufferSize {
                expected: 16,
                actual: 12
            }
        ));
    }

    #[test]
    fn from_rgba_rejects_empty_image() {
        assert!(matches!(
            BaseImage::from_rgba(0, 4, &[]),
            Err(ImageError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn premultiply_scales_color_by_alpha() {
        assert_eq!(premultiply(255, 0, 0, 255), 0xffff0000);
        assert_eq!(premultiply(255, 255, 255, 0), 0);
        assert_eq!(premultiply(200, 100, 0, 128) >> 24, 128);
    }

    #[test]
    fn fit_scale_never_upscales() {
        let image = BaseImage::from_rgba(100, 50, &[255; 100 * 50 * 4]).unwrap();
        assert_eq!(image.fit_scale(2000.0, 2000.0), 1.0);
        // (540 - 40) / 100 = 5 vs (90 - 40) / 50 = 1 -> 1.0
        assert_eq!(image.fit_scale(540.0, 90.0), 1.0);
        // (110 - 40) / 100 = 0.7
        assert_eq!(image.fit_scale(110.0, 2000.0), 0.7);
        assert_eq!(image.fit_scale(10.0, 10.0), 0.1);
    }
}
