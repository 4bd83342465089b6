//! Scene compositing: base image, committed shapes, affordances and preview.
//!
//! [`render_scene`] is deterministic: identical scenes produce identical
//! pixels. Everything happens in unscaled image space; display zoom belongs
//! to whoever shows the buffer.

use super::color::Color;
use super::font::FontDescriptor;
use super::render;
use super::shape::Shape;
use crate::image::BaseImage;
use crate::util::Rect;
use thiserror::Error;

/// Errors raised while rasterizing a scene.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render a {width}x{height} canvas")]
    ZeroSize { width: u32, height: u32 },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("could not borrow surface pixels: {0}")]
    Borrow(#[from] cairo::BorrowError),
}

/// Uncommitted geometry drawn on top of everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview<'a> {
    /// A shape being dragged out by rect/ellipse/arrow tools
    Shape(Shape),
    /// The live pen stroke, borrowed from the controller
    Stroke {
        points: &'a [(f64, f64)],
        color: Color,
        width: f64,
    },
    /// Crop region being dragged out
    Crop(Rect),
}

/// Everything the compositor needs for one frame.
#[derive(Debug, Clone)]
pub struct Scene<'a> {
    pub image: Option<&'a BaseImage>,
    pub shapes: &'a [Shape],
    pub font: &'a FontDescriptor,
    pub preview: Option<Preview<'a>>,
    /// Index of the selected shape, drawn with outline and handles
    pub selected: Option<usize>,
    /// Index of the Text shape currently shown by the edit overlay
    pub editing: Option<usize>,
    /// Committed crop region
    pub crop: Option<Rect>,
}

impl<'a> Scene<'a> {
    /// Scene with only an image and shapes; no affordances.
    pub fn new(image: Option<&'a BaseImage>, shapes: &'a [Shape], font: &'a FontDescriptor) -> Self {
        Self {
            image,
            shapes,
            font,
            preview: None,
            selected: None,
            editing: None,
            crop: None,
        }
    }
}

/// Composites a scene onto a Cairo context.
///
/// Order: clear, base image, shapes (minus the text under edit), selection
/// affordances, crop overlay, preview.
pub fn render_scene(ctx: &cairo::Context, scene: &Scene<'_>) -> Result<(), RenderError> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Clear);
    ctx.paint()?;
    ctx.restore()?;

    if let Some(image) = scene.image {
        ctx.set_source_surface(image.surface(), 0.0, 0.0)?;
        ctx.paint()?;
    }

    let editing = scene
        .editing
        .filter(|&index| matches!(scene.shapes.get(index), Some(Shape::Text { .. })));
    render::render_shapes(ctx, scene.shapes, scene.font, editing);

    if let Some(index) = scene.selected
        && editing != Some(index)
        && let Some(shape) = scene.shapes.get(index)
    {
        render::render_selection(ctx, shape);
    }

    let canvas = scene
        .image
        .map(|image| (image.width() as f64, image.height() as f64));

    match &scene.preview {
        Some(Preview::Shape(shape)) => render::render_shape(ctx, shape, scene.font),
        Some(Preview::Stroke {
            points,
            color,
            width,
        }) => render::render_pen_borrowed(ctx, points, *color, *width),
        Some(Preview::Crop(_)) | None => {}
    }

    // A crop being dragged replaces the committed one on screen
    let crop = match &scene.preview {
        Some(Preview::Crop(rect)) => Some(*rect),
        _ => scene.crop,
    };
    if let (Some(crop), Some((width, height))) = (crop, canvas) {
        render::render_crop_overlay(ctx, crop, width, height);
    }

    ctx.status()?;
    Ok(())
}

/// Renders a scene into a fresh ARGB32 buffer of the given size.
pub fn render_to_pixels(
    scene: &Scene<'_>,
    width: u32,
    height: u32,
) -> Result<PixelBuffer, RenderError> {
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(RenderError::ZeroSize { width, height });
    }

    let mut surface =
        cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
    {
        let ctx = cairo::Context::new(&surface)?;
        render_scene(&ctx, scene)?;
    }
    surface.flush();

    let stride = surface.stride() as usize;
    let data = surface.data()?.to_vec();

    Ok(PixelBuffer {
        width,
        height,
        stride,
        data,
    })
}

/// Rendered pixels: premultiplied ARGB32 in native byte order, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    /// Bytes per row
    pub stride: usize,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Packed `0xAARRGGBB` value of a pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * 4;
        let bytes = self.data.get(offset..offset + 4)?;
        Some(u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Copies the pixels covered by `region`, snapped outward to whole pixels.
    ///
    /// Returns `None` when the region does not overlap the buffer.
    pub fn crop(&self, region: Rect) -> Option<PixelBuffer> {
        let bounds = region.clamp_to_bounds(self.width as f64, self.height as f64)?;
        let x0 = bounds.x.floor() as usize;
        let y0 = bounds.y.floor() as usize;
        let x1 = (bounds.right().ceil() as usize).min(self.width as usize);
        let y1 = (bounds.bottom().ceil() as usize).min(self.height as usize);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        let width = x1 - x0;
        let height = y1 - y0;
        let stride = width * 4;
        let mut data = Vec::with_capacity(stride * height);
        for row in y0..y1 {
            let start = row * self.stride + x0 * 4;
            data.extend_from_slice(&self.data[start..start + stride]);
        }

        Some(PixelBuffer {
            width: width as u32,
            height: height as u32,
            stride,
            data,
        })
    }

    /// Wraps a copy of the pixels in a Cairo surface for encoding.
    pub fn to_surface(&self) -> Result<cairo::ImageSurface, RenderError> {
        let surface = cairo::ImageSurface::create_for_data(
            self.data.clone(),
            cairo::Format::ARgb32,
            self.width as i32,
            self.height as i32,
            self.stride as i32,
        )?;
        Ok(surface)
    }
}
