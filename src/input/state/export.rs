use crate::draw::{PixelBuffer, render_to_pixels};
use crate::export::{ExportEncoder, ExportError, ExportResult, ExportSink};
use crate::util::Rect;
use log::info;

use super::{DrawingState, InputState};

/// Hides selection, edit and crop affordances for its lifetime and puts
/// them back on drop, whichever way the export exits.
struct AffordanceGuard<'a> {
    input: &'a mut InputState,
    selected: Option<usize>,
    state: DrawingState,
    crop: Option<Rect>,
}

impl<'a> AffordanceGuard<'a> {
    fn suppress(input: &'a mut InputState) -> Self {
        let selected = input.selected.take();
        let state = std::mem::replace(&mut input.state, DrawingState::Idle);
        let crop = input.crop.take();
        Self {
            input,
            selected,
            state,
            crop,
        }
    }

    /// Renders the bare composite at native resolution, cropped if a crop
    /// region is committed.
    fn render(&self) -> Result<PixelBuffer, ExportError> {
        let image = self.input.image.as_ref().ok_or(ExportError::NoImage)?;
        let scene = self.input.scene();
        let pixels = render_to_pixels(&scene, image.width(), image.height())?;
        match self.crop {
            Some(region) => pixels.crop(region).ok_or(ExportError::EmptyRegion),
            None => Ok(pixels),
        }
    }
}

impl Drop for AffordanceGuard<'_> {
    fn drop(&mut self) {
        self.input.selected = self.selected;
        self.input.state = std::mem::replace(&mut self.state, DrawingState::Idle);
        self.input.crop = self.crop;
    }
}

impl InputState {
    /// Renders the export pixels: no selection outline, handles, preview or
    /// crop overlay, cropped to the committed crop region.
    ///
    /// Session state is unchanged afterwards, on success and on failure.
    pub fn export_pixels(&mut self) -> Result<PixelBuffer, ExportError> {
        AffordanceGuard::suppress(self).render()
    }

    /// Renders, encodes and delivers the annotated image.
    ///
    /// Affordances stay suppressed until delivery finishes; a failing encoder
    /// or sink leaves the session exactly as it was.
    pub fn export(
        &mut self,
        encoder: &dyn ExportEncoder,
        sink: &dyn ExportSink,
    ) -> Result<ExportResult, ExportError> {
        let guard = AffordanceGuard::suppress(self);
        let pixels = guard.render()?;
        let image_data = encoder.encode(&pixels)?;
        let saved_path = sink.deliver(&image_data)?;
        drop(guard);

        info!(
            "Exported {}x{} image ({} bytes)",
            pixels.width,
            pixels.height,
            image_data.len()
        );

        Ok(ExportResult {
            image_data,
            width: pixels.width,
            height: pixels.height,
            saved_path,
        })
    }
}
