use crate::draw::{HandleId, Shape, hit};
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::Rect;
use log::debug;

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a pointer press at image coordinates (x, y).
    ///
    /// # Behavior
    /// - Ends an active text edit session first (same rules as blur)
    /// - Select tool: grabs a resize handle of the selected shape, else selects
    ///   and starts dragging the topmost shape under the pointer, else clears
    ///   the selection
    /// - Shape and crop tools: start dragging out geometry
    /// - Text tool: appends an empty Text shape and starts editing it
    /// - Right button: cancels an in-progress draw gesture
    ///
    /// Ignored while no image is loaded or when (x, y) is not finite.
    pub fn on_pointer_down(&mut self, button: MouseButton, x: f64, y: f64) {
        if !self.accepts_pointer(x, y) {
            return;
        }

        match button {
            MouseButton::Left => {}
            MouseButton::Right => {
                self.cancel_gesture();
                return;
            }
            MouseButton::Middle => return,
        }

        if matches!(self.state, DrawingState::EditingText { .. }) {
            self.end_text_edit();
        }
        if !matches!(self.state, DrawingState::Idle) {
            return;
        }

        match self.current_tool {
            Tool::Select => self.begin_select(x, y),
            Tool::Text => self.begin_text(x, y),
            tool @ (Tool::Rect | Tool::Ellipse | Tool::Arrow | Tool::Pen | Tool::Crop) => {
                self.clear_selection();
                let points = if tool == Tool::Pen {
                    vec![(x, y)]
                } else {
                    Vec::new()
                };
                self.state = DrawingState::Drawing {
                    tool,
                    start_x: x,
                    start_y: y,
                    current_x: x,
                    current_y: y,
                    points,
                };
                self.needs_redraw = true;
            }
        }
    }

    fn begin_select(&mut self, x: f64, y: f64) {
        if let Some(index) = self.selected
            && let Some(shape) = self.frame.get(index)
            && let Some(handle) = hit::handle_at(shape, x, y)
            && let Some((fixed_x, fixed_y)) = resize_anchor(shape, handle)
        {
            self.history.checkpoint(&self.frame);
            self.state = DrawingState::Resizing {
                index,
                handle,
                fixed_x,
                fixed_y,
            };
            debug!("Resizing {} via {}", shape.kind_name(), handle.as_str());
            return;
        }

        match self.frame.topmost_at(x, y) {
            Some(index) => {
                let (ax, ay) = self.frame.shapes[index].anchor();
                self.select(index);
                self.state = DrawingState::Dragging {
                    index,
                    offset_x: x - ax,
                    offset_y: y - ay,
                    checkpointed: false,
                };
            }
            None => self.clear_selection(),
        }
    }

    /// Processes pointer motion at image coordinates (x, y).
    ///
    /// # Behavior
    /// - Drawing: updates the live position; the pen tool appends the point
    /// - Dragging: moves the selected shape so its anchor keeps the grab offset
    /// - Resizing: recomputes the shape from the fixed corner and the pointer
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        if !self.accepts_pointer(x, y) {
            return;
        }

        match &mut self.state {
            DrawingState::Drawing {
                tool,
                current_x,
                current_y,
                points,
                ..
            } => {
                *current_x = x;
                *current_y = y;
                if *tool == Tool::Pen {
                    points.push((x, y));
                }
                self.needs_redraw = true;
            }
            DrawingState::Dragging {
                index,
                offset_x,
                offset_y,
                checkpointed,
            } => {
                let (index, target) = (*index, (x - *offset_x, y - *offset_y));
                let first_move = !*checkpointed;
                if self.drag_to(index, target, first_move)
                    && let DrawingState::Dragging { checkpointed, .. } = &mut self.state
                {
                    *checkpointed = true;
                }
            }
            DrawingState::Resizing {
                index,
                handle,
                fixed_x,
                fixed_y,
            } => {
                let (index, handle, fixed) = (*index, *handle, (*fixed_x, *fixed_y));
                let constrain = self.modifiers.shift;
                if let Some(shape) = self.frame.get_mut(index)
                    && apply_resize(shape, handle, fixed, (x, y), constrain)
                {
                    self.needs_redraw = true;
                }
            }
            DrawingState::Idle | DrawingState::EditingText { .. } => {}
        }
    }

    /// Pointer events need a loaded image and finite coordinates; anything
    /// else would write NaN geometry into shapes already in the list.
    fn accepts_pointer(&self, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            debug!("Ignoring pointer event at non-finite ({}, {})", x, y);
            return false;
        }
        self.image.is_some()
    }

    /// Moves shape `index` so its anchor lands on `target`.
    ///
    /// Pushes the pre-drag snapshot on the first real movement when
    /// `checkpoint` is set. Returns true if the shape moved.
    fn drag_to(&mut self, index: usize, target: (f64, f64), checkpoint: bool) -> bool {
        let Some((ax, ay)) = self.frame.get(index).map(Shape::anchor) else {
            return false;
        };
        let (dx, dy) = (target.0 - ax, target.1 - ay);
        if dx == 0.0 && dy == 0.0 {
            return false;
        }

        if checkpoint {
            self.history.checkpoint(&self.frame);
        }
        if let Some(shape) = self.frame.get_mut(index) {
            shape.translate(dx, dy);
        }
        self.needs_redraw = true;
        true
    }

    /// Processes a pointer release at image coordinates (x, y).
    ///
    /// Finishes the current gesture: draw gestures commit their shape (or
    /// crop region), drag and resize simply end.
    pub fn on_pointer_up(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left || !self.accepts_pointer(x, y) {
            return;
        }

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing {
                tool: Tool::Crop,
                start_x,
                start_y,
                ..
            } => self.commit_crop(Rect::from_corners(start_x, start_y, x, y)),
            DrawingState::Drawing {
                tool,
                start_x,
                start_y,
                points,
                ..
            } => {
                let shape = if tool == Tool::Pen {
                    Some(Shape::Pen {
                        points,
                        color: self.current_color,
                        stroke_width: self.current_thickness,
                    })
                } else {
                    self.shape_from_drag(tool, (start_x, start_y), (x, y))
                };
                if let Some(shape) = shape {
                    self.commit_shape(shape);
                }
                self.needs_redraw = true;
            }
            DrawingState::Dragging { .. } | DrawingState::Resizing { .. } => {
                self.needs_redraw = true;
            }
            other @ (DrawingState::Idle | DrawingState::EditingText { .. }) => {
                self.state = other;
            }
        }
    }

    /// Checkpoints and appends a finished shape; invalid geometry is dropped.
    pub(super) fn commit_shape(&mut self, shape: Shape) -> Option<usize> {
        if let Err(err) = shape.validate() {
            log::warn!("Discarding {}: {}", shape.kind_name(), err);
            return None;
        }
        self.history.checkpoint(&self.frame);
        let kind = shape.kind_name();
        match self.frame.push(shape) {
            Ok(index) => {
                debug!("Committed {} at index {}", kind, index);
                Some(index)
            }
            Err(_) => {
                self.history.discard_last();
                None
            }
        }
    }

    fn commit_crop(&mut self, region: Rect) {
        let Some((width, height)) = self.image_size() else {
            return;
        };
        self.crop = region.clamp_to_bounds(width as f64, height as f64);
        match self.crop {
            Some(crop) => debug!(
                "Crop set to {:.0}x{:.0} at ({:.0}, {:.0})",
                crop.width, crop.height, crop.x, crop.y
            ),
            None => debug!("Degenerate crop region ignored"),
        }
        self.needs_redraw = true;
    }

    /// Processes a double click: with the select tool, enters edit mode on
    /// the topmost Text shape under the pointer.
    pub fn on_double_click(&mut self, x: f64, y: f64) {
        if !self.accepts_pointer(x, y) || self.current_tool != Tool::Select {
            return;
        }
        if matches!(self.state, DrawingState::EditingText { .. }) {
            self.end_text_edit();
        }
        if !matches!(self.state, DrawingState::Idle) {
            return;
        }

        if let Some(index) = self.frame.topmost_at(x, y)
            && matches!(self.frame.shapes[index], Shape::Text { .. })
        {
            self.begin_text_edit(index, false);
        }
    }
}

/// Point that stays fixed while `handle` of `shape` is dragged.
///
/// Boxed shapes keep the opposite corner of their normalized box; text keeps
/// the top-left of its derived box and only resizes through `br`. Arrows
/// move endpoints directly, pen strokes have no handles.
fn resize_anchor(shape: &Shape, handle: HandleId) -> Option<(f64, f64)> {
    match shape {
        Shape::Rect { .. } | Shape::Ellipse { .. } => {
            let rect = hit::shape_box(shape)?;
            match handle {
                HandleId::TopLeft => Some((rect.right(), rect.bottom())),
                HandleId::TopRight => Some((rect.x, rect.bottom())),
                HandleId::BottomLeft => Some((rect.right(), rect.y)),
                HandleId::BottomRight => Some((rect.x, rect.y)),
                HandleId::Start | HandleId::End => None,
            }
        }
        Shape::Text { .. } => match handle {
            HandleId::BottomRight => hit::shape_box(shape).map(|rect| (rect.x, rect.y)),
            _ => None,
        },
        Shape::Arrow { sx, sy, ex, ey, .. } => match handle {
            HandleId::Start => Some((*ex, *ey)),
            HandleId::End => Some((*sx, *sy)),
            _ => None,
        },
        Shape::Pen { .. } => None,
    }
}

/// Applies one resize step. Returns true if the shape changed.
fn apply_resize(
    shape: &mut Shape,
    handle: HandleId,
    fixed: (f64, f64),
    pointer: (f64, f64),
    constrain: bool,
) -> bool {
    let (fx, fy) = fixed;
    let (px, py) = pointer;
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            ..
        }
        | Shape::Ellipse {
            x,
            y,
            width,
            height,
            ..
        } => {
            let (mut dx, mut dy) = (px - fx, py - fy);
            if constrain {
                (dx, dy) = crate::util::constrain_square(dx, dy);
            }
            let rect = Rect::normalized(fx, fy, dx, dy);
            *x = rect.x;
            *y = rect.y;
            *width = rect.width;
            *height = rect.height;
            true
        }
        Shape::Arrow { sx, sy, ex, ey, .. } => {
            match handle {
                HandleId::Start => (*sx, *sy) = (px, py),
                HandleId::End => (*ex, *ey) = (px, py),
                _ => return false,
            }
            true
        }
        Shape::Text { y, font_size, .. } => {
            let size = py - fy;
            if size < super::core::MIN_FONT_SIZE {
                return false;
            }
            *font_size = size;
            *y = fy + size;
            true
        }
        Shape::Pen { .. } => false,
    }
}
