use crate::draw::{Preview, Shape};
use crate::input::tool::Tool;
use crate::util::{self, Rect};

use super::{DrawingState, InputState};

impl InputState {
    /// Returns the uncommitted geometry of the current draw gesture.
    ///
    /// The pen stroke is borrowed rather than cloned, so long strokes cost
    /// nothing extra per frame.
    pub fn preview(&self) -> Option<Preview<'_>> {
        let DrawingState::Drawing {
            tool,
            start_x,
            start_y,
            current_x,
            current_y,
            points,
        } = &self.state
        else {
            return None;
        };

        match tool {
            Tool::Pen => Some(Preview::Stroke {
                points,
                color: self.current_color,
                width: self.current_thickness,
            }),
            Tool::Crop => Some(Preview::Crop(Rect::from_corners(
                *start_x, *start_y, *current_x, *current_y,
            ))),
            _ => self
                .shape_from_drag(*tool, (*start_x, *start_y), (*current_x, *current_y))
                .map(Preview::Shape),
        }
    }

    /// Builds the shape a drag from `start` to `end` produces with `tool`.
    ///
    /// Rect and ellipse keep the signed extents of the drag; Shift squares
    /// them off towards the pointer's quadrant.
    pub(super) fn shape_from_drag(
        &self,
        tool: Tool,
        start: (f64, f64),
        end: (f64, f64),
    ) -> Option<Shape> {
        let (sx, sy) = start;
        let (ex, ey) = end;
        let (mut width, mut height) = (ex - sx, ey - sy);
        if self.modifiers.shift && tool.constrains_to_square() {
            (width, height) = util::constrain_square(width, height);
        }

        match tool {
            Tool::Rect => Some(Shape::Rect {
                x: sx,
                y: sy,
                width,
                height,
                color: self.current_color,
                stroke_width: self.current_thickness,
            }),
            Tool::Ellipse => Some(Shape::Ellipse {
                x: sx,
                y: sy,
                width,
                height,
                color: self.current_color,
                stroke_width: self.current_thickness,
            }),
            Tool::Arrow => Some(Shape::Arrow {
                sx,
                sy,
                ex,
                ey,
                color: self.current_color,
                stroke_width: self.current_thickness,
            }),
            Tool::Select | Tool::Pen | Tool::Text | Tool::Crop => None,
        }
    }
}
