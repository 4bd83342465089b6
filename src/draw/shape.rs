//! Shape definitions for image annotations.

use super::color::Color;
use thiserror::Error;

/// Stroke width used when a shape carries no usable width.
pub const DEFAULT_STROKE_WIDTH: f64 = 3.0;

/// Font size used when a Text shape carries no usable size.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Represents a drawable annotation on top of the base image.
///
/// Each variant stores its own style captured at creation time, so later
/// changes to the active tool style never affect existing shapes. All
/// coordinates are in image pixel space.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Rectangle outline anchored at (x, y)
    Rect {
        /// Anchor X coordinate (where the drag started)
        x: f64,
        /// Anchor Y coordinate (where the drag started)
        y: f64,
        /// Signed width; negative extends left of the anchor
        width: f64,
        /// Signed height; negative extends up from the anchor
        height: f64,
        /// Stroke color
        color: Color,
        /// Stroke width in pixels
        stroke_width: f64,
    },
    /// Ellipse inscribed in the box anchored at (x, y)
    Ellipse {
        /// Anchor X coordinate of the bounding box
        x: f64,
        /// Anchor Y coordinate of the bounding box
        y: f64,
        /// Signed bounding box width
        width: f64,
        /// Signed bounding box height
        height: f64,
        /// Stroke color
        color: Color,
        /// Stroke width in pixels
        stroke_width: f64,
    },
    /// Directed segment with the arrowhead at the end point
    Arrow {
        /// Start (tail) X coordinate
        sx: f64,
        /// Start (tail) Y coordinate
        sy: f64,
        /// End (tip) X coordinate
        ex: f64,
        /// End (tip) Y coordinate
        ey: f64,
        /// Arrow color
        color: Color,
        /// Line thickness in pixels
        stroke_width: f64,
    },
    /// Freehand stroke - polyline through the sampled pointer positions
    Pen {
        /// Sequence of (x, y) coordinates, at least one
        points: Vec<(f64, f64)>,
        /// Stroke color
        color: Color,
        /// Line thickness in pixels
        stroke_width: f64,
    },
    /// Text annotation; (x, y) is the left end of the baseline
    Text {
        /// Baseline X coordinate
        x: f64,
        /// Baseline Y coordinate
        y: f64,
        /// Text content (single line)
        text: String,
        /// Fill color
        color: Color,
        /// Font size in image pixels
        font_size: f64,
    },
}

/// Style attributes reported to the style panel when a shape is selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    pub color: Color,
    pub stroke_width: f64,
    pub font_size: f64,
}

/// Reasons a shape is refused by the shape list.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("pen stroke has no points")]
    EmptyPath,

    #[error("{0} has a non-finite coordinate or style value")]
    NonFiniteCoordinate(&'static str),
}

impl Shape {
    /// Short lowercase name used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rect { .. } => "rect",
            Shape::Ellipse { .. } => "ellipse",
            Shape::Arrow { .. } => "arrow",
            Shape::Pen { .. } => "pen",
            Shape::Text { .. } => "text",
        }
    }

    /// Color used for rendering.
    pub fn color(&self) -> Color {
        match self {
            Shape::Rect { color, .. }
            | Shape::Ellipse { color, .. }
            | Shape::Arrow { color, .. }
            | Shape::Pen { color, .. }
            | Shape::Text { color, .. } => *color,
        }
    }

    /// Stroke width with the default substituted for unusable values.
    pub fn stroke_width(&self) -> f64 {
        match self {
            Shape::Rect { stroke_width, .. }
            | Shape::Ellipse { stroke_width, .. }
            | Shape::Arrow { stroke_width, .. }
            | Shape::Pen { stroke_width, .. } => effective_stroke_width(*stroke_width),
            Shape::Text { .. } => DEFAULT_STROKE_WIDTH,
        }
    }

    /// Font size with the default substituted for unusable values.
    pub fn font_size(&self) -> f64 {
        match self {
            Shape::Text { font_size, .. } => effective_font_size(*font_size),
            _ => DEFAULT_FONT_SIZE,
        }
    }

    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            color: self.color(),
            stroke_width: self.stroke_width(),
            font_size: self.font_size(),
        }
    }

    /// Reference point used to compute drag offsets.
    ///
    /// Rect/Ellipse/Text use their stored anchor, Arrow its start point and
    /// Pen its first point.
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            Shape::Rect { x, y, .. } | Shape::Ellipse { x, y, .. } | Shape::Text { x, y, .. } => {
                (*x, *y)
            }
            Shape::Arrow { sx, sy, .. } => (*sx, *sy),
            Shape::Pen { points, .. } => points.first().copied().unwrap_or((0.0, 0.0)),
        }
    }

    /// Moves the whole shape by (dx, dy), preserving its geometry.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Rect { x, y, .. } | Shape::Ellipse { x, y, .. } | Shape::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
            Shape::Arrow { sx, sy, ex, ey, .. } => {
                *sx += dx;
                *sy += dy;
                *ex += dx;
                *ey += dy;
            }
            Shape::Pen { points, .. } => {
                for (px, py) in points.iter_mut() {
                    *px += dx;
                    *py += dy;
                }
            }
        }
    }

    /// Checks that the shape may enter the shape list.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let finite = match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
                stroke_width,
                ..
            }
            | Shape::Ellipse {
                x,
                y,
                width,
                height,
                stroke_width,
                ..
            } => [x, y, width, height, stroke_width]
                .iter()
                .all(|v| v.is_finite()),
            Shape::Arrow {
                sx,
                sy,
                ex,
                ey,
                stroke_width,
                ..
            } => [sx, sy, ex, ey, stroke_width].iter().all(|v| v.is_finite()),
            Shape::Pen {
                points,
                stroke_width,
                ..
            } => {
                if points.is_empty() {
                    return Err(ShapeError::EmptyPath);
                }
                stroke_width.is_finite()
                    && points.iter().all(|(x, y)| x.is_finite() && y.is_finite())
            }
            Shape::Text {
                x, y, font_size, ..
            } => [x, y, font_size].iter().all(|v| v.is_finite()),
        };

        if finite {
            Ok(())
        } else {
            Err(ShapeError::NonFiniteCoordinate(self.kind_name()))
        }
    }

    /// Returns true for a Text shape whose content is empty or whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Shape::Text { text, .. } if text.trim().is_empty())
    }
}

pub(crate) fn effective_stroke_width(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        DEFAULT_STROKE_WIDTH
    }
}

pub(crate) fn effective_font_size(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        DEFAULT_FONT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    fn pen(points: Vec<(f64, f64)>) -> Shape {
        Shape::Pen {
            points,
            color: RED,
            stroke_width: 3.0,
        }
    }

    #[test]
    fn empty_pen_is_rejected() {
        assert_eq!(pen(Vec::new()).validate(), Err(ShapeError::EmptyPath));
        assert!(pen(vec![(1.0, 1.0)]).validate().is_ok());
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let rect = Shape::Rect {
            x: f64::NAN,
            y: 0.0,
            width: 10.0,
            height: 10.0,
            color: RED,
            stroke_width: 3.0,
        };
        assert_eq!(
            rect.validate(),
            Err(ShapeError::NonFiniteCoordinate("rect"))
        );

        let stroke = pen(vec![(0.0, 0.0), (f64::INFINITY, 2.0)]);
        assert!(stroke.validate().is_err());
    }

    #[test]
    fn translate_moves_every_pen_point() {
        let mut shape = pen(vec![(0.0, 0.0), (5.0, 5.0), (10.0, 0.0)]);
        shape.translate(2.0, -1.0);
        match shape {
            Shape::Pen { points, .. } => {
                assert_eq!(points, vec![(2.0, -1.0), (7.0, 4.0), (12.0, -1.0)])
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn translate_preserves_arrow_vector() {
        let mut arrow = Shape::Arrow {
            sx: 0.0,
            sy: 0.0,
            ex: 30.0,
            ey: 40.0,
            color: BLUE,
            stroke_width: 2.0,
        };
        arrow.translate(10.0, 10.0);
        assert_eq!(arrow.anchor(), (10.0, 10.0));
        if let Shape::Arrow { ex, ey, .. } = arrow {
            assert_eq!((ex, ey), (40.0, 50.0));
        }
    }

    #[test]
    fn style_falls_back_to_defaults() {
        let rect = Shape::Rect {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
            color: BLUE,
            stroke_width: 0.0,
        };
        let style = rect.style();
        assert_eq!(style.stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(style.font_size, DEFAULT_FONT_SIZE);
        assert_eq!(style.color, BLUE);
    }

    #[test]
    fn whitespace_text_is_blank() {
        let text = Shape::Text {
            x: 0.0,
            y: 0.0,
            text: "  \t".to_string(),
            color: RED,
            font_size: 20.0,
        };
        assert!(text.is_blank_text());
        assert!(!pen(vec![(0.0, 0.0)]).is_blank_text());
    }
}
