//! Hit testing and resize-handle geometry.
//!
//! Every function here is pure. Callers that scan a shape list own the
//! z-order policy (topmost first); see [`Frame::topmost_at`](super::Frame::topmost_at).

use super::shape::Shape;
use crate::util::{self, Rect};

/// Side length of a square resize handle.
pub const HANDLE_SIZE: f64 = 8.0;

/// Maximum distance for a pointer to count as touching an arrow or pen stroke.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Padding between a shape's box and its dashed selection outline.
pub const SELECTION_PADDING: f64 = 5.0;

/// Approximate glyph advance as a fraction of the font size.
pub const TEXT_WIDTH_FACTOR: f64 = 0.6;

/// Identifies a resizable control point of the selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleId {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Arrow start point
    Start,
    /// Arrow end point
    End,
}

impl HandleId {
    /// Stable short id (`tl`, `tr`, `bl`, `br`, `start`, `end`).
    pub fn as_str(&self) -> &'static str {
        match self {
            HandleId::TopLeft => "tl",
            HandleId::TopRight => "tr",
            HandleId::BottomLeft => "bl",
            HandleId::BottomRight => "br",
            HandleId::Start => "start",
            HandleId::End => "end",
        }
    }
}

/// A handle id together with its hit rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub id: HandleId,
    pub rect: Rect,
}

/// Derived box of a text annotation: `len * size * 0.6` wide, `size` tall,
/// sitting on the baseline.
pub fn text_bounds(x: f64, y: f64, text: &str, font_size: f64) -> Rect {
    let width = text.chars().count() as f64 * font_size * TEXT_WIDTH_FACTOR;
    Rect {
        x,
        y: y - font_size,
        width,
        height: font_size,
    }
}

/// Normalized box for shapes that have one (Rect, Ellipse, Text).
pub fn shape_box(shape: &Shape) -> Option<Rect> {
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
        } => Some(Rect::normalized(*x, *y, *width, *height)),
        Shape::Text { x, y, text, .. } => Some(text_bounds(*x, *y, text, shape.font_size())),
        Shape::Arrow { .. } | Shape::Pen { .. } => None,
    }
}

/// Dashed outline drawn around the selected shape, if its variant has one.
pub fn selection_outline(shape: &Shape) -> Option<Rect> {
    shape_box(shape).map(|rect| rect.inflate(SELECTION_PADDING))
}

/// Returns the resize handles of a shape.
///
/// Boxed shapes expose four corner handles in `tl, tr, bl, br` order, arrows
/// expose `start` and `end`, pen strokes expose none.
pub fn resize_handles(shape: &Shape) -> Vec<Handle> {
    match shape {
        Shape::Rect { .. } | Shape::Ellipse { .. } | Shape::Text { .. } => {
            let Some(rect) = shape_box(shape) else {
                return Vec::new();
            };
            vec![
                Handle {
                    id: HandleId::TopLeft,
                    rect: Rect::centered(rect.x, rect.y, HANDLE_SIZE),
                },
                Handle {
                    id: HandleId::TopRight,
                    rect: Rect::centered(rect.right(), rect.y, HANDLE_SIZE),
                },
                Handle {
                    id: HandleId::BottomLeft,
                    rect: Rect::centered(rect.x, rect.bottom(), HANDLE_SIZE),
                },
                Handle {
                    id: HandleId::BottomRight,
                    rect: Rect::centered(rect.right(), rect.bottom(), HANDLE_SIZE),
                },
            ]
        }
        Shape::Arrow { sx, sy, ex, ey, .. } => vec![
            Handle {
                id: HandleId::Start,
                rect: Rect::centered(*sx, *sy, HANDLE_SIZE),
            },
            Handle {
                id: HandleId::End,
                rect: Rect::centered(*ex, *ey, HANDLE_SIZE),
            },
        ],
        Shape::Pen { .. } => Vec::new(),
    }
}

/// Inclusive containment test against a handle rectangle.
pub fn point_in_handle(px: f64, py: f64, handle: &Rect) -> bool {
    handle.contains(px, py)
}

/// Returns the first handle of `shape` under the pointer.
pub fn handle_at(shape: &Shape, px: f64, py: f64) -> Option<HandleId> {
    resize_handles(shape)
        .into_iter()
        .find(|handle| point_in_handle(px, py, &handle.rect))
        .map(|handle| handle.id)
}

/// Tests whether a point lies on or inside a shape.
pub fn point_in_shape(px: f64, py: f64, shape: &Shape) -> bool {
    match shape {
        Shape::Rect {
            x,
            y,
            width,
            height,
            ..
        } => Rect::normalized(*x, *y, *width, *height).contains(px, py),
        Shape::Ellipse {
            x,
            y,
            width,
            height,
            ..
        } => point_in_ellipse(px, py, Rect::normalized(*x, *y, *width, *height)),
        Shape::Arrow { sx, sy, ex, ey, .. } => {
            util::distance_to_segment(px, py, *sx, *sy, *ex, *ey) <= HIT_TOLERANCE
        }
        Shape::Pen { points, .. } => points
            .iter()
            .any(|&(x, y)| util::distance(px, py, x, y) <= HIT_TOLERANCE),
        Shape::Text { .. } => shape_box(shape).is_some_and(|rect| rect.contains(px, py)),
    }
}

/// True ellipse equation about the box center.
///
/// A box that is flat on either axis has no interior; it degrades to plain
/// box containment so the line it draws can still be picked.
fn point_in_ellipse(px: f64, py: f64, rect: Rect) -> bool {
    let rx = rect.width / 2.0;
    let ry = rect.height / 2.0;
    if rx == 0.0 || ry == 0.0 {
        return rect.contains(px, py);
    }
    let (cx, cy) = rect.center();
    let nx = (px - cx) / rx;
    let ny = (py - cy) / ry;
    nx * nx + ny * ny <= 1.0
}
