//! Utility functions for colors, geometry, and arrowhead calculations.
//!
//! This module provides:
//! - Color name mapping used by the configuration system
//! - The floating-point [`Rect`] used for boxes, handles and crop regions
//! - Arrowhead geometry and drag-constraint helpers

use crate::draw::{Color, color::*};

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the two wing points of an arrowhead drawn at the end point.
///
/// The wings point back along the shaft, each rotated `angle_degrees` away from
/// the shaft direction (start → end).
///
/// # Arguments
/// * `sx`, `sy` - Arrow start (tail)
/// * `ex`, `ey` - Arrow end (tip, where the head is drawn)
/// * `length` - Wing length in pixels
/// * `angle_degrees` - Angle between each wing and the shaft
///
/// # Returns
/// `[(left_x, left_y), (right_x, right_y)]`. A zero-length arrow yields wings
/// pointing along the positive x axis, which keeps rendering well-defined.
pub fn calculate_arrowhead(
    sx: f64,
    sy: f64,
    ex: f64,
    ey: f64,
    length: f64,
    angle_degrees: f64,
) -> [(f64, f64); 2] {
    let shaft = (ey - sy).atan2(ex - sx);
    let spread = angle_degrees.to_radians();

    let left = (
        ex - length * (shaft - spread).cos(),
        ey - length * (shaft - spread).sin(),
    );
    let right = (
        ex - length * (shaft + spread).cos(),
        ey - length * (shaft + spread).sin(),
    );

    [left, right]
}

/// Constrains a drag vector to equal magnitudes on both axes (square/circle).
///
/// Each component keeps its own sign so the shape still grows towards the
/// quadrant the pointer is in.
pub fn constrain_square(dx: f64, dy: f64) -> (f64, f64) {
    let side = dx.abs().max(dy.abs());
    (side.copysign(dx), side.copysign(dy))
}

/// Euclidean distance between two points.
pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    (ax - bx).hypot(ay - by)
}

/// Distance from a point to the segment (sx, sy)-(ex, ey).
///
/// The projection parameter is clamped to [0, 1]; a zero-length segment
/// degrades to point distance.
pub fn distance_to_segment(px: f64, py: f64, sx: f64, sy: f64, ex: f64, ey: f64) -> f64 {
    let cx = ex - sx;
    let cy = ey - sy;
    let len_sq = cx * cx + cy * cy;

    if len_sq == 0.0 {
        return distance(px, py, sx, sy);
    }

    let t = (((px - sx) * cx + (py - sy) * cy) / len_sq).clamp(0.0, 1.0);
    distance(px, py, sx + t * cx, sy + t * cy)
}

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and the gesture script to parse color
/// names. Hex strings (`#rrggbb`) are accepted as well.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        other if other.starts_with('#') => Color::from_hex(other),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle in image pixel space.
///
/// Width and height are always non-negative; use [`Rect::normalized`] to build
/// one from signed extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Builds a rectangle from an origin and possibly negative extents.
    ///
    /// A negative width/height means the box extends left/up from the origin.
    pub fn normalized(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: x.min(x + width),
            y: y.min(y + height),
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Builds the rectangle spanned by two opposite corners.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::normalized(x1, y1, x2 - x1, y2 - y1)
    }

    /// Square of `size` centered on a point.
    pub fn centered(cx: f64, cy: f64, size: f64) -> Self {
        Self {
            x: cx - size / 2.0,
            y: cy - size / 2.0,
            width: size,
            height: size,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    /// Returns a copy expanded evenly in all directions by `amount`.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            x: self.x - amount,
            y: self.y - amount,
            width: self.width + amount * 2.0,
            height: self.height + amount * 2.0,
        }
    }

    /// Clamps the rectangle to `[0, width] x [0, height]`.
    ///
    /// Returns `None` when nothing with positive area remains.
    pub fn clamp_to_bounds(&self, width: f64, height: f64) -> Option<Self> {
        let min_x = self.x.clamp(0.0, width);
        let min_y = self.y.clamp(0.0, height);
        let max_x = self.right().clamp(0.0, width);
        let max_y = self.bottom().clamp(0.0, height);
        let clamped = Self::from_corners(min_x, min_y, max_x, max_y);
        clamped.is_valid().then_some(clamped)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_rect_flips_negative_extents() {
        let rect = Rect::normalized(50.0, 40.0, -40.0, -30.0);
        assert_eq!(rect, Rect::normalized(10.0, 10.0, 40.0, 30.0));
        assert_eq!(rect.right(), 50.0);
        assert_eq!(rect.bottom(), 40.0);
    }

    #[test]
    fn contains_is_inclusive_on_edges() {
        let rect = Rect::normalized(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(10.0, 10.0));
        assert!(!rect.contains(10.1, 5.0));
    }

    #[test]
    fn clamp_to_bounds_drops_rects_outside_the_image() {
        let rect = Rect::normalized(-20.0, -20.0, 10.0, 10.0);
        assert_eq!(rect.clamp_to_bounds(100.0, 100.0), None);

        let partial = Rect::normalized(90.0, 90.0, 30.0, 30.0);
        assert_eq!(
            partial.clamp_to_bounds(100.0, 100.0),
            Some(Rect::normalized(90.0, 90.0, 10.0, 10.0))
        );
    }

    #[test]
    fn constrain_square_preserves_quadrant() {
        assert_eq!(constrain_square(30.0, 10.0), (30.0, 30.0));
        assert_eq!(constrain_square(-30.0, 10.0), (-30.0, 30.0));
        assert_eq!(constrain_square(5.0, -12.0), (12.0, -12.0));
    }

    #[test]
    fn segment_distance_clamps_projection() {
        // Beyond the end point the distance is measured to the end point
        let d = distance_to_segment(20.0, 0.0, 0.0, 0.0, 10.0, 0.0);
        assert!((d - 10.0).abs() < 1e-9);
        // Perpendicular to the middle of the segment
        let d = distance_to_segment(5.0, 3.0, 0.0, 0.0, 10.0, 0.0);
        assert!((d - 3.0).abs() < 1e-9);
        // Zero-length segment
        let d = distance_to_segment(3.0, 4.0, 0.0, 0.0, 0.0, 0.0);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn arrowhead_wings_sit_behind_the_tip() {
        let [left, right] = calculate_arrowhead(0.0, 0.0, 100.0, 0.0, 13.0, 30.0);
        // Both wings are behind the tip along the shaft
        assert!(left.0 < 100.0 && right.0 < 100.0);
        // Symmetric around the shaft
        assert!((left.1 + right.1).abs() < 1e-9);
        assert!((distance(100.0, 0.0, left.0, left.1) - 13.0).abs() < 1e-9);
    }

    #[test]
    fn name_to_color_accepts_names_and_hex() {
        assert_eq!(name_to_color("Blue"), Some(BLUE));
        assert_eq!(name_to_color("#ffffff"), Some(WHITE));
        assert_eq!(name_to_color("mauve"), None);
    }
}
