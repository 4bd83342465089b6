//! Frame container for managing the ordered shape list.

use super::hit;
use super::shape::{Shape, ShapeError};

/// Container for all committed shapes on the current image.
///
/// Order is z-order: the first shape is the bottom layer, the last one is
/// drawn on top and wins overlapping hit tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Vector of all shapes in draw order (first = bottom layer, last = top layer)
    pub shapes: Vec<Shape>,
}

impl Frame {
    /// Creates a new empty frame with no shapes.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Removes all shapes from the frame.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Validates and appends a shape on top of the existing ones.
    ///
    /// Returns the index of the new shape.
    pub fn push(&mut self, shape: Shape) -> Result<usize, ShapeError> {
        if let Err(err) = shape.validate() {
            log::warn!("Rejected {} shape: {}", shape.kind_name(), err);
            return Err(err);
        }
        self.shapes.push(shape);
        Ok(self.shapes.len() - 1)
    }

    /// Removes and returns the shape at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Index of the topmost shape under the point, scanning last to first.
    pub fn topmost_at(&self, x: f64, y: f64) -> Option<usize> {
        self.shapes
            .iter()
            .rposition(|shape| hit::point_in_shape(x, y, shape))
    }
}
