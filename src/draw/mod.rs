//! Shape model, hit testing and Cairo rendering.
//!
//! This module defines the core drawing types used for image annotation:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: The five annotation variants (rect, ellipse, arrow, pen, text)
//! - [`Frame`]: The ordered shape list
//! - [`hit`]: Handle geometry and point-in-shape tests
//! - [`pipeline`]: Scene compositing into a pixel buffer

pub mod color;
pub mod font;
pub mod frame;
pub mod hit;
pub mod pipeline;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use frame::Frame;
pub use hit::{Handle, HandleId};
pub use pipeline::{PixelBuffer, Preview, RenderError, Scene, render_scene, render_to_pixels};
pub use render::{render_pen_borrowed, render_shape, render_shapes};
pub use shape::{Shape, ShapeError, ShapeStyle};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
