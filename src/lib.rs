//! Raster image annotation core.
//!
//! A loaded image is overlaid with vector annotations (rectangles, ellipses,
//! arrows, freehand strokes and text). The [`input::InputState`] controller
//! turns pointer and keyboard events into shape-list edits with undo
//! history; [`draw::pipeline`] composites image, shapes and selection
//! affordances into pixels; [`export`] encodes and delivers the result.

pub mod config;
pub mod draw;
pub mod export;
pub mod history;
pub mod image;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use history::History;
pub use image::BaseImage;
pub use input::InputState;
