mod actions;
mod core;
mod export;
mod mouse;
mod render;
mod text;

pub use core::{
    DrawingState, InputState, MAX_FONT_SIZE, MAX_THICKNESS, MIN_FONT_SIZE, MIN_THICKNESS,
};
pub use text::TextOverlay;
