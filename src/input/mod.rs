//! Input handling and the interaction state machine.
//!
//! This module translates shell pointer and keyboard events (already mapped
//! to image coordinates) into shape-list edits, selection changes and
//! history checkpoints.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use state::{DrawingState, InputState, TextOverlay};
pub use tool::Tool;
