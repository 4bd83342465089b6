//! Keyboard modifier state tracking.

use super::events::Key;

/// Keyboard modifier state.
///
/// Tracks which modifier keys are currently pressed. Shift squares off
/// rectangle/ellipse drags; Ctrl or Meta select command bindings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key pressed
    pub shift: bool,
    /// Ctrl key pressed
    pub ctrl: bool,
    /// Alt key pressed
    pub alt: bool,
    /// Meta (Cmd/Super) key pressed
    pub meta: bool,
}

impl Modifiers {
    /// Creates a new Modifiers instance with all keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ctrl on most platforms, Cmd on macOS; either one counts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Updates the state for a modifier key; returns false for other keys.
    pub fn update(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift => self.shift = pressed,
            Key::Ctrl => self.ctrl = pressed,
            Key::Alt => self.alt = pressed,
            Key::Meta => self.meta = pressed,
            _ => return false,
        }
        true
    }
}
