use crate::config::Action;
use crate::draw::color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
use crate::input::{events::Key, tool::Tool};
use log::debug;

use super::{DrawingState, InputState};

/// Thickness change per keypress.
const THICKNESS_STEP: f64 = 1.0;

/// Font size change per keypress.
const FONT_SIZE_STEP: f64 = 2.0;

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys only update modifier state. While a text edit session is
    /// active, keys edit the text and no bindings fire: characters append,
    /// Backspace deletes, Return or Escape end the session. Otherwise the key
    /// is resolved through the keybinding map.
    pub fn on_key_press(&mut self, key: Key) {
        if self.modifiers.update(key, true) {
            return;
        }

        if matches!(self.state, DrawingState::EditingText { .. }) {
            match key {
                Key::Char(c) if !self.modifiers.command() => {
                    let mut buf = [0u8; 4];
                    self.insert_text(c.encode_utf8(&mut buf));
                }
                Key::Space => self.insert_text(" "),
                Key::Backspace => self.delete_last_char(),
                Key::Return | Key::Escape => self.end_text_edit(),
                _ => {}
            }
            return;
        }

        if let Some(action) = self.find_action(key) {
            self.handle_action(action);
        }
    }

    /// Processes a key release event.
    pub fn on_key_release(&mut self, key: Key) {
        self.modifiers.update(key, false);
    }

    /// Runs a bound action.
    pub fn handle_action(&mut self, action: Action) {
        debug!("Action {:?}", action);
        match action {
            Action::DeleteSelection => {
                self.delete_selected();
            }
            Action::Undo => {
                if !self.is_gesture_active() {
                    self.undo();
                }
            }
            Action::Redo => {
                if !self.is_gesture_active() {
                    self.redo();
                }
            }
            Action::Cancel => {
                // Drag and resize keep their selection until the pointer is released
                if !self.cancel_gesture() && !self.is_gesture_active() {
                    if self.crop.is_some() {
                        self.clear_crop();
                    } else {
                        self.clear_selection();
                    }
                }
            }
            Action::ToolSelect => self.set_tool(Tool::Select),
            Action::ToolRect => self.set_tool(Tool::Rect),
            Action::ToolEllipse => self.set_tool(Tool::Ellipse),
            Action::ToolArrow => self.set_tool(Tool::Arrow),
            Action::ToolPen => self.set_tool(Tool::Pen),
            Action::ToolText => self.set_tool(Tool::Text),
            Action::ToolCrop => self.set_tool(Tool::Crop),
            Action::IncreaseThickness => {
                self.set_thickness(self.current_thickness + THICKNESS_STEP)
            }
            Action::DecreaseThickness => {
                self.set_thickness(self.current_thickness - THICKNESS_STEP)
            }
            Action::IncreaseFontSize => {
                self.set_font_size(self.current_font_size + FONT_SIZE_STEP)
            }
            Action::DecreaseFontSize => {
                self.set_font_size(self.current_font_size - FONT_SIZE_STEP)
            }
            Action::SetColorRed => self.set_color(RED),
            Action::SetColorGreen => self.set_color(GREEN),
            Action::SetColorBlue => self.set_color(BLUE),
            Action::SetColorYellow => self.set_color(YELLOW),
            Action::SetColorOrange => self.set_color(ORANGE),
            Action::SetColorPink => self.set_color(PINK),
            Action::SetColorWhite => self.set_color(WHITE),
            Action::SetColorBlack => self.set_color(BLACK),
        }
    }

    /// True while the pointer is held in a draw, drag or resize gesture.
    pub fn is_gesture_active(&self) -> bool {
        matches!(
            self.state,
            DrawingState::Drawing { .. }
                | DrawingState::Dragging { .. }
                | DrawingState::Resizing { .. }
        )
    }
}
