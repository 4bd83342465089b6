use crate::draw::{Color, Shape};
use log::debug;

use super::{DrawingState, InputState};

/// What the external text box needs to sit exactly over the edited shape.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub index: usize,
    pub text: String,
    /// Baseline anchor
    pub x: f64,
    pub y: f64,
    /// Top edge of the overlay box (`y - font_size`)
    pub top: f64,
    pub color: Color,
    pub font_size: f64,
}

impl InputState {
    /// Text tool press: appends an empty Text shape at (x, y) and edits it.
    pub(super) fn begin_text(&mut self, x: f64, y: f64) {
        let shape = Shape::Text {
            x,
            y,
            text: String::new(),
            color: self.current_color,
            font_size: self.current_font_size,
        };
        if let Some(index) = self.commit_shape(shape) {
            self.begin_text_edit(index, true);
        }
    }

    /// Enters edit mode on the Text shape at `index`.
    ///
    /// `created` marks a shape the text tool just appended; its add was
    /// already checkpointed.
    pub(super) fn begin_text_edit(&mut self, index: usize, created: bool) {
        if !matches!(self.frame.get(index), Some(Shape::Text { .. })) {
            return;
        }
        self.select(index);
        self.state = DrawingState::EditingText {
            index,
            created,
            checkpointed: created,
        };
        self.needs_redraw = true;
        debug!("Editing text at index {}", index);
    }

    /// Ends the edit session (the overlay lost focus).
    ///
    /// A shape left blank is removed and the selection cleared. A blank shape
    /// the session created also drops its checkpoint, so undo never brings
    /// back an empty text.
    pub fn end_text_edit(&mut self) {
        let DrawingState::EditingText {
            index,
            created,
            checkpointed,
        } = self.state
        else {
            return;
        };
        self.state = DrawingState::Idle;
        self.needs_redraw = true;

        let blank = self.frame.get(index).is_some_and(Shape::is_blank_text);
        if !blank {
            debug!("Finished editing text at index {}", index);
            return;
        }

        if created {
            self.history.discard_last();
        } else if !checkpointed {
            self.history.checkpoint(&self.frame);
        }
        self.frame.remove(index);
        self.selected = None;
        debug!("Removed empty text at index {}", index);
    }

    /// Alias used by shells that report focus loss.
    pub fn blur(&mut self) {
        self.end_text_edit();
    }

    /// Replaces the edited shape's text (overlay input event).
    pub fn update_text(&mut self, text: &str) {
        self.edit_text(|current| {
            if current == text {
                return false;
            }
            current.clear();
            current.push_str(text);
            true
        });
    }

    /// Appends to the edited shape's text.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.edit_text(|current| {
            current.push_str(text);
            true
        });
    }

    /// Removes the last character of the edited shape's text.
    pub fn delete_last_char(&mut self) {
        self.edit_text(|current| current.pop().is_some());
    }

    /// Runs `apply` on the edited text. The first change of a session that
    /// was not checkpointed yet pushes the pre-edit snapshot.
    fn edit_text(&mut self, apply: impl FnOnce(&mut String) -> bool) {
        let DrawingState::EditingText {
            index,
            checkpointed,
            ..
        } = self.state
        else {
            return;
        };

        let Some(Shape::Text { text, .. }) = self.frame.get(index) else {
            return;
        };
        let mut updated = text.clone();
        if !apply(&mut updated) {
            return;
        }

        if !checkpointed {
            self.history.checkpoint(&self.frame);
            if let DrawingState::EditingText { checkpointed, .. } = &mut self.state {
                *checkpointed = true;
            }
        }
        if let Some(Shape::Text { text, .. }) = self.frame.get_mut(index) {
            *text = updated;
        }
        self.needs_redraw = true;
    }

    /// Describes the shape under edit for the external text box.
    pub fn text_overlay(&self) -> Option<TextOverlay> {
        let index = self.editing_index()?;
        match self.frame.get(index)? {
            Shape::Text {
                x,
                y,
                text,
                color,
                ..
            } => {
                let font_size = self.frame.shapes[index].font_size();
                Some(TextOverlay {
                    index,
                    text: text.clone(),
                    x: *x,
                    y: *y,
                    top: *y - font_size,
                    color: *color,
                    font_size,
                })
            }
            _ => None,
        }
    }
}
