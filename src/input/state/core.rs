//! Interaction state machine and editor session state.

use crate::config::{Action, Config, KeyBinding, KeybindingsConfig};
use crate::draw::{Color, FontDescriptor, Frame, HandleId, Scene, ShapeStyle};
use crate::history::History;
use crate::image::BaseImage;
use crate::input::{events::Key, modifiers::Modifiers, tool::Tool};
use crate::util::Rect;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Stroke width range accepted from the style panel.
pub const MIN_THICKNESS: f64 = 1.0;
pub const MAX_THICKNESS: f64 = 50.0;

/// Font size range accepted from the style panel.
pub const MIN_FONT_SIZE: f64 = 5.0;
pub const MAX_FONT_SIZE: f64 = 200.0;

/// Current interaction mode.
///
/// Exactly one gesture can be in progress; text editing is exclusive with
/// drag and resize.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// Waiting for input
    Idle,
    /// Dragging out a new shape or crop region (pointer held down)
    Drawing {
        /// Tool the gesture started with
        tool: Tool,
        /// Anchor X (pointer-down position)
        start_x: f64,
        /// Anchor Y (pointer-down position)
        start_y: f64,
        /// Latest pointer X
        current_x: f64,
        /// Latest pointer Y
        current_y: f64,
        /// Accumulated pen points (pen tool only)
        points: Vec<(f64, f64)>,
    },
    /// Moving the selected shape
    Dragging {
        index: usize,
        /// Pointer minus shape anchor at grab time
        offset_x: f64,
        offset_y: f64,
        /// Whether the pre-drag snapshot was pushed yet
        checkpointed: bool,
    },
    /// Dragging a resize handle of the selected shape
    Resizing {
        index: usize,
        handle: HandleId,
        /// Corner (or text box top-left) that stays put during the gesture
        fixed_x: f64,
        fixed_y: f64,
    },
    /// Live text editing through the external overlay
    EditingText {
        index: usize,
        /// Shape was appended by the text tool in this session
        created: bool,
        /// A snapshot guarding this session is on the undo stack
        checkpointed: bool,
    },
}

/// Editor session: committed shapes, history, active style and the
/// interaction state machine.
///
/// The shell feeds pointer and keyboard events in image coordinates and
/// reads back a [`Scene`] to composite.
pub struct InputState {
    /// Committed shape list
    pub frame: Frame,
    /// Undo/redo snapshots of the shape list
    pub history: History<Frame>,
    /// Base image, if one is loaded
    pub image: Option<BaseImage>,
    /// Active tool
    pub current_tool: Tool,
    /// Color for new shapes
    pub current_color: Color,
    /// Stroke width for new shapes
    pub current_thickness: f64,
    /// Font size for new text
    pub current_font_size: f64,
    /// Font used for text rendering
    pub font_descriptor: FontDescriptor,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current interaction mode
    pub state: DrawingState,
    /// Index of the selected shape
    pub selected: Option<usize>,
    /// Committed crop region in image coordinates
    pub crop: Option<Rect>,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Style of a newly selected shape, waiting for the style panel
    pending_style: Option<ShapeStyle>,
    /// Keybinding action map
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates a new session with the given style defaults.
    pub fn with_defaults(
        color: Color,
        thickness: f64,
        font_size: f64,
        font_descriptor: FontDescriptor,
        tool: Tool,
        max_snapshots: usize,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            frame: Frame::new(),
            history: History::new(max_snapshots),
            image: None,
            current_tool: tool,
            current_color: color,
            current_thickness: thickness,
            current_font_size: font_size,
            font_descriptor,
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            selected: None,
            crop: None,
            needs_redraw: true,
            pending_style: None,
            action_map,
        }
    }

    /// Creates a session from loaded configuration.
    ///
    /// Invalid keybindings fall back to the built-in defaults with a warning.
    pub fn from_config(config: &Config) -> Self {
        let font_descriptor = FontDescriptor::new(
            config.drawing.font_family.clone(),
            config.drawing.font_weight.clone(),
            config.drawing.font_style.clone(),
        );

        let action_map = config.keybindings.build_action_map().unwrap_or_else(|err| {
            warn!("Invalid keybindings ({err}); using defaults");
            KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default()
        });

        Self::with_defaults(
            config.drawing.default_color.to_color(),
            config.drawing.default_thickness,
            config.drawing.default_font_size,
            font_descriptor,
            config.tool.default_tool,
            config.history.max_snapshots,
            action_map,
        )
    }

    /// Installs a new base image and starts from an empty annotation set.
    pub fn load_image(&mut self, image: BaseImage) {
        info!("Loaded {}x{} image", image.width(), image.height());
        self.image = Some(image);
        self.reset_session();
    }

    /// Drops the base image together with all annotations.
    pub fn reset_image(&mut self) {
        self.image = None;
        self.reset_session();
        debug!("Image reset");
    }

    fn reset_session(&mut self) {
        self.frame.clear();
        self.history.clear();
        self.selected = None;
        self.state = DrawingState::Idle;
        self.crop = None;
        self.pending_style = None;
        self.needs_redraw = true;
    }

    /// Pixel size of the loaded image.
    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|image| (image.width(), image.height()))
    }

    /// Switches the active tool, ending whatever gesture is in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        if matches!(self.state, DrawingState::EditingText { .. }) {
            self.end_text_edit();
        } else if !matches!(self.state, DrawingState::Idle) {
            self.state = DrawingState::Idle;
        }
        if self.current_tool != tool {
            debug!("Tool changed to {}", tool);
        }
        self.current_tool = tool;
        self.needs_redraw = true;
    }

    /// Sets the color used for new shapes.
    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
    }

    /// Sets the stroke width used for new shapes, clamped to 1-50.
    pub fn set_thickness(&mut self, thickness: f64) {
        if !thickness.is_finite() {
            return;
        }
        self.current_thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
        self.needs_redraw = true;
        debug!("Thickness set to {:.1}px", self.current_thickness);
    }

    /// Sets the font size used for new text, clamped to 5-200.
    ///
    /// A selected Text shape follows the new size immediately.
    pub fn set_font_size(&mut self, size: f64) {
        if !size.is_finite() {
            return;
        }
        let size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        self.current_font_size = size;
        if let Some(index) = self.selected
            && let Some(crate::draw::Shape::Text { font_size, .. }) = self.frame.get_mut(index)
        {
            *font_size = size;
        }
        self.needs_redraw = true;
        debug!("Font size set to {:.1}px", size);
    }

    /// Marks `index` as the selection and queues its style for the style panel.
    pub(super) fn select(&mut self, index: usize) {
        if let Some(shape) = self.frame.get(index) {
            self.selected = Some(index);
            self.pending_style = Some(shape.style());
            self.needs_redraw = true;
        }
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Takes the style of the most recently selected shape, if not yet taken.
    pub fn take_selection_style(&mut self) -> Option<ShapeStyle> {
        self.pending_style.take()
    }

    /// Removes the selected shape.
    ///
    /// Returns false when nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        if index >= self.frame.len() {
            self.selected = None;
            return false;
        }

        self.history.checkpoint(&self.frame);
        if let Some(shape) = self.frame.remove(index) {
            debug!("Deleted {} at index {}", shape.kind_name(), index);
        }
        self.selected = None;
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        true
    }

    /// Restores the previous shape list. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.frame) {
            Some(previous) => {
                self.install_snapshot(previous);
                debug!("Undo ({} steps left)", self.history.undo_depth());
                true
            }
            None => false,
        }
    }

    /// Re-applies an undone change. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.frame) {
            Some(next) => {
                self.install_snapshot(next);
                debug!("Redo ({} steps left)", self.history.redo_depth());
                true
            }
            None => false,
        }
    }

    fn install_snapshot(&mut self, frame: Frame) {
        self.frame = frame;
        self.selected = None;
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
    }

    /// Removes the committed crop region.
    pub fn clear_crop(&mut self) {
        if self.crop.take().is_some() {
            self.needs_redraw = true;
        }
    }

    /// Drops an in-progress draw or crop gesture without touching the shapes.
    ///
    /// Returns true if a gesture was cancelled.
    pub fn cancel_gesture(&mut self) -> bool {
        if matches!(self.state, DrawingState::Drawing { .. }) {
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
            debug!("Gesture cancelled");
            true
        } else {
            false
        }
    }

    /// Index of the Text shape currently being edited.
    pub fn editing_index(&self) -> Option<usize> {
        match self.state {
            DrawingState::EditingText { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Everything needed to composite the current view.
    pub fn scene(&self) -> Scene<'_> {
        let editing = self.editing_index();
        let mut scene = Scene::new(self.image.as_ref(), &self.frame.shapes, &self.font_descriptor);
        scene.preview = self.preview();
        scene.selected = self.selected;
        scene.editing = editing;
        scene.crop = self.crop;
        scene
    }

    /// Looks up the action bound to `key` under the current modifiers.
    ///
    /// Cmd counts as Ctrl. Symbols that need Shift to type (like `+`) also
    /// match bindings written without Shift.
    pub(super) fn find_action(&self, key: Key) -> Option<Action> {
        let name = key.binding_name()?;
        let ctrl = self.modifiers.command();
        let lookup = |shift: bool| {
            self.action_map
                .iter()
                .find(|(binding, _)| binding.matches(&name, ctrl, shift, self.modifiers.alt))
                .map(|(_, action)| *action)
        };

        lookup(self.modifiers.shift).or_else(|| match key {
            Key::Char(c) if self.modifiers.shift && !c.is_alphanumeric() => lookup(false),
            _ => None,
        })
    }
}
