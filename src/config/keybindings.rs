//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for every editor action.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Editing
    DeleteSelection,
    Undo,
    Redo,
    Cancel,

    // Tool selection
    ToolSelect,
    ToolRect,
    ToolEllipse,
    ToolArrow,
    ToolPen,
    ToolText,
    ToolCrop,

    // Style steps
    IncreaseThickness,
    DecreaseThickness,
    IncreaseFontSize,
    DecreaseFontSize,

    // Color selections
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorYellow,
    SetColorOrange,
    SetColorPink,
    SetColorWhite,
    SetColorBlack,
}

/// A single keybinding: a key with optional modifiers.
///
/// `ctrl` is satisfied by either Ctrl or Cmd (meta) at match time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Delete".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// "Cmd"/"Meta" are accepted as aliases of Ctrl.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]; the empty parts are the '+' key
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Shift+Z", "Ctrl+Y"]
/// delete_selection = ["Delete", "Backspace"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_delete_selection")]
    pub delete_selection: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_cancel")]
    pub cancel: Vec<String>,

    #[serde(default = "default_tool_select")]
    pub tool_select: Vec<String>,

    #[serde(default = "default_tool_rect")]
    pub tool_rect: Vec<String>,

    #[serde(default = "default_tool_ellipse")]
    pub tool_ellipse: Vec<String>,

    #[serde(default = "default_tool_arrow")]
    pub tool_arrow: Vec<String>,

    #[serde(default = "default_tool_pen")]
    pub tool_pen: Vec<String>,

    #[serde(default = "default_tool_text")]
    pub tool_text: Vec<String>,

    #[serde(default = "default_tool_crop")]
    pub tool_crop: Vec<String>,

    #[serde(default = "default_increase_thickness")]
    pub increase_thickness: Vec<String>,

    #[serde(default = "default_decrease_thickness")]
    pub decrease_thickness: Vec<String>,

    #[serde(default = "default_increase_font_size")]
    pub increase_font_size: Vec<String>,

    #[serde(default = "default_decrease_font_size")]
    pub decrease_font_size: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_yellow")]
    pub set_color_yellow: Vec<String>,

    #[serde(default = "default_set_color_orange")]
    pub set_color_orange: Vec<String>,

    #[serde(default = "default_set_color_pink")]
    pub set_color_pink: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            delete_selection: default_delete_selection(),
            undo: default_undo(),
            redo: default_redo(),
            cancel: default_cancel(),
            tool_select: default_tool_select(),
            tool_rect: default_tool_rect(),
            tool_ellipse: default_tool_ellipse(),
            tool_arrow: default_tool_arrow(),
            tool_pen: default_tool_pen(),
            tool_text: default_tool_text(),
            tool_crop: default_tool_crop(),
            increase_thickness: default_increase_thickness(),
            decrease_thickness: default_decrease_thickness(),
            increase_font_size: default_increase_font_size(),
            decrease_font_size: default_decrease_font_size(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_yellow: default_set_color_yellow(),
            set_color_orange: default_set_color_orange(),
            set_color_pink: default_set_color_pink(),
            set_color_white: default_set_color_white(),
            set_color_black: default_set_color_black(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        let groups: [(&[String], Action); 23] = [
            (self.delete_selection.as_slice(), Action::DeleteSelection),
            (self.undo.as_slice(), Action::Undo),
            (self.redo.as_slice(), Action::Redo),
            (self.cancel.as_slice(), Action::Cancel),
            (self.tool_select.as_slice(), Action::ToolSelect),
            (self.tool_rect.as_slice(), Action::ToolRect),
            (self.tool_ellipse.as_slice(), Action::ToolEllipse),
            (self.tool_arrow.as_slice(), Action::ToolArrow),
            (self.tool_pen.as_slice(), Action::ToolPen),
            (self.tool_text.as_slice(), Action::ToolText),
            (self.tool_crop.as_slice(), Action::ToolCrop),
            (self.increase_thickness.as_slice(), Action::IncreaseThickness),
            (self.decrease_thickness.as_slice(), Action::DecreaseThickness),
            (self.increase_font_size.as_slice(), Action::IncreaseFontSize),
            (self.decrease_font_size.as_slice(), Action::DecreaseFontSize),
            (self.set_color_red.as_slice(), Action::SetColorRed),
            (self.set_color_green.as_slice(), Action::SetColorGreen),
            (self.set_color_blue.as_slice(), Action::SetColorBlue),
            (self.set_color_yellow.as_slice(), Action::SetColorYellow),
            (self.set_color_orange.as_slice(), Action::SetColorOrange),
            (self.set_color_pink.as_slice(), Action::SetColorPink),
            (self.set_color_white.as_slice(), Action::SetColorWhite),
            (self.set_color_black.as_slice(), Action::SetColorBlack),
        ];

        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_delete_selection() -> Vec<String> {
    vec!["Delete".to_string(), "Backspace".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Shift+Z".to_string(), "Ctrl+Y".to_string()]
}

fn default_cancel() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_tool_select() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_tool_rect() -> Vec<String> {
    vec!["2".to_string()]
}

fn default_tool_ellipse() -> Vec<String> {
    vec!["3".to_string()]
}

fn default_tool_arrow() -> Vec<String> {
    vec!["4".to_string()]
}

fn default_tool_pen() -> Vec<String> {
    vec!["5".to_string()]
}

fn default_tool_text() -> Vec<String> {
    vec!["6".to_string()]
}

fn default_tool_crop() -> Vec<String> {
    vec!["7".to_string()]
}

fn default_increase_thickness() -> Vec<String> {
    vec!["+".to_string(), "=".to_string()]
}

fn default_decrease_thickness() -> Vec<String> {
    vec!["-".to_string(), "_".to_string()]
}

fn default_increase_font_size() -> Vec<String> {
    vec!["Ctrl+Shift++".to_string(), "Ctrl+Shift+=".to_string()]
}

fn default_decrease_font_size() -> Vec<String> {
    vec!["Ctrl+Shift+-".to_string(), "Ctrl+Shift+_".to_string()]
}

fn default_set_color_red() -> Vec<String> {
    vec!["R".to_string()]
}

fn default_set_color_green() -> Vec<String> {
    vec!["G".to_string()]
}

fn default_set_color_blue() -> Vec<String> {
    vec!["B".to_string()]
}

fn default_set_color_yellow() -> Vec<String> {
    vec!["Y".to_string()]
}

fn default_set_color_orange() -> Vec<String> {
    vec!["O".to_string()]
}

fn default_set_color_pink() -> Vec<String> {
    vec!["P".to_string()]
}

fn default_set_color_white() -> Vec<String> {
    vec!["W".to_string()]
}

fn default_set_color_black() -> Vec<String> {
    vec!["K".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Delete").unwrap();
        assert_eq!(binding.key, "Delete");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_shift_key() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(binding.key, "Z");
        assert!(binding.ctrl);
        assert!(binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_cmd_is_ctrl() {
        let cmd = KeyBinding::parse("Cmd+Z").unwrap();
        let ctrl = KeyBinding::parse("Ctrl+Z").unwrap();
        assert_eq!(cmd, ctrl);
    }

    #[test]
    fn test_parse_plus_key() {
        let binding = KeyBinding::parse("Ctrl+Shift++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl && binding.shift);

        let plain = KeyBinding::parse("+").unwrap();
        assert_eq!(plain.key, "+");
        assert!(!plain.ctrl);
    }

    #[test]
    fn test_parse_with_spaces_and_any_order() {
        let a = KeyBinding::parse("Ctrl + Shift + Z").unwrap();
        let b = KeyBinding::parse("Shift+Ctrl+Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert!(binding.matches("z", true, true, false));
        assert!(binding.matches("Z", true, true, false));
        assert!(!binding.matches("Z", true, false, false));
    }

    #[test]
    fn test_build_action_map() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        let delete = KeyBinding::parse("Delete").unwrap();
        assert_eq!(map.get(&delete), Some(&Action::DeleteSelection));

        let redo = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(map.get(&redo), Some(&Action::Redo));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.cancel = vec!["Ctrl+Z".to_string()];

        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
        assert!(err.contains("Ctrl+Z"));
    }
}
