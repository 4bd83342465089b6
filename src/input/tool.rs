//! Active tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annotation tool chosen in the toolbar.
///
/// The active tool decides what a pointer-down on the canvas does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Pick, move and resize existing shapes
    #[default]
    Select,
    /// Rectangle outline from corner to corner
    Rect,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Arrow with its head at the release point
    Arrow,
    /// Freehand polyline following the pointer
    Pen,
    /// Click to place a text box
    Text,
    /// Drag out the region kept on export
    Crop,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Select,
        Tool::Rect,
        Tool::Ellipse,
        Tool::Arrow,
        Tool::Pen,
        Tool::Text,
        Tool::Crop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Rect => "rect",
            Tool::Ellipse => "ellipse",
            Tool::Arrow => "arrow",
            Tool::Pen => "pen",
            Tool::Text => "text",
            Tool::Crop => "crop",
        }
    }

    /// Tools whose drag produces a box that Shift squares off.
    pub fn constrains_to_square(&self) -> bool {
        matches!(self, Tool::Rect | Tool::Ellipse)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "select" => Ok(Tool::Select),
            "rect" | "rectangle" => Ok(Tool::Rect),
            "ellipse" | "circle" => Ok(Tool::Ellipse),
            "arrow" => Ok(Tool::Arrow),
            "pen" => Ok(Tool::Pen),
            "text" => Ok(Tool::Text),
            "crop" => Ok(Tool::Crop),
            other => Err(format!("unknown tool '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for tool in Tool::ALL {
            assert_eq!(tool.as_str().parse::<Tool>(), Ok(tool));
        }
        assert_eq!("Circle".parse::<Tool>(), Ok(Tool::Ellipse));
        assert!("lasso".parse::<Tool>().is_err());
    }
}
