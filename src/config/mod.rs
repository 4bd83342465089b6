//! Configuration file support for pixmark.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/pixmark/config.toml`. Settings include drawing defaults,
//! the starting tool, undo depth, export destination and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::{ColorSpec, ExportFormat};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, ExportConfig, HistoryConfig, ToolConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// default_thickness = 3.0
/// default_font_size = 20.0
///
/// [tool]
/// default_tool = "rect"
///
/// [history]
/// max_snapshots = 100
///
/// [export]
/// save_directory = "~/Pictures/Pixmark"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing defaults (color, thickness, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Tool selected at startup
    #[serde(default)]
    pub tool: ToolConfig,

    /// Undo history limits
    #[serde(default)]
    pub history: HistoryConfig,

    /// Export destination and filename template
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced with the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 1.0 - 50.0
    /// - `default_font_size`: 5.0 - 200.0
    pub fn validate_and_clamp(&mut self) {
        if !self.drawing.default_thickness.is_finite() {
            warn!("Non-finite default_thickness, using 3.0");
            self.drawing.default_thickness = 3.0;
        } else if !(1.0..=50.0).contains(&self.drawing.default_thickness) {
            warn!(
                "Invalid default_thickness {:.1}, clamping to 1.0-50.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1.0, 50.0);
        }

        if !self.drawing.default_font_size.is_finite() {
            warn!("Non-finite default_font_size, using 20.0");
            self.drawing.default_font_size = 20.0;
        } else if !(5.0..=200.0).contains(&self.drawing.default_font_size) {
            warn!(
                "Invalid default_font_size {:.1}, clamping to 5.0-200.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(5.0, 200.0);
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            warn!(
                "Invalid font_weight '{}', falling back to 'normal'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "normal".to_string();
        }

        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, using default");
            self.export.filename_template = ExportConfig::default().filename_template;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/pixmark/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("pixmark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `path`, or returns defaults if the file doesn't exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at `path` or it cannot be written.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Tool;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.drawing.default_thickness, 3.0);
        assert_eq!(config.drawing.default_font_size, 20.0);
        assert_eq!(config.history.max_snapshots, 100);
        assert_eq!(config.tool.default_tool, Tool::Select);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[drawing]
default_thickness = 120.0
default_font_size = 1.0
font_weight = "chunky"

[tool]
default_tool = "ellipse"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_thickness, 50.0);
        assert_eq!(config.drawing.default_font_size, 5.0);
        assert_eq!(config.drawing.font_weight, "normal");
        assert_eq!(config.tool.default_tool, Tool::Ellipse);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixmark").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.export.filename_template, "annotated_%Y-%m-%d_%H%M%S");
        assert_eq!(
            config.keybindings.build_action_map().unwrap(),
            KeybindingsConfig::default().build_action_map().unwrap()
        );
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let props = &schema["properties"];
        for section in ["drawing", "tool", "history", "export", "keybindings"] {
            assert!(props.get(section).is_some(), "missing {section}");
        }
    }
}
