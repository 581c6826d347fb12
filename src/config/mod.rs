//! Configuration management for the joystick
//!
//! Handles loading, validating and saving YAML joystick configuration, and
//! turning it into [`JoystickSettings`].
//!
//! Every field has a default, so an empty file describes the stock joystick:
//!
//! ```yaml
//! outer:
//!   width: 120
//!   height: 120
//!   fill: "#000000"
//!   opacity: 0.5
//! inner:
//!   width: 70
//!   height: 70
//!   fill: "#000000"
//!   opacity: 0.5
//! outer_scale: { x: 1.0, y: 1.0 }
//! inner_scale: { x: 1.0, y: 1.0 }
//! multi_touch: false
//! position: { x: 50.0, y: 50.0 }
//! ```

pub mod watcher;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::geometry::{Point, Scale};
use crate::host::{Color, Ellipse, ShapeFactory};
use crate::joystick::{
    JoystickSettings, DEFAULT_INNER_SIZE, DEFAULT_OUTER_OPACITY, DEFAULT_OUTER_SIZE,
    STANDBY_OPACITY,
};

pub use watcher::ConfigWatcher;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JoystickConfig {
    #[serde(default = "default_outer")]
    pub outer: ShapeConfig,
    #[serde(default = "default_inner")]
    pub inner: ShapeConfig,
    #[serde(default)]
    pub outer_scale: Scale,
    #[serde(default)]
    pub inner_scale: Scale,
    #[serde(default)]
    pub multi_touch: bool,
    /// Global position of the joystick's top-left corner
    #[serde(default = "default_position")]
    pub position: Point,
}

/// Ellipse element configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShapeConfig {
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_opacity")]
    pub opacity: f32,
}

impl ShapeConfig {
    fn validate(&self, name: &str) -> Result<()> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!(
                    "{} {} must be a finite, non-negative number (got {})",
                    name, field, value
                );
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            anyhow::bail!("{} opacity {} is invalid (must be 0.0-1.0)", name, self.opacity);
        }
        Color::from_hex(&self.fill).with_context(|| format!("Invalid {} fill", name))?;
        Ok(())
    }

    /// Build the ellipse this entry describes.
    pub fn to_ellipse(&self) -> Result<Ellipse> {
        let fill = Color::from_hex(&self.fill)?;
        Ok(Ellipse::ellipse(self.width, self.height, fill, self.opacity))
    }
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            outer: default_outer(),
            inner: default_inner(),
            outer_scale: Scale::default(),
            inner_scale: Scale::default(),
            multi_touch: false,
            position: default_position(),
        }
    }
}

impl JoystickConfig {
    /// Load configuration from file with validation
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        // An empty document is valid and means "all defaults"
        let config: JoystickConfig = if contents.trim().is_empty() {
            JoystickConfig::default()
        } else {
            serde_yaml::from_str(contents).context("Failed to parse YAML config")?
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;

        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Validate configuration for correctness
    pub fn validate(&self) -> Result<()> {
        self.outer.validate("outer")?;
        self.inner.validate("inner")?;

        for (name, scale) in [("outer_scale", self.outer_scale), ("inner_scale", self.inner_scale)] {
            if !scale.x.is_finite() || !scale.y.is_finite() || scale.x < 0.0 || scale.y < 0.0 {
                anyhow::bail!(
                    "{} ({}, {}) must be finite and non-negative",
                    name, scale.x, scale.y
                );
            }
        }

        if !self.position.x.is_finite() || !self.position.y.is_finite() {
            anyhow::bail!("position must be finite");
        }

        Ok(())
    }

    /// Joystick settings with ellipse elements built from this configuration.
    ///
    /// Callbacks are left empty for the caller to attach.
    pub fn to_settings(&self) -> Result<JoystickSettings<Ellipse>> {
        let settings = JoystickSettings::new()
            .outer(self.outer.to_ellipse().context("Invalid outer element")?)
            .inner(self.inner.to_ellipse().context("Invalid inner element")?)
            .outer_scale(self.outer_scale.x, self.outer_scale.y)
            .inner_scale(self.inner_scale.x, self.inner_scale.y)
            .multi_touch(self.multi_touch);
        Ok(settings)
    }
}

// Default value functions
fn default_outer() -> ShapeConfig {
    ShapeConfig {
        width: DEFAULT_OUTER_SIZE,
        height: DEFAULT_OUTER_SIZE,
        fill: default_fill(),
        opacity: DEFAULT_OUTER_OPACITY,
    }
}
fn default_inner() -> ShapeConfig {
    ShapeConfig {
        width: DEFAULT_INNER_SIZE,
        height: DEFAULT_INNER_SIZE,
        fill: default_fill(),
        opacity: STANDBY_OPACITY,
    }
}
fn default_fill() -> String { "#000000".to_string() }
fn default_opacity() -> f32 { 0.5 }
fn default_position() -> Point { Point::new(50.0, 50.0) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Drawable;
    use crate::joystick::Joystick;
    use tempfile::TempDir;

    #[test]
    fn test_empty_document_is_default() {
        let config = JoystickConfig::from_yaml_str("").unwrap();
        assert_eq!(config, JoystickConfig::default());
        assert_eq!(config.outer.width, 120.0);
        assert_eq!(config.inner.width, 70.0);
        assert_eq!(config.outer_scale, Scale::new(1.0, 1.0));
    }

    #[test]
    fn test_partial_document_merges_defaults() {
        let config = JoystickConfig::from_yaml_str(
            r##"
outer_scale: { x: 2.0, y: 2.0 }
inner:
  width: 80
  height: 80
  fill: "#00ff00"
"##,
        )
        .unwrap();

        assert_eq!(config.outer_scale, Scale::new(2.0, 2.0));
        assert_eq!(config.inner_scale, Scale::new(1.0, 1.0));
        assert_eq!(config.inner.fill, "#00ff00");
        assert_eq!(config.inner.opacity, 0.5);
        assert_eq!(config.outer, default_outer());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let negative = "outer: { width: -1, height: 120 }";
        assert!(JoystickConfig::from_yaml_str(negative).is_err());

        let opacity = "inner: { width: 70, height: 70, opacity: 1.5 }";
        assert!(JoystickConfig::from_yaml_str(opacity).is_err());

        let fill = "inner: { width: 70, height: 70, fill: \"red\" }";
        assert!(JoystickConfig::from_yaml_str(fill).is_err());

        let scale = "outer_scale: { x: -2.0, y: 1.0 }";
        assert!(JoystickConfig::from_yaml_str(scale).is_err());
    }

    #[test]
    fn test_zero_sizes_are_allowed() {
        let config = JoystickConfig::from_yaml_str(
            "outer: { width: 0, height: 0 }\ninner: { width: 0, height: 0 }",
        )
        .unwrap();
        assert_eq!(config.outer.width, 0.0);
    }

    #[test]
    fn test_settings_build_joystick() {
        let config = JoystickConfig::from_yaml_str(
            r##"
outer: { width: 150, height: 150, fill: "#ff0000" }
outer_scale: { x: 1.5, y: 1.5 }
multi_touch: true
"##,
        )
        .unwrap();

        let joystick = Joystick::new(config.to_settings().unwrap());
        assert_eq!(joystick.outer().fill, Color::rgb(255, 0, 0));
        assert_eq!(joystick.outer().scale(), Scale::new(1.5, 1.5));
        assert_eq!(joystick.outer_radius(), 150.0 * 1.5 / 2.5);
        assert!(joystick.multi_touch());
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("joystick.yaml");

        let mut config = JoystickConfig::default();
        config.inner_scale = Scale::new(0.9, 0.9);
        config.outer.fill = "#336699".to_string();
        config.save(&path)?;

        let loaded = JoystickConfig::load(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = JoystickConfig::load("/nonexistent/joystick.yaml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/joystick.yaml"));
    }
}
