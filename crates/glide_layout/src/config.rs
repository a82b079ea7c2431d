//! Scroll viewer configuration file handling
//!
//! A viewer config is a flat TOML table; every key is optional:
//!
//! ```toml
//! scroll_mode = "horizontal_vertical"
//! deceleration = 1200.0
//! snap_to_anchors = true
//! scroll_bar_color = [0.2, 0.2, 0.2, 1.0]
//!
//! [padding]
//! left = 4.0
//! right = 4.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glide_core::{Color, Thickness};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::widgets::scroll::ScrollMode;

/// Errors raised while loading a viewer configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Every tunable property of a scroll viewer
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollViewerConfig {
    #[serde(default = "default_bar_color")]
    pub scroll_bar_color: Color,
    /// Fraction of the bar color kept once the bar has faded out
    #[serde(default)]
    pub scroll_bar_fade_alpha: f32,
    #[serde(default = "default_bar_thickness")]
    pub scroll_bar_thickness: f32,
    #[serde(default)]
    pub scroll_mode: ScrollMode,
    /// Distance a finger travels before the drag becomes a scroll
    #[serde(default = "default_start_threshold")]
    pub scroll_start_threshold: f32,
    /// Velocity loss in virtual pixels per second squared
    #[serde(default = "default_deceleration")]
    pub deceleration: f32,
    #[serde(default = "default_true")]
    pub touch_scrolling_enabled: bool,
    #[serde(default = "default_sensitivity")]
    pub scroll_sensitivity: f32,
    #[serde(default = "default_wheel_sensitivity")]
    pub mouse_wheel_scroll_sensitivity: f32,
    #[serde(default)]
    pub snap_to_anchors: bool,
    #[serde(default)]
    pub padding: Thickness,
}

fn default_bar_color() -> Color {
    Color::rgba(0.1, 0.1, 0.1, 1.0)
}

fn default_bar_thickness() -> f32 {
    6.0
}

fn default_start_threshold() -> f32 {
    10.0
}

fn default_deceleration() -> f32 {
    1500.0
}

fn default_true() -> bool {
    true
}

fn default_sensitivity() -> f32 {
    1.0
}

fn default_wheel_sensitivity() -> f32 {
    10.0
}

impl Default for ScrollViewerConfig {
    fn default() -> Self {
        Self {
            scroll_bar_color: default_bar_color(),
            scroll_bar_fade_alpha: 0.0,
            scroll_bar_thickness: default_bar_thickness(),
            scroll_mode: ScrollMode::default(),
            scroll_start_threshold: default_start_threshold(),
            deceleration: default_deceleration(),
            touch_scrolling_enabled: true,
            scroll_sensitivity: default_sensitivity(),
            mouse_wheel_scroll_sensitivity: default_wheel_sensitivity(),
            snap_to_anchors: false,
            padding: Thickness::ZERO,
        }
    }
}

impl ScrollViewerConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize back to TOML text
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Reject values the viewer cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("scroll_bar_fade_alpha", self.scroll_bar_fade_alpha),
            ("scroll_bar_thickness", self.scroll_bar_thickness),
            ("scroll_start_threshold", self.scroll_start_threshold),
            ("deceleration", self.deceleration),
            ("scroll_sensitivity", self.scroll_sensitivity),
            (
                "mouse_wheel_scroll_sensitivity",
                self.mouse_wheel_scroll_sensitivity,
            ),
        ];
        for (field, value) in scalars {
            if value.is_nan() {
                return Err(invalid(field, "must be a number"));
            }
        }

        if self.scroll_bar_color.to_array().iter().any(|c| c.is_nan()) {
            return Err(invalid("scroll_bar_color", "must be a number"));
        }
        let padding = self.padding.size();
        if padding.to_array().iter().any(|p| p.is_nan() || *p < 0.0) {
            return Err(invalid("padding", "must be a non-negative number"));
        }

        for (field, value) in [
            ("scroll_bar_thickness", self.scroll_bar_thickness),
            ("scroll_start_threshold", self.scroll_start_threshold),
            ("deceleration", self.deceleration),
        ] {
            if value < 0.0 {
                return Err(invalid(field, format!("must not be negative (got {value})")));
            }
        }

        if !(0.0..=1.0).contains(&self.scroll_bar_fade_alpha) {
            return Err(invalid(
                "scroll_bar_fade_alpha",
                format!("must be within [0, 1] (got {})", self.scroll_bar_fade_alpha),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}
