//! User preferences loaded from TOML.
//!
//! Every field is optional in the file; anything left out keeps its default.
//!
//! ```toml
//! grid_size = 40.0
//!
//! [palette]
//! background = "#202020"
//!
//! [emit]
//! american_style = false
//! ```

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::emit::EmitOptions;
use crate::error::{Result, TikzcircError};
use crate::render::{RenderSettings, DEFAULT_FONT_SIZE, DEFAULT_GRID_SIZE, DEFAULT_LABEL_PADDING};

/// Colors as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub component: String,
    pub selected: String,
    pub grid: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#000000".to_string(),
            component: "#ffffff".to_string(),
            selected: "#ff5050".to_string(),
            grid: "#505050".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Device units per grid unit
    pub grid_size: f64,
    pub label_font_size: f64,
    pub label_padding: f64,
    pub palette: Palette,
    pub emit: EmitOptions,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            label_font_size: DEFAULT_FONT_SIZE,
            label_padding: DEFAULT_LABEL_PADDING,
            palette: Palette::default(),
            emit: EmitOptions::default(),
        }
    }
}

impl Preferences {
    /// Read preferences from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TikzcircError::FileReadError {
            path: path.display().to_string(),
            source,
        })?;
        let prefs = Self::from_toml(&text, &path.display().to_string())?;
        debug!("loaded preferences from {}", path.display());
        Ok(prefs)
    }

    /// Parse preferences from TOML text; `origin` names the source in errors.
    pub fn from_toml(text: &str, origin: &str) -> Result<Self> {
        let prefs: Self = toml::from_str(text).map_err(|e| TikzcircError::ConfigError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        if !(prefs.grid_size > 0.0) {
            return Err(TikzcircError::ConfigError {
                path: origin.to_string(),
                message: format!("grid_size must be positive, got {}", prefs.grid_size),
            });
        }
        Ok(prefs)
    }

    /// View parameters for drawing with these preferences, unpanned.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            grid_size: self.grid_size,
            font_size: self.label_font_size,
            label_padding: self.label_padding,
            ..RenderSettings::default()
        }
    }
}
