// ABOUTME: Application configuration handling.
// ABOUTME: Loads and saves workspace layout settings from TOML config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::Axis;

/// How the workspace splits its extent between panes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Axis the panes are stacked along
    pub axis: Axis,

    /// Thickness of the draggable handle between two panes
    pub handle_width: f32,

    /// Extra distance on each side of a handle that still grabs it
    pub grab_tolerance: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            handle_width: 4.0,
            grab_tolerance: 3.0,
        }
    }
}

/// One pane of the workspace as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneSettings {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<f32>,
}

impl PaneSettings {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            initial_size: None,
            min_size: None,
            max_size: None,
        }
    }

    pub fn initial(mut self, size: f32) -> Self {
        self.initial_size = Some(size);
        self
    }

    pub fn min(mut self, size: f32) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn max(mut self, size: f32) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Default workspace: transport bar, timeline, mixer
    pub fn defaults() -> Vec<PaneSettings> {
        vec![
            PaneSettings::new("transport").initial(48.0).min(48.0).max(48.0),
            PaneSettings::new("timeline").min(120.0),
            PaneSettings::new("mixer").initial(250.0).min(150.0).max(480.0),
        ]
    }
}

/// Mixer panel settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerSettings {
    /// Key of the pane the mixer panel lives in
    pub pane: String,

    /// Height reserved for channel names above the faders
    pub header_height: f32,

    /// Height reserved for pan knobs and routing below the faders
    pub footer_height: f32,

    /// Height the mixer jumps to when toggled open
    pub expanded_height: f32,
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self {
            pane: "mixer".to_string(),
            header_height: 24.0,
            footer_height: 56.0,
            expanded_height: 400.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pane layout behaviour
    pub layout: LayoutSettings,

    /// Panes in stacking order
    pub panes: Vec<PaneSettings>,

    /// Mixer panel settings
    pub mixer: MixerSettings,

    /// Window dimensions
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            panes: PaneSettings::defaults(),
            mixer: MixerSettings::default(),
            window_width: 1200,
            window_height: 800,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

impl Config {
    /// Get the default config file path (~/.config/orpheus-workstation/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("orpheus-workstation").join("config.toml"))
    }

    /// Load config from a path
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from default path, or return default config if not found
    pub fn load_or_default() -> Self {
        Self::default_path()
            .and_then(|path| Self::load(&path).ok())
            .unwrap_or_default()
    }

    /// Save config to a path
    pub fn save(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Extent of the window along the layout axis
    pub fn window_extent(&self) -> f32 {
        match self.layout.axis {
            Axis::Horizontal => self.window_width as f32,
            Axis::Vertical => self.window_height as f32,
        }
    }
}
