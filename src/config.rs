//! Configuration file support.
//!
//! Settings are stored as JSON. Every field has a default, so a partial file
//! (or an empty object) is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLORMAP_NAME, DEFAULT_EXPORT_SAMPLES, DEFAULT_PREVIEW_SAMPLES, DEFAULT_STRIP_HEIGHT,
    DEFAULT_TOLERANCE, DEFAULT_UNDO_HISTORY,
};
use crate::format::ExportOptions;
use crate::model::Gradient;
use crate::undo::UndoConfig;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Positions closer than this are merged when adding colors
    #[serde(default = "default_tolerance")]
    pub tolerance: f32,

    /// Number of samples in the on-screen preview strip
    #[serde(default = "default_preview_samples")]
    pub preview_samples: usize,

    /// Maximum number of undo steps
    #[serde(default = "default_undo_history")]
    pub undo_history: usize,

    /// Export defaults
    #[serde(default)]
    pub export: ExportPreferences,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

fn default_tolerance() -> f32 {
    DEFAULT_TOLERANCE
}

fn default_preview_samples() -> usize {
    DEFAULT_PREVIEW_SAMPLES
}

fn default_undo_history() -> usize {
    DEFAULT_UNDO_HISTORY
}

/// Export section of the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportPreferences {
    /// Format id used when the output extension is not recognized
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Pixel columns in exported image strips
    #[serde(default = "default_export_samples")]
    pub samples: usize,

    /// Height of exported image strips
    #[serde(default = "default_strip_height")]
    pub height: u32,

    /// Name given to exported colormaps
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_format() -> String {
    "json".to_string()
}

fn default_export_samples() -> usize {
    DEFAULT_EXPORT_SAMPLES
}

fn default_strip_height() -> u32 {
    DEFAULT_STRIP_HEIGHT
}

fn default_name() -> String {
    DEFAULT_COLORMAP_NAME.to_string()
}

impl Default for ExportPreferences {
    fn default() -> Self {
        Self {
            default_format: default_format(),
            samples: default_export_samples(),
            height: default_strip_height(),
            name: default_name(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            tolerance: default_tolerance(),
            preview_samples: default_preview_samples(),
            undo_history: default_undo_history(),
            export: ExportPreferences::default(),
            log_level: LogLevel::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }
        if config.tolerance.is_nan() || config.tolerance < 0.0 {
            log::warn!(
                "Tolerance {} is not a non-negative number, treating it as 0",
                config.tolerance
            );
        }

        Ok(config)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Write the configuration, creating parent directories if needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "colormap-creator.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(
                config_dir
                    .join("colormap-creator")
                    .join(Self::default_filename()),
            )
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("colormap-creator")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// An empty gradient using the configured tolerance.
    pub fn new_gradient(&self) -> Gradient {
        Gradient::new(self.tolerance)
    }

    /// Undo settings.
    pub fn undo_config(&self) -> UndoConfig {
        UndoConfig {
            max_history: self.undo_history,
        }
    }

    /// Export options from the export section.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions::new()
            .samples(self.export.samples)
            .height(self.export.height)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
