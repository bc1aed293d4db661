//! Colormap data structures for import/export.
//!
//! `ColormapData` is the intermediate representation every format converts
//! to and from: a name plus a flat list of `{ position, r, g, b }` records.
//!
//! # Versioning
//!
//! The record uses semantic versioning (MAJOR.MINOR.PATCH). Version 0.x.x is
//! unstable and may change between minor releases; files from another 0.x
//! minor version are read with a warning.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_COLORMAP_NAME;
use crate::format::error::FormatError;
use crate::model::{Gradient, GradientError, Keypoint, Rgb};

/// A colormap ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColormapData {
    /// Format version for compatibility checking.
    #[serde(default = "current_version")]
    pub version: String,

    /// Colormap name, used as identifier in generated code.
    #[serde(default = "default_name")]
    pub name: String,

    /// Keypoints in ascending position order.
    pub colors: Vec<KeypointEntry>,
}

fn current_version() -> String {
    ColormapData::CURRENT_VERSION.to_string()
}

fn default_name() -> String {
    DEFAULT_COLORMAP_NAME.to_string()
}

impl ColormapData {
    /// Current version of the colormap data format.
    pub const CURRENT_VERSION: &'static str = "0.1.0";

    /// Major version number for compatibility checking.
    pub const VERSION_MAJOR: u32 = 0;

    /// Minor version number.
    pub const VERSION_MINOR: u32 = 1;

    /// Create an empty colormap record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: current_version(),
            name: name.into(),
            colors: Vec::new(),
        }
    }

    /// Snapshot a gradient. Needs at least two keypoints.
    pub fn from_gradient(gradient: &Gradient, name: impl Into<String>) -> Result<Self, GradientError> {
        gradient.ensure_samplable()?;
        Ok(Self {
            version: current_version(),
            name: name.into(),
            colors: gradient
                .keypoints()
                .iter()
                .map(KeypointEntry::from_keypoint)
                .collect(),
        })
    }

    /// Builder helper: append a keypoint record.
    pub fn with_color(mut self, position: f32, color: Rgb) -> Self {
        self.colors.push(KeypointEntry::new(position, color));
        self
    }

    /// Parse a version string into (major, minor, patch) components.
    pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let major = parts[0].parse().ok()?;
        let minor = parts[1].parse().ok()?;
        let patch = parts[2].parse().ok()?;
        Some((major, minor, patch))
    }

    /// Check if a version is fully compatible with the current version.
    ///
    /// For version 0.x.x only an exact minor version match is compatible.
    pub fn is_version_compatible(file_version: &str) -> bool {
        let Some((file_major, file_minor, _)) = Self::parse_version(file_version) else {
            return false;
        };

        if Self::VERSION_MAJOR == 0 {
            file_major == 0 && file_minor == Self::VERSION_MINOR
        } else {
            file_major == Self::VERSION_MAJOR
        }
    }

    /// Check if a version can be read at all, possibly with warnings.
    pub fn is_version_readable(file_version: &str) -> bool {
        let Some((file_major, _, _)) = Self::parse_version(file_version) else {
            return false;
        };
        file_major == Self::VERSION_MAJOR
    }

    /// Check version and value ranges.
    ///
    /// Every position and channel must be a finite value in [0, 1].
    pub fn validate(&self) -> Result<(), FormatError> {
        if !Self::is_version_readable(&self.version) {
            return Err(FormatError::VersionMismatch {
                expected: Self::CURRENT_VERSION.to_string(),
                found: self.version.clone(),
            });
        }
        if !Self::is_version_compatible(&self.version) {
            log::warn!(
                "Colormap version {} may not be fully compatible with current version {}",
                self.version,
                Self::CURRENT_VERSION
            );
        }

        for (i, entry) in self.colors.iter().enumerate() {
            if !in_unit_range(entry.position) {
                return Err(FormatError::invalid_format(format!(
                    "keypoint {}: position {} is outside [0, 1]",
                    i, entry.position
                )));
            }
            for (channel, value) in [("r", entry.r), ("g", entry.g), ("b", entry.b)] {
                if !in_unit_range(value) {
                    return Err(FormatError::invalid_format(format!(
                        "keypoint {}: channel {} = {} is outside [0, 1]",
                        i, channel, value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate and build a gradient with the given tolerance.
    pub fn to_gradient(&self, tolerance: f32) -> Result<Gradient, FormatError> {
        self.validate()?;
        let keypoints = self.colors.iter().map(KeypointEntry::to_keypoint).collect();
        Ok(Gradient::from_keypoints(keypoints, tolerance))
    }

    /// Validate and build a gradient that can be sampled (two or more keypoints).
    pub(crate) fn to_samplable_gradient(&self) -> Result<Gradient, FormatError> {
        let gradient = self.to_gradient(crate::constants::DEFAULT_TOLERANCE)?;
        gradient.ensure_samplable()?;
        Ok(gradient)
    }

    /// Positions in record order.
    pub fn positions(&self) -> Vec<f32> {
        self.colors.iter().map(|c| c.position).collect()
    }
}

impl Default for ColormapData {
    fn default() -> Self {
        Self::new(DEFAULT_COLORMAP_NAME)
    }
}

fn in_unit_range(value: f32) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}

/// One keypoint as stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointEntry {
    /// Position in [0, 1].
    pub position: f32,
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl KeypointEntry {
    /// Create a new record.
    pub fn new(position: f32, color: Rgb) -> Self {
        Self {
            position,
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    /// Create from a gradient keypoint.
    pub fn from_keypoint(keypoint: &Keypoint) -> Self {
        Self::new(keypoint.position, keypoint.color)
    }

    /// Convert to a gradient keypoint.
    pub fn to_keypoint(&self) -> Keypoint {
        Keypoint::new(self.position, self.color())
    }

    /// The record's color.
    pub fn color(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

impl Gradient {
    /// Export the keypoints for persistence. Needs at least two keypoints.
    pub fn export_data(&self, name: impl Into<String>) -> Result<ColormapData, GradientError> {
        ColormapData::from_gradient(self, name)
    }

    /// Build a gradient from persisted keypoints.
    ///
    /// Fails with [`FormatError`] when any position or channel is outside [0, 1].
    pub fn import_data(data: &ColormapData, tolerance: f32) -> Result<Gradient, FormatError> {
        data.to_gradient(tolerance)
    }
}
