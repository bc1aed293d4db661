//! Trait definitions for colormap format implementations.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_EXPORT_SAMPLES, DEFAULT_STRIP_HEIGHT};
use crate::format::data::ColormapData;
use crate::format::error::FormatError;

/// Trait for colormap import/export implementations.
///
/// Formats work on bytes; the path-based methods are thin wrappers that
/// read or write a single file.
pub trait ColormapFormat: Send + Sync {
    /// Unique identifier for this format (e.g., "json", "npy", "png").
    fn id(&self) -> &'static str;

    /// Human-readable name for UI display.
    fn display_name(&self) -> &'static str;

    /// File extensions this format uses, without the leading dot.
    fn extensions(&self) -> &[&'static str];

    /// Whether [`import_from_bytes`](Self::import_from_bytes) is implemented.
    fn supports_import(&self) -> bool {
        false
    }

    /// Encode a colormap to bytes.
    fn export_to_bytes(
        &self,
        data: &ColormapData,
        options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError>;

    /// Encode a colormap and write it to `path`.
    fn export(
        &self,
        data: &ColormapData,
        path: &Path,
        options: &ExportOptions,
    ) -> Result<ExportResult, FormatError> {
        log::info!(
            "Exporting colormap '{}' as {} to {:?}",
            data.name,
            self.display_name(),
            path
        );

        let (bytes, mut result) = self.export_to_bytes(data, options)?;
        std::fs::write(path, &bytes)?;
        result.bytes_written = bytes.len();
        result.files_created = vec![path.to_path_buf()];

        for warning in &result.warnings {
            log::warn!("{}", warning.message);
        }
        Ok(result)
    }

    /// Decode a colormap from bytes.
    fn import_from_bytes(&self, _bytes: &[u8]) -> Result<ColormapData, FormatError> {
        Err(FormatError::UnsupportedOperation(format!(
            "{} cannot be imported",
            self.display_name()
        )))
    }

    /// Read and decode a colormap from `path`.
    fn import(&self, path: &Path) -> Result<ColormapData, FormatError> {
        log::info!("Importing {} from {:?}", self.display_name(), path);
        let bytes = std::fs::read(path)?;
        self.import_from_bytes(&bytes)
    }
}

/// Options for export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Number of evenly spaced samples for sampled formats (image width).
    pub samples: usize,

    /// Image height in pixels.
    pub height: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            samples: DEFAULT_EXPORT_SAMPLES,
            height: DEFAULT_STRIP_HEIGHT,
        }
    }
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of samples.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the image height.
    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
}

/// Result of an export operation.
#[derive(Debug, Default)]
pub struct ExportResult {
    /// Number of keypoints written.
    pub keypoints_exported: usize,

    /// Number of sampled colors written (sampled formats only).
    pub samples_written: usize,

    /// Size of the encoded output.
    pub bytes_written: usize,

    /// Warnings generated during export.
    pub warnings: Vec<FormatWarning>,

    /// Files created during export.
    pub files_created: Vec<PathBuf>,
}

impl ExportResult {
    /// Create a new export result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for a keypoint-based export.
    pub fn with_keypoints(keypoints_exported: usize, bytes_written: usize) -> Self {
        Self {
            keypoints_exported,
            bytes_written,
            ..Self::default()
        }
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: FormatWarning) {
        self.warnings.push(warning);
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Warning generated during format conversion.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Human-readable warning message.
    pub message: String,

    /// Severity level of the warning.
    pub severity: WarningSeverity,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>, severity: WarningSeverity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Create an info-level warning.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Info)
    }

    /// Create a warning-level warning.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, WarningSeverity::Warning)
    }
}

/// Severity level for format warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    /// Informational message, not a problem.
    Info,
    /// The output may not behave as the gradient does.
    Warning,
}
