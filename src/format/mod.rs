//! Colormap import/export system.
//!
//! Every format converts to and from [`ColormapData`], the flat keypoint
//! record. New formats are added by implementing [`ColormapFormat`] and
//! registering them with a [`FormatRegistry`].
//!
//! ## Supported Formats
//!
//! - **JSON**: Native format with full fidelity (name, version, keypoints)
//! - **NPY**: NumPy `(k, 4)` array of position, r, g, b
//! - **PNG**: Rendered strip, export only
//! - **Python**: matplotlib snippet, export only
//! - **CSS**: `linear-gradient` rule, export only
//!
//! ## Usage
//!
//! ```rust,no_run
//! use colormap_creator::format::{ColormapData, ExportOptions, FormatRegistry};
//! use colormap_creator::model::Gradient;
//!
//! let gradient = Gradient::default();
//! let data = ColormapData::from_gradient(&gradient, "grays")?;
//!
//! let registry = FormatRegistry::new();
//! let png = registry.get("png").expect("png is built in");
//! png.export(&data, "grays.png".as_ref(), &ExportOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod data;
mod error;
pub mod formats;
mod registry;
mod traits;

pub use data::{ColormapData, KeypointEntry};
pub use error::FormatError;
pub use registry::FormatRegistry;
pub use traits::{ColormapFormat, ExportOptions, ExportResult, FormatWarning, WarningSeverity};
