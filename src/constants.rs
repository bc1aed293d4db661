//! Global constants for the colormap creator

/// Two positions closer than this are treated as the same keypoint slot
pub const DEFAULT_TOLERANCE: f32 = 0.001;

/// Number of samples in an on-screen preview strip
pub const DEFAULT_PREVIEW_SAMPLES: usize = 256;

/// Number of samples (pixel columns) in exported image strips
pub const DEFAULT_EXPORT_SAMPLES: usize = 1000;

/// Height of exported image strips in pixels
pub const DEFAULT_STRIP_HEIGHT: u32 = 100;

/// Name given to colormaps that were never named
pub const DEFAULT_COLORMAP_NAME: &str = "custom_cmap";

/// Initial value of the position slider
pub const DEFAULT_SLIDER_POSITION: f32 = 0.5;

/// Maximum number of undo steps kept
pub const DEFAULT_UNDO_HISTORY: usize = 100;
