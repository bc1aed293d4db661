//! Data models for the colormap creator.

mod color;
mod error;
mod gradient;
mod keypoint;

pub use color::{Hsv, Rgb};
pub use error::GradientError;
pub use gradient::{Gradient, Preview};
pub use keypoint::{AddOutcome, Keypoint, PendingEdit};
