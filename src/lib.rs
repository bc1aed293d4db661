//! Colormap Creator
//!
//! Build custom color gradients from keypoints, sample them, and save them
//! in formats that plotting tools and stylesheets understand.
//!
//! - [`model`]: colors, keypoints and the [`model::Gradient`] store
//! - [`format`]: import/export through [`format::FormatRegistry`]
//! - [`session`]: picker, selection and undo around a gradient
//! - [`config`]: persisted settings

pub mod color_utils;
pub mod config;
pub mod constants;
pub mod format;
pub mod model;
pub mod session;
pub mod undo;

pub use config::AppConfig;
pub use model::{Gradient, Hsv, Keypoint, Rgb};
pub use session::Session;
