//! Colormap format implementations.

mod css;
mod json;
mod npy;
mod png;
mod python;

#[cfg(test)]
mod tests;

pub use css::CssFormat;
pub use json::JsonFormat;
pub use npy::NpyFormat;
pub use png::PngFormat;
pub use python::PythonFormat;
