//! CSS `linear-gradient` export.

use crate::format::data::ColormapData;
use crate::format::error::FormatError;
use crate::format::traits::{ColormapFormat, ExportOptions, ExportResult};

/// CSS rule format (export only).
pub struct CssFormat;

/// Turn a colormap name into a CSS class name.
fn class_name(name: &str) -> String {
    let class: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if class.is_empty() || class.starts_with(|c: char| c.is_ascii_digit()) {
        format!("cmap-{}", class)
    } else {
        class
    }
}

/// Position as a percentage with at most two decimals, e.g. `12.5%`.
fn percent(position: f32) -> String {
    let pct = (position * 10000.0).round() / 100.0;
    format!("{}%", pct)
}

impl CssFormat {
    /// The `linear-gradient(...)` value on its own.
    pub fn gradient_value(data: &ColormapData) -> Result<String, FormatError> {
        let gradient = data.to_samplable_gradient()?;
        let stops: Vec<String> = gradient
            .keypoints()
            .iter()
            .map(|k| format!("{} {}", k.color.to_hex(), percent(k.position)))
            .collect();
        Ok(format!("linear-gradient(to right, {})", stops.join(", ")))
    }
}

impl ColormapFormat for CssFormat {
    fn id(&self) -> &'static str {
        "css"
    }

    fn display_name(&self) -> &'static str {
        "CSS gradient"
    }

    fn extensions(&self) -> &[&'static str] {
        &["css"]
    }

    fn export_to_bytes(
        &self,
        data: &ColormapData,
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let css = format!(
            ".{} {{\n  background: {};\n}}\n",
            class_name(&data.name),
            Self::gradient_value(data)?
        );
        let result = ExportResult::with_keypoints(data.colors.len(), css.len());
        Ok((css.into_bytes(), result))
    }
}
