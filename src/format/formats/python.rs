//! Python source snippet export.
//!
//! Emits a script that rebuilds the colormap with matplotlib's
//! `LinearSegmentedColormap.from_list` and shows a usage example.

use crate::format::data::ColormapData;
use crate::format::error::FormatError;
use crate::format::traits::{ColormapFormat, ExportOptions, ExportResult, FormatWarning};

/// matplotlib snippet format (export only).
pub struct PythonFormat;

/// Turn a colormap name into a valid Python identifier.
fn python_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Python list literal of floats, e.g. `[0.0, 0.5, 1.0]`.
fn float_list(values: impl Iterator<Item = f32>) -> String {
    let items: Vec<String> = values.map(|v| format!("{:?}", v)).collect();
    format!("[{}]", items.join(", "))
}

impl PythonFormat {
    /// Generate the script text.
    pub fn render(data: &ColormapData) -> Result<(String, Vec<FormatWarning>), FormatError> {
        let gradient = data.to_samplable_gradient()?;
        let ident = python_identifier(&data.name);
        let mut warnings = Vec::new();

        let positions = gradient.positions();
        if positions.first() != Some(&0.0) || positions.last() != Some(&1.0) {
            warnings.push(FormatWarning::warning(
                "matplotlib requires the first position to be 0.0 and the last 1.0",
            ));
        }

        let colors: Vec<String> = gradient
            .colors()
            .iter()
            .map(|c| format!("({:?}, {:?}, {:?})", c.r, c.g, c.b))
            .collect();

        let code = format!(
            r#"# Custom Colormap
from matplotlib.colors import LinearSegmentedColormap
import matplotlib.pyplot as plt
import numpy as np

# Define colors and positions
colors = [{colors}]
positions = {positions}

# Create colormap
{ident} = LinearSegmentedColormap.from_list(
    '{ident}',
    list(zip(positions, colors))
)

# Example usage:
data = np.random.rand(10, 10)
plt.figure(figsize=(8, 6))
plt.imshow(data, cmap={ident})
plt.colorbar(label='Value')
plt.title('Data with Custom Colormap')
plt.show()
"#,
            colors = colors.join(", "),
            positions = float_list(positions.into_iter()),
        );

        Ok((code, warnings))
    }
}

impl ColormapFormat for PythonFormat {
    fn id(&self) -> &'static str {
        "python"
    }

    fn display_name(&self) -> &'static str {
        "Python code (matplotlib)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["py"]
    }

    fn export_to_bytes(
        &self,
        data: &ColormapData,
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let (code, warnings) = Self::render(data)?;

        let mut result = ExportResult::with_keypoints(data.colors.len(), code.len());
        for warning in warnings {
            result.add_warning(warning);
        }
        Ok((code.into_bytes(), result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_identifier() {
        assert_eq!(python_identifier("custom_cmap"), "custom_cmap");
        assert_eq!(python_identifier("my map-2"), "my_map_2");
        assert_eq!(python_identifier("3d"), "_3d");
        assert_eq!(python_identifier(""), "_");
    }

    #[test]
    fn test_float_list() {
        assert_eq!(float_list([0.0, 0.5, 1.0].into_iter()), "[0.0, 0.5, 1.0]");
    }
}
