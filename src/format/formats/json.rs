//! Native JSON colormap format.
//!
//! Full fidelity: name, version and every keypoint as
//! `{ "position": .., "r": .., "g": .., "b": .. }`.

use crate::format::data::ColormapData;
use crate::format::error::FormatError;
use crate::format::traits::{ColormapFormat, ExportOptions, ExportResult};

/// Native JSON format.
pub struct JsonFormat;

impl ColormapFormat for JsonFormat {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "Colormap (JSON)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["cmap.json", "json"]
    }

    fn supports_import(&self) -> bool {
        true
    }

    fn export_to_bytes(
        &self,
        data: &ColormapData,
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        data.to_samplable_gradient()?;

        // Serialize with pretty printing for readability
        let json = serde_json::to_string_pretty(data)?;
        log::info!(
            "Exported colormap '{}' with {} keypoints to JSON",
            data.name,
            data.colors.len()
        );

        let result = ExportResult::with_keypoints(data.colors.len(), json.len());
        Ok((json.into_bytes(), result))
    }

    fn import_from_bytes(&self, bytes: &[u8]) -> Result<ColormapData, FormatError> {
        let data: ColormapData = serde_json::from_slice(bytes)?;
        data.validate()?;

        log::info!(
            "Imported colormap '{}' with {} keypoints (format version {})",
            data.name,
            data.colors.len(),
            data.version
        );
        Ok(data)
    }
}
