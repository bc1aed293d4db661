//! PNG image strip export.
//!
//! Renders the gradient left to right, one pixel column per sample.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

use crate::format::data::ColormapData;
use crate::format::error::FormatError;
use crate::format::traits::{ColormapFormat, ExportOptions, ExportResult, FormatWarning};

/// PNG strip format (export only).
pub struct PngFormat;

impl PngFormat {
    /// Render the strip without encoding it.
    pub fn render(data: &ColormapData, options: &ExportOptions) -> Result<RgbImage, FormatError> {
        if options.samples == 0 || options.height == 0 {
            return Err(FormatError::invalid_format(format!(
                "image size {}x{} is empty",
                options.samples, options.height
            )));
        }
        let width = u32::try_from(options.samples).map_err(|_| {
            FormatError::invalid_format(format!("{} samples is too wide", options.samples))
        })?;

        let gradient = data.to_samplable_gradient()?;
        let columns: Vec<[u8; 3]> = gradient
            .render_preview(options.samples)?
            .map(|c| c.to_u8())
            .collect();

        Ok(RgbImage::from_fn(width, options.height, |x, _| {
            image::Rgb(columns[x as usize])
        }))
    }
}

impl ColormapFormat for PngFormat {
    fn id(&self) -> &'static str {
        "png"
    }

    fn display_name(&self) -> &'static str {
        "PNG image"
    }

    fn extensions(&self) -> &[&'static str] {
        &["png"]
    }

    fn export_to_bytes(
        &self,
        data: &ColormapData,
        options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let img = Self::render(data, options)?;

        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

        let mut result = ExportResult::with_keypoints(data.colors.len(), bytes.len());
        result.samples_written = options.samples;
        if options.samples < data.colors.len() {
            result.add_warning(FormatWarning::warning(format!(
                "{} samples cannot show all {} keypoints",
                options.samples,
                data.colors.len()
            )));
        }

        log::info!(
            "Rendered colormap '{}' to {}x{} PNG",
            data.name,
            options.samples,
            options.height
        );
        Ok((bytes, result))
    }
}
