//! NumPy `.npy` colormap format.
//!
//! Keypoints are stored as a 2D array of shape `(k, 4)`, one row per
//! keypoint: `position, r, g, b`. Export writes `f32`; import also accepts
//! `f64` arrays as written by plain `numpy.save`.

use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, WriteNpyExt};

use crate::format::data::{ColormapData, KeypointEntry};
use crate::format::error::FormatError;
use crate::format::traits::{ColormapFormat, ExportOptions, ExportResult};
use crate::model::Rgb;

/// Number of columns per keypoint row.
const COLUMNS: usize = 4;

/// NumPy array format.
pub struct NpyFormat;

impl NpyFormat {
    /// NumPy magic bytes: \x93NUMPY
    const MAGIC: &'static [u8] = &[0x93, b'N', b'U', b'M', b'P', b'Y'];

    /// Check whether bytes look like an `.npy` file.
    pub fn is_npy(bytes: &[u8]) -> bool {
        bytes.starts_with(Self::MAGIC)
    }

    fn read_rows(bytes: &[u8]) -> Result<Array2<f32>, FormatError> {
        match Array2::<f32>::read_npy(bytes) {
            Ok(array) => Ok(array),
            Err(f32_err) => match Array2::<f64>::read_npy(bytes) {
                Ok(array) => {
                    log::debug!("NpyFormat: converting f64 array to f32");
                    Ok(array.mapv(|v| v as f32))
                }
                Err(_) => Err(f32_err.into()),
            },
        }
    }
}

impl ColormapFormat for NpyFormat {
    fn id(&self) -> &'static str {
        "npy"
    }

    fn display_name(&self) -> &'static str {
        "NumPy array (.npy)"
    }

    fn extensions(&self) -> &[&'static str] {
        &["npy"]
    }

    fn supports_import(&self) -> bool {
        true
    }

    fn export_to_bytes(
        &self,
        data: &ColormapData,
        _options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportResult), FormatError> {
        let gradient = data.to_samplable_gradient()?;

        let flat: Vec<f32> = gradient
            .keypoints()
            .iter()
            .flat_map(|k| [k.position, k.color.r, k.color.g, k.color.b])
            .collect();
        let array = Array2::from_shape_vec((gradient.len(), COLUMNS), flat)
            .map_err(|e| FormatError::invalid_format(format!("array shape: {}", e)))?;

        let mut bytes = Vec::new();
        array.write_npy(&mut bytes)?;

        log::info!(
            "Exported colormap '{}' as {}x{} NPY array",
            data.name,
            gradient.len(),
            COLUMNS
        );
        let result = ExportResult::with_keypoints(gradient.len(), bytes.len());
        Ok((bytes, result))
    }

    fn import_from_bytes(&self, bytes: &[u8]) -> Result<ColormapData, FormatError> {
        if !Self::is_npy(bytes) {
            return Err(FormatError::invalid_format("missing NPY magic header"));
        }

        let array = Self::read_rows(bytes)?;
        log::debug!("NpyFormat: array shape = {:?}", array.shape());

        if array.ncols() != COLUMNS {
            return Err(FormatError::invalid_format(format!(
                "expected {} columns (position, r, g, b), found {}",
                COLUMNS,
                array.ncols()
            )));
        }

        let data = ColormapData {
            colors: array
                .rows()
                .into_iter()
                .map(|row| KeypointEntry::new(row[0], Rgb::new(row[1], row[2], row[3])))
                .collect(),
            ..ColormapData::default()
        };
        data.validate()?;

        log::info!("Imported {} keypoints from NPY array", data.colors.len());
        Ok(data)
    }
}
