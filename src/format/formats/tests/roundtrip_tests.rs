//! Round-trip conversion tests between formats.
//!
//! JSON and NPY are the two importable formats; a gradient written by one
//! and read back must come out identical, and converting through both must
//! lose nothing but the name (NPY has no place for it).

use super::three_stop_data;
use crate::constants::DEFAULT_TOLERANCE;
use crate::format::{ColormapData, ColormapFormat, ExportOptions, FormatRegistry};
use crate::model::{Gradient, Rgb};

fn odd_gradient() -> Gradient {
    let mut gradient = Gradient::new(DEFAULT_TOLERANCE);
    gradient.add(0.0, Rgb::new(0.1, 0.2, 0.3)).unwrap();
    gradient.add(0.333, Rgb::new(0.9, 0.01, 0.5)).unwrap();
    gradient.add(0.7071, Rgb::new(0.25, 0.75, 0.125)).unwrap();
    gradient.add(1.0, Rgb::new(0.0, 0.6, 1.0)).unwrap();
    gradient
}

fn roundtrip(format: &dyn ColormapFormat, data: &ColormapData) -> ColormapData {
    let (bytes, _) = format
        .export_to_bytes(data, &ExportOptions::default())
        .unwrap();
    format.import_from_bytes(&bytes).unwrap()
}

#[test]
fn test_json_roundtrip_is_lossless() {
    let registry = FormatRegistry::new();
    let data = odd_gradient().export_data("odd").unwrap();

    let restored = roundtrip(registry.native(), &data);
    assert_eq!(restored, data);
}

#[test]
fn test_npy_roundtrip_keeps_keypoints() {
    let registry = FormatRegistry::new();
    let gradient = odd_gradient();
    let data = gradient.export_data("odd").unwrap();

    let npy = registry.get("npy").unwrap();
    let restored = roundtrip(npy, &data);
    let restored = Gradient::import_data(&restored, DEFAULT_TOLERANCE).unwrap();

    assert_eq!(restored.keypoints(), gradient.keypoints());
}

#[test]
fn test_json_to_npy_to_json() {
    let registry = FormatRegistry::new();
    let json = registry.get("json").unwrap();
    let npy = registry.get("npy").unwrap();

    let original = three_stop_data();
    let via_npy = roundtrip(npy, &roundtrip(json, &original));
    let back = roundtrip(json, &via_npy);

    assert_eq!(back.colors, original.colors);
}

#[test]
fn test_file_export_and_import() {
    let registry = FormatRegistry::new();
    let data = three_stop_data();
    let dir = std::env::temp_dir().join(format!("colormap_creator_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    for id in ["json", "npy"] {
        let format = registry.get(id).unwrap();
        let path = dir.join(format!("heat.{}", format.extensions()[0]));

        let result = format
            .export(&data, &path, &ExportOptions::default())
            .unwrap();
        assert_eq!(result.files_created, vec![path.clone()]);
        assert!(result.bytes_written > 0);

        let loaded = format.import(&path).unwrap();
        assert_eq!(loaded.colors, data.colors);
    }

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_sampled_formats_match_gradient() {
    let data = three_stop_data();
    let gradient = Gradient::import_data(&data, DEFAULT_TOLERANCE).unwrap();

    let img = crate::format::formats::PngFormat::render(
        &data,
        &ExportOptions::new().samples(9).height(1),
    )
    .unwrap();
    for (x, color) in gradient.render_preview(9).unwrap().enumerate() {
        assert_eq!(img.get_pixel(x as u32, 0).0, color.to_u8());
    }
}
