//! Unit tests for colormap format implementations.
//!
//! These tests verify format serialization, deserialization, and
//! round-trip conversions.

mod roundtrip_tests;

use crate::format::ColormapData;
use crate::model::Rgb;

/// White, red at 0.5, black.
pub(super) fn three_stop_data() -> ColormapData {
    ColormapData::new("heat")
        .with_color(0.0, Rgb::WHITE)
        .with_color(0.5, Rgb::new(1.0, 0.0, 0.0))
        .with_color(1.0, Rgb::BLACK)
}
