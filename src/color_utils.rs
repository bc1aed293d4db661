//! Color utility functions shared across the crate.
//!
//! All channels are normalized to 0.0-1.0, hue included. Hue is circular:
//! `h = 1.0` is the same red as `h = 0.0`.

/// Convert HSV to RGB.
///
/// # Arguments
/// * `h` - Hue (0.0-1.0, wraps around)
/// * `s` - Saturation (0.0-1.0)
/// * `v` - Value/brightness (0.0-1.0)
///
/// # Returns
/// RGB tuple with values in range 0.0-1.0
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h6 = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h6 < 1.0 {
        (c, x, 0.0)
    } else if h6 < 2.0 {
        (x, c, 0.0)
    } else if h6 < 3.0 {
        (0.0, c, x)
    } else if h6 < 4.0 {
        (0.0, x, c)
    } else if h6 < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

/// Convert RGB to HSV.
///
/// Achromatic input (including black) reports hue and saturation as 0.0,
/// since neither is defined there.
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;

    if max == min {
        return (0.0, 0.0, v);
    }

    let delta = max - min;
    let s = delta / max;

    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}

/// Map a point on the hue/saturation wheel to `(hue, saturation)`.
///
/// `x` and `y` are relative to the wheel center with the rim at radius 1.0,
/// y pointing up. Hue is the counter-clockwise angle from the positive x axis.
/// Returns `None` for points outside the wheel.
pub fn wheel_to_hue_saturation(x: f32, y: f32) -> Option<(f32, f32)> {
    let radius = x.hypot(y);
    if !radius.is_finite() || radius > 1.0 {
        return None;
    }

    let angle = y.atan2(x).rem_euclid(std::f32::consts::TAU);
    Some(((angle / std::f32::consts::TAU).rem_euclid(1.0), radius))
}

/// Inverse of [`wheel_to_hue_saturation`]: the wheel point for a hue and saturation.
pub fn hue_saturation_to_wheel(h: f32, s: f32) -> (f32, f32) {
    let angle = h.rem_euclid(1.0) * std::f32::consts::TAU;
    (s * angle.cos(), s * angle.sin())
}
