//! Normalized RGB and HSV color types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color_utils::{hsv_to_rgb, rgb_to_hsv};

/// An RGB color with channels in 0.0-1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    /// Create a color from normalized channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    pub fn from_u8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// Channels as an array in r, g, b order.
    pub fn channels(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Whether every channel is finite and within 0.0-1.0.
    pub fn is_normalized(self) -> bool {
        self.channels()
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Channel-wise linear interpolation, `self` at `t = 0`, `other` at `t = 1`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// 8-bit channels, truncated toward zero.
    pub fn to_u8(self) -> [u8; 3] {
        self.channels().map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8)
    }

    /// Lowercase `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Parse a `#rrggbb` or `rrggbb` hex string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_u8([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// Perceived brightness (ITU-R 601 luma weights).
    pub fn brightness(self) -> f32 {
        (self.r * 299.0 + self.g * 587.0 + self.b * 114.0) / 1000.0
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrasting_text(self) -> Rgb {
        if self.brightness() > 0.5 {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }

    /// Convert to HSV.
    pub fn to_hsv(self) -> Hsv {
        Hsv::from_rgb(self)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<Rgb> for [f32; 3] {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_u8();
        write!(f, "({}, {}, {})", r, g, b)
    }
}

/// A hue/saturation/value color with all components in 0.0-1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue, one full turn per unit
    pub h: f32,
    /// Saturation
    pub s: f32,
    /// Value (brightness)
    pub v: f32,
}

impl Hsv {
    /// Create an HSV color. Hue is wrapped into 0.0-1.0.
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self {
            h: h.rem_euclid(1.0),
            s,
            v,
        }
    }

    /// Convert an RGB color to HSV.
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (h, s, v) = rgb_to_hsv(rgb.r, rgb.g, rgb.b);
        Self { h, s, v }
    }

    /// Convert to RGB.
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = hsv_to_rgb(self.h, self.s, self.v);
        Rgb::new(r, g, b)
    }
}

impl Default for Hsv {
    /// Fully saturated, full brightness red.
    fn default() -> Self {
        Self::new(0.0, 1.0, 1.0)
    }
}

impl fmt::Display for Hsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°, {}%, {}%",
            (self.h * 360.0) as u32,
            (self.s * 100.0) as u32,
            (self.v * 100.0) as u32
        )
    }
}
