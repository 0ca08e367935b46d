//! Canonical color token
//!
//! A [`ColorToken`] records a colorspace, three channel values and an alpha.
//! Every other input shape is parsed into one of these before any factor is
//! measured.

use palette::Srgb;
use serde::{Deserialize, Serialize};

use super::conversion::{self, ColorConverter};
use super::space::Colorspace;

/// A color as colorspace, channels and alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorToken {
    space: Colorspace,
    channels: [f64; 3],
    alpha: f64,
}

impl ColorToken {
    /// Create a token. Alpha is clamped into [0, 1]; NaN alpha becomes opaque.
    pub fn new(space: Colorspace, channels: [f64; 3], alpha: f64) -> Self {
        let alpha = if alpha.is_nan() {
            1.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
        Self {
            space,
            channels,
            alpha,
        }
    }

    pub fn opaque(space: Colorspace, channels: [f64; 3]) -> Self {
        Self::new(space, channels, 1.0)
    }

    /// Create an sRGB token from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::opaque(
            Colorspace::Rgb,
            [f64::from(r) / 255.0, f64::from(g) / 255.0, f64::from(b) / 255.0],
        )
    }

    pub fn black() -> Self {
        Self::opaque(Colorspace::Rgb, [0.0; 3])
    }

    pub fn white() -> Self {
        Self::opaque(Colorspace::Rgb, [1.0; 3])
    }

    pub fn space(&self) -> Colorspace {
        self.space
    }

    pub fn channels(&self) -> [f64; 3] {
        self.channels
    }

    /// Channel value by storage index (0..3)
    pub fn channel(&self, index: usize) -> f64 {
        self.channels[index.min(2)]
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Copy with one channel replaced
    pub fn with_channel(&self, index: usize, value: f64) -> Self {
        let mut channels = self.channels;
        channels[index.min(2)] = value;
        Self { channels, ..*self }
    }

    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self::new(self.space, self.channels, alpha)
    }

    /// Convert to another colorspace, keeping alpha
    pub fn to_space(&self, space: Colorspace) -> Self {
        let channels = ColorConverter::new().convert(self.space, self.channels, space);
        Self { space, channels, ..*self }
    }

    /// Gamma-encoded sRGB, possibly out of gamut
    pub fn to_srgb(&self) -> Srgb<f64> {
        ColorConverter::new().to_srgb(self.space, self.channels)
    }

    /// Lowercase hex; the alpha byte is added only when requested and alpha < 1
    pub fn to_hex(&self, include_alpha: bool) -> String {
        let alpha = (include_alpha && self.alpha < 1.0).then_some(self.alpha);
        conversion::srgb_to_hex(self.to_srgb(), alpha)
    }

    /// Packed 24-bit `0xRRGGBB` integer of the clamped sRGB color
    pub fn to_packed(&self) -> u32 {
        let [r, g, b] = conversion::srgb_to_bytes(self.to_srgb());
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    /// True when every channel is finite
    pub fn is_finite(&self) -> bool {
        self.channels.iter().all(|c| c.is_finite())
    }
}
