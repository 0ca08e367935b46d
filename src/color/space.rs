//! Supported colorspaces and their channel layouts
//!
//! Each colorspace has exactly three channels plus alpha. Channel names follow
//! the CSS Color 4 conventions (`l`, `c`, `h` for LCh; `r`, `g`, `b` for RGB).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ColorError, Result};

/// A named coordinate system for color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colorspace {
    /// Gamma-encoded sRGB, channels in [0, 1]
    Rgb,
    /// Linear-light sRGB
    Lrgb,
    Hsl,
    Hsv,
    Hwb,
    /// CIE L*a*b* relative to D50
    Lab,
    /// CIE LCh relative to D50
    #[default]
    Lch,
    /// CIE L*a*b* relative to D65
    Lab65,
    /// CIE LCh relative to D65
    Lch65,
    Oklab,
    Oklch,
    /// CIE XYZ relative to D65
    Xyz,
}

/// Channel indices for the three channel-backed factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorChannels {
    pub lightness: usize,
    pub chroma: usize,
    pub hue: usize,
}

impl Colorspace {
    pub const ALL: [Colorspace; 12] = [
        Colorspace::Rgb,
        Colorspace::Lrgb,
        Colorspace::Hsl,
        Colorspace::Hsv,
        Colorspace::Hwb,
        Colorspace::Lab,
        Colorspace::Lch,
        Colorspace::Lab65,
        Colorspace::Lch65,
        Colorspace::Oklab,
        Colorspace::Oklch,
        Colorspace::Xyz,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colorspace::Rgb => "rgb",
            Colorspace::Lrgb => "lrgb",
            Colorspace::Hsl => "hsl",
            Colorspace::Hsv => "hsv",
            Colorspace::Hwb => "hwb",
            Colorspace::Lab => "lab",
            Colorspace::Lch => "lch",
            Colorspace::Lab65 => "lab65",
            Colorspace::Lch65 => "lch65",
            Colorspace::Oklab => "oklab",
            Colorspace::Oklch => "oklch",
            Colorspace::Xyz => "xyz",
        }
    }

    /// Channel names in storage order
    pub fn channels(self) -> [&'static str; 3] {
        match self {
            Colorspace::Rgb | Colorspace::Lrgb => ["r", "g", "b"],
            Colorspace::Hsl => ["h", "s", "l"],
            Colorspace::Hsv => ["h", "s", "v"],
            Colorspace::Hwb => ["h", "w", "b"],
            Colorspace::Lab | Colorspace::Lab65 | Colorspace::Oklab => ["l", "a", "b"],
            Colorspace::Lch | Colorspace::Lch65 | Colorspace::Oklch => ["l", "c", "h"],
            Colorspace::Xyz => ["x", "y", "z"],
        }
    }

    /// Index of a channel by name (case-insensitive)
    pub fn channel_index(self, name: &str) -> Option<usize> {
        let name = name.trim().to_ascii_lowercase();
        self.channels().iter().position(|c| *c == name)
    }

    /// Native range of a channel, used for default filter ranges and rescaling
    pub fn limits(self, index: usize) -> (f64, f64) {
        let table: [(f64, f64); 3] = match self {
            Colorspace::Rgb | Colorspace::Lrgb => [(0.0, 1.0); 3],
            Colorspace::Hsl | Colorspace::Hsv | Colorspace::Hwb => {
                [(0.0, 360.0), (0.0, 1.0), (0.0, 1.0)]
            }
            Colorspace::Lab | Colorspace::Lab65 => {
                [(0.0, 100.0), (-128.0, 127.0), (-128.0, 127.0)]
            }
            Colorspace::Lch | Colorspace::Lch65 => [(0.0, 100.0), (0.0, 150.0), (0.0, 360.0)],
            Colorspace::Oklab => [(0.0, 1.0), (-0.4, 0.4), (-0.4, 0.4)],
            Colorspace::Oklch => [(0.0, 1.0), (0.0, 0.4), (0.0, 360.0)],
            Colorspace::Xyz => [(0.0, 0.95047), (0.0, 1.0), (0.0, 1.08883)],
        };
        table[index.min(2)]
    }

    /// RGB family spaces get legacy 0-255 input normalization
    pub fn is_rgb(self) -> bool {
        matches!(self, Colorspace::Rgb | Colorspace::Lrgb)
    }

    /// Lightness, chroma and hue channels, if this space has all three
    pub fn factor_channels(self) -> Option<FactorChannels> {
        match self {
            Colorspace::Hsl | Colorspace::Hsv => Some(FactorChannels {
                lightness: 2,
                chroma: 1,
                hue: 0,
            }),
            Colorspace::Lch | Colorspace::Lch65 | Colorspace::Oklch => Some(FactorChannels {
                lightness: 0,
                chroma: 1,
                hue: 2,
            }),
            _ => None,
        }
    }

    /// Guess the colorspace of a keyed record from its channel keys.
    ///
    /// `mode` and `alpha` keys are ignored. Ambiguous key sets resolve to the
    /// D50 CIE spaces and to gamma-encoded RGB.
    pub fn infer_from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Option<Colorspace> {
        let mut keys: Vec<String> = keys
            .into_iter()
            .map(|k| k.to_ascii_lowercase())
            .filter(|k| k != "mode" && k != "alpha")
            .collect();
        keys.sort();
        keys.dedup();

        let candidates = [
            Colorspace::Rgb,
            Colorspace::Hsl,
            Colorspace::Hsv,
            Colorspace::Hwb,
            Colorspace::Lab,
            Colorspace::Lch,
            Colorspace::Xyz,
        ];
        candidates.into_iter().find(|space| {
            let mut channels: Vec<&str> = space.channels().to_vec();
            channels.sort_unstable();
            channels.len() == keys.len() && channels.iter().zip(&keys).all(|(a, b)| *a == b)
        })
    }
}

impl fmt::Display for Colorspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colorspace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Colorspace::ALL
            .into_iter()
            .find(|space| space.name() == name)
            .ok_or(ColorError::UnknownColorspace { name })
    }
}
