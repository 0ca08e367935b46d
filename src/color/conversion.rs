//! Colorspace conversion utilities
//!
//! Every supported colorspace converts through CIE XYZ (D65):
//! - RGB, linear RGB, HSL, HSV and HWB via sRGB
//! - Lab/LCh (D50) with Bradford chromatic adaptation
//! - Lab/LCh (D65), Oklab and Oklch directly
//! - Hex representation of clamped sRGB

use palette::chromatic_adaptation::AdaptInto;
use palette::convert::FromColorUnclamped;
use palette::encoding;
use palette::white_point::{D50, D65};
use palette::{Hsl, Hsv, Hwb, Lab, Lch, LinSrgb, Oklab, Oklch, Srgb, Xyz};

use super::space::Colorspace;

type Rgb = Srgb<f64>;
type LinearRgb = LinSrgb<f64>;
type HslColor = Hsl<encoding::Srgb, f64>;
type HsvColor = Hsv<encoding::Srgb, f64>;
type HwbColor = Hwb<encoding::Srgb, f64>;
type Lab50 = Lab<D50, f64>;
type Lch50 = Lch<D50, f64>;
type Lab65 = Lab<D65, f64>;
type Lch65 = Lch<D65, f64>;
type Xyz50 = Xyz<D50, f64>;
type Xyz65 = Xyz<D65, f64>;

/// Converts channel triples between colorspaces
pub struct ColorConverter {
    clamp_output: bool,
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a converter that keeps out-of-gamut values
    pub fn new() -> Self {
        Self {
            clamp_output: false,
        }
    }

    /// Create a converter that clamps RGB-family results into [0, 1]
    pub fn clamped() -> Self {
        Self { clamp_output: true }
    }

    /// Convert channels from one colorspace to another
    ///
    /// # Arguments
    ///
    /// * `from` - Colorspace of `channels`
    /// * `channels` - Channel values in storage order
    /// * `to` - Target colorspace
    ///
    /// # Returns
    ///
    /// Channel values in the target colorspace. Identity conversions return the
    /// input unchanged.
    pub fn convert(&self, from: Colorspace, channels: [f64; 3], to: Colorspace) -> [f64; 3] {
        if from == to {
            return self.finish(to, channels);
        }
        let converted = match (from, to) {
            (Colorspace::Rgb, Colorspace::Hsl | Colorspace::Hsv | Colorspace::Hwb) => {
                rgb_to_cylindrical(Rgb::new(channels[0], channels[1], channels[2]), to)
            }
            (Colorspace::Hsl | Colorspace::Hsv | Colorspace::Hwb, Colorspace::Rgb) => {
                let c = cylindrical_to_rgb(from, channels);
                [c.red, c.green, c.blue]
            }
            _ => from_xyz(to, to_xyz(from, channels)),
        };
        self.finish(to, converted)
    }

    /// Convert channels to gamma-encoded sRGB
    pub fn to_srgb(&self, from: Colorspace, channels: [f64; 3]) -> Rgb {
        let [r, g, b] = self.convert(from, channels, Colorspace::Rgb);
        Rgb::new(r, g, b)
    }

    /// Convert channels to linear-light sRGB
    pub fn to_linear(&self, from: Colorspace, channels: [f64; 3]) -> LinearRgb {
        let rgb = self.to_srgb(from, channels);
        LinearRgb::from_color_unclamped(rgb)
    }

    /// Convert channels to CIE Lab relative to D65, used for distance
    pub fn to_lab65(&self, from: Colorspace, channels: [f64; 3]) -> Lab65 {
        let [l, a, b] = self.convert(from, channels, Colorspace::Lab65);
        Lab65::new(l, a, b)
    }

    fn finish(&self, space: Colorspace, channels: [f64; 3]) -> [f64; 3] {
        if self.clamp_output && space.is_rgb() {
            channels.map(|c| c.clamp(0.0, 1.0))
        } else {
            channels
        }
    }
}

/// Format sRGB as lowercase hex, clamping into gamut first
///
/// # Arguments
///
/// * `rgb` - Gamma-encoded sRGB, possibly out of gamut
/// * `alpha` - Appended as a fourth byte when `Some`
///
/// # Returns
///
/// Hex color string (e.g., "#ff0000" or "#ff000080")
pub fn srgb_to_hex(rgb: Rgb, alpha: Option<f64>) -> String {
    let [r, g, b] = srgb_to_bytes(rgb);
    match alpha {
        Some(a) => format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, unit_to_byte(a)),
        None => format!("#{:02x}{:02x}{:02x}", r, g, b),
    }
}

/// Clamp sRGB into gamut and quantize to 8 bits per channel
pub fn srgb_to_bytes(rgb: Rgb) -> [u8; 3] {
    [
        unit_to_byte(rgb.red),
        unit_to_byte(rgb.green),
        unit_to_byte(rgb.blue),
    ]
}

pub(crate) fn unit_to_byte(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Parse a 3, 4, 6 or 8 digit hex string (with or without `#`)
///
/// # Returns
///
/// sRGB channels in [0, 1] and alpha, or `None` if the string is not hex
pub fn hex_to_srgb(hex: &str) -> Option<([f64; 3], f64)> {
    let digits = hex.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let byte = |i: usize| -> Option<f64> {
        u8::from_str_radix(expanded.get(i..i + 2)?, 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };

    let channels = [byte(0)?, byte(2)?, byte(4)?];
    let alpha = if expanded.len() == 8 { byte(6)? } else { 1.0 };
    Some((channels, alpha))
}

fn rgb_to_cylindrical(rgb: Rgb, to: Colorspace) -> [f64; 3] {
    match to {
        Colorspace::Hsl => {
            let c = HslColor::from_color_unclamped(rgb);
            [c.hue.into_positive_degrees(), c.saturation, c.lightness]
        }
        Colorspace::Hsv => {
            let c = HsvColor::from_color_unclamped(rgb);
            [c.hue.into_positive_degrees(), c.saturation, c.value]
        }
        _ => {
            let c = HwbColor::from_color_unclamped(HsvColor::from_color_unclamped(rgb));
            [c.hue.into_positive_degrees(), c.whiteness, c.blackness]
        }
    }
}

fn cylindrical_to_rgb(from: Colorspace, [c0, c1, c2]: [f64; 3]) -> Rgb {
    match from {
        Colorspace::Hsl => Rgb::from_color_unclamped(HslColor::new(c0, c1, c2)),
        Colorspace::Hsv => Rgb::from_color_unclamped(HsvColor::new(c0, c1, c2)),
        _ => Rgb::from_color_unclamped(HsvColor::from_color_unclamped(HwbColor::new(c0, c1, c2))),
    }
}

fn to_xyz(space: Colorspace, [c0, c1, c2]: [f64; 3]) -> Xyz65 {
    match space {
        Colorspace::Rgb => Xyz65::from_color_unclamped(Rgb::new(c0, c1, c2)),
        Colorspace::Lrgb => Xyz65::from_color_unclamped(LinearRgb::new(c0, c1, c2)),
        Colorspace::Hsl | Colorspace::Hsv | Colorspace::Hwb => {
            Xyz65::from_color_unclamped(cylindrical_to_rgb(space, [c0, c1, c2]))
        }
        Colorspace::Lab => {
            let xyz = Xyz50::from_color_unclamped(Lab50::new(c0, c1, c2));
            xyz.adapt_into()
        }
        Colorspace::Lch => {
            let xyz = Xyz50::from_color_unclamped(Lch50::new(c0, c1, c2));
            xyz.adapt_into()
        }
        Colorspace::Lab65 => Xyz65::from_color_unclamped(Lab65::new(c0, c1, c2)),
        Colorspace::Lch65 => Xyz65::from_color_unclamped(Lch65::new(c0, c1, c2)),
        Colorspace::Oklab => Xyz65::from_color_unclamped(Oklab::new(c0, c1, c2)),
        Colorspace::Oklch => Xyz65::from_color_unclamped(Oklch::new(c0, c1, c2)),
        Colorspace::Xyz => Xyz65::new(c0, c1, c2),
    }
}

fn from_xyz(space: Colorspace, xyz: Xyz65) -> [f64; 3] {
    match space {
        Colorspace::Rgb => {
            let c = Rgb::from_color_unclamped(xyz);
            [c.red, c.green, c.blue]
        }
        Colorspace::Lrgb => {
            let c = LinearRgb::from_color_unclamped(xyz);
            [c.red, c.green, c.blue]
        }
        Colorspace::Hsl | Colorspace::Hsv | Colorspace::Hwb => {
            rgb_to_cylindrical(Rgb::from_color_unclamped(xyz), space)
        }
        Colorspace::Lab => {
            let xyz: Xyz50 = xyz.adapt_into();
            let c = Lab50::from_color_unclamped(xyz);
            [c.l, c.a, c.b]
        }
        Colorspace::Lch => {
            let xyz: Xyz50 = xyz.adapt_into();
            let c = Lch50::from_color_unclamped(Lab50::from_color_unclamped(xyz));
            [c.l, c.chroma, c.hue.into_positive_degrees()]
        }
        Colorspace::Lab65 => {
            let c = Lab65::from_color_unclamped(xyz);
            [c.l, c.a, c.b]
        }
        Colorspace::Lch65 => {
            let c = Lch65::from_color_unclamped(Lab65::from_color_unclamped(xyz));
            [c.l, c.chroma, c.hue.into_positive_degrees()]
        }
        Colorspace::Oklab => {
            let c = Oklab::from_color_unclamped(xyz);
            [c.l, c.a, c.b]
        }
        Colorspace::Oklch => {
            let c = Oklch::from_color_unclamped(Oklab::from_color_unclamped(xyz));
            [c.l, c.chroma, c.hue.into_positive_degrees()]
        }
        Colorspace::Xyz => [xyz.x, xyz.y, xyz.z],
    }
}
