//! Perceptual measurements on color tokens
//!
//! Provides the measurements behind every factor:
//! - WCAG relative luminance and contrast ratio
//! - HyAB perceptual distance in CIE Lab (D65)
//! - Achromatic detection, hue families, overtones and temperature
//! - Complementary hue and lightness adjustment

use std::fmt;

use serde::{Deserialize, Serialize};

use super::channel::ChannelAccessor;
use super::conversion::ColorConverter;
use super::space::Colorspace;
use super::token::ColorToken;
use crate::constants::{defaults, hue, wcag};

/// Named bucket a hue angle falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueFamily {
    Gray,
    RedPurple,
    Red,
    YellowRed,
    Yellow,
    YellowGreen,
    Green,
    BlueGreen,
    Blue,
    BluePurple,
    Purple,
}

impl HueFamily {
    pub fn name(self) -> &'static str {
        match self {
            HueFamily::Gray => "gray",
            HueFamily::RedPurple => "red-purple",
            HueFamily::Red => "red",
            HueFamily::YellowRed => "yellow-red",
            HueFamily::Yellow => "yellow",
            HueFamily::YellowGreen => "yellow-green",
            HueFamily::Green => "green",
            HueFamily::BlueGreen => "blue-green",
            HueFamily::Blue => "blue",
            HueFamily::BluePurple => "blue-purple",
            HueFamily::Purple => "purple",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let family = match name {
            "gray" => HueFamily::Gray,
            "red-purple" => HueFamily::RedPurple,
            "red" => HueFamily::Red,
            "yellow-red" => HueFamily::YellowRed,
            "yellow" => HueFamily::Yellow,
            "yellow-green" => HueFamily::YellowGreen,
            "green" => HueFamily::Green,
            "blue-green" => HueFamily::BlueGreen,
            "blue" => HueFamily::Blue,
            "blue-purple" => HueFamily::BluePurple,
            "purple" => HueFamily::Purple,
            _ => return None,
        };
        Some(family)
    }

    /// Family containing a hue angle in degrees
    pub fn from_hue(angle: f64) -> Self {
        let angle = angle.rem_euclid(360.0);
        hue::FAMILIES
            .iter()
            .find(|(_, start, end)| angle >= *start && angle < *end)
            .and_then(|(name, _, _)| HueFamily::from_name(name))
            .unwrap_or(HueFamily::Gray)
    }

    /// Secondary family of a compound name (`blue-green` -> `green`)
    pub fn overtone(self) -> Option<HueFamily> {
        match self {
            HueFamily::Gray => Some(HueFamily::Gray),
            _ => self
                .name()
                .split_once('-')
                .and_then(|(_, tail)| HueFamily::from_name(tail)),
        }
    }
}

impl fmt::Display for HueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Warm or cool hue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cool,
}

/// Token with the hue family it landed in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Complement {
    pub token: ColorToken,
    pub family: HueFamily,
}

/// Measures tokens for the factor registry
pub struct ColorAnalyzer {
    converter: ColorConverter,
    achromatic_threshold: f64,
}

impl Default for ColorAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorAnalyzer {
    pub fn new() -> Self {
        Self {
            converter: ColorConverter::clamped(),
            achromatic_threshold: defaults::ACHROMATIC_CHROMA,
        }
    }

    /// Create an analyzer with a custom chroma threshold for achromatic tokens
    pub fn with_params(achromatic_threshold: f64) -> Self {
        Self {
            converter: ColorConverter::clamped(),
            achromatic_threshold,
        }
    }

    /// WCAG 2.x relative luminance of the token clamped to sRGB
    ///
    /// # Returns
    ///
    /// Luminance in [0, 1]; 0 for black and 1 for white
    pub fn luminance(&self, token: &ColorToken) -> f64 {
        let linear = self.converter.to_linear(token.space(), token.channels());
        wcag::RED_WEIGHT * linear.red
            + wcag::GREEN_WEIGHT * linear.green
            + wcag::BLUE_WEIGHT * linear.blue
    }

    /// WCAG contrast ratio between two tokens, in [1, 21]
    pub fn contrast(&self, a: &ColorToken, b: &ColorToken) -> f64 {
        contrast_ratio(self.luminance(a), self.luminance(b))
    }

    /// HyAB distance between two tokens in CIE Lab (D65)
    pub fn distance(&self, a: &ColorToken, b: &ColorToken) -> f64 {
        hyab(self.lab65(a), self.lab65(b))
    }

    pub(crate) fn lab65(&self, token: &ColorToken) -> [f64; 3] {
        token.to_space(Colorspace::Lab65).channels()
    }

    /// LCh (D50) chroma and hue
    fn chroma_hue(&self, token: &ColorToken) -> (f64, f64) {
        let lch = token.to_space(Colorspace::Lch).channels();
        (lch[1], lch[2])
    }

    /// True when the token has no perceptible hue (chroma NaN or below threshold)
    pub fn is_achromatic(&self, token: &ColorToken) -> bool {
        let (chroma, _) = self.chroma_hue(token);
        chroma.is_nan() || chroma < self.achromatic_threshold
    }

    /// Hue family of the token's LCh hue, `gray` when achromatic
    pub fn family(&self, token: &ColorToken) -> HueFamily {
        let (chroma, hue) = self.chroma_hue(token);
        if chroma.is_nan() || chroma < self.achromatic_threshold || hue.is_nan() {
            return HueFamily::Gray;
        }
        HueFamily::from_hue(hue)
    }

    pub fn overtone(&self, token: &ColorToken) -> Option<HueFamily> {
        self.family(token).overtone()
    }

    /// Warm or cool by LCh hue; `None` when achromatic
    pub fn temperature(&self, token: &ColorToken) -> Option<Temperature> {
        if self.is_achromatic(token) {
            return None;
        }
        let (_, hue) = self.chroma_hue(token);
        let (start, end) = hue::COOL_SPAN;
        if hue >= start && hue < end {
            Some(Temperature::Cool)
        } else {
            Some(Temperature::Warm)
        }
    }

    /// Rotate the LCh hue by 180 degrees
    ///
    /// Achromatic tokens come back unchanged with the `gray` family. The result
    /// is expressed in gamut-clamped sRGB.
    pub fn complimentary(&self, token: &ColorToken) -> Complement {
        if self.is_achromatic(token) {
            return Complement {
                token: *token,
                family: HueFamily::Gray,
            };
        }
        let lch = token.to_space(Colorspace::Lch);
        let rotated = lch.with_channel(2, (lch.channel(2) + 180.0).rem_euclid(360.0));
        let rgb = self
            .converter
            .convert(Colorspace::Lch, rotated.channels(), Colorspace::Rgb);
        let token = ColorToken::new(Colorspace::Rgb, rgb, token.alpha());
        Complement {
            token,
            family: HueFamily::from_hue(rotated.channel(2)),
        }
    }

    /// Brighten (positive `amount`) or darken (negative) by a fraction of the
    /// Lab lightness range, returning a token in the input's colorspace
    pub fn adjust_lightness(&self, token: &ColorToken, amount: f64) -> ColorToken {
        let lightness = ChannelAccessor::component(Colorspace::Lab65, 0);
        let (lo, hi) = Colorspace::Lab65.limits(0);
        let target = (lightness.get(token) + amount * (hi - lo)).clamp(lo, hi);
        lightness
            .set(token, target)
            .map(|adjusted| adjusted.to_space(token.space()))
            .unwrap_or(*token)
    }
}

/// Contrast ratio from two relative luminances, order-independent
pub fn contrast_ratio(a: f64, b: f64) -> f64 {
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + wcag::CONTRAST_OFFSET) / (darker + wcag::CONTRAST_OFFSET)
}

/// HyAB distance: |ΔL| + sqrt(Δa² + Δb²)
pub fn hyab(a: [f64; 3], b: [f64; 3]) -> f64 {
    let dl = a[0] - b[0];
    let da = a[1] - b[1];
    let db = a[2] - b[2];
    dl.abs() + (da * da + db * db).sqrt()
}

/// Signed shortest-arc difference `to - from` in (-180, 180]
pub fn hue_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta - 360.0
    } else {
        delta
    }
}

/// Circular mean of hue angles in degrees, in [0, 360). NaN for no input.
pub fn circular_mean(angles: &[f64]) -> f64 {
    if angles.is_empty() {
        return f64::NAN;
    }
    let (sin, cos) = angles.iter().fold((0.0, 0.0), |(s, c), angle| {
        let radians = angle.to_radians();
        (s + radians.sin(), c + radians.cos())
    });
    let n = angles.len() as f64;
    (sin / n).atan2(cos / n).to_degrees().rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(hex: u32) -> ColorToken {
        ColorToken::from_rgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    #[test]
    fn test_luminance() {
        let analyzer = ColorAnalyzer::new();
        assert!((analyzer.luminance(&rgb(0xffc300)) - 0.6029021347719574).abs() < 1e-9);
        assert_eq!(analyzer.luminance(&ColorToken::black()), 0.0);
        assert!((analyzer.luminance(&ColorToken::white()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_contrast_black_white() {
        let analyzer = ColorAnalyzer::new();
        let contrast = analyzer.contrast(&ColorToken::black(), &ColorToken::white());
        assert!((contrast - 21.0).abs() < 1e-9);
        assert_eq!(contrast_ratio(0.3, 0.3), 1.0);
    }

    #[test]
    fn test_hyab_distance() {
        let analyzer = ColorAnalyzer::new();
        let d = analyzer.distance(&ColorToken::black(), &ColorToken::white());
        assert!((d - 100.0).abs() < 1e-4);
        assert_eq!(hyab([50.0, 3.0, 4.0], [40.0, 0.0, 0.0]), 15.0);
    }

    #[test]
    fn test_achromatic() {
        let analyzer = ColorAnalyzer::new();
        assert!(analyzer.is_achromatic(&rgb(0x808080)));
        assert!(analyzer.is_achromatic(&ColorToken::white()));
        assert!(!analyzer.is_achromatic(&rgb(0xff0000)));
        let nan = ColorToken::opaque(Colorspace::Lch, [50.0, f64::NAN, 0.0]);
        assert!(analyzer.is_achromatic(&nan));
    }

    #[test]
    fn test_families() {
        let analyzer = ColorAnalyzer::new();
        assert_eq!(analyzer.family(&rgb(0x00ffff)), HueFamily::BlueGreen);
        assert_eq!(analyzer.overtone(&rgb(0x00ffff)), Some(HueFamily::Green));
        assert_eq!(analyzer.family(&rgb(0x0000ff)), HueFamily::Blue);
        assert_eq!(analyzer.overtone(&rgb(0x0000ff)), None);
        assert_eq!(analyzer.family(&rgb(0x310000)), HueFamily::Red);
        assert_eq!(analyzer.family(&rgb(0x808080)), HueFamily::Gray);
        assert_eq!(analyzer.overtone(&rgb(0x808080)), Some(HueFamily::Gray));
    }

    #[test]
    fn test_family_boundaries() {
        assert_eq!(HueFamily::from_hue(0.0), HueFamily::RedPurple);
        assert_eq!(HueFamily::from_hue(359.9), HueFamily::RedPurple);
        assert_eq!(HueFamily::from_hue(15.0), HueFamily::Red);
        assert_eq!(HueFamily::from_hue(-10.0), HueFamily::RedPurple);
        assert_eq!(HueFamily::YellowRed.to_string(), "yellow-red");
    }

    #[test]
    fn test_temperature() {
        let analyzer = ColorAnalyzer::new();
        assert_eq!(analyzer.temperature(&rgb(0x0000ff)), Some(Temperature::Cool));
        assert_eq!(analyzer.temperature(&rgb(0xff0000)), Some(Temperature::Warm));
        assert_eq!(analyzer.temperature(&rgb(0x808080)), None);
    }

    #[test]
    fn test_complimentary() {
        let analyzer = ColorAnalyzer::new();
        let complement = analyzer.complimentary(&rgb(0x800080));
        assert_eq!(complement.token.to_hex(false), "#005700");
        assert_eq!(complement.family, HueFamily::Green);

        let gray = analyzer.complimentary(&rgb(0x808080));
        assert_eq!(gray.family, HueFamily::Gray);
        assert_eq!(gray.token, rgb(0x808080));
    }

    #[test]
    fn test_adjust_lightness() {
        let analyzer = ColorAnalyzer::new();
        let base = rgb(0x4080c0);
        let lighter = analyzer.adjust_lightness(&base, 0.1);
        let darker = analyzer.adjust_lightness(&base, -0.1);
        assert_eq!(lighter.space(), Colorspace::Rgb);
        assert!(analyzer.luminance(&lighter) > analyzer.luminance(&base));
        assert!(analyzer.luminance(&darker) < analyzer.luminance(&base));
    }

    #[test]
    fn test_hue_delta() {
        assert_eq!(hue_delta(10.0, 350.0), -20.0);
        assert_eq!(hue_delta(350.0, 10.0), 20.0);
        assert_eq!(hue_delta(0.0, 180.0), 180.0);
        assert_eq!(hue_delta(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_circular_mean() {
        assert!((circular_mean(&[40.0, 20.0, 30.0]) - 30.0).abs() < 1e-9);
        assert!((circular_mean(&[350.0, 10.0]) - 0.0).abs() < 1e-9
            || (circular_mean(&[350.0, 10.0]) - 360.0).abs() < 1e-9);
        assert!(circular_mean(&[]).is_nan());
    }
}
