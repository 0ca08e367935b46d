//! Factor registry
//!
//! The six measurement kinds that drive sorting, filtering, statistics and
//! distribution. A [`FactorPredicate`] binds a factor to a colorspace and an
//! optional reference token and turns any token into one number.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use super::analysis::{contrast_ratio, hue_delta, hyab, ColorAnalyzer};
use super::space::{Colorspace, FactorChannels};
use super::token::ColorToken;
use crate::{ColorError, Result};

/// A derived measurement of a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Hue,
    Chroma,
    Lightness,
    Luminance,
    Contrast,
    Distance,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Hue,
        Factor::Chroma,
        Factor::Lightness,
        Factor::Luminance,
        Factor::Contrast,
        Factor::Distance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Factor::Hue => "hue",
            Factor::Chroma => "chroma",
            Factor::Lightness => "lightness",
            Factor::Luminance => "luminance",
            Factor::Contrast => "contrast",
            Factor::Distance => "distance",
        }
    }

    /// Contrast and distance only exist relative to a reference
    pub fn requires_reference(self) -> bool {
        matches!(self, Factor::Contrast | Factor::Distance)
    }

    /// Hue, chroma and lightness read a channel of the factor colorspace
    pub fn is_channel(self) -> bool {
        matches!(self, Factor::Hue | Factor::Chroma | Factor::Lightness)
    }

    /// Parse a list of factor names, failing on the first unknown one
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Factor>> {
        names.iter().map(|name| name.as_ref().parse()).collect()
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Factor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Factor::ALL
            .into_iter()
            .find(|factor| factor.name() == name)
            .ok_or(ColorError::UnknownFactor { name })
    }
}

/// Resolve the colorspace used for channel factors.
///
/// Spaces without lightness, chroma and hue channels fall back to `lch`.
pub fn factor_space(space: Colorspace) -> (Colorspace, FactorChannels) {
    if let Some(channels) = space.factor_channels() {
        return (space, channels);
    }
    warn!(
        "Colorspace {} has no lightness/chroma/hue channels, falling back to {}",
        space,
        Colorspace::Lch
    );
    let fallback = Colorspace::Lch;
    let channels = FactorChannels {
        lightness: 0,
        chroma: 1,
        hue: 2,
    };
    (fallback, channels)
}

/// Precomputed measurement; reference-derived values are captured once
#[derive(Debug, Clone, Copy, PartialEq)]
enum Measure {
    Channel(usize),
    Luminance,
    ChannelDelta { index: usize, reference: f64 },
    HueDelta { index: usize, reference: f64 },
    LuminanceDelta(f64),
    Contrast(f64),
    Distance([f64; 3]),
}

/// A factor bound to a colorspace and, for relative forms, a reference token
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorPredicate {
    factor: Factor,
    space: Colorspace,
    reference: Option<ColorToken>,
    measure: Measure,
}

impl FactorPredicate {
    /// Absolute predicate for hue, chroma, lightness or luminance
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::MissingReference`] for contrast and distance.
    pub fn absolute(factor: Factor, space: Colorspace) -> Result<Self> {
        let (space, channels) = channel_space(factor, space);
        let measure = match factor {
            Factor::Hue => Measure::Channel(channels.hue),
            Factor::Chroma => Measure::Channel(channels.chroma),
            Factor::Lightness => Measure::Channel(channels.lightness),
            Factor::Luminance => Measure::Luminance,
            Factor::Contrast | Factor::Distance => {
                return Err(ColorError::MissingReference { factor })
            }
        };
        Ok(Self {
            factor,
            space,
            reference: None,
            measure,
        })
    }

    /// Relative predicate measuring each token against `reference`
    pub fn relative(factor: Factor, space: Colorspace, reference: &ColorToken) -> Self {
        let analyzer = ColorAnalyzer::new();
        let (space, channels) = channel_space(factor, space);
        let channel_of = |index: usize| reference.to_space(space).channel(index);
        let measure = match factor {
            Factor::Hue => Measure::HueDelta {
                index: channels.hue,
                reference: channel_of(channels.hue),
            },
            Factor::Chroma => Measure::ChannelDelta {
                index: channels.chroma,
                reference: channel_of(channels.chroma),
            },
            Factor::Lightness => Measure::ChannelDelta {
                index: channels.lightness,
                reference: channel_of(channels.lightness),
            },
            Factor::Luminance => Measure::LuminanceDelta(analyzer.luminance(reference)),
            Factor::Contrast => Measure::Contrast(analyzer.luminance(reference)),
            Factor::Distance => Measure::Distance(analyzer.lab65(reference)),
        };
        Self {
            factor,
            space,
            reference: Some(*reference),
            measure,
        }
    }

    /// Relative when asked for or when the factor cannot be absolute
    pub fn for_options(
        factor: Factor,
        space: Colorspace,
        relative: bool,
        against: &ColorToken,
    ) -> Self {
        if relative || factor.requires_reference() {
            return Self::relative(factor, space, against);
        }
        match Self::absolute(factor, space) {
            Ok(predicate) => predicate,
            Err(_) => Self::relative(factor, space, against),
        }
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    /// Colorspace the channel factors are read in
    pub fn space(&self) -> Colorspace {
        self.space
    }

    pub fn reference(&self) -> Option<&ColorToken> {
        self.reference.as_ref()
    }

    pub fn is_relative(&self) -> bool {
        self.reference.is_some()
    }

    /// Measure a token. Relative forms report magnitudes; hue deltas never exceed 180.
    pub fn measure(&self, token: &ColorToken) -> f64 {
        match self.measure {
            Measure::HueDelta { .. } | Measure::ChannelDelta { .. } | Measure::LuminanceDelta(_) => {
                self.signed(token).abs()
            }
            _ => self.signed(token),
        }
    }

    /// Measure a token, keeping the sign of relative deltas (`token - reference`)
    pub fn signed(&self, token: &ColorToken) -> f64 {
        match self.measure {
            Measure::Channel(index) => token.to_space(self.space).channel(index),
            Measure::Luminance => ColorAnalyzer::new().luminance(token),
            Measure::ChannelDelta { index, reference } => {
                token.to_space(self.space).channel(index) - reference
            }
            Measure::HueDelta { index, reference } => {
                hue_delta(reference, token.to_space(self.space).channel(index))
            }
            Measure::LuminanceDelta(reference) => {
                ColorAnalyzer::new().luminance(token) - reference
            }
            Measure::Contrast(reference) => {
                contrast_ratio(reference, ColorAnalyzer::new().luminance(token))
            }
            Measure::Distance(reference) => hyab(reference, ColorAnalyzer::new().lab65(token)),
        }
    }
}

fn channel_space(factor: Factor, space: Colorspace) -> (Colorspace, FactorChannels) {
    if factor.is_channel() {
        return factor_space(space);
    }
    let channels = space.factor_channels().unwrap_or(FactorChannels {
        lightness: 0,
        chroma: 1,
        hue: 2,
    });
    (space, channels)
}
