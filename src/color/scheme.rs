//! Classic harmony schemes
//!
//! Each scheme rotates the base token's LCh hue by a fixed set of offsets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::channel::ChannelAccessor;
use super::space::Colorspace;
use super::token::ColorToken;
use crate::constants::hue;
use crate::{ColorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    Analogous,
    Triadic,
    Tetradic,
    Complementary,
    SplitComplementary,
}

impl Scheme {
    pub const ALL: [Scheme; 5] = [
        Scheme::Analogous,
        Scheme::Triadic,
        Scheme::Tetradic,
        Scheme::Complementary,
        Scheme::SplitComplementary,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Analogous => "analogous",
            Scheme::Triadic => "triadic",
            Scheme::Tetradic => "tetradic",
            Scheme::Complementary => "complementary",
            Scheme::SplitComplementary => "split-complementary",
        }
    }

    /// Hue offsets in degrees, base first
    pub fn offsets(self) -> &'static [f64] {
        match self {
            Scheme::Analogous => &hue::ANALOGOUS,
            Scheme::Triadic => &hue::TRIADIC,
            Scheme::Tetradic => &hue::TETRADIC,
            Scheme::Complementary => &hue::COMPLEMENTARY,
            Scheme::SplitComplementary => &hue::SPLIT_COMPLEMENTARY,
        }
    }

    /// Build the scheme from a base token; results are LCh tokens
    pub fn generate(self, base: &ColorToken) -> Result<Vec<ColorToken>> {
        let hue = ChannelAccessor::new(Colorspace::Lch, "h")?;
        let start = hue.get(base);
        self.offsets()
            .iter()
            .map(|offset| hue.set(base, (start + offset).rem_euclid(360.0)))
            .collect()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == name)
            .ok_or_else(|| ColorError::invalid_token(s, "unknown scheme"))
    }
}
