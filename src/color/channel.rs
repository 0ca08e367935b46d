//! Single-channel access in a chosen colorspace
//!
//! A [`ChannelAccessor`] names one channel (or alpha) of one colorspace. Reading
//! converts the token into that colorspace first; writing returns a new token in
//! the accessor's colorspace with exactly that channel replaced.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::expr::Arithmetic;
use super::space::Colorspace;
use super::token::ColorToken;
use crate::{ColorError, Result};

/// Value written by [`ChannelAccessor::set`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelValue {
    /// Replace the channel outright
    Exact(f64),
    /// `<op><number>` applied to the current channel value
    Expression(String),
}

impl From<f64> for ChannelValue {
    fn from(value: f64) -> Self {
        ChannelValue::Exact(value)
    }
}

impl From<&str> for ChannelValue {
    fn from(value: &str) -> Self {
        ChannelValue::Expression(value.to_string())
    }
}

impl From<String> for ChannelValue {
    fn from(value: String) -> Self {
        ChannelValue::Expression(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Component(usize),
    Alpha,
}

/// Getter/setter for one named channel in one colorspace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelAccessor {
    space: Colorspace,
    slot: Slot,
}

impl ChannelAccessor {
    /// Resolve `name` in `space`; `alpha` is accepted in every colorspace.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnknownChannel`] when the colorspace has no such channel.
    pub fn new(space: Colorspace, name: &str) -> Result<Self> {
        if name.trim().eq_ignore_ascii_case("alpha") {
            return Ok(Self {
                space,
                slot: Slot::Alpha,
            });
        }
        let index = space
            .channel_index(name)
            .ok_or_else(|| ColorError::unknown_channel(name.trim(), space))?;
        Ok(Self {
            space,
            slot: Slot::Component(index),
        })
    }

    /// Accessor for a channel by storage index
    pub(crate) fn component(space: Colorspace, index: usize) -> Self {
        Self {
            space,
            slot: Slot::Component(index.min(2)),
        }
    }

    pub fn space(&self) -> Colorspace {
        self.space
    }

    pub fn name(&self) -> &'static str {
        match self.slot {
            Slot::Component(index) => self.space.channels()[index],
            Slot::Alpha => "alpha",
        }
    }

    /// Read the channel value of `token` in this accessor's colorspace
    pub fn get(&self, token: &ColorToken) -> f64 {
        match self.slot {
            Slot::Alpha => token.alpha(),
            Slot::Component(index) => token.to_space(self.space).channel(index),
        }
    }

    /// Return a new token with the channel replaced
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::UnsupportedChannelValue`] when an expression is
    /// malformed or divides by zero.
    pub fn set(&self, token: &ColorToken, value: impl Into<ChannelValue>) -> Result<ColorToken> {
        let value = value.into();
        let resolved = match &value {
            ChannelValue::Exact(n) if n.is_finite() => *n,
            ChannelValue::Exact(n) => return Err(ColorError::unsupported_value(n.to_string())),
            ChannelValue::Expression(expression) => {
                let arithmetic: Arithmetic = expression.parse()?;
                arithmetic
                    .apply(self.get(token))
                    .ok_or_else(|| ColorError::unsupported_value(expression.as_str()))?
            }
        };

        let updated = match self.slot {
            Slot::Alpha => token.with_alpha(resolved),
            Slot::Component(index) => token.to_space(self.space).with_channel(index, resolved),
        };
        Ok(updated)
    }
}

impl fmt::Display for ChannelAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.space, self.name())
    }
}

/// Parses `mode.channel` notation such as `lch.h` or `rgb.alpha`
impl FromStr for ChannelAccessor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        let (space, channel) = s
            .split_once('.')
            .ok_or_else(|| ColorError::unknown_channel(s.trim(), Colorspace::default()))?;
        ChannelAccessor::new(space.parse()?, channel)
    }
}

/// Read a channel in one call
pub fn get_channel(token: &ColorToken, space: Colorspace, name: &str) -> Result<f64> {
    Ok(ChannelAccessor::new(space, name)?.get(token))
}

/// Write a channel in one call
pub fn set_channel(
    token: &ColorToken,
    space: Colorspace,
    name: &str,
    value: impl Into<ChannelValue>,
) -> Result<ColorToken> {
    ChannelAccessor::new(space, name)?.set(token, value)
}
