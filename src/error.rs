//! Error types for the colorfactor library

use thiserror::Error;

use crate::color::{Colorspace, Factor};

/// Result type alias for colorfactor operations
pub type Result<T> = std::result::Result<T, ColorError>;

/// Every failure a token, channel, factor or collection operation can report
#[derive(Error, Debug)]
pub enum ColorError {
    /// Input could not be mapped to any known color shape
    #[error("Invalid color token `{input}`: {reason}")]
    InvalidToken { input: String, reason: String },

    /// Colorspace tag is not one of the supported modes
    #[error("Unknown colorspace: {name}")]
    UnknownColorspace { name: String },

    /// Channel name does not exist in the active colorspace
    #[error("Unknown channel `{channel}` in colorspace {colorspace}")]
    UnknownChannel {
        channel: String,
        colorspace: Colorspace,
    },

    /// Channel value is neither a number nor a `<op><number>` expression
    #[error("Unsupported channel value: {value}")]
    UnsupportedChannelValue { value: String },

    /// Factor name outside hue, chroma, lightness, luminance, contrast, distance
    #[error("Unknown factor: {name}")]
    UnknownFactor { name: String },

    /// Contrast and distance can only be measured against a reference token
    #[error("Factor {factor} requires a reference color")]
    MissingReference { factor: Factor },

    /// Range expression could not be parsed
    #[error("Invalid range for {factor}: {expression}")]
    InvalidRange { factor: Factor, expression: String },

    /// Operation has nothing to summarize
    #[error("Cannot run {operation} on an empty collection")]
    EmptyCollection { operation: &'static str },

    /// Configuration file could not be read, written or decoded
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ColorError {
    /// Create an invalid token error for the offending input
    pub fn invalid_token(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub fn unknown_channel(channel: impl Into<String>, colorspace: Colorspace) -> Self {
        Self::UnknownChannel {
            channel: channel.into(),
            colorspace,
        }
    }

    pub fn unsupported_value(value: impl Into<String>) -> Self {
        Self::UnsupportedChannelValue {
            value: value.into(),
        }
    }

    /// Create a configuration error wrapping the underlying I/O or JSON failure
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Check if this error was caused by malformed color input rather than options
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            ColorError::InvalidToken { .. } | ColorError::UnknownColorspace { .. }
        )
    }
}
