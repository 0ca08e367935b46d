//! Color tokens, conversion and measurement
//!
//! This module handles colorspace conversions, token parsing and
//! serialization, channel access and the per-factor measurements that the
//! collection engine is built on.

pub mod analysis;
pub mod channel;
pub mod conversion;
pub mod expr;
pub mod factor;
pub mod luminance;
pub mod normalize;
pub mod scheme;
pub mod space;
pub mod token;

pub use analysis::{ColorAnalyzer, Complement, HueFamily, Temperature};
pub use channel::{get_channel, set_channel, ChannelAccessor, ChannelValue};
pub use conversion::ColorConverter;
pub use expr::{Arithmetic, Comparison};
pub use factor::{Factor, FactorPredicate};
pub use luminance::{LuminanceSearch, SearchOutcome};
pub use normalize::{RawColor, RawComponent, TokenNormalizer};
pub use scheme::Scheme;
pub use space::{Colorspace, FactorChannels};
pub use token::ColorToken;
