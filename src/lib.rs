//! # colorfactor
//!
//! Normalize heterogeneous color tokens and analyze collections of them by
//! perceptual factors.
//!
//! This library provides:
//! - Parsing of hex strings, CSS names, packed integers, channel arrays and
//!   channel objects into one canonical [`ColorToken`], and serialization back
//! - Channel access with literal and `+`/`-`/`*`/`/` expression updates
//! - Six factors (hue, chroma, lightness, luminance, contrast, distance) with
//!   absolute and reference-relative measurements
//! - Collection sorting, range filtering, statistics and extremum distribution
//! - A bounded bisection search for a target WCAG luminance
//!
//! ## Example
//!
//! ```rust
//! use colorfactor::{get_contrast, get_luminance, sort_by, Collection, Factor, SortOptions};
//!
//! assert_eq!(get_contrast("black", "white")?, 21.0);
//! assert!((get_luminance("#ffc300")? - 0.6029).abs() < 1e-4);
//!
//! let collection = Collection::from_raw(["#f3bac1", "b2c3f1", "#a1bd2f"])?;
//! let sorted = sort_by(&collection, Some(&[Factor::Hue]), &SortOptions::default())?;
//! assert_eq!(sorted.single().map(|c| c.len()), Some(3));
//! # Ok::<(), colorfactor::ColorError>(())
//! ```

pub mod collection;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;

pub use collection::{
    default_range, distribute, farthest, filter_by, nearest, sort_by, stats, Collection,
    FactorExtremum, FactorMatch, FactorOutput, FactorStats, Range, RawCollection, StatsReport,
};
pub use color::{
    get_channel, set_channel, ChannelAccessor, ChannelValue, ColorAnalyzer, ColorToken,
    Colorspace, Complement, Factor, FactorPredicate, HueFamily, LuminanceSearch, RawColor,
    Scheme, SearchOutcome, Temperature, TokenNormalizer,
};
pub use config::{
    DistributeOptions, EngineConfig, Extremum, FilterOptions, NumberFormat, SortOptions,
    SortOrder, StatsOptions, TokenKind, TokenOptions,
};
pub use error::{ColorError, Result};

/// Parse any supported input shape with default token options
pub fn parse_color(input: impl Into<RawColor>) -> Result<ColorToken> {
    TokenNormalizer::new().parse(&input.into())
}

/// WCAG relative luminance of a color
///
/// # Errors
///
/// Returns [`ColorError::InvalidToken`] if the input cannot be parsed.
pub fn get_luminance(color: impl Into<RawColor>) -> Result<f64> {
    Ok(ColorAnalyzer::new().luminance(&parse_color(color)?))
}

/// WCAG contrast ratio between two colors, in [1, 21]
pub fn get_contrast(a: impl Into<RawColor>, b: impl Into<RawColor>) -> Result<f64> {
    Ok(ColorAnalyzer::new().contrast(&parse_color(a)?, &parse_color(b)?))
}

/// Move a color along its black or white gradient to a target luminance
///
/// # Arguments
///
/// * `color` - Any supported input shape
/// * `target` - Desired WCAG relative luminance in [0, 1]
///
/// # Returns
///
/// The sRGB token found by the search. The search is approximate: see
/// [`LuminanceSearch`] for its tolerance and iteration budget.
pub fn set_luminance(color: impl Into<RawColor>, target: f64) -> Result<ColorToken> {
    let token = parse_color(color)?;
    Ok(LuminanceSearch::new().search(&token, target).token)
}

/// Rotate a color's LCh hue by 180 degrees
pub fn complimentary(color: impl Into<RawColor>) -> Result<Complement> {
    Ok(ColorAnalyzer::new().complimentary(&parse_color(color)?))
}

/// Smallest value of `factor` in a list of colors, with the token holding it
pub fn get_nearest<I, R>(
    colors: I,
    factor: Factor,
    colorspace: Colorspace,
) -> Result<Option<FactorMatch>>
where
    I: IntoIterator<Item = R>,
    R: Into<RawColor>,
{
    let options = SortOptions {
        colorspace,
        ..SortOptions::default()
    };
    nearest(&Collection::from_raw(colors)?, factor, &options)
}

/// Largest value of `factor` in a list of colors, with the token holding it
pub fn get_farthest<I, R>(
    colors: I,
    factor: Factor,
    colorspace: Colorspace,
) -> Result<Option<FactorMatch>>
where
    I: IntoIterator<Item = R>,
    R: Into<RawColor>,
{
    let options = SortOptions {
        colorspace,
        ..SortOptions::default()
    };
    farthest(&Collection::from_raw(colors)?, factor, &options)
}
