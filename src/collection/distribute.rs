//! Extremum propagation
//!
//! `distribute` finds the token holding a factor's smallest or largest value
//! and rewrites every other token so it measures the same for that factor.
//! Tokens keep their colorspace and alpha.

use log::debug;

use super::sort::ranked;
use super::{resolve_against, Collection, Entry};
use crate::color::factor::factor_space;
use crate::color::{
    ChannelAccessor, ColorAnalyzer, ColorToken, Colorspace, Factor, FactorPredicate,
    LuminanceSearch,
};
use crate::config::{DistributeOptions, Extremum, SortOrder};
use crate::constants::wcag::CONTRAST_OFFSET;
use crate::{ColorError, Result};

/// Propagate a factor's extremum value across the collection
///
/// Contrast and distance are measured against `options.against`; the other
/// factors are absolute. The source token is skipped when `exclude_self` is
/// set and achromatic tokens are skipped when `exclude_achromatic` is set.
///
/// # Errors
///
/// Returns [`ColorError::EmptyCollection`] for an empty collection.
pub fn distribute(
    collection: &Collection,
    factor: Factor,
    options: &DistributeOptions,
) -> Result<Collection> {
    if collection.is_empty() {
        return Err(ColorError::EmptyCollection {
            operation: "distribute",
        });
    }
    let against = resolve_against(&options.against)?;
    let predicate = FactorPredicate::for_options(factor, options.colorspace, false, &against);

    let ordered = ranked(collection, &predicate, SortOrder::Asc);
    let source = match options.extremum {
        Extremum::Min => ordered.first(),
        Extremum::Max => ordered.last(),
    };
    let Some((target, source)) = source.map(|(value, entry)| (*value, entry.index)) else {
        return Err(ColorError::EmptyCollection {
            operation: "distribute",
        });
    };
    debug!(
        "Distributing {} {:?} = {} from token {} across {} tokens",
        factor,
        options.extremum,
        target,
        source,
        collection.len()
    );

    let analyzer = ColorAnalyzer::new();
    let search = LuminanceSearch::from_config(&options.search);
    let mut updated = Vec::with_capacity(collection.len());
    for entry in collection.entries() {
        let skip = (options.exclude_self && entry.index == source)
            || (options.exclude_achromatic && analyzer.is_achromatic(&entry.token));
        if skip || target.is_nan() {
            updated.push(entry);
            continue;
        }
        let token = apply(&predicate, &analyzer, &search, &entry.token, target)?;
        updated.push(Entry { token, ..entry });
    }
    Ok(collection.rebuild(updated))
}

fn apply(
    predicate: &FactorPredicate,
    analyzer: &ColorAnalyzer,
    search: &LuminanceSearch,
    token: &ColorToken,
    target: f64,
) -> Result<ColorToken> {
    let original = token.space();
    match predicate.factor() {
        Factor::Hue | Factor::Chroma | Factor::Lightness => {
            let (space, channels) = factor_space(predicate.space());
            let index = match predicate.factor() {
                Factor::Hue => channels.hue,
                Factor::Chroma => channels.chroma,
                _ => channels.lightness,
            };
            let updated = ChannelAccessor::component(space, index).set(token, target)?;
            Ok(updated.to_space(original))
        }
        Factor::Luminance => Ok(search.search(token, target).token.to_space(original)),
        Factor::Contrast => {
            let Some(reference) = predicate.reference() else {
                return Err(ColorError::MissingReference {
                    factor: Factor::Contrast,
                });
            };
            let reference = analyzer.luminance(reference);
            let current = analyzer.luminance(token);
            let luminance = luminance_for_contrast(reference, current, target);
            Ok(search.search(token, luminance).token.to_space(original))
        }
        Factor::Distance => {
            let Some(reference) = predicate.reference() else {
                return Err(ColorError::MissingReference {
                    factor: Factor::Distance,
                });
            };
            let origin = analyzer.lab65(reference);
            let lab = analyzer.lab65(token);
            let current = predicate.measure(token);
            if current == 0.0 || !current.is_finite() {
                return Ok(*token);
            }
            let scale = target / current;
            let scaled = [
                origin[0] + (lab[0] - origin[0]) * scale,
                origin[1] + (lab[1] - origin[1]) * scale,
                origin[2] + (lab[2] - origin[2]) * scale,
            ];
            Ok(ColorToken::new(Colorspace::Lab65, scaled, token.alpha()).to_space(original))
        }
    }
}

/// Luminance giving `ratio` against `reference`, on the same side of the
/// reference as `current`
fn luminance_for_contrast(reference: f64, current: f64, ratio: f64) -> f64 {
    let ratio = ratio.max(1.0);
    if current >= reference {
        (ratio * (reference + CONTRAST_OFFSET) - CONTRAST_OFFSET).min(1.0)
    } else {
        ((reference + CONTRAST_OFFSET) / ratio - CONTRAST_OFFSET).max(0.0)
    }
}
