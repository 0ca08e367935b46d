//! Per-factor statistics over a collection

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::sort::ranked;
use super::{resolve_against, resolve_factors, Collection, Entry};
use crate::color::analysis::circular_mean;
use crate::color::{ColorAnalyzer, ColorToken, Colorspace, Factor, FactorPredicate, HueFamily};
use crate::config::{SortOrder, StatsOptions};
use crate::{ColorError, Result};

/// A token at one end of a factor's range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorExtremum {
    pub token: ColorToken,
    pub value: f64,
    pub family: HueFamily,
    pub key: Option<String>,
}

/// Summary of one factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorStats {
    /// Reference token, present only for relative measurements
    pub against: Option<ColorToken>,
    pub min: FactorExtremum,
    pub max: FactorExtremum,
    /// Circular mean for absolute hue, arithmetic mean otherwise. Achromatic
    /// tokens are left out of the hue mean.
    pub mean: f64,
    /// Colorspace the factor was measured in
    pub colorspace: Colorspace,
}

impl FactorStats {
    /// `[min, max]` tokens
    pub fn extremums(&self) -> [&ColorToken; 2] {
        [&self.min.token, &self.max.token]
    }
}

/// Statistics for every requested factor plus the achromatic ratio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub factors: IndexMap<Factor, FactorStats>,
    /// Fraction of tokens with no perceptible hue
    pub achromatic: f64,
    pub colorspace: Colorspace,
}

impl StatsReport {
    pub fn get(&self, factor: Factor) -> Option<&FactorStats> {
        self.factors.get(&factor)
    }
}

/// Compute extremums and means for each factor
///
/// # Arguments
///
/// * `collection` - Sequence or keyed collection
/// * `factors` - Factors to summarize; all six when `None`
/// * `options` - Reference color, colorspace and relative mode
///
/// # Errors
///
/// Returns [`ColorError::EmptyCollection`] when there is nothing to summarize.
pub fn stats(
    collection: &Collection,
    factors: Option<&[Factor]>,
    options: &StatsOptions,
) -> Result<StatsReport> {
    if collection.is_empty() {
        return Err(ColorError::EmptyCollection { operation: "stats" });
    }
    let against = resolve_against(&options.against)?;
    let resolved = resolve_factors(factors);
    debug!(
        "Computing stats for {} tokens over {:?} in {}",
        collection.len(),
        resolved,
        options.colorspace
    );

    let analyzer = ColorAnalyzer::new();
    let mut summaries = IndexMap::with_capacity(resolved.len());
    for factor in resolved {
        let predicate =
            FactorPredicate::for_options(factor, options.colorspace, options.relative, &against);
        let ordered = ranked(collection, &predicate, SortOrder::Asc);
        let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
            return Err(ColorError::EmptyCollection { operation: "stats" });
        };
        let extremum = |(value, entry): &(f64, Entry)| FactorExtremum {
            token: entry.token,
            value: *value,
            family: analyzer.family(&entry.token),
            key: entry.key.clone(),
        };

        let absolute_hue = factor == Factor::Hue && !predicate.is_relative();
        // Gray hues are conversion noise
        let values: Vec<f64> = ordered
            .iter()
            .filter(|(_, entry)| !(absolute_hue && analyzer.is_achromatic(&entry.token)))
            .map(|(value, _)| *value)
            .filter(|value| !value.is_nan())
            .collect();
        let mean = if absolute_hue {
            circular_mean(&values)
        } else if values.is_empty() {
            f64::NAN
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        };

        summaries.insert(
            factor,
            FactorStats {
                against: predicate.reference().copied(),
                min: extremum(first),
                max: extremum(last),
                mean,
                colorspace: predicate.space(),
            },
        );
    }

    let achromatic = collection
        .tokens()
        .into_iter()
        .filter(|token| analyzer.is_achromatic(token))
        .count() as f64
        / collection.len() as f64;

    Ok(StatsReport {
        factors: summaries,
        achromatic,
        colorspace: options.colorspace,
    })
}
