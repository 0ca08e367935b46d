//! Range filtering by factor
//!
//! Two-sided ranges are inclusive at both ends. Comparison expressions such as
//! `">=0.5"` act as one-sided bounds. Chroma and lightness ranges whose
//! endpoints both lie in [0, 1] are read as fractions of the native channel
//! range.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{resolve_against, resolve_factors, Collection, FactorOutput};
use crate::color::{Colorspace, Comparison, Factor, FactorPredicate};
use crate::config::FilterOptions;
use crate::constants::defaults;
use crate::{ColorError, Result};

/// Range of accepted factor values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Range {
    /// Inclusive `[start, end]`
    Between(f64, f64),
    /// One-sided comparison, e.g. `">=0.5"`
    Expression(String),
}

impl Range {
    pub fn between(start: f64, end: f64) -> Self {
        Range::Between(start, end)
    }

    pub fn expression(expression: impl Into<String>) -> Self {
        Range::Expression(expression.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bound {
    Closed(f64, f64),
    OneSided(Comparison),
}

impl Bound {
    fn contains(self, value: f64) -> bool {
        match self {
            Bound::Closed(start, end) => value >= start && value <= end,
            Bound::OneSided(comparison) => comparison.matches(value),
        }
    }
}

/// Range used for a factor when none is given
pub fn default_range(factor: Factor, space: Colorspace) -> (f64, f64) {
    match factor {
        Factor::Hue => defaults::HUE_RANGE,
        Factor::Contrast => defaults::CONTRAST_RANGE,
        Factor::Luminance => defaults::LUMINANCE_RANGE,
        Factor::Distance => defaults::DISTANCE_RANGE,
        Factor::Chroma | Factor::Lightness => native_limits(factor, space),
    }
}

fn native_limits(factor: Factor, space: Colorspace) -> (f64, f64) {
    let channels = space.factor_channels();
    let index = match (factor, channels) {
        (Factor::Lightness, Some(c)) => c.lightness,
        (_, Some(c)) => c.chroma,
        (Factor::Lightness, None) => 0,
        (_, None) => 1,
    };
    space.limits(index)
}

/// Scale chroma/lightness bounds onto the channel's native range
///
/// Both endpoints share one scale. When either exceeds 1 they are read as
/// native values for a channel whose range exceeds 1, or as percentages for a
/// unit channel. Otherwise both are fractions of the native range.
fn rescale((start, end): (f64, f64), (lo, hi): (f64, f64)) -> (f64, f64) {
    let absolute = start > 1.0 || end > 1.0;
    let scale = |value: f64| lo + value * (hi - lo);
    match (absolute, hi > 1.0) {
        (true, true) => (start, end),
        (true, false) => (scale(start / 100.0), scale(end / 100.0)),
        (false, _) => (scale(start), scale(end)),
    }
}

fn resolve_bound(factor: Factor, space: Colorspace, range: Option<&Range>) -> Result<Bound> {
    match range {
        None => {
            let (start, end) = default_range(factor, space);
            Ok(Bound::Closed(start, end))
        }
        Some(Range::Expression(expression)) => Comparison::parse(expression)
            .map(Bound::OneSided)
            .ok_or_else(|| ColorError::InvalidRange {
                factor,
                expression: expression.clone(),
            }),
        Some(&Range::Between(start, end)) => {
            let (start, end) = if matches!(factor, Factor::Chroma | Factor::Lightness) {
                rescale((start, end), native_limits(factor, space))
            } else {
                (start, end)
            };
            Ok(Bound::Closed(start.min(end), start.max(end)))
        }
    }
}

/// Keep the tokens whose factor value lies within each factor's range
///
/// # Arguments
///
/// * `collection` - Sequence or keyed collection
/// * `factors` - Factors to filter by; all six when `None`
/// * `options` - Reference color, colorspace and per-factor ranges
///
/// # Errors
///
/// Returns [`ColorError::InvalidRange`] for a malformed comparison expression
/// and fails the whole call.
pub fn filter_by(
    collection: &Collection,
    factors: Option<&[Factor]>,
    options: &FilterOptions,
) -> Result<FactorOutput<Collection>> {
    let against = resolve_against(&options.against)?;
    let resolved = resolve_factors(factors);
    debug!(
        "Filtering {} tokens by {:?} in {}",
        collection.len(),
        resolved,
        options.colorspace
    );

    let mut results = IndexMap::with_capacity(resolved.len());
    for factor in resolved {
        let predicate = FactorPredicate::for_options(factor, options.colorspace, false, &against);
        let bound = resolve_bound(factor, predicate.space(), options.ranges.get(&factor))?;
        let kept = collection
            .entries()
            .into_iter()
            .filter(|entry| bound.contains(predicate.measure(&entry.token)));
        results.insert(factor, collection.rebuild(kept));
    }
    Ok(FactorOutput::assemble(factors, options.factor_object, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorToken;

    fn lch(l: f64, c: f64, h: f64) -> ColorToken {
        ColorToken::opaque(Colorspace::Lch, [l, c, h])
    }

    fn filter_one(collection: &Collection, factor: Factor, range: Range) -> Collection {
        let options = FilterOptions::default().with_range(factor, range);
        filter_by(collection, Some(&[factor]), &options)
            .unwrap()
            .single()
            .unwrap()
    }

    #[test]
    fn test_inclusive_bounds() {
        let collection: Collection = vec![
            lch(50.0, 20.0, 10.0),
            lch(50.0, 20.0, 20.0),
            lch(50.0, 20.0, 30.0),
            lch(50.0, 20.0, 40.0),
        ]
        .into();
        let kept = filter_one(&collection, Factor::Hue, Range::between(20.0, 30.0));
        let hues: Vec<f64> = kept.tokens().iter().map(|t| t.channel(2)).collect();
        assert_eq!(hues, vec![20.0, 30.0]);
    }

    #[test]
    fn test_expression_bound() {
        let collection = Collection::from_raw(["black", "white", "#808080"]).unwrap();
        let kept = filter_one(&collection, Factor::Luminance, Range::expression(">=0.5"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get(0), Some(&ColorToken::white()));
    }

    #[test]
    fn test_invalid_expression() {
        let collection = Collection::from_raw(["black"]).unwrap();
        let options = FilterOptions::default().with_range(Factor::Hue, Range::expression("~5"));
        let err = filter_by(&collection, None, &options).unwrap_err();
        assert!(matches!(err, ColorError::InvalidRange { factor: Factor::Hue, .. }));
    }

    #[test]
    fn test_fractional_chroma_bounds() {
        let collection: Collection = vec![lch(50.0, 10.0, 0.0), lch(50.0, 60.0, 0.0), lch(50.0, 100.0, 0.0)].into();
        // 0.3..0.5 of lch chroma [0, 150] is 45..75
        let kept = filter_one(&collection, Factor::Chroma, Range::between(0.3, 0.5));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get(0).map(|t| t.channel(1)), Some(60.0));

        // Bounds above 1 pass through for a space whose range exceeds 1
        let kept = filter_one(&collection, Factor::Chroma, Range::between(50.0, 150.0));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_percent_bounds_for_unit_ranges() {
        assert_eq!(rescale((0.0, 50.0), (0.0, 1.0)), (0.0, 0.5));
        assert_eq!(rescale((0.25, 0.5), (0.0, 100.0)), (25.0, 50.0));
        assert_eq!(rescale((40.0, 60.0), (0.0, 100.0)), (40.0, 60.0));
    }

    #[test]
    fn test_mixed_scale_bounds_pass_through() {
        assert_eq!(rescale((1.0, 50.0), (0.0, 100.0)), (1.0, 50.0));
        assert_eq!(rescale((0.5, 60.0), (0.0, 150.0)), (0.5, 60.0));

        let collection: Collection = vec![
            lch(10.0, 20.0, 0.0),
            lch(30.0, 20.0, 0.0),
            lch(50.0, 20.0, 0.0),
            lch(70.0, 20.0, 0.0),
        ]
        .into();
        let kept = filter_one(&collection, Factor::Lightness, Range::between(1.0, 50.0));
        assert_eq!(kept.len(), 3);
        let kept = filter_one(&collection, Factor::Chroma, Range::between(0.5, 60.0));
        assert_eq!(kept.len(), 4);
        let kept = filter_one(&collection, Factor::Lightness, Range::between(50.0, 0.2));
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn test_reversed_fractional_bounds() {
        let collection: Collection = vec![lch(10.0, 20.0, 0.0), lch(40.0, 20.0, 0.0)].into();
        // 0.5..0.2 of lch lightness is 20..50 once swapped
        let kept = filter_one(&collection, Factor::Lightness, Range::between(0.5, 0.2));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept.get(0).map(|t| t.channel(0)), Some(40.0));
    }

    #[test]
    fn test_default_ranges() {
        assert_eq!(default_range(Factor::Hue, Colorspace::Lch), (0.0, 359.0));
        assert_eq!(default_range(Factor::Contrast, Colorspace::Lch), (0.0, 21.0));
        assert_eq!(default_range(Factor::Lightness, Colorspace::Lch), (0.0, 100.0));
        assert_eq!(default_range(Factor::Chroma, Colorspace::Oklch), (0.0, 0.4));
        assert_eq!(default_range(Factor::Lightness, Colorspace::Hsl), (0.0, 1.0));
    }

    #[test]
    fn test_keyed_filter_keeps_keys() {
        let mut map = IndexMap::new();
        map.insert("dark".to_string(), ColorToken::black());
        map.insert("light".to_string(), ColorToken::white());
        let collection = Collection::Keyed(map);
        let kept = filter_one(&collection, Factor::Luminance, Range::between(0.9, 1.0));
        assert_eq!(kept.keys(), Some(vec!["light"]));
    }
}
