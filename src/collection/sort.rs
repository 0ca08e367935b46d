//! Stable sorting by factor and nearest/farthest queries

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::{resolve_against, resolve_factors, Collection, Entry, FactorOutput};
use crate::color::{ColorToken, Factor, FactorPredicate};
use crate::config::{SortOptions, SortOrder};
use crate::Result;

/// The token holding a factor's smallest or largest value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorMatch {
    pub factor: Factor,
    pub value: f64,
    pub token: ColorToken,
    /// Key of the token in a keyed collection
    pub key: Option<String>,
}

/// Measure every entry and stable-sort by the measured value.
///
/// `-0.0` is folded into `0.0` so it ties with zero; NaN sorts after every
/// number in ascending order.
pub(crate) fn ranked(
    collection: &Collection,
    predicate: &FactorPredicate,
    order: SortOrder,
) -> Vec<(f64, Entry)> {
    let mut measured: Vec<(f64, Entry)> = collection
        .entries()
        .into_iter()
        .map(|entry| {
            let value = predicate.measure(&entry.token);
            (if value == 0.0 { 0.0 } else { value }, entry)
        })
        .collect();
    match order {
        SortOrder::Asc => measured.sort_by(|a, b| a.0.total_cmp(&b.0)),
        SortOrder::Desc => measured.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }
    measured
}

/// Sort a copy of the collection by each requested factor
///
/// # Arguments
///
/// * `collection` - Sequence or keyed collection
/// * `factors` - Factors to sort by; all six when `None`
/// * `options` - Reference color, colorspace, relative mode and order
///
/// # Returns
///
/// One sorted collection for a single requested factor, otherwise a map of
/// factor to sorted collection. Ties keep their original relative order.
pub fn sort_by(
    collection: &Collection,
    factors: Option<&[Factor]>,
    options: &SortOptions,
) -> Result<FactorOutput<Collection>> {
    let against = resolve_against(&options.against)?;
    let resolved = resolve_factors(factors);
    debug!(
        "Sorting {} tokens by {:?} in {} ({:?})",
        collection.len(),
        resolved,
        options.colorspace,
        options.order
    );

    let mut results = IndexMap::with_capacity(resolved.len());
    for factor in resolved {
        let predicate =
            FactorPredicate::for_options(factor, options.colorspace, options.relative, &against);
        let sorted = ranked(collection, &predicate, options.order)
            .into_iter()
            .map(|(_, entry)| entry);
        results.insert(factor, collection.rebuild(sorted));
    }
    Ok(FactorOutput::assemble(factors, options.factor_object, results))
}

/// Token with the smallest value of `factor`
pub fn nearest(
    collection: &Collection,
    factor: Factor,
    options: &SortOptions,
) -> Result<Option<FactorMatch>> {
    extreme(collection, factor, options, SortOrder::Asc)
}

/// Token with the largest value of `factor`
pub fn farthest(
    collection: &Collection,
    factor: Factor,
    options: &SortOptions,
) -> Result<Option<FactorMatch>> {
    extreme(collection, factor, options, SortOrder::Desc)
}

fn extreme(
    collection: &Collection,
    factor: Factor,
    options: &SortOptions,
    order: SortOrder,
) -> Result<Option<FactorMatch>> {
    let against = resolve_against(&options.against)?;
    let predicate =
        FactorPredicate::for_options(factor, options.colorspace, options.relative, &against);
    Ok(ranked(collection, &predicate, order)
        .into_iter()
        .next()
        .map(|(value, entry)| FactorMatch {
            factor,
            value,
            token: entry.token,
            key: entry.key,
        }))
}
