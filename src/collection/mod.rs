//! Collection-wide analytics
//!
//! Sorting, range filtering, statistics and extremum distribution over
//! ordered or keyed collections of tokens. Every operation returns a new
//! collection of the same shape as its input.

pub mod distribute;
pub mod filter;
pub mod sort;
pub mod stats;

pub use distribute::distribute;
pub use filter::{default_range, filter_by, Range};
pub use sort::{farthest, nearest, sort_by, FactorMatch};
pub use stats::{stats, FactorExtremum, FactorStats, StatsReport};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::color::{ColorToken, Factor, RawColor, TokenNormalizer};
use crate::Result;

/// Tokens as an ordered sequence or an insertion-ordered keyed map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Collection {
    Sequence(Vec<ColorToken>),
    Keyed(IndexMap<String, ColorToken>),
}

/// Unparsed collection input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCollection {
    Sequence(Vec<RawColor>),
    Keyed(IndexMap<String, RawColor>),
}

/// A token with its position and, for keyed collections, its key
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry {
    pub index: usize,
    pub key: Option<String>,
    pub token: ColorToken,
}

impl Collection {
    /// Parse every element, failing on the first invalid one
    pub fn parse(raw: &RawCollection, normalizer: &TokenNormalizer) -> Result<Self> {
        match raw {
            RawCollection::Sequence(items) => items
                .iter()
                .map(|item| normalizer.parse(item))
                .collect::<Result<Vec<_>>>()
                .map(Collection::Sequence),
            RawCollection::Keyed(items) => items
                .iter()
                .map(|(key, item)| Ok((key.clone(), normalizer.parse(item)?)))
                .collect::<Result<IndexMap<_, _>>>()
                .map(Collection::Keyed),
        }
    }

    /// Parse a sequence of raw inputs with default token options
    pub fn from_raw<I, R>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawColor>,
    {
        let normalizer = TokenNormalizer::new();
        items
            .into_iter()
            .map(|item| normalizer.parse(&item.into()))
            .collect::<Result<Vec<_>>>()
            .map(Collection::Sequence)
    }

    /// Serialize every element with the normalizer's output options
    pub fn to_raw(&self, normalizer: &TokenNormalizer) -> RawCollection {
        match self {
            Collection::Sequence(tokens) => {
                RawCollection::Sequence(tokens.iter().map(|t| normalizer.serialize(t)).collect())
            }
            Collection::Keyed(tokens) => RawCollection::Keyed(
                tokens
                    .iter()
                    .map(|(key, t)| (key.clone(), normalizer.serialize(t)))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Sequence(tokens) => tokens.len(),
            Collection::Keyed(tokens) => tokens.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self, Collection::Keyed(_))
    }

    /// Tokens in collection order
    pub fn tokens(&self) -> Vec<&ColorToken> {
        match self {
            Collection::Sequence(tokens) => tokens.iter().collect(),
            Collection::Keyed(tokens) => tokens.values().collect(),
        }
    }

    /// Token at a position, for either shape
    pub fn get(&self, index: usize) -> Option<&ColorToken> {
        match self {
            Collection::Sequence(tokens) => tokens.get(index),
            Collection::Keyed(tokens) => tokens.get_index(index).map(|(_, t)| t),
        }
    }

    /// Keys in order; `None` for sequences
    pub fn keys(&self) -> Option<Vec<&str>> {
        match self {
            Collection::Sequence(_) => None,
            Collection::Keyed(tokens) => Some(tokens.keys().map(String::as_str).collect()),
        }
    }

    pub(crate) fn entries(&self) -> Vec<Entry> {
        match self {
            Collection::Sequence(tokens) => tokens
                .iter()
                .enumerate()
                .map(|(index, token)| Entry {
                    index,
                    key: None,
                    token: *token,
                })
                .collect(),
            Collection::Keyed(tokens) => tokens
                .iter()
                .enumerate()
                .map(|(index, (key, token))| Entry {
                    index,
                    key: Some(key.clone()),
                    token: *token,
                })
                .collect(),
        }
    }

    /// New collection of the same shape holding `entries` in the given order
    pub(crate) fn rebuild(&self, entries: impl IntoIterator<Item = Entry>) -> Self {
        match self {
            Collection::Sequence(_) => {
                Collection::Sequence(entries.into_iter().map(|e| e.token).collect())
            }
            Collection::Keyed(_) => Collection::Keyed(
                entries
                    .into_iter()
                    .filter_map(|e| e.key.map(|key| (key, e.token)))
                    .collect(),
            ),
        }
    }
}

impl From<Vec<ColorToken>> for Collection {
    fn from(tokens: Vec<ColorToken>) -> Self {
        Collection::Sequence(tokens)
    }
}

impl From<IndexMap<String, ColorToken>> for Collection {
    fn from(tokens: IndexMap<String, ColorToken>) -> Self {
        Collection::Keyed(tokens)
    }
}

impl FromIterator<ColorToken> for Collection {
    fn from_iter<I: IntoIterator<Item = ColorToken>>(iter: I) -> Self {
        Collection::Sequence(iter.into_iter().collect())
    }
}

/// Result of a per-factor operation
///
/// A single explicitly requested factor yields `Single` unless a map was asked
/// for; otherwise results are keyed by factor in request order.
#[derive(Debug, Clone, PartialEq)]
pub enum FactorOutput<T> {
    Single { factor: Factor, value: T },
    PerFactor(IndexMap<Factor, T>),
}

impl<T> FactorOutput<T> {
    pub(crate) fn assemble(
        requested: Option<&[Factor]>,
        factor_object: bool,
        mut results: IndexMap<Factor, T>,
    ) -> Self {
        let single = requested.map_or(false, |f| f.len() == 1) && !factor_object;
        if single && results.len() == 1 {
            if let Some((factor, value)) = results.pop() {
                return FactorOutput::Single { factor, value };
            }
        }
        FactorOutput::PerFactor(results)
    }

    pub fn get(&self, factor: Factor) -> Option<&T> {
        match self {
            FactorOutput::Single { factor: f, value } if *f == factor => Some(value),
            FactorOutput::Single { .. } => None,
            FactorOutput::PerFactor(map) => map.get(&factor),
        }
    }

    /// The value of a single-factor result
    pub fn single(self) -> Option<T> {
        match self {
            FactorOutput::Single { value, .. } => Some(value),
            FactorOutput::PerFactor(_) => None,
        }
    }

    pub fn into_map(self) -> IndexMap<Factor, T> {
        match self {
            FactorOutput::Single { factor, value } => IndexMap::from([(factor, value)]),
            FactorOutput::PerFactor(map) => map,
        }
    }
}

impl<T: Serialize> Serialize for FactorOutput<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FactorOutput::Single { value, .. } => value.serialize(serializer),
            FactorOutput::PerFactor(map) => map.serialize(serializer),
        }
    }
}

/// Requested factors in order without duplicates; all six when none are given
pub(crate) fn resolve_factors(factors: Option<&[Factor]>) -> Vec<Factor> {
    match factors {
        Some(list) if !list.is_empty() => {
            let mut resolved = Vec::with_capacity(list.len());
            for factor in list {
                if !resolved.contains(factor) {
                    resolved.push(*factor);
                }
            }
            resolved
        }
        _ => Factor::ALL.to_vec(),
    }
}

pub(crate) fn resolve_against(against: &RawColor) -> Result<ColorToken> {
    TokenNormalizer::new().parse(against)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Colorspace;

    fn keyed() -> Collection {
        let mut map = IndexMap::new();
        map.insert("b".to_string(), ColorToken::white());
        map.insert("a".to_string(), ColorToken::black());
        Collection::Keyed(map)
    }

    #[test]
    fn test_parse_sequence_and_keyed() {
        let seq = Collection::from_raw(["#ff0000", "blue", "b2c3f1"]).unwrap();
        assert_eq!(seq.len(), 3);
        assert!(!seq.is_keyed());

        let mut raw = IndexMap::new();
        raw.insert("bg".to_string(), RawColor::from("white"));
        raw.insert("fg".to_string(), RawColor::from(0x000000_u32));
        let keyed = Collection::parse(&RawCollection::Keyed(raw), &TokenNormalizer::new()).unwrap();
        assert_eq!(keyed.keys(), Some(vec!["bg", "fg"]));
        assert_eq!(keyed.get(1), Some(&ColorToken::black()));
    }

    #[test]
    fn test_parse_fails_on_bad_element() {
        assert!(Collection::from_raw(["#ff0000", "nope"]).is_err());
    }

    #[test]
    fn test_rebuild_keeps_shape() {
        let collection = keyed();
        let mut entries = collection.entries();
        entries.reverse();
        let rebuilt = collection.rebuild(entries);
        assert_eq!(rebuilt.keys(), Some(vec!["a", "b"]));

        let seq: Collection = vec![ColorToken::white(), ColorToken::black()].into();
        let rebuilt = seq.rebuild(seq.entries().into_iter().rev());
        assert_eq!(rebuilt.get(0), Some(&ColorToken::black()));
    }

    #[test]
    fn test_to_raw() {
        let raw = keyed().to_raw(&TokenNormalizer::new());
        let RawCollection::Keyed(map) = raw else {
            panic!("expected keyed output");
        };
        assert_eq!(map.get("a"), Some(&RawColor::from("#000000")));
    }

    #[test]
    fn test_factor_output_shapes() {
        let mut results = IndexMap::new();
        results.insert(Factor::Hue, 1);
        let single = FactorOutput::assemble(Some(&[Factor::Hue]), false, results.clone());
        assert_eq!(single.get(Factor::Hue), Some(&1));
        assert_eq!(single.clone().single(), Some(1));

        let forced = FactorOutput::assemble(Some(&[Factor::Hue]), true, results.clone());
        assert!(matches!(forced, FactorOutput::PerFactor(_)));

        let all = FactorOutput::assemble(None, false, results);
        assert_eq!(all.into_map().len(), 1);
    }

    #[test]
    fn test_resolve_factors() {
        assert_eq!(resolve_factors(None), Factor::ALL.to_vec());
        assert_eq!(resolve_factors(Some(&[])), Factor::ALL.to_vec());
        assert_eq!(
            resolve_factors(Some(&[Factor::Luminance, Factor::Hue, Factor::Luminance])),
            vec![Factor::Luminance, Factor::Hue]
        );
    }

    #[test]
    fn test_resolve_against_default() {
        let cyan = resolve_against(&RawColor::from("cyan")).unwrap();
        assert_eq!(cyan.space(), Colorspace::Rgb);
        assert_eq!(cyan.to_hex(false), "#00ffff");
    }
}
