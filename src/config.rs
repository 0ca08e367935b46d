//! Configuration structures for token normalization and collection analytics.
//!
//! Every default used by the library lives here, one section per operation.
//! All sections are `#[serde(default)]`, so a JSON file only needs the keys it
//! changes.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use colorfactor::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("colorfactor.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), colorfactor::ColorError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`TokenOptions`]: parsing hints and output shape
//! - [`SortOptions`], [`FilterOptions`], [`StatsOptions`], [`DistributeOptions`]: collection operations
//! - [`LuminanceSearchConfig`]: bisection tolerance and budget, nested in [`DistributeOptions`]

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::collection::Range;
use crate::color::{Colorspace, Factor, RawColor};
use crate::constants::{defaults, luminance_search};
use crate::{ColorError, Result};

/// Output shape of a serialized token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Hex string
    #[default]
    Str,
    /// Packed 24-bit integer
    Num,
    /// Channel array
    Arr,
    /// Keyed channel record
    Obj,
}

/// Text formatting for packed integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormat {
    Hex,
    Bin,
    Oct,
    Expo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Which end of a factor's range `distribute` propagates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Extremum {
    Min,
    #[default]
    Max,
}

/// Complete configuration, one section per operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub token: TokenOptions,
    pub sort: SortOptions,
    pub filter: FilterOptions,
    pub stats: StatsOptions,
    pub distribute: DistributeOptions,
}

/// Parsing hints and serialization shape for tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenOptions {
    /// Colorspace assumed for arrays and records that do not name one
    pub src_mode: Option<Colorspace>,

    /// Divide RGB channels by 255 when any exceeds 1
    pub normalize_rgb: bool,

    /// Shape produced by serialization
    pub kind: TokenKind,

    /// Colorspace of `arr`/`obj` output; the token's own colorspace when unset
    pub target_mode: Option<Colorspace>,

    /// Leave the colorspace tag out of `arr`/`obj` output
    pub omit_mode: bool,

    /// Leave alpha out of every output shape
    pub omit_alpha: bool,

    /// Render `num` output as text in this radix
    pub num_type: Option<NumberFormat>,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            src_mode: None,
            normalize_rgb: true,
            kind: TokenKind::Str,
            target_mode: None,
            omit_mode: false,
            omit_alpha: false,
            num_type: None,
        }
    }
}

impl TokenOptions {
    /// Options producing the given output shape with all other defaults
    pub fn for_kind(kind: TokenKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

fn default_against() -> RawColor {
    RawColor::from(defaults::AGAINST)
}

/// Sorting parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Reference color for relative and inherently relative factors
    pub against: RawColor,

    /// Colorspace hue, chroma and lightness are read in
    pub colorspace: Colorspace,

    /// Sort by distance from `against` instead of absolute value
    pub relative: bool,

    pub order: SortOrder,

    /// Return a per-factor map even for a single factor
    pub factor_object: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            against: default_against(),
            colorspace: Colorspace::default(),
            relative: false,
            order: SortOrder::Asc,
            factor_object: false,
        }
    }
}

/// Range filtering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub against: RawColor,
    pub colorspace: Colorspace,

    /// Explicit ranges; factors without one use their default range
    pub ranges: IndexMap<Factor, Range>,

    pub factor_object: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            against: default_against(),
            colorspace: Colorspace::default(),
            ranges: IndexMap::new(),
            factor_object: false,
        }
    }
}

impl FilterOptions {
    /// Add or replace the range for one factor
    pub fn with_range(mut self, factor: Factor, range: Range) -> Self {
        self.ranges.insert(factor, range);
        self
    }
}

/// Summary statistics parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsOptions {
    pub against: RawColor,
    pub colorspace: Colorspace,
    pub relative: bool,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            against: default_against(),
            colorspace: Colorspace::default(),
            relative: false,
        }
    }
}

/// Extremum propagation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributeOptions {
    pub against: RawColor,
    pub colorspace: Colorspace,

    /// Propagate the smallest or largest factor value
    pub extremum: Extremum,

    /// Leave the token holding the extremum untouched
    pub exclude_self: bool,

    /// Leave achromatic tokens untouched
    pub exclude_achromatic: bool,

    /// Bisection budget for the luminance and contrast factors
    pub search: LuminanceSearchConfig,
}

impl Default for DistributeOptions {
    fn default() -> Self {
        Self {
            against: default_against(),
            colorspace: Colorspace::default(),
            extremum: Extremum::Max,
            exclude_self: false,
            exclude_achromatic: false,
            search: LuminanceSearchConfig::default(),
        }
    }
}

/// Bisection tolerance and iteration budget for luminance targeting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuminanceSearchConfig {
    /// Accepted distance from the target luminance
    pub epsilon: f64,

    /// Midpoints evaluated before a best-effort result is returned
    pub max_iterations: u32,
}

impl Default for LuminanceSearchConfig {
    fn default() -> Self {
        Self {
            epsilon: luminance_search::EPSILON,
            max_iterations: luminance_search::MAX_ITERATIONS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColorError::config(format!("Failed to read {}", path.display()), e)
        })?;
        serde_json::from_str(&content)
            .map_err(|e| ColorError::config(format!("Failed to parse {}", path.display()), e))
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ColorError::config("Failed to encode configuration", e))?;
        std::fs::write(path, content)
            .map_err(|e| ColorError::config(format!("Failed to write {}", path.display()), e))
    }
}
