//! Token normalization
//!
//! Parses every supported input shape into a [`ColorToken`] and serializes
//! tokens back out:
//! - strings: hex literals (3, 4, 6 or 8 digits, `#` optional) and CSS named colors
//! - numbers: packed `0xRRGGBB` integers
//! - arrays: `[mode?, c1, c2, c3, alpha?]`
//! - records: `{mode?, c1, c2, c3, alpha?}` keyed by channel name

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::conversion::hex_to_srgb;
use super::space::Colorspace;
use super::token::ColorToken;
use crate::config::{NumberFormat, TokenKind, TokenOptions};
use crate::constants::token::{MAX_PACKED_RGB, RGB_LEGACY_SCALE};
use crate::{ColorError, Result};

/// One element of an array or record input: a number or a tag string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawComponent {
    Value(f64),
    Tag(String),
}

impl From<f64> for RawComponent {
    fn from(value: f64) -> Self {
        RawComponent::Value(value)
    }
}

impl From<&str> for RawComponent {
    fn from(tag: &str) -> Self {
        RawComponent::Tag(tag.to_string())
    }
}

/// A color in any accepted input shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawColor {
    Number(f64),
    Text(String),
    Array(Vec<RawComponent>),
    Object(IndexMap<String, RawComponent>),
}

impl RawColor {
    /// Channel array, optionally tagged with a colorspace
    pub fn array(mode: Option<&str>, values: &[f64]) -> Self {
        let tag = mode.map(RawComponent::from);
        RawColor::Array(
            tag.into_iter()
                .chain(values.iter().copied().map(RawComponent::Value))
                .collect(),
        )
    }

    /// Keyed record, optionally tagged with a colorspace
    pub fn object(mode: Option<&str>, entries: &[(&str, f64)]) -> Self {
        let mut record = IndexMap::new();
        if let Some(mode) = mode {
            record.insert("mode".to_string(), RawComponent::from(mode));
        }
        for (key, value) in entries {
            record.insert(key.to_string(), RawComponent::Value(*value));
        }
        RawColor::Object(record)
    }

    /// Shape this input would serialize back to
    pub fn kind(&self) -> TokenKind {
        match self {
            RawColor::Number(_) => TokenKind::Num,
            RawColor::Text(_) => TokenKind::Str,
            RawColor::Array(_) => TokenKind::Arr,
            RawColor::Object(_) => TokenKind::Obj,
        }
    }

    /// Compact JSON rendering for error messages
    pub fn describe(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

impl From<&str> for RawColor {
    fn from(text: &str) -> Self {
        RawColor::Text(text.to_string())
    }
}

impl From<String> for RawColor {
    fn from(text: String) -> Self {
        RawColor::Text(text)
    }
}

impl From<u32> for RawColor {
    fn from(packed: u32) -> Self {
        RawColor::Number(f64::from(packed))
    }
}

impl From<f64> for RawColor {
    fn from(number: f64) -> Self {
        RawColor::Number(number)
    }
}

impl From<ColorToken> for RawColor {
    fn from(token: ColorToken) -> Self {
        TokenNormalizer::with_options(TokenOptions::for_kind(TokenKind::Arr)).serialize(&token)
    }
}

/// Parses raw inputs into tokens and serializes tokens into raw outputs
#[derive(Debug, Clone, Default)]
pub struct TokenNormalizer {
    options: TokenOptions,
}

impl TokenNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TokenOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TokenOptions {
        &self.options
    }

    /// Parse any supported input shape
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidToken`] when the input cannot be mapped to
    /// a colorspace, has the wrong channel count, or is a number outside
    /// `[0, 0xFFFFFF]`.
    pub fn parse(&self, input: &RawColor) -> Result<ColorToken> {
        match input {
            RawColor::Number(n) => parse_packed(*n),
            RawColor::Text(text) => parse_text(text),
            RawColor::Array(entries) => self.parse_array(input, entries),
            RawColor::Object(record) => self.parse_object(input, record),
        }
    }

    /// Serialize into the configured output shape
    pub fn serialize(&self, token: &ColorToken) -> RawColor {
        self.serialize_as(token, self.options.kind)
    }

    /// Serialize into an explicit output shape
    pub fn serialize_as(&self, token: &ColorToken, kind: TokenKind) -> RawColor {
        let options = &self.options;
        match kind {
            TokenKind::Str => RawColor::Text(token.to_hex(!options.omit_alpha)),
            TokenKind::Num => {
                let packed = token.to_packed();
                match options.num_type {
                    None => RawColor::Number(f64::from(packed)),
                    Some(NumberFormat::Hex) => RawColor::Text(format!("{:x}", packed)),
                    Some(NumberFormat::Bin) => RawColor::Text(format!("{:b}", packed)),
                    Some(NumberFormat::Oct) => RawColor::Text(format!("{:o}", packed)),
                    Some(NumberFormat::Expo) => RawColor::Text(format!("{:e}", f64::from(packed))),
                }
            }
            TokenKind::Arr => {
                let converted = token.to_space(options.target_mode.unwrap_or(token.space()));
                let mut entries = Vec::with_capacity(5);
                if !options.omit_mode {
                    entries.push(RawComponent::from(converted.space().name()));
                }
                entries.extend(converted.channels().map(RawComponent::Value));
                if !options.omit_alpha {
                    entries.push(RawComponent::Value(converted.alpha()));
                }
                RawColor::Array(entries)
            }
            TokenKind::Obj => {
                let converted = token.to_space(options.target_mode.unwrap_or(token.space()));
                let space = converted.space();
                let mut record = IndexMap::with_capacity(5);
                if !options.omit_mode {
                    record.insert("mode".to_string(), RawComponent::from(space.name()));
                }
                for (name, value) in space.channels().iter().zip(converted.channels()) {
                    record.insert(name.to_string(), RawComponent::Value(value));
                }
                if !options.omit_alpha {
                    record.insert("alpha".to_string(), RawComponent::Value(converted.alpha()));
                }
                RawColor::Object(record)
            }
        }
    }

    fn parse_array(&self, input: &RawColor, entries: &[RawComponent]) -> Result<ColorToken> {
        let (space, values) = match entries.split_first() {
            Some((RawComponent::Tag(tag), rest)) => (parse_mode(input, tag)?, rest),
            _ => (self.options.src_mode.unwrap_or_default(), entries),
        };

        let values = values
            .iter()
            .map(|entry| match entry {
                RawComponent::Value(v) => Ok(*v),
                RawComponent::Tag(tag) => Err(ColorError::invalid_token(
                    input.describe(),
                    format!("unexpected tag `{}` among channel values", tag),
                )),
            })
            .collect::<Result<Vec<f64>>>()?;

        let (channels, alpha) = match values.as_slice() {
            [a, b, c] => ([*a, *b, *c], 1.0),
            [a, b, c, alpha] => ([*a, *b, *c], *alpha),
            _ => {
                return Err(ColorError::invalid_token(
                    input.describe(),
                    format!("expected 3 or 4 channel values, got {}", values.len()),
                ))
            }
        };
        Ok(ColorToken::new(space, self.normalize_rgb(space, channels), alpha))
    }

    fn parse_object(
        &self,
        input: &RawColor,
        record: &IndexMap<String, RawComponent>,
    ) -> Result<ColorToken> {
        let lookup = |name: &str| {
            record
                .iter()
                .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        };
        let number = |name: &str| -> Result<Option<f64>> {
            match lookup(name) {
                None => Ok(None),
                Some(RawComponent::Value(v)) => Ok(Some(*v)),
                Some(RawComponent::Tag(tag)) => Err(ColorError::invalid_token(
                    input.describe(),
                    format!("channel `{}` is not a number: {}", name, tag),
                )),
            }
        };

        let space = match lookup("mode") {
            Some(RawComponent::Tag(tag)) => parse_mode(input, tag)?,
            Some(RawComponent::Value(_)) => {
                return Err(ColorError::invalid_token(input.describe(), "mode must be a string"))
            }
            None => self
                .options
                .src_mode
                .or_else(|| Colorspace::infer_from_keys(record.keys().map(String::as_str)))
                .unwrap_or_default(),
        };

        let mut channels = [0.0; 3];
        for (slot, name) in channels.iter_mut().zip(space.channels()) {
            *slot = number(name)?.ok_or_else(|| {
                ColorError::invalid_token(
                    input.describe(),
                    format!("missing channel `{}` for {}", name, space),
                )
            })?;
        }
        let alpha = number("alpha")?.unwrap_or(1.0);
        Ok(ColorToken::new(space, self.normalize_rgb(space, channels), alpha))
    }

    fn normalize_rgb(&self, space: Colorspace, channels: [f64; 3]) -> [f64; 3] {
        if self.options.normalize_rgb && space.is_rgb() && channels.iter().any(|c| c.abs() > 1.0) {
            channels.map(|c| c / RGB_LEGACY_SCALE)
        } else {
            channels
        }
    }
}

fn parse_mode(input: &RawColor, tag: &str) -> Result<Colorspace> {
    tag.parse()
        .map_err(|e: ColorError| ColorError::invalid_token(input.describe(), e.to_string()))
}

fn parse_packed(n: f64) -> Result<ColorToken> {
    if !n.is_finite() || n.fract() != 0.0 || !(0.0..=MAX_PACKED_RGB).contains(&n) {
        return Err(ColorError::invalid_token(n.to_string(), "unrecognized numeric color"));
    }
    let packed = n as u32;
    Ok(ColorToken::from_rgb8(
        (packed >> 16) as u8,
        (packed >> 8) as u8,
        packed as u8,
    ))
}

fn parse_text(text: &str) -> Result<ColorToken> {
    let trimmed = text.trim();
    if let Some(named) = palette::named::from_str(&trimmed.to_ascii_lowercase()) {
        return Ok(ColorToken::from_rgb8(named.red, named.green, named.blue));
    }
    if let Some((channels, alpha)) = hex_to_srgb(trimmed) {
        return Ok(ColorToken::new(Colorspace::Rgb, channels, alpha));
    }
    Err(ColorError::invalid_token(text, "not a hex literal or named color"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: impl Into<RawColor>) -> Result<ColorToken> {
        TokenNormalizer::new().parse(&input.into())
    }

    #[test]
    fn test_parse_hex() {
        let token = parse("#a1bd2f").unwrap();
        assert_eq!(token.space(), Colorspace::Rgb);
        assert_eq!(token.alpha(), 1.0);
        assert_eq!(token.to_hex(true), "#a1bd2f");

        assert_eq!(parse("b2c3f1").unwrap().to_hex(true), "#b2c3f1");
        assert_eq!(parse("#fff").unwrap(), ColorToken::white());
        assert!((parse("#00000080").unwrap().alpha() - 128.0 / 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse("black").unwrap(), ColorToken::black());
        assert_eq!(parse("Cyan").unwrap().to_hex(false), "#00ffff");
        assert_eq!(parse("purple").unwrap().to_hex(false), "#800080");
        assert!(parse("not-a-color").is_err());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse(0xa1bd2f_u32).unwrap().to_hex(false), "#a1bd2f");
        assert_eq!(parse(0_u32).unwrap(), ColorToken::black());

        for bad in [16_777_216.0, -1.0, 12.5, f64::NAN] {
            let err = parse(bad).unwrap_err();
            assert!(err.to_string().contains("unrecognized numeric color"));
        }
    }

    #[test]
    fn test_parse_array() {
        let token = parse(RawColor::array(Some("lch"), &[50.0, 20.0, 30.0])).unwrap();
        assert_eq!(token.space(), Colorspace::Lch);
        assert_eq!(token.channels(), [50.0, 20.0, 30.0]);
        assert_eq!(token.alpha(), 1.0);

        let token = parse(RawColor::array(Some("rgb"), &[0.2, 0.4, 0.6, 0.5])).unwrap();
        assert_eq!(token.alpha(), 0.5);

        // Untagged arrays use the default colorspace
        let token = parse(RawColor::array(None, &[50.0, 20.0, 30.0])).unwrap();
        assert_eq!(token.space(), Colorspace::Lch);

        assert!(parse(RawColor::array(Some("lch"), &[50.0, 20.0])).is_err());
        assert!(parse(RawColor::array(Some("cmyk"), &[0.0, 0.0, 0.0])).is_err());
    }

    #[test]
    fn test_parse_array_with_src_mode() {
        let normalizer = TokenNormalizer::with_options(TokenOptions {
            src_mode: Some(Colorspace::Hsl),
            ..TokenOptions::default()
        });
        let token = normalizer
            .parse(&RawColor::array(None, &[120.0, 0.5, 0.5]))
            .unwrap();
        assert_eq!(token.space(), Colorspace::Hsl);
    }

    #[test]
    fn test_legacy_rgb_scale() {
        let token = parse(RawColor::array(Some("rgb"), &[255.0, 127.5, 0.0])).unwrap();
        assert_eq!(token.channels(), [1.0, 0.5, 0.0]);

        let normalizer = TokenNormalizer::with_options(TokenOptions {
            normalize_rgb: false,
            ..TokenOptions::default()
        });
        let raw = normalizer
            .parse(&RawColor::array(Some("rgb"), &[255.0, 127.5, 0.0]))
            .unwrap();
        assert_eq!(raw.channels(), [255.0, 127.5, 0.0]);
    }

    #[test]
    fn test_parse_object() {
        let token = parse(RawColor::object(
            Some("lch"),
            &[("l", 40.0), ("c", 30.0), ("h", 200.0), ("alpha", 0.3)],
        ))
        .unwrap();
        assert_eq!(token.channels(), [40.0, 30.0, 200.0]);
        assert_eq!(token.alpha(), 0.3);

        // Colorspace inferred from keys
        let token = parse(RawColor::object(None, &[("r", 255.0), ("g", 0.0), ("b", 0.0)])).unwrap();
        assert_eq!(token.space(), Colorspace::Rgb);
        assert_eq!(token.to_hex(false), "#ff0000");

        let missing = parse(RawColor::object(Some("lch"), &[("l", 40.0), ("c", 30.0)]));
        assert!(matches!(missing, Err(ColorError::InvalidToken { .. })));
    }

    #[test]
    fn test_serialize_shapes() {
        let token = parse("#a1bd2f").unwrap();

        let normalizer = TokenNormalizer::new();
        assert_eq!(normalizer.serialize(&token), RawColor::from("#a1bd2f"));
        assert_eq!(
            normalizer.serialize_as(&token, TokenKind::Num),
            RawColor::Number(f64::from(0xa1bd2f_u32))
        );
        assert_eq!(
            normalizer.serialize_as(&token, TokenKind::Arr),
            RawColor::Array(vec![
                "rgb".into(),
                (161.0 / 255.0).into(),
                (189.0 / 255.0).into(),
                (47.0 / 255.0).into(),
                1.0.into(),
            ])
        );

        let RawColor::Object(record) = normalizer.serialize_as(&token, TokenKind::Obj) else {
            panic!("expected an object");
        };
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["mode", "r", "g", "b", "alpha"]);
    }

    #[test]
    fn test_serialize_number_formats() {
        let token = parse(0xff0000_u32).unwrap();
        let format = |num_type| {
            TokenNormalizer::with_options(TokenOptions {
                kind: TokenKind::Num,
                num_type: Some(num_type),
                ..TokenOptions::default()
            })
            .serialize(&token)
        };
        assert_eq!(format(NumberFormat::Hex), RawColor::from("ff0000"));
        assert_eq!(format(NumberFormat::Bin), RawColor::from("111111110000000000000000"));
        assert_eq!(format(NumberFormat::Oct), RawColor::from("77600000"));
        assert_eq!(format(NumberFormat::Expo), RawColor::from("1.671168e7"));
    }

    #[test]
    fn test_serialize_target_mode_and_omissions() {
        let normalizer = TokenNormalizer::with_options(TokenOptions {
            kind: TokenKind::Arr,
            target_mode: Some(Colorspace::Hsl),
            omit_mode: true,
            omit_alpha: true,
            ..TokenOptions::default()
        });
        let RawColor::Array(entries) = normalizer.serialize(&parse("#ff0000").unwrap()) else {
            panic!("expected an array");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], RawComponent::Value(0.0));
    }

    #[test]
    fn test_hex_alpha_output() {
        let token = parse("#a1bd2f80").unwrap();
        assert_eq!(TokenNormalizer::new().serialize(&token), RawColor::from("#a1bd2f80"));

        let opaque = TokenNormalizer::with_options(TokenOptions {
            omit_alpha: true,
            ..TokenOptions::default()
        });
        assert_eq!(opaque.serialize(&token), RawColor::from("#a1bd2f"));
    }

    #[test]
    fn test_raw_color_json() {
        let raw: RawColor = serde_json::from_str(r#"["lch", 50, 20, 30]"#).unwrap();
        assert_eq!(raw.kind(), TokenKind::Arr);
        let raw: RawColor = serde_json::from_str(r#"{"l": 50, "c": 20, "h": 30}"#).unwrap();
        assert_eq!(raw.kind(), TokenKind::Obj);
        let raw: RawColor = serde_json::from_str("10600495").unwrap();
        assert_eq!(raw, RawColor::Number(10600495.0));
    }
}
