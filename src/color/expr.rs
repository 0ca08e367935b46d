//! Channel and range expressions
//!
//! Two small grammars share this module:
//! - arithmetic updates `<op><number>` with op in `+ - * /`, applied to a current value
//! - comparisons `<op><number>` with op in `== === != !== >= <= < >`, used as one-sided ranges

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ColorError, Result};

/// Relative channel update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arithmetic {
    Add(f64),
    Sub(f64),
    Mul(f64),
    Div(f64),
}

impl Arithmetic {
    /// Parse `+10`, `-0.5`, `*2`, `/ 3`. Returns `None` for anything else.
    pub fn parse(expression: &str) -> Option<Self> {
        let expression = expression.trim();
        let mut chars = expression.chars();
        let op = chars.next()?;
        let operand = parse_operand(chars.as_str())?;
        match op {
            '+' => Some(Arithmetic::Add(operand)),
            '-' => Some(Arithmetic::Sub(operand)),
            '*' => Some(Arithmetic::Mul(operand)),
            '/' => Some(Arithmetic::Div(operand)),
            _ => None,
        }
    }

    /// Apply to the current value. Division by zero yields `None`.
    pub fn apply(self, current: f64) -> Option<f64> {
        match self {
            Arithmetic::Add(n) => Some(current + n),
            Arithmetic::Sub(n) => Some(current - n),
            Arithmetic::Mul(n) => Some(current * n),
            Arithmetic::Div(n) if n == 0.0 => None,
            Arithmetic::Div(n) => Some(current / n),
        }
    }
}

impl FromStr for Arithmetic {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Arithmetic::parse(s).ok_or_else(|| ColorError::unsupported_value(s))
    }
}

/// One-sided bound on a measured value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Eq(f64),
    Ne(f64),
    Ge(f64),
    Le(f64),
    Lt(f64),
    Gt(f64),
}

/// Longest operators first so `>=` is not read as `>`
const COMPARISON_OPERATORS: [&str; 8] = ["===", "!==", "==", "!=", ">=", "<=", "<", ">"];

impl Comparison {
    /// Parse `>=0.5`, `< 40`, `===1`. Returns `None` for anything else.
    pub fn parse(expression: &str) -> Option<Self> {
        let expression = expression.trim();
        let op = COMPARISON_OPERATORS
            .iter()
            .find(|op| expression.starts_with(**op))?;
        let operand = parse_operand(&expression[op.len()..])?;
        let comparison = match *op {
            "===" | "==" => Comparison::Eq(operand),
            "!==" | "!=" => Comparison::Ne(operand),
            ">=" => Comparison::Ge(operand),
            "<=" => Comparison::Le(operand),
            "<" => Comparison::Lt(operand),
            _ => Comparison::Gt(operand),
        };
        Some(comparison)
    }

    pub fn matches(self, value: f64) -> bool {
        match self {
            Comparison::Eq(n) => value == n,
            Comparison::Ne(n) => value != n,
            Comparison::Ge(n) => value >= n,
            Comparison::Le(n) => value <= n,
            Comparison::Lt(n) => value < n,
            Comparison::Gt(n) => value > n,
        }
    }
}

fn parse_operand(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arithmetic() {
        assert_eq!(Arithmetic::parse("+10"), Some(Arithmetic::Add(10.0)));
        assert_eq!(Arithmetic::parse(" -0.5"), Some(Arithmetic::Sub(0.5)));
        assert_eq!(Arithmetic::parse("* 2"), Some(Arithmetic::Mul(2.0)));
        assert_eq!(Arithmetic::parse("/4"), Some(Arithmetic::Div(4.0)));
        assert_eq!(Arithmetic::parse("%2"), None);
        assert_eq!(Arithmetic::parse("+"), None);
        assert_eq!(Arithmetic::parse("+abc"), None);
        assert!("".parse::<Arithmetic>().is_err());
    }

    #[test]
    fn test_apply_arithmetic() {
        assert_eq!(Arithmetic::Add(10.0).apply(20.0), Some(30.0));
        assert_eq!(Arithmetic::Sub(5.0).apply(20.0), Some(15.0));
        assert_eq!(Arithmetic::Mul(2.0).apply(20.0), Some(40.0));
        assert_eq!(Arithmetic::Div(4.0).apply(20.0), Some(5.0));
        assert_eq!(Arithmetic::Div(0.0).apply(20.0), None);
    }

    #[test]
    fn test_parse_comparison() {
        assert_eq!(Comparison::parse(">=0.5"), Some(Comparison::Ge(0.5)));
        assert_eq!(Comparison::parse("<= 40"), Some(Comparison::Le(40.0)));
        assert_eq!(Comparison::parse("===1"), Some(Comparison::Eq(1.0)));
        assert_eq!(Comparison::parse("!==3"), Some(Comparison::Ne(3.0)));
        assert_eq!(Comparison::parse(">7"), Some(Comparison::Gt(7.0)));
        assert_eq!(Comparison::parse("=>7"), None);
        assert_eq!(Comparison::parse("7"), None);
    }

    #[test]
    fn test_comparison_matches() {
        assert!(Comparison::Ge(0.5).matches(0.5));
        assert!(!Comparison::Gt(0.5).matches(0.5));
        assert!(Comparison::Lt(0.5).matches(0.1));
        assert!(Comparison::Ne(1.0).matches(2.0));
        assert!(Comparison::Eq(2.0).matches(2.0));
    }
}
