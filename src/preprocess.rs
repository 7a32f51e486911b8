//! Textual normalization applied before parsing.
//!
//! The letter `e` is not part of numeric literals in the expression grammar,
//! so literals written in scientific notation are expanded to plain decimals
//! here.

use regex::{Captures, Regex};
use std::borrow::Cow;

lazy_static! {
    /// A decimal mantissa, `e`, and an optionally signed integer exponent.
    static ref SCIENTIFIC_NOTATION: Regex = Regex::new(r"[\d.]+e[+-]?\d+")
        .expect("scientific notation pattern is valid");
}

/// Replace every scientific-notation literal in `expression` by its plain
/// decimal expansion.
///
/// Expansions always contain a decimal point. Literals that do not parse, or
/// that overflow, are left untouched so the parser reports them.
pub fn normalize_scientific_notation(expression: &str) -> Cow<'_, str> {
    SCIENTIFIC_NOTATION.replace_all(expression, |caps: &Captures| {
        let literal = &caps[0];
        match literal.parse::<f64>() {
            Ok(value) if value.is_finite() => {
                let mut expanded = value.to_string();
                // keep the point, so that a trailing `.5` stays invalid
                if !expanded.contains('.') {
                    expanded.push_str(".0");
                }
                expanded
            }
            _ => literal.to_string(),
        }
    })
}

/// Run every normalization step over `expression`.
pub fn preprocess(expression: &str) -> Cow<'_, str> {
    normalize_scientific_notation(expression)
}
