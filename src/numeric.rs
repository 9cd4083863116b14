//! Locale-aware numeric parsing.
//!
//! Textual numbers go through a fixed pipeline, each stage usable on its own:
//!
//! 1. [`strip_currency`] removes surrounding whitespace and currency symbols
//!    (only for `currency`-formatted fields).
//! 2. [`strip_scale_marker`] removes a trailing `%` or `‰`. The value is not
//!    rescaled.
//! 3. [`normalize_separators`] drops group separators and rewrites the decimal
//!    separator to `.`, rejecting misplaced separators.
//! 4. [`parse_float_literal`] parses the canonical literal.

use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow, bail, ensure};
use regex::Regex;

pub const DEFAULT_GROUP_CHAR: char = ',';
pub const DEFAULT_DECIMAL_CHAR: char = '.';

pub const CURRENCY_SYMBOLS: &[char] = &[
    '$', '€', '£', '¥', '₪', '₹', '₩', '₽', '¢', '₺', '₫', '₦', '₱', '₴', '฿',
];

const SCALE_MARKERS: &[char] = &['%', '‰'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Separators {
    pub group: char,
    pub decimal: char,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            group: DEFAULT_GROUP_CHAR,
            decimal: DEFAULT_DECIMAL_CHAR,
        }
    }
}

impl Separators {
    pub fn new(group: Option<char>, decimal: Option<char>) -> Result<Self> {
        let separators = Self {
            group: group.unwrap_or(DEFAULT_GROUP_CHAR),
            decimal: decimal.unwrap_or(DEFAULT_DECIMAL_CHAR),
        };
        ensure!(
            separators.group != separators.decimal,
            "groupChar and decimalChar must differ (both are '{}')",
            separators.group
        );
        ensure!(
            !separators.decimal.is_ascii_digit() && !separators.group.is_ascii_digit(),
            "groupChar and decimalChar cannot be digits"
        );
        Ok(separators)
    }
}

fn float_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$")
            .expect("valid float regex")
    })
}

fn integer_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer regex"))
}

/// Removes whitespace and currency symbols around the numeric body. A sign
/// may sit in front of a leading symbol (`-$10`).
pub fn strip_currency(raw: &str) -> String {
    let trimmed = raw.trim();
    let (sign, rest) = match trimmed.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), &trimmed[c.len_utf8()..]),
        _ => (None, trimmed),
    };
    let body = rest
        .trim_start()
        .trim_start_matches(CURRENCY_SYMBOLS)
        .trim_start()
        .trim_end()
        .trim_end_matches(CURRENCY_SYMBOLS)
        .trim_end();
    match sign {
        Some(sign) => format!("{sign}{body}"),
        None => body.to_string(),
    }
}

pub fn strip_scale_marker(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    match trimmed.strip_suffix(SCALE_MARKERS) {
        Some(body) => body.trim_end(),
        None => trimmed,
    }
}

/// Rewrites `raw` into a canonical `.`-decimal literal with no grouping.
///
/// Group separators may appear only between digit runs of the integer part;
/// at most one decimal separator is allowed.
pub fn normalize_separators(raw: &str, separators: Separators) -> Result<String> {
    let (sign, unsigned) = match raw.chars().next() {
        Some(c @ ('+' | '-')) => (Some(c), &raw[c.len_utf8()..]),
        _ => (None, raw),
    };
    let mut parts = unsigned.split(separators.decimal);
    let integer_part = parts.next().unwrap_or_default();
    let fraction_part = parts.next();
    ensure!(
        parts.next().is_none(),
        "More than one decimal separator '{}' in '{raw}'",
        separators.decimal
    );

    let mut canonical = String::with_capacity(raw.len());
    if let Some(sign) = sign {
        canonical.push(sign);
    }
    if integer_part.contains(separators.group) {
        for group in integer_part.split(separators.group) {
            ensure!(
                !group.is_empty() && group.chars().all(|c| c.is_ascii_digit()),
                "Misplaced group separator '{}' in '{raw}'",
                separators.group
            );
            canonical.push_str(group);
        }
    } else {
        canonical.push_str(integer_part);
    }
    if let Some(fraction) = fraction_part {
        ensure!(
            !fraction.contains(separators.group),
            "Group separator '{}' after decimal separator in '{raw}'",
            separators.group
        );
        canonical.push('.');
        canonical.push_str(fraction);
    }
    Ok(canonical)
}

/// Plain decimal literal: optional sign, ASCII digits, optional fraction and
/// exponent. No grouping, no underscores.
pub fn is_float_literal(value: &str) -> bool {
    float_literal_regex().is_match(value)
}

pub fn parse_float_literal(canonical: &str) -> Result<f64> {
    ensure!(
        is_float_literal(canonical),
        "'{canonical}' is not a numeric literal"
    );
    let parsed: f64 = canonical
        .parse()
        .with_context(|| format!("Failed to parse '{canonical}' as number"))?;
    if !parsed.is_finite() {
        bail!("'{canonical}' is out of range");
    }
    Ok(parsed)
}

pub fn parse_number(raw: &str, separators: Separators, currency: bool) -> Result<f64> {
    let stripped = if currency {
        strip_currency(raw)
    } else {
        raw.trim().to_string()
    };
    let body = strip_scale_marker(&stripped);
    if body.is_empty() {
        return Err(anyhow!("'{raw}' has no numeric body"));
    }
    let canonical = normalize_separators(body, separators)?;
    parse_float_literal(&canonical).with_context(|| format!("Parsing '{raw}' as number"))
}

/// Base-10 integer literal with an optional sign and no punctuation.
pub fn parse_integer_literal(raw: &str) -> Result<i64> {
    ensure!(
        integer_literal_regex().is_match(raw),
        "'{raw}' is not an integer literal"
    );
    raw.parse::<i64>()
        .with_context(|| format!("Integer '{raw}' is out of range"))
}
