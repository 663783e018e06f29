//! Serde helper functions for query-string deserialization.
//!
//! Query strings arrive as text, and clients send all sorts of junk in
//! numeric parameters. These helpers treat anything that isn't a positive
//! integer as absent so callers can fall back to defaults.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

/// Deserialize an optional integer leniently.
///
/// Accepts numbers or strings. Strings are parsed from their leading digits
/// (`"5abc"` is 5). Negative, empty and non-numeric values become `None`.
pub fn deserialize_lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawNumber::Unsigned(n)) => Some(n),
        Some(RawNumber::Signed(n)) => u64::try_from(n).ok(),
        Some(RawNumber::Float(f)) if f >= 1.0 && f.is_finite() => Some(f.trunc() as u64),
        Some(RawNumber::Float(_)) => None,
        Some(RawNumber::Text(s)) => parse_leading_digits(&s),
        None => None,
    })
}

/// Parse the leading decimal digits of a string.
pub fn parse_leading_digits(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
