//! Presence checks and comparable forms of resolved values.
//!
//! Display strings mix incompatible units: weights come in pounds and tons,
//! heights in feet/inches, centimeters and meters. Sorting on those columns
//! compares a parsed magnitude scaled to a common base instead of the text.
//!
//! Parsing is lossy: a string with no leading number compares
//! as `0`.

use std::cmp::Ordering;

use crate::accessor::FieldPath;
use crate::value::Value;

/// Placeholder the feed uses for "unknown".
pub const PLACEHOLDER: &str = "-";

/// Tons to pounds.
pub const TON_FACTOR: f64 = 1000.0;

/// Meters to centimeters.
pub const METER_FACTOR: f64 = 100.0;

/// How a column's values are turned into comparable keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// Weights: tons scale by [`TON_FACTOR`].
    Weight,
    /// Heights: meters scale by [`METER_FACTOR`].
    Height,
    /// Everything else: case-insensitive strings, raw numbers.
    Plain,
}

impl UnitKind {
    /// Picks the unit kind from the column's final path segment.
    pub fn for_column(column: &FieldPath) -> Self {
        match column.leaf() {
            Some(leaf) if leaf.eq_ignore_ascii_case("weight") => UnitKind::Weight,
            Some(leaf) if leaf.eq_ignore_ascii_case("height") => UnitKind::Height,
            _ => UnitKind::Plain,
        }
    }
}

/// Returns `true` if the value carries no usable data.
///
/// Absent means [`Value::None`], an empty string, or the `"-"` placeholder.
pub fn is_absent(value: &Value<'_>) -> bool {
    match value {
        Value::None => true,
        Value::String(s) => s.is_empty() || *s == PLACEHOLDER,
        _ => false,
    }
}

/// Sort key derived from a present value.
///
/// Keys form a total order. Within a kind they compare by value; across
/// kinds numbers come first, then text, then booleans, then opaque keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparable {
    Text(String),
    Number(f64),
    Bool(bool),
    /// Lists and mappings. Equal to each other, after every other kind.
    Opaque,
}

impl Comparable {
    /// Compares two keys.
    pub fn compare(&self, other: &Comparable) -> Ordering {
        match (self, other) {
            (Comparable::Text(a), Comparable::Text(b)) => a.cmp(b),
            (Comparable::Number(a), Comparable::Number(b)) => a.total_cmp(b),
            (Comparable::Bool(a), Comparable::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Comparable::Number(_) => 0,
            Comparable::Text(_) => 1,
            Comparable::Bool(_) => 2,
            Comparable::Opaque => 3,
        }
    }
}

/// Converts a value into its sort key for the given column kind.
pub fn to_comparable(kind: UnitKind, value: &Value<'_>) -> Comparable {
    match (kind, value) {
        (UnitKind::Weight, Value::String(s)) => Comparable::Number(scaled(s, is_tons, TON_FACTOR)),
        (UnitKind::Height, Value::String(s)) => {
            Comparable::Number(scaled(s, is_meters, METER_FACTOR))
        }
        (_, Value::String(s)) => Comparable::Text(s.to_lowercase()),
        (_, Value::Number(n)) => Comparable::Number(*n),
        (_, Value::Bool(b)) => Comparable::Bool(*b),
        (_, Value::List(_) | Value::Map(_) | Value::None) => Comparable::Opaque,
    }
}

fn scaled(text: &str, is_big_unit: fn(&str) -> bool, factor: f64) -> f64 {
    match leading_magnitude(text) {
        Some((magnitude, rest)) if is_big_unit(&unit_token(rest)) => magnitude * factor,
        Some((magnitude, _)) => magnitude,
        None => 0.0,
    }
}

fn is_tons(token: &str) -> bool {
    token.starts_with("ton")
}

fn is_meters(token: &str) -> bool {
    matches!(token, "m" | "meter" | "meters" | "metre" | "metres")
}

/// Parses the leading decimal number of `text`.
///
/// Accepts leading whitespace, an optional sign, digits and one decimal
/// point. Returns the number and the unparsed remainder.
pub fn leading_magnitude(text: &str) -> Option<(f64, &str)> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut digits = 0;
    let mut seen_point = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }
    if digits == 0 {
        return None;
    }
    let magnitude = text[..end].trim_end_matches('.').parse().ok()?;
    Some((magnitude, &text[end..]))
}

/// First alphabetic word after the number, lower-cased.
fn unit_token(rest: &str) -> String {
    rest.trim_start()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}
