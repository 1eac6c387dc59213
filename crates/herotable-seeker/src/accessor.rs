//! Dot-delimited field paths and their resolution against records.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::{Field, Record};
use crate::value::Value;

/// Address of a field inside a record, e.g. `appearance.height`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dot-delimited path. Empty segments are dropped.
    pub fn parse(path: &str) -> Self {
        FieldPath {
            segments: path
                .split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Path segments, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Final segment, which names the column (`height` in `appearance.height`).
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Returns true for the empty path, which resolves to nothing.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(FieldPath::parse(s))
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        FieldPath::parse(s)
    }
}

impl From<String> for FieldPath {
    fn from(s: String) -> Self {
        FieldPath::parse(&s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(FieldPath::parse(&raw))
    }
}

/// Resolves `path` against `record`.
///
/// Walks nested mappings one segment at a time. A missing segment, a
/// non-mapping intermediate value or an empty path yields [`Value::None`].
/// A unit-pair at the end of the path resolves to its normalized string.
pub fn resolve<'a>(record: &'a Record, path: &FieldPath) -> Value<'a> {
    let Some((first, rest)) = path.segments.split_first() else {
        return Value::None;
    };
    let Some(mut current) = record.get(first) else {
        return Value::None;
    };
    for segment in rest {
        current = match current {
            Field::Map(fields) => match fields.get(segment) {
                Some(next) => next,
                None => return Value::None,
            },
            _ => return Value::None,
        };
    }
    Value::from(current)
}
