//! Runtime values produced by field resolution.
//!
//! The [`Value`] enum is what the accessor hands to the normalizer and the
//! comparator. It borrows from the record it was resolved against.

use crate::record::{Field, Fields};

/// Resolved field value, borrowed from the source record.
///
/// Unit-pairs never appear here: the accessor resolves them to their
/// normalized string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// String value.
    String(&'a str),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// List value. Compared as opaque.
    List(&'a [Field]),
    /// Nested mapping. Compared as opaque.
    Map(&'a Fields),
    /// Field not present, null, or the path ran through a non-mapping.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the nested mapping, if present.
    pub fn as_map(&self) -> Option<&'a Fields> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl<'a> From<&'a Field> for Value<'a> {
    fn from(field: &'a Field) -> Self {
        match field {
            Field::Null => Value::None,
            Field::Bool(b) => Value::Bool(*b),
            Field::Number(n) => Value::Number(*n),
            Field::Text(s) => Value::String(s),
            Field::UnitPair(pair) => Value::String(&pair.normalized),
            Field::List(items) => Value::List(items),
            Field::Map(fields) => Value::Map(fields),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::UnitPair;

    #[test]
    fn value_extractors() {
        assert_eq!(Value::String("hello").as_str(), Some("hello"));
        assert_eq!(Value::Number(42.0).as_number(), Some(42.0));
        assert!(Value::None.is_none());

        // Wrong type returns None
        assert_eq!(Value::String("test").as_number(), None);
        assert_eq!(Value::Number(1.0).as_str(), None);
        assert_eq!(Value::Bool(true).as_map(), None);
    }

    #[test]
    fn unit_pair_resolves_to_normalized_string() {
        let field = Field::UnitPair(UnitPair::new("6'8", "203 cm"));
        assert_eq!(Value::from(&field), Value::String("203 cm"));
    }

    #[test]
    fn null_field_is_none() {
        assert_eq!(Value::from(&Field::Null), Value::None);
    }
}
