//! Record model for the character feed.
//!
//! A [`Record`] is an immutable tree of named [`Field`]s. Nested objects keep
//! the key order of the source document, so composite fields such as
//! `powerstats` render in the order the feed lists them.
//!
//! Height and weight arrive as two-element arrays (`["6'8", "203 cm"]`). They
//! are decoded into an explicit [`UnitPair`] instead of a positional list.

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeekerError};

/// Keys whose two-element string arrays are decoded as unit-pairs.
pub const UNIT_PAIR_KEYS: &[&str] = &["height", "weight"];

/// A measurement carried both as display text and as a normalized string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPair {
    /// Text as shown by the source, e.g. `6'8`.
    pub raw: String,
    /// Normalized counterpart used for comparison, e.g. `203 cm`.
    pub normalized: String,
}

impl UnitPair {
    /// Creates a new unit-pair.
    pub fn new(raw: impl Into<String>, normalized: impl Into<String>) -> Self {
        UnitPair {
            raw: raw.into(),
            normalized: normalized.into(),
        }
    }
}

/// A single value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    UnitPair(UnitPair),
    List(Vec<Field>),
    Map(Fields),
}

impl Field {
    /// Converts `[raw, normalized]` string lists into a [`UnitPair`].
    ///
    /// Anything else is returned unchanged.
    fn into_unit_pair(self) -> Field {
        match self {
            Field::List(items) if items.len() == 2 => match <[Field; 2]>::try_from(items) {
                Ok([Field::Text(raw), Field::Text(normalized)]) => {
                    Field::UnitPair(UnitPair { raw, normalized })
                }
                Ok(pair) => Field::List(pair.into()),
                Err(items) => Field::List(items),
            },
            other => other,
        }
    }

    /// Returns the JSON-ish kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Null => "null",
            Field::Bool(_) => "bool",
            Field::Number(_) => "number",
            Field::Text(_) => "string",
            Field::UnitPair(_) => "unit-pair",
            Field::List(_) => "array",
            Field::Map(_) => "object",
        }
    }
}

/// Ordered set of named fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fields(Vec<(String, Field)>);

impl Fields {
    /// Creates an empty field set.
    pub fn new() -> Self {
        Fields::default()
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// Inserts a field, replacing an existing one with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Field) {
        let name = name.into();
        let value = if UNIT_PAIR_KEYS.contains(&name.as_str()) {
            value.into_unit_pair()
        } else {
            value
        };
        match self.0.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Iterates over `(name, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One entity from the dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Fields,
}

impl Record {
    /// Builds a record from a JSON value, which must be an object.
    ///
    /// Key order follows the `serde_json` map; use [`parse_dataset`] to keep
    /// the order of the source text.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(SeekerError::InvalidRecord(format!(
                "expected an object, found {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Top-level fields of this record.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Looks up a top-level field by name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}

impl From<Fields> for Record {
    fn from(fields: Fields) -> Self {
        Record { fields }
    }
}

/// Parses a dataset: a JSON array of record objects.
///
/// Decodes straight from the text so object keys keep their source order.
/// Entries that are not objects are rejected with their position.
pub fn parse_dataset(json: &str) -> Result<Vec<Record>> {
    let entries: Vec<Field> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Field::Map(fields) => Ok(Record { fields }),
            other => Err(SeekerError::InvalidRecord(format!(
                "entry {index}: expected an object, found {}",
                other.kind()
            ))),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// Serde
// ============================================================================

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Null => serializer.serialize_unit(),
            Field::Bool(b) => serializer.serialize_bool(*b),
            Field::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Field::Number(n) => serializer.serialize_f64(*n),
            Field::Text(s) => serializer.serialize_str(s),
            Field::UnitPair(pair) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&pair.raw)?;
                seq.serialize_element(&pair.normalized)?;
                seq.end()
            }
            Field::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Field::Map(fields) => fields.serialize(serializer),
        }
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

struct FieldVisitor;

impl<'de> Visitor<'de> for FieldVisitor {
    type Value = Field;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Field, E> {
        Ok(Field::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Field, E> {
        Ok(Field::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Field, D::Error> {
        d.deserialize_any(FieldVisitor)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Field, E> {
        Ok(Field::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Field, E> {
        Ok(Field::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Field, E> {
        Ok(Field::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Field, E> {
        Ok(Field::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Field, E> {
        Ok(Field::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Field, E> {
        Ok(Field::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Field, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Field>()? {
            items.push(item);
        }
        Ok(Field::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Field, A::Error> {
        let mut fields = Fields::new();
        while let Some((key, value)) = map.next_entry::<String, Field>()? {
            fields.insert(key, value);
        }
        Ok(Field::Map(fields))
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        d.deserialize_any(FieldVisitor)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        match Field::deserialize(d)? {
            Field::Map(fields) => Ok(Record { fields }),
            other => Err(de::Error::custom(format!(
                "expected an object, found {}",
                other.kind()
            ))),
        }
    }
}
