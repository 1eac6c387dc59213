//! The [`Seekable`] trait: field access for anything the pipeline can query.

use crate::accessor::{resolve, FieldPath};
use crate::record::Record;
use crate::value::Value;

/// Trait for types that can be filtered, sorted and paginated.
///
/// [`Record`] implements it through path resolution. Typed rows can
/// implement it by hand:
///
/// ```
/// use herotable_seeker::{FieldPath, Seekable, Value};
///
/// struct Hero {
///     name: String,
///     weight: String,
/// }
///
/// impl Seekable for Hero {
///     fn field_value(&self, path: &FieldPath) -> Value<'_> {
///         match path.to_string().as_str() {
///             "name" => Value::String(&self.name),
///             "weight" => Value::String(&self.weight),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the value at `path`, or [`Value::None`] when there is none.
    ///
    /// Implementations must not fail: anything missing or malformed maps to
    /// [`Value::None`].
    fn field_value(&self, path: &FieldPath) -> Value<'_>;
}

impl Seekable for Record {
    fn field_value(&self, path: &FieldPath) -> Value<'_> {
        resolve(self, path)
    }
}

impl<T: Seekable + ?Sized> Seekable for &T {
    fn field_value(&self, path: &FieldPath) -> Value<'_> {
        (**self).field_value(path)
    }
}
