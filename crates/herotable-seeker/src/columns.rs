//! Table columns: what is displayed, what is sortable, what is required.
//!
//! A [`Schema`] lists the display columns in order and names the field the
//! search box matches against. Required columns feed the comparator's
//! "incomplete records sort last" rule.

use crate::accessor::FieldPath;
use crate::normalize::{is_absent, PLACEHOLDER};
use crate::traits::Seekable;
use crate::value::Value;

/// One display column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub path: FieldPath,
    pub title: String,
    /// Header clicks sort by this column.
    pub sortable: bool,
    /// A record without this field sorts after complete records.
    pub required: bool,
}

impl Column {
    /// A sortable, required column.
    pub fn new(path: impl Into<FieldPath>, title: impl Into<String>) -> Self {
        Column {
            path: path.into(),
            title: title.into(),
            sortable: true,
            required: true,
        }
    }

    /// Marks the column as display-only.
    pub fn display_only(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Excludes the column from the completeness check.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Ordered display columns plus the searchable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
    required: Vec<FieldPath>,
    search_field: FieldPath,
}

impl Schema {
    /// Creates an empty schema searching on `search_field`.
    pub fn new(search_field: impl Into<FieldPath>) -> Self {
        Schema {
            columns: Vec::new(),
            required: Vec::new(),
            search_field: search_field.into(),
        }
    }

    /// The character table: image, name, full name, powerstats, race,
    /// gender, height, weight, place of birth, alignment.
    pub fn heroes() -> Self {
        Schema::new("name")
            .column(Column::new("images.xs", "Image").display_only().optional())
            .column(Column::new("name", "Name"))
            .column(Column::new("biography.fullName", "Full Name"))
            .column(Column::new("powerstats", "Powerstats").display_only())
            .column(Column::new("appearance.race", "Race"))
            .column(Column::new("appearance.gender", "Gender"))
            .column(Column::new("appearance.height", "Height"))
            .column(Column::new("appearance.weight", "Weight"))
            .column(Column::new("biography.placeOfBirth", "Place of Birth"))
            .column(Column::new("biography.alignment", "Alignment"))
    }

    /// Appends a column.
    pub fn column(mut self, column: Column) -> Self {
        if column.required {
            self.required.push(column.path.clone());
        }
        self.columns.push(column);
        self
    }

    /// Replaces the searchable field.
    pub fn search_on(mut self, field: impl Into<FieldPath>) -> Self {
        self.search_field = field.into();
        self
    }

    /// Columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Paths every complete record must carry.
    pub fn required(&self) -> &[FieldPath] {
        &self.required
    }

    /// Field the search term is matched against.
    pub fn search_field(&self) -> &FieldPath {
        &self.search_field
    }

    /// Finds a column by exact path or case-insensitive title.
    pub fn find(&self, name: &str) -> Option<&Column> {
        let name = name.trim();
        self.columns
            .iter()
            .find(|c| c.path.to_string() == name)
            .or_else(|| {
                self.columns
                    .iter()
                    .find(|c| c.title.eq_ignore_ascii_case(name))
            })
    }

    /// Column titles, in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.title.as_str()).collect()
    }

    /// Renders every column of `item` as display text.
    pub fn render_row<T: Seekable + ?Sized>(&self, item: &T) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| render_value(&item.field_value(&c.path)))
            .collect()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::heroes()
    }
}

/// Renders a resolved value as cell text.
///
/// Absent values render as `"-"`. Mappings render as `"key: value"` pairs
/// joined by `", "`, which is how powerstats are shown.
pub fn render_value(value: &Value<'_>) -> String {
    if is_absent(value) {
        return PLACEHOLDER.to_string();
    }
    match value {
        Value::String(s) => (*s).to_string(),
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
        Value::List(items) => items
            .iter()
            .map(|item| render_value(&Value::from(item)))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Map(fields) => fields
            .iter()
            .map(|(k, v)| format!("{k}: {}", render_value(&Value::from(v))))
            .collect::<Vec<_>>()
            .join(", "),
        Value::None => PLACEHOLDER.to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
