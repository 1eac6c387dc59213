//! Sort direction, the active sort column and the record comparator.
//!
//! Provides [`Dir`] for sort direction, [`SortSpec`] for the active sort
//! column and [`Comparator`] for ordering records under it.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::accessor::FieldPath;
use crate::error::SeekerError;
use crate::normalize::{is_absent, to_comparable, UnitKind};
use crate::traits::Seekable;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn flipped(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            _ => Err(SeekerError::InvalidDirection(s.to_string())),
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// The column to sort by.
    pub column: FieldPath,
    /// The sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    /// Creates a new sort spec.
    pub fn new(column: impl Into<FieldPath>, dir: Dir) -> Self {
        SortSpec {
            column: column.into(),
            dir,
        }
    }

    /// Creates an ascending sort on `column`.
    pub fn asc(column: impl Into<FieldPath>) -> Self {
        SortSpec::new(column, Dir::Asc)
    }

    /// Creates a descending sort on `column`.
    pub fn desc(column: impl Into<FieldPath>) -> Self {
        SortSpec::new(column, Dir::Desc)
    }

    /// Header-click semantics: the same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(&mut self, column: FieldPath) {
        if self.column == column {
            self.dir = self.dir.flipped();
        } else {
            self.column = column;
            self.dir = Dir::Asc;
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::asc("name")
    }
}

/// Returns `true` if any of the `required` fields is absent on `item`.
pub fn has_missing_field<T: Seekable + ?Sized>(item: &T, required: &[FieldPath]) -> bool {
    required
        .iter()
        .any(|path| is_absent(&item.field_value(path)))
}

/// Orders items under a [`SortSpec`].
///
/// The comparison runs in three tiers:
///
/// 1. Items missing any required field sort after complete items, in both
///    directions. Two incomplete items compare `Equal`.
/// 2. An absent sort value sorts after a present one, in both directions.
/// 3. Present values compare on their normalized keys (see
///    [`to_comparable`]); the direction applies only here.
///
/// Keys of different kinds order by kind: numbers, then text, then
/// booleans, then lists and mappings. Descending is the exact reverse of
/// ascending.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'s> {
    sort: &'s SortSpec,
    kind: UnitKind,
    required: &'s [FieldPath],
}

impl<'s> Comparator<'s> {
    /// Creates a comparator for `sort`, treating `required` as the columns
    /// every complete item must carry.
    pub fn new(sort: &'s SortSpec, required: &'s [FieldPath]) -> Self {
        Comparator {
            sort,
            kind: UnitKind::for_column(&sort.column),
            required,
        }
    }

    /// Compares two items.
    pub fn compare<T: Seekable + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        match (
            has_missing_field(a, self.required),
            has_missing_field(b, self.required),
        ) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }

        let val_a = a.field_value(&self.sort.column);
        let val_b = b.field_value(&self.sort.column);
        match (is_absent(&val_a), is_absent(&val_b)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let key_a = to_comparable(self.kind, &val_a);
                let key_b = to_comparable(self.kind, &val_b);
                self.sort.dir.apply(key_a.compare(&key_b))
            }
        }
    }
}

/// Builds a comparison closure suitable for `sort_by`.
pub fn build_comparator<'s, T: Seekable + ?Sized + 's>(
    sort: &'s SortSpec,
    required: &'s [FieldPath],
) -> impl Fn(&T, &T) -> Ordering + 's {
    let comparator = Comparator::new(sort, required);
    move |a, b| comparator.compare(a, b)
}
