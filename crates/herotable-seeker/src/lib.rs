//! Seeker - search, sort and paginate character records in memory.
//!
//! The crate is the query core behind a character table: a dataset is loaded
//! once, and every user action (typing in the search box, clicking a column
//! header, changing the page size, clicking a page button) is followed by a
//! fresh computation of the visible page.
//!
//! - **Field access**: dot-delimited paths into nested records
//!   (`appearance.height`), degrading to [`Value::None`] instead of failing.
//! - **Normalization**: `"-"` and empty strings count as absent; heights and
//!   weights compare on unit-scaled magnitudes (tons vs pounds, meters vs
//!   feet).
//! - **Ordering**: records missing a required column sort last, absent sort
//!   values sort last, both independent of direction.
//! - **Pipeline**: filter → sort → paginate, as a pure function.
//! - **Session**: explicit state plus one handler per user event.
//!
//! # Quick Start
//!
//! ```rust
//! use herotable_seeker::{parse_dataset, Column, Event, PageSize, PageTarget, Schema, Session};
//!
//! let heroes = parse_dataset(r#"[
//!     {"name": "Aa", "weight": ["-", "-"]},
//!     {"name": "Bb", "weight": ["300 lb", "300 lb"]},
//!     {"name": "Cc", "weight": ["1 ton", "1000 lb"]}
//! ]"#).unwrap();
//!
//! let schema = Schema::new("name")
//!     .column(Column::new("name", "Name"))
//!     .column(Column::new("weight", "Weight"));
//!
//! let mut session = Session::new(heroes)
//!     .with_schema(schema)
//!     .with_page_size(PageSize::limit(2).unwrap());
//!
//! session.handle(Event::SortColumnClicked("weight".into())).unwrap();
//! let first_page: Vec<_> = session.view().records.iter().map(|r| r.get("name").cloned()).collect();
//! assert_eq!(first_page.len(), 2);
//!
//! session.handle(Event::PageButtonClicked(PageTarget::Next)).unwrap();
//! assert_eq!(session.view().len(), 1);
//! ```
//!
//! # Ordering Semantics
//!
//! ```text
//! incomplete record (any required column absent)  → after every complete record
//! absent sort value                               → after every present one
//! present values                                  → normalized compare, then direction
//! ```
//!
//! Values of different kinds order numbers before text, text before booleans
//! and booleans before lists or mappings. Ties, and pairs of incomplete
//! records, compare equal; the sort is stable, so they keep dataset order.

mod accessor;
mod columns;
mod error;
mod normalize;
mod ordering;
mod pagination;
mod query;
mod record;
mod session;
mod traits;
mod value;

// Re-export public API
pub use accessor::{resolve, FieldPath};
pub use columns::{render_value, Column, Schema};
pub use error::{Result, SeekerError};
pub use normalize::{
    is_absent, leading_magnitude, to_comparable, Comparable, UnitKind, METER_FACTOR, PLACEHOLDER,
    TON_FACTOR,
};
pub use ordering::{build_comparator, has_missing_field, Comparator, Dir, SortSpec};
pub use pagination::{PageControls, PageSize, PageState, DEFAULT_PAGE_SIZE, DEFAULT_WINDOW};
pub use query::{compute_view, filter, matches_search, sort, Query, ViewResult};
pub use record::{parse_dataset, Field, Fields, Record, UnitPair, UNIT_PAIR_KEYS};
pub use session::{Event, PageTarget, Session};
pub use traits::Seekable;
pub use value::Value;
