//! The query pipeline: filter, sort, paginate.
//!
//! [`compute_view`] is a pure function of the dataset, the search term, the
//! sort spec and the page state. [`Query`] bundles those inputs behind a
//! fluent builder.

use serde::Serialize;

use crate::accessor::FieldPath;
use crate::columns::Schema;
use crate::ordering::{Comparator, Dir, SortSpec};
use crate::pagination::{PageSize, PageState};
use crate::traits::Seekable;
use crate::value::Value;

/// The page of records a presentation layer shows, plus counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult<'a, T> {
    /// Records on the requested page, in sorted order.
    pub records: Vec<&'a T>,
    /// Number of records matching the search term.
    pub total_count: usize,
    /// Requested page (1-based).
    pub page: usize,
    /// Number of pages at the current page size.
    pub page_count: usize,
}

impl<T> ViewResult<'_, T> {
    /// Returns true if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on the page.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Returns `true` if `item`'s `field` contains `term`, ignoring case.
///
/// The empty term matches everything, including items without the field.
pub fn matches_search<T: Seekable + ?Sized>(item: &T, field: &FieldPath, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    match item.field_value(field) {
        Value::String(s) => s.to_lowercase().contains(&term.to_lowercase()),
        _ => false,
    }
}

/// Keeps the items whose `field` contains `term`, in dataset order.
pub fn filter<'a, T: Seekable>(items: &'a [T], field: &FieldPath, term: &str) -> Vec<&'a T> {
    let term = term.to_lowercase();
    items
        .iter()
        .filter(|item| matches_search(*item, field, &term))
        .collect()
}

/// Stable-sorts `items` under `sort`.
pub fn sort<T: Seekable>(items: &mut [&T], sort: &SortSpec, required: &[FieldPath]) {
    let comparator = Comparator::new(sort, required);
    items.sort_by(|a, b| comparator.compare(*a, *b));
}

/// Computes the current view of `dataset`.
///
/// Filters on the schema's search field, sorts with the comparator, then
/// slices out the requested page. A page past the end yields an empty
/// `records` list.
pub fn compute_view<'a, T: Seekable>(
    dataset: &'a [T],
    term: &str,
    sort_spec: &SortSpec,
    page: &PageState,
    schema: &Schema,
) -> ViewResult<'a, T> {
    let mut matched = filter(dataset, schema.search_field(), term);
    sort(&mut matched, sort_spec, schema.required());

    let total_count = matched.len();
    let bounds = page.bounds(total_count);
    matched.truncate(bounds.end);
    matched.drain(..bounds.start);

    ViewResult {
        records: matched,
        total_count,
        page: page.page(),
        page_count: page.page_count(total_count),
    }
}

/// A search, sort and page request against a dataset.
///
/// # Example
///
/// ```
/// use herotable_seeker::{parse_dataset, PageSize, Query, Schema, Column};
///
/// let heroes = parse_dataset(r#"[
///     {"name": "Batman", "weight": ["210 lb", "95 kg"]},
///     {"name": "Batgirl", "weight": ["125 lb", "57 kg"]},
///     {"name": "Superman", "weight": ["225 lb", "101 kg"]}
/// ]"#).unwrap();
///
/// let schema = Schema::new("name")
///     .column(Column::new("name", "Name"))
///     .column(Column::new("weight", "Weight"));
///
/// let view = Query::new()
///     .schema(schema)
///     .search("bat")
///     .order_desc("weight")
///     .page_size(PageSize::limit(1).unwrap())
///     .build()
///     .compute_view(&heroes);
///
/// assert_eq!(view.total_count, 2);
/// assert_eq!(view.page_count, 2);
/// assert_eq!(view.records[0], &heroes[0]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    search: String,
    sort: SortSpec,
    page: PageState,
    schema: Schema,
}

impl Query {
    /// Creates a query that matches everything, sorted by name, 20 per page.
    pub fn new() -> Self {
        Query::default()
    }

    /// Sets the search term.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    /// Sets the sort column and direction.
    pub fn order_by(mut self, column: &str, dir: Dir) -> Self {
        self.sort = SortSpec::new(column, dir);
        self
    }

    /// Sorts ascending on `column`.
    pub fn order_asc(self, column: &str) -> Self {
        self.order_by(column, Dir::Asc)
    }

    /// Sorts descending on `column`.
    pub fn order_desc(self, column: &str) -> Self {
        self.order_by(column, Dir::Desc)
    }

    /// Replaces the sort spec.
    pub fn sort_spec(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Sets the page size and returns to page 1.
    pub fn page_size(mut self, size: PageSize) -> Self {
        self.page.set_size(size);
        self
    }

    /// Requests page `n` (1-based). Not bounds-checked.
    pub fn page(mut self, n: usize) -> Self {
        self.page = self.page.at(n);
        self
    }

    /// Replaces the page state.
    pub fn page_state(mut self, page: PageState) -> Self {
        self.page = page;
        self
    }

    /// Replaces the column schema.
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    /// The search term.
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// The sort spec.
    pub fn get_sort(&self) -> &SortSpec {
        &self.sort
    }

    /// The page size and index.
    pub fn get_page_state(&self) -> &PageState {
        &self.page
    }

    /// The column schema.
    pub fn get_schema(&self) -> &Schema {
        &self.schema
    }

    /// Tests if a single item matches the search term.
    pub fn matches<T: Seekable + ?Sized>(&self, item: &T) -> bool {
        matches_search(item, self.schema.search_field(), &self.search)
    }

    /// Filters and sorts, without pagination.
    pub fn filter<'a, T: Seekable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut matched = filter(items, self.schema.search_field(), &self.search);
        sort(&mut matched, &self.sort, self.schema.required());
        matched
    }

    /// Counts the matching items.
    pub fn count<T: Seekable>(&self, items: &[T]) -> usize {
        items.iter().filter(|item| self.matches(*item)).count()
    }

    /// Runs the full pipeline.
    pub fn compute_view<'a, T: Seekable>(&self, items: &'a [T]) -> ViewResult<'a, T> {
        compute_view(items, &self.search, &self.sort, &self.page, &self.schema)
    }
}
