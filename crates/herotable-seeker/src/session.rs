//! Session controller: the state behind one table and its event handlers.
//!
//! A [`Session`] owns the loaded dataset together with the search term, sort
//! spec and page state. Input surfaces translate user actions into
//! [`Event`]s (or call the handler methods directly) and then ask for
//! [`Session::view`]. The view is recomputed on every call, so it can never
//! lag behind the state.

use tracing::debug;

use crate::accessor::FieldPath;
use crate::columns::Schema;
use crate::error::{Result, SeekerError};
use crate::ordering::SortSpec;
use crate::pagination::{PageControls, PageSize, PageState, DEFAULT_WINDOW};
use crate::query::{compute_view, matches_search, ViewResult};
use crate::record::Record;
use crate::traits::Seekable;

/// Page button targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    Number(usize),
    Previous,
    Next,
}

/// User actions the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SearchChanged(String),
    PageSizeChanged(PageSize),
    SortColumnClicked(FieldPath),
    PageButtonClicked(PageTarget),
}

/// Table state for one loaded dataset.
#[derive(Debug, Clone)]
pub struct Session<T = Record> {
    dataset: Vec<T>,
    schema: Schema,
    search: String,
    sort: SortSpec,
    page: PageState,
    window: usize,
}

impl<T: Seekable> Session<T> {
    /// Starts a session over `dataset` with the hero schema, name-ascending
    /// sort and the default page size.
    pub fn new(dataset: Vec<T>) -> Self {
        Session {
            dataset,
            schema: Schema::default(),
            search: String::new(),
            sort: SortSpec::default(),
            page: PageState::default(),
            window: DEFAULT_WINDOW,
        }
    }

    /// Sets the column schema.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Starts with `sort` active.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Starts at page 1 with `size` rows per page.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page.set_size(size);
        self
    }

    /// Pages shown on each side of the current one in [`Session::controls`].
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    // ========================================================================
    // Event handlers
    // ========================================================================

    /// Dispatches an event to its handler.
    ///
    /// Navigation past the ends and clicks on display-only columns are
    /// reported as errors; the state is left unchanged in both cases.
    pub fn handle(&mut self, event: Event) -> Result<()> {
        match event {
            Event::SearchChanged(term) => self.set_search_term(term),
            Event::PageSizeChanged(size) => self.set_page_size(size),
            Event::SortColumnClicked(column) => return self.toggle_sort(column),
            Event::PageButtonClicked(PageTarget::Number(n)) => return self.go_to_page(n),
            Event::PageButtonClicked(PageTarget::Next) => {
                self.next_page();
            }
            Event::PageButtonClicked(PageTarget::Previous) => {
                self.prev_page();
            }
        }
        Ok(())
    }

    /// Replaces the search term and returns to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page.reset();
        debug!(term = %self.search, matches = self.filtered_count(), "search term changed");
    }

    /// Replaces the page size and returns to page 1.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.page.set_size(size);
        debug!(%size, "page size changed");
    }

    /// Header click: flips direction on the active column, otherwise sorts
    /// ascending on the new one.
    ///
    /// Columns the schema marks display-only are rejected. Paths the schema
    /// does not list are accepted as-is.
    pub fn toggle_sort(&mut self, column: FieldPath) -> Result<()> {
        let column_name = column.to_string();
        let column = match self.schema.find(&column_name) {
            Some(known) if !known.sortable => {
                debug!(column = %column_name, "ignored sort on display-only column");
                return Err(SeekerError::UnsortableColumn(column_name));
            }
            Some(known) => known.path.clone(),
            None => column,
        };
        self.sort.toggle(column);
        debug!(column = %self.sort.column, dir = %self.sort.dir, "sort changed");
        Ok(())
    }

    /// Jumps to page `n` if it exists.
    pub fn go_to_page(&mut self, n: usize) -> Result<()> {
        let page_count = self.page_count();
        self.page.go_to(n, page_count).inspect_err(|_| {
            debug!(page = n, page_count, "rejected page navigation");
        })?;
        debug!(page = n, "page changed");
        Ok(())
    }

    /// Advances one page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let moved = self.page.next(self.page_count());
        debug!(page = self.page.page(), moved, "next page");
        moved
    }

    /// Goes back one page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        let moved = self.page.prev();
        debug!(page = self.page.page(), moved, "previous page");
        moved
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The current page of records.
    pub fn view(&self) -> ViewResult<'_, T> {
        compute_view(
            &self.dataset,
            &self.search,
            &self.sort,
            &self.page,
            &self.schema,
        )
    }

    /// Pager controls for the current state, `None` when showing all rows.
    pub fn controls(&self) -> Option<PageControls> {
        self.page.controls(self.filtered_count(), self.window)
    }

    /// Number of records matching the search term.
    pub fn filtered_count(&self) -> usize {
        let field = self.schema.search_field();
        let term = self.search.to_lowercase();
        self.dataset
            .iter()
            .filter(|item| matches_search(*item, field, &term))
            .count()
    }

    /// Number of pages for the current search and page size.
    pub fn page_count(&self) -> usize {
        self.page.page_count(self.filtered_count())
    }

    /// The full, unfiltered dataset.
    pub fn dataset(&self) -> &[T] {
        &self.dataset
    }

    /// The column schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The active search term.
    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// The active sort.
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Page size and current page.
    pub fn page_state(&self) -> &PageState {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::Column;
    use crate::ordering::Dir;
    use serde_json::json;

    fn session(count: usize) -> Session {
        let dataset = (0..count)
            .map(|i| Record::from_json(json!({ "name": format!("Hero {i:02}") })).unwrap())
            .collect();
        Session::new(dataset)
            .with_schema(Schema::new("name").column(Column::new("name", "Name")))
            .with_page_size(PageSize::limit(10).unwrap())
    }

    #[test]
    fn search_resets_page() {
        let mut s = session(30);
        s.go_to_page(3).unwrap();
        s.handle(Event::SearchChanged("hero 1".into())).unwrap();
        assert_eq!(s.page_state().page(), 1);
        assert_eq!(s.filtered_count(), 10);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut s = session(30);
        s.go_to_page(2).unwrap();
        s.handle(Event::PageSizeChanged(PageSize::All)).unwrap();
        assert_eq!(s.page_state().page(), 1);
        assert_eq!(s.view().len(), 30);
        assert!(s.controls().is_none());
    }

    #[test]
    fn out_of_range_page_is_rejected_without_moving() {
        let mut s = session(25);
        s.go_to_page(2).unwrap();
        let err = s
            .handle(Event::PageButtonClicked(PageTarget::Number(4)))
            .unwrap_err();
        assert!(matches!(
            err,
            SeekerError::PageOutOfRange {
                page: 4,
                page_count: 3
            }
        ));
        assert_eq!(s.page_state().page(), 2);
    }

    #[test]
    fn next_and_previous_buttons() {
        let mut s = session(25);
        s.handle(Event::PageButtonClicked(PageTarget::Previous)).unwrap();
        assert_eq!(s.page_state().page(), 1);
        for _ in 0..5 {
            s.handle(Event::PageButtonClicked(PageTarget::Next)).unwrap();
        }
        assert_eq!(s.page_state().page(), 3);
        assert_eq!(s.view().len(), 5);
    }

    #[test]
    fn sort_clicks_toggle_direction() {
        let mut s = session(3);
        s.handle(Event::SortColumnClicked("name".into())).unwrap();
        assert_eq!(s.sort().dir, Dir::Desc);
        let first = s.view().records[0].field_value(&"name".into());
        assert_eq!(first.as_str(), Some("Hero 02"));

        s.handle(Event::SortColumnClicked("Name".into())).unwrap();
        assert_eq!(s.sort(), &SortSpec::asc("name"));
    }

    #[test]
    fn display_only_columns_cannot_be_sorted() {
        let mut s = Session::new(Vec::<Record>::new());
        let err = s.toggle_sort("powerstats".into()).unwrap_err();
        assert!(matches!(err, SeekerError::UnsortableColumn(_)));
        assert_eq!(s.sort(), &SortSpec::default());
    }

    #[test]
    fn header_titles_resolve_to_paths() {
        let mut s = Session::new(Vec::<Record>::new());
        s.toggle_sort("Place of Birth".into()).unwrap();
        assert_eq!(s.sort(), &SortSpec::asc("biography.placeOfBirth"));
    }

    #[test]
    fn controls_follow_current_page() {
        let mut s = session(100);
        s.go_to_page(6).unwrap();
        let controls = s.controls().unwrap();
        assert_eq!(controls.pages(), 4..=8);
        assert!(controls.has_prev && controls.has_next);
    }

    #[test]
    fn narrowing_search_lands_on_a_valid_page() {
        let mut s = session(30);
        s.go_to_page(3).unwrap();
        s.set_search_term("hero 0");
        assert_eq!(s.page_count(), 1);
        assert_eq!(s.page_state().page(), 1);
        assert!(!s.view().is_empty());
    }
}
