//! Page size, page index and the navigation rules between them.

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SeekerError};

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pages shown on each side of the current one in [`PageControls`].
pub const DEFAULT_WINDOW: usize = 2;

/// Number of rows per page, or every row on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    Limit(NonZeroUsize),
    All,
}

impl PageSize {
    /// Creates a limited page size. Zero is rejected.
    pub fn limit(n: usize) -> Result<Self> {
        NonZeroUsize::new(n)
            .map(PageSize::Limit)
            .ok_or_else(|| SeekerError::InvalidPageSize(n.to_string()))
    }

    /// Number of pages needed for `total` rows.
    ///
    /// "Show all" has one page when there is anything to show.
    pub fn page_count(self, total: usize) -> usize {
        match self {
            PageSize::Limit(size) => total.div_ceil(size.get()),
            PageSize::All if total == 0 => 0,
            PageSize::All => 1,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Limit(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Limit(n) => write!(f, "{n}"),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(NonZeroUsize::new)
            .map(PageSize::Limit)
            .ok_or_else(|| SeekerError::InvalidPageSize(s.to_string()))
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            PageSize::Limit(n) => serializer.serialize_u64(n.get() as u64),
            PageSize::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(usize),
            Text(String),
        }

        match Repr::deserialize(d)? {
            Repr::Count(n) => PageSize::limit(n).map_err(serde::de::Error::custom),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    page: usize,
    size: PageSize,
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(PageSize::default())
    }
}

impl PageState {
    /// Starts on page 1 with the given size.
    pub fn new(size: PageSize) -> Self {
        PageState { page: 1, size }
    }

    /// Returns a copy positioned at `page` without bounds checks.
    ///
    /// Used to describe a requested page; [`PageState::bounds`] turns an
    /// out-of-range page into an empty slice. Page 0 is raised to 1.
    pub fn at(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Current page (1-based).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Rows per page.
    pub fn size(&self) -> PageSize {
        self.size
    }

    /// Changes the page size and returns to page 1.
    pub fn set_size(&mut self, size: PageSize) {
        self.size = size;
        self.page = 1;
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Number of pages for `total` rows at the current size.
    pub fn page_count(&self, total: usize) -> usize {
        self.size.page_count(total)
    }

    /// Index range of the current page within `total` rows.
    ///
    /// Out-of-range pages give an empty range at the end.
    pub fn bounds(&self, total: usize) -> Range<usize> {
        match self.size {
            PageSize::All => 0..total,
            PageSize::Limit(size) => {
                let start = (self.page - 1).saturating_mul(size.get()).min(total);
                let end = start.saturating_add(size.get()).min(total);
                start..end
            }
        }
    }

    /// Moves to page `n` if `1 <= n <= page_count`.
    ///
    /// Out-of-range requests leave the state unchanged.
    pub fn go_to(&mut self, n: usize, page_count: usize) -> Result<()> {
        if n == 0 || n > page_count {
            return Err(SeekerError::PageOutOfRange {
                page: n,
                page_count,
            });
        }
        self.page = n;
        Ok(())
    }

    /// Advances one page. Returns `false` at the last page.
    pub fn next(&mut self, page_count: usize) -> bool {
        if self.page < page_count {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Goes back one page. Returns `false` at the first page.
    pub fn prev(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Navigation controls for `total` rows.
    ///
    /// Returns `None` for "show all", where paging is meaningless.
    pub fn controls(&self, total: usize, window: usize) -> Option<PageControls> {
        match self.size {
            PageSize::All => None,
            PageSize::Limit(_) => Some(PageControls::new(
                self.page,
                self.page_count(total),
                window,
            )),
        }
    }
}

/// What a pager shows: a window of page numbers plus previous/next state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageControls {
    pub current: usize,
    pub page_count: usize,
    pub first: usize,
    pub last: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageControls {
    /// Centers a window of `window` pages on each side of `current`,
    /// clamped to `1..=page_count`.
    pub fn new(current: usize, page_count: usize, window: usize) -> Self {
        let first = current.saturating_sub(window).max(1);
        let last = current.saturating_add(window).min(page_count);
        PageControls {
            current,
            page_count,
            first,
            last,
            has_prev: current > 1,
            has_next: current < page_count,
        }
    }

    /// Page numbers in the window. Empty when there are no pages.
    pub fn pages(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(n: usize) -> PageSize {
        PageSize::limit(n).unwrap()
    }

    #[test]
    fn page_size_parsing() {
        assert_eq!("all".parse::<PageSize>().unwrap(), PageSize::All);
        assert_eq!("ALL".parse::<PageSize>().unwrap(), PageSize::All);
        assert_eq!(" 50 ".parse::<PageSize>().unwrap(), limit(50));
        assert!(matches!(
            "0".parse::<PageSize>(),
            Err(SeekerError::InvalidPageSize(_))
        ));
        assert!("ten".parse::<PageSize>().is_err());
        assert!("-5".parse::<PageSize>().is_err());
    }

    #[test]
    fn page_size_serde() {
        assert_eq!(serde_json::from_str::<PageSize>("10").unwrap(), limit(10));
        assert_eq!(
            serde_json::from_str::<PageSize>("\"all\"").unwrap(),
            PageSize::All
        );
        assert!(serde_json::from_str::<PageSize>("0").is_err());
        assert_eq!(serde_json::to_string(&limit(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&PageSize::All).unwrap(), "\"all\"");
    }

    #[test]
    fn default_is_twenty_per_page() {
        let state = PageState::default();
        assert_eq!(state.page(), 1);
        assert_eq!(state.size(), limit(20));
    }

    #[test]
    fn page_counts() {
        assert_eq!(limit(20).page_count(0), 0);
        assert_eq!(limit(20).page_count(1), 1);
        assert_eq!(limit(20).page_count(20), 1);
        assert_eq!(limit(20).page_count(21), 2);
        assert_eq!(PageSize::All.page_count(0), 0);
        assert_eq!(PageSize::All.page_count(731), 1);
    }

    #[test]
    fn bounds_slice_the_current_page() {
        let state = PageState::new(limit(2));
        assert_eq!(state.bounds(5), 0..2);
        assert_eq!(state.at(3).bounds(5), 4..5);
        assert_eq!(state.at(4).bounds(5), 5..5);
        assert_eq!(PageState::new(PageSize::All).bounds(5), 0..5);
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut state = PageState::new(limit(2));
        assert!(state.go_to(3, 3).is_ok());
        assert_eq!(state.page(), 3);

        let err = state.go_to(4, 3).unwrap_err();
        assert!(matches!(
            err,
            SeekerError::PageOutOfRange {
                page: 4,
                page_count: 3
            }
        ));
        assert_eq!(state.page(), 3);

        assert!(state.go_to(0, 3).is_err());
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn next_and_prev_stop_at_bounds() {
        let mut state = PageState::new(limit(10));
        assert!(!state.prev());
        assert!(state.next(2));
        assert!(!state.next(2));
        assert_eq!(state.page(), 2);
        assert!(state.prev());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn set_size_returns_to_first_page() {
        let mut state = PageState::new(limit(10)).at(4);
        state.set_size(PageSize::All);
        assert_eq!(state.page(), 1);
        assert_eq!(state.size(), PageSize::All);
    }

    #[test]
    fn controls_window_is_centered_and_clamped() {
        let middle = PageControls::new(5, 10, 2);
        assert_eq!(middle.pages(), 3..=7);
        assert!(middle.has_prev && middle.has_next);

        let start = PageControls::new(1, 10, 2);
        assert_eq!(start.pages(), 1..=3);
        assert!(!start.has_prev);

        let end = PageControls::new(10, 10, 2);
        assert_eq!(end.pages(), 8..=10);
        assert!(!end.has_next);

        let tiny = PageControls::new(1, 2, 2);
        assert_eq!(tiny.pages(), 1..=2);
    }

    #[test]
    fn controls_for_empty_result() {
        let controls = PageState::new(limit(10)).controls(0, 2).unwrap();
        assert_eq!(controls.pages().count(), 0);
        assert!(!controls.has_prev && !controls.has_next);
    }

    #[test]
    fn show_all_has_no_controls() {
        assert!(PageState::new(PageSize::All).controls(100, 2).is_none());
    }
}
