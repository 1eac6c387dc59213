//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when loading records or driving a session.
///
/// Field lookups never fail: missing or malformed fields resolve to
/// [`Value::None`](crate::Value::None). Errors are reserved for caller
/// mistakes (bad navigation, unparsable settings) and malformed input.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Requested page lies outside `1..=page_count`.
    #[error("page {page} is out of range (1..={page_count})")]
    PageOutOfRange { page: usize, page_count: usize },

    /// Page size was neither a positive integer nor `all`.
    #[error("invalid page size '{0}': expected a positive integer or 'all'")]
    InvalidPageSize(String),

    /// Sort direction was neither `asc` nor `desc`.
    #[error("invalid sort direction '{0}': expected 'asc' or 'desc'")]
    InvalidDirection(String),

    /// Column is display-only and cannot be sorted.
    #[error("column '{0}' is not sortable")]
    UnsortableColumn(String),

    /// Input JSON was well-formed but not a record.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Input was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
