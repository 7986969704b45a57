//! List filter: search text, sort, folder scope and page cursor.

use crate::state::types::{SortDirection, SortField};

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query parameters for the paginated bookmark listing.
///
/// The controller mutates this in place; every setter other than the page
/// cursor goes through reset-and-reload, so `page` is back at 0 whenever any
/// other field changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    /// Normalized search text (`None` when blank).
    pub search: Option<String>,
    /// Sort field.
    pub sort_by: SortField,
    /// Sort direction.
    pub sort_direction: SortDirection,
    /// Folder restriction (`None` lists every bookmark).
    pub scope_id: Option<i64>,
    /// Zero-based index of the next page to fetch.
    pub page: u32,
    /// Items per page (always positive).
    pub page_size: u32,
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            search: None,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
            scope_id: None,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Filter {
    /// What: Build a filter with a given page size and sort.
    ///
    /// Inputs:
    /// - `page_size`: Items per page; 0 is bumped to 1
    /// - `sort_by`, `sort_direction`: Initial ordering
    ///
    /// Output: Filter positioned at page 0 with no search or scope.
    #[must_use]
    pub fn new(page_size: u32, sort_by: SortField, sort_direction: SortDirection) -> Self {
        Self {
            page_size: page_size.max(1),
            sort_by,
            sort_direction,
            ..Self::default()
        }
    }
}

/// What: Normalize raw search text.
///
/// Inputs:
/// - `raw`: Text as typed, possibly padded or blank
///
/// Output:
/// - `Some(trimmed)` for non-blank input; `None` for empty or whitespace-only input
#[must_use]
pub fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
