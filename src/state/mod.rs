//! Data model shared by the controller, the backend port and the runtime.

pub mod filter;
pub mod types;

pub use filter::{DEFAULT_PAGE_SIZE, Filter, normalize_search};
pub use types::{
    Bookmark, BookmarkDraft, Folder, FolderDraft, PageLoaded, PageRequest, PageResponse,
    SelectionState, SortDirection, SortField, ValidationError, validate_url,
};
