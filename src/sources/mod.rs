//! Backend port: the REST collaborator the list controller and the runtime talk to.

use async_trait::async_trait;

use crate::state::{Bookmark, BookmarkDraft, Filter, Folder, FolderDraft, PageResponse};

mod error;
mod http;
pub mod query;

pub use error::NetworkError;
pub use http::HttpApi;

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Request/response operations offered by the bookmark backend.
///
/// Every method is a single round trip; failures surface as [`NetworkError`]
/// and are never retried here.
#[async_trait]
pub trait BookmarkApi: Send + Sync {
    /// Fetch one page of bookmarks matching `filter` (its `page` is the index to fetch).
    async fn fetch_page(&self, filter: &Filter) -> Result<PageResponse<Bookmark>>;

    /// Fetch a single bookmark.
    async fn get_item(&self, id: i64) -> Result<Bookmark>;

    /// Create a bookmark and return the stored record.
    async fn create_item(&self, draft: &BookmarkDraft) -> Result<Bookmark>;

    /// Replace the fields of an existing bookmark.
    async fn update_item(&self, id: i64, draft: &BookmarkDraft) -> Result<Bookmark>;

    /// Delete one bookmark.
    async fn delete_item(&self, id: i64) -> Result<()>;

    /// Delete several bookmarks in one request.
    async fn delete_items(&self, ids: &[i64]) -> Result<()>;

    /// Unpaginated full-text search over bookmarks.
    async fn search_all(&self, query: &str) -> Result<Vec<Bookmark>>;

    /// Number of bookmarks in a folder.
    async fn count_in_scope(&self, scope_id: i64) -> Result<u64>;

    /// List every folder.
    async fn list_scopes(&self) -> Result<Vec<Folder>>;

    /// Create a folder.
    async fn create_scope(&self, draft: &FolderDraft) -> Result<Folder>;

    /// Rename or re-describe a folder.
    async fn update_scope(&self, id: i64, draft: &FolderDraft) -> Result<Folder>;

    /// Delete a folder.
    async fn delete_scope(&self, id: i64) -> Result<()>;

    /// Search folders by name.
    async fn search_scopes(&self, query: &str) -> Result<Vec<Folder>>;
}
