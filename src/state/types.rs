//! Core value types used by markshelf state.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sources::NetworkError;
use crate::state::Filter;

/// A bookmark as returned by the backend.
///
/// The `id` is the only key used for selection and deduplication; the
/// controller replaces bookmarks wholesale on refetch and never edits them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Backend identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Folder the bookmark belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating or updating a bookmark.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkDraft {
    /// Display title (required).
    pub title: String,
    /// Target URL (required, absolute http/https).
    pub url: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional folder assignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<i64>,
}

impl BookmarkDraft {
    /// What: Build a draft from a URL and title.
    ///
    /// Inputs:
    /// - `url`: Target URL
    /// - `title`: Display title
    ///
    /// Output: Draft without description or folder.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: None,
            folder_id: None,
        }
    }

    /// What: Check the draft before it is sent to the backend.
    ///
    /// Inputs: None
    ///
    /// Output:
    /// - `Ok(())` when the title is non-blank and the URL is an absolute http(s) URL
    ///
    /// # Errors
    /// - `ValidationError::EmptyTitle` for a blank title
    /// - `ValidationError::EmptyUrl` / `ValidationError::InvalidUrl` for a bad URL
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        validate_url(&self.url)
    }
}

/// What: Validate that a string is an absolute `http`/`https` URL.
///
/// Inputs:
/// - `raw`: URL text as typed by the user
///
/// Output:
/// - `Ok(())` when it parses with an http(s) scheme and a host
///
/// # Errors
/// - `ValidationError::EmptyUrl` for blank input
/// - `ValidationError::InvalidUrl` for anything unparsable or non-web
///
/// Details:
/// - Format check only; reachability is left to the backend.
pub fn validate_url(raw: &str) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| ValidationError::InvalidUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(ValidationError::InvalidUrl(format!(
            "{trimmed}: only http and https URLs are supported"
        )));
    }
    Ok(())
}

/// A folder grouping bookmarks. Folders are the scopes the list filters by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Backend identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating or updating a folder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDraft {
    /// Display name (required).
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FolderDraft {
    /// What: Reject folders without a name.
    ///
    /// # Errors
    /// - `ValidationError::EmptyName` when the name is blank
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Client-side validation failures for drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Bookmark title missing.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// Folder name missing.
    #[error("name cannot be empty")]
    EmptyName,
    /// URL missing.
    #[error("URL cannot be empty")]
    EmptyUrl,
    /// URL malformed or not http(s).
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Field the backend sorts bookmark pages by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Alphabetical by title.
    #[default]
    Title,
    /// By creation time.
    CreatedAt,
    /// Alphabetical by URL.
    Url,
}

impl SortField {
    /// Return the query-string value the backend expects.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CreatedAt => "createdAt",
            Self::Url => "url",
        }
    }

    /// What: Parse a sort field from its wire name or a loose config spelling.
    ///
    /// Inputs:
    /// - `s`: e.g. `title`, `createdAt`, `created_at`, `url`
    ///
    /// Output: `Some(SortField)` when recognized, `None` otherwise.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "title" => Some(Self::Title),
            "createdat" | "created" | "date" => Some(Self::CreatedAt),
            "url" => Some(Self::Url),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

impl SortDirection {
    /// Return the query-string value the backend expects.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse `asc`/`desc` case-insensitively.
    #[must_use]
    pub fn from_param(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// One page of a paginated backend listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Items on this page, in backend order.
    pub content: Vec<T>,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Zero-based index of this page.
    #[serde(default)]
    pub number: u32,
}

/// Selected bookmark ids plus the derived "everything selected" flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected bookmark ids.
    pub selected_ids: BTreeSet<i64>,
    /// True only while `selected_ids` equals the available set.
    pub all_selected: bool,
}

/// Page request sent to the background page worker.
#[derive(Clone, Debug)]
pub struct PageRequest {
    /// Generation active when the request was issued.
    pub generation: u64,
    /// Filter snapshot (including the page index) to fetch.
    pub filter: Filter,
}

/// Result corresponding to a prior [`PageRequest`].
#[derive(Debug)]
pub struct PageLoaded {
    /// Echoed generation from the originating request.
    pub generation: u64,
    /// Echoed page index from the originating request.
    pub page: u32,
    /// Fetched page or the failure.
    pub result: Result<PageResponse<Bookmark>, NetworkError>,
}
