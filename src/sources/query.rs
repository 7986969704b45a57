//! Mapping from a [`Filter`] to the backend's listing URL.

use reqwest::Url;

use crate::sources::NetworkError;
use crate::state::Filter;

/// What: Build the path (relative to the API base) for a bookmark page.
///
/// Inputs:
/// - `filter`: Current filter
///
/// Output:
/// - `bookmarks/folder/{id}` when scoped to a folder, `bookmarks` otherwise
#[must_use]
pub fn page_path(filter: &Filter) -> String {
    filter.scope_id.map_or_else(
        || "bookmarks".to_string(),
        |scope| format!("bookmarks/folder/{scope}"),
    )
}

/// What: Map filter fields to query parameters.
///
/// Inputs:
/// - `filter`: Current filter
///
/// Output:
/// - Ordered `(name, value)` pairs; `search` is omitted when absent
///
/// Details:
/// - Parameter names follow the backend: `search`, `sortBy`, `sortDir`, `page`, `size`.
#[must_use]
pub fn page_params(filter: &Filter) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(5);
    if let Some(search) = filter.search.as_deref() {
        params.push(("search", search.to_string()));
    }
    params.push(("sortBy", filter.sort_by.as_param().to_string()));
    params.push(("sortDir", filter.sort_direction.as_param().to_string()));
    params.push(("page", filter.page.to_string()));
    params.push(("size", filter.page_size.to_string()));
    params
}

/// What: Join an API base URL with a relative path.
///
/// Inputs:
/// - `base`: API root, e.g. `http://localhost:8080/api`
/// - `path`: Relative path without a leading slash
///
/// Output:
/// - Parsed absolute URL
///
/// # Errors
/// - `NetworkError::InvalidUrl` when the combined string does not parse
pub fn endpoint(base: &str, path: &str) -> Result<Url, NetworkError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse(&joined).map_err(|e| NetworkError::InvalidUrl(format!("{joined}: {e}")))
}

/// What: Build the full listing URL for a filter.
///
/// # Errors
/// - `NetworkError::InvalidUrl` when `base` is not a valid URL
pub fn page_url(base: &str, filter: &Filter) -> Result<Url, NetworkError> {
    let mut url = endpoint(base, &page_path(filter))?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in page_params(filter) {
            pairs.append_pair(k, &v);
        }
    }
    Ok(url)
}
