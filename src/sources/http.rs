//! `reqwest` implementation of [`BookmarkApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::query::{endpoint, page_url};
use super::{BookmarkApi, NetworkError, Result};
use crate::state::{Bookmark, BookmarkDraft, Filter, Folder, FolderDraft, PageResponse};

/// Listing and search endpoints answer with either a bare array or a page body.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListOrPage<T> {
    /// Plain JSON array.
    List(Vec<T>),
    /// Paginated body.
    Page(PageResponse<T>),
}

impl<T> ListOrPage<T> {
    /// Flatten either shape into a vector.
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::List(v) => v,
            Self::Page(p) => p.content,
        }
    }

    /// What: Treat either shape as a page.
    ///
    /// Details:
    /// - A bare array is the whole listing: one page, nothing after it.
    fn into_page(self) -> PageResponse<T> {
        match self {
            Self::List(content) => PageResponse {
                total_elements: content.len() as u64,
                total_pages: 1,
                size: u32::try_from(content.len()).unwrap_or(u32::MAX),
                number: 0,
                content,
            },
            Self::Page(p) => p,
        }
    }
}

/// HTTP client for the bookmark REST backend.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Clone, Debug)]
pub struct HttpApi {
    /// API root, e.g. `http://localhost:8080/api`.
    base_url: String,
    /// Shared HTTP client.
    client: Client,
}

impl HttpApi {
    /// What: Build a client for the given API root.
    ///
    /// Inputs:
    /// - `base_url`: API root
    /// - `connect_timeout`: TCP/TLS connect timeout
    /// - `request_timeout`: Whole-request timeout
    ///
    /// Output:
    /// - `Ok(HttpApi)`
    ///
    /// # Errors
    /// - `NetworkError::InvalidUrl` when `base_url` does not parse
    /// - `NetworkError::Transport` when the HTTP client cannot be built
    pub fn new(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|e| NetworkError::InvalidUrl(format!("{base_url}: {e}")))?;
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(format!("markshelf/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetworkError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { base_url, client })
    }

    /// What: Send a request and fail on non-2xx.
    ///
    /// Inputs:
    /// - `method`, `url`: Request line
    /// - `body`: Optional JSON body
    ///
    /// Output:
    /// - Successful response
    ///
    /// # Errors
    /// - `NetworkError::Transport` on connection failure
    /// - `NetworkError::Status` on a non-2xx answer
    async fn send<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response> {
        tracing::debug!(method = %method, url = %url, "[Api] request");
        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(b) = body {
            req = req.json(b);
        }
        let response = req.send().await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "[Api] transport failure");
            NetworkError::from(e)
        })?;
        let status = response.status();
        tracing::debug!(method = %method, url = %url, status = status.as_u16(), "[Api] response");
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    /// Send and decode a JSON body.
    async fn send_json<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send(method, url, body).await?;
        Ok(response.json::<T>().await?)
    }

    /// GET and decode.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        self.send_json::<T, ()>(Method::GET, url, None).await
    }

    /// Build `{base}/{path}` with a single `query` parameter.
    fn search_url(&self, path: &str, query: &str) -> Result<Url> {
        let mut url = endpoint(&self.base_url, path)?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }
}

#[async_trait]
impl BookmarkApi for HttpApi {
    async fn fetch_page(&self, filter: &Filter) -> Result<PageResponse<Bookmark>> {
        let url = page_url(&self.base_url, filter)?;
        self.get_json::<ListOrPage<Bookmark>>(url)
            .await
            .map(ListOrPage::into_page)
    }

    async fn get_item(&self, id: i64) -> Result<Bookmark> {
        let url = endpoint(&self.base_url, &format!("bookmarks/{id}"))?;
        self.get_json(url).await
    }

    async fn create_item(&self, draft: &BookmarkDraft) -> Result<Bookmark> {
        let url = endpoint(&self.base_url, "bookmarks")?;
        self.send_json(Method::POST, url, Some(draft)).await
    }

    async fn update_item(&self, id: i64, draft: &BookmarkDraft) -> Result<Bookmark> {
        let url = endpoint(&self.base_url, &format!("bookmarks/{id}"))?;
        self.send_json(Method::PUT, url, Some(draft)).await
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        let url = endpoint(&self.base_url, &format!("bookmarks/{id}"))?;
        self.send::<()>(Method::DELETE, url, None).await.map(|_| ())
    }

    async fn delete_items(&self, ids: &[i64]) -> Result<()> {
        let url = endpoint(&self.base_url, "bookmarks/bulk")?;
        self.send(Method::DELETE, url, Some(ids)).await.map(|_| ())
    }

    async fn search_all(&self, query: &str) -> Result<Vec<Bookmark>> {
        let url = self.search_url("bookmarks/search", query)?;
        self.get_json::<ListOrPage<Bookmark>>(url)
            .await
            .map(ListOrPage::into_vec)
    }

    async fn count_in_scope(&self, scope_id: i64) -> Result<u64> {
        let url = endpoint(&self.base_url, &format!("bookmarks/folder/{scope_id}/count"))?;
        self.get_json(url).await
    }

    async fn list_scopes(&self) -> Result<Vec<Folder>> {
        let url = endpoint(&self.base_url, "folders")?;
        self.get_json(url).await
    }

    async fn create_scope(&self, draft: &FolderDraft) -> Result<Folder> {
        let url = endpoint(&self.base_url, "folders")?;
        self.send_json(Method::POST, url, Some(draft)).await
    }

    async fn update_scope(&self, id: i64, draft: &FolderDraft) -> Result<Folder> {
        let url = endpoint(&self.base_url, &format!("folders/{id}"))?;
        self.send_json(Method::PUT, url, Some(draft)).await
    }

    async fn delete_scope(&self, id: i64) -> Result<()> {
        let url = endpoint(&self.base_url, &format!("folders/{id}"))?;
        self.send::<()>(Method::DELETE, url, None).await.map(|_| ())
    }

    async fn search_scopes(&self, query: &str) -> Result<Vec<Folder>> {
        let url = self.search_url("folders/search", query)?;
        self.get_json::<ListOrPage<Folder>>(url)
            .await
            .map(ListOrPage::into_vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Constructing against a malformed base URL fails early.
    fn new_rejects_bad_base_url() {
        let err = HttpApi::new("::nope::", Duration::from_secs(1), Duration::from_secs(1))
            .expect_err("must fail");
        assert!(matches!(err, NetworkError::InvalidUrl(_)));
    }

    #[test]
    /// What: Search URLs carry the query as an encoded `query` parameter.
    fn search_url_encodes_query() {
        let api = HttpApi::new(
            "http://localhost:8080/api",
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
        .expect("valid base");
        let url = api.search_url("folders/search", "a b").expect("valid url");
        assert_eq!(url.path(), "/api/folders/search");
        assert_eq!(url.query(), Some("query=a+b"));
    }

    #[test]
    /// What: Search bodies decode whether the backend returns an array or a page.
    fn list_or_page_accepts_both_shapes() {
        let list: ListOrPage<Folder> =
            serde_json::from_str(r#"[{"id":1,"name":"dev"}]"#).expect("array");
        assert_eq!(list.into_vec().len(), 1);
        let page: ListOrPage<Folder> = serde_json::from_str(
            r#"{"content":[{"id":1,"name":"dev"},{"id":2,"name":"ops"}],"totalElements":2,"totalPages":1}"#,
        )
        .expect("page");
        assert_eq!(page.into_vec().len(), 2);
    }

    #[test]
    /// What: An unpaginated bookmark listing is read as a single final page.
    ///
    /// Inputs:
    /// - A bare JSON array of two bookmarks, and a page body reporting three pages
    ///
    /// Output:
    /// - The array becomes page 0 of 1 with two elements; the page body is kept as sent
    fn bare_listing_is_one_page() {
        let body = r#"[
            {"id":1,"url":"https://a.example","title":"A"},
            {"id":2,"url":"https://b.example","title":"B"}
        ]"#;
        let page = serde_json::from_str::<ListOrPage<Bookmark>>(body)
            .expect("array")
            .into_page();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_elements, 2);
        assert_eq!(page.number, 0);

        let paged = serde_json::from_str::<ListOrPage<Bookmark>>(
            r#"{"content":[{"id":3,"url":"https://c.example","title":"C"}],"totalElements":21,"totalPages":3,"number":1}"#,
        )
        .expect("page")
        .into_page();
        assert_eq!(paged.total_pages, 3);
        assert_eq!(paged.number, 1);
    }

    #[test]
    /// What: reqwest failures without a status map to transport errors.
    fn reqwest_builder_error_is_transport() {
        let err = Client::new()
            .get("not a url")
            .build()
            .expect_err("relative URL must fail");
        assert!(matches!(NetworkError::from(err), NetworkError::Transport(_)));
    }
}
