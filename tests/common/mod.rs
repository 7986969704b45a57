//! Shared fixtures for integration tests: an in-memory backend and a recording sink.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use markshelf::logic::ListSnapshot;
use markshelf::sources::{BookmarkApi, NetworkError, Result};
use markshelf::state::{
    Bookmark, BookmarkDraft, Filter, Folder, FolderDraft, PageResponse, SelectionState,
};
use markshelf::ui::RenderSink;

/// What: Build a bookmark titled `"{prefix} {id}"`.
pub fn bookmark(id: i64, prefix: &str) -> Bookmark {
    Bookmark {
        id,
        title: format!("{prefix} {id}"),
        url: format!("https://example.com/{id}"),
        description: None,
        folder_id: None,
        created_at: None,
        updated_at: None,
    }
}

/// In-memory backend; searches equal to `slow_search` answer after `delay`.
pub struct MemoryApi {
    /// Stored bookmarks.
    pub items: Mutex<Vec<Bookmark>>,
    /// Search text whose pages are delayed.
    pub slow_search: Option<String>,
    /// Delay applied to slow searches.
    pub delay: Duration,
}

impl MemoryApi {
    /// Backend over `items` with no delays.
    pub fn new(items: Vec<Bookmark>) -> Self {
        Self {
            items: Mutex::new(items),
            slow_search: None,
            delay: Duration::ZERO,
        }
    }

    /// Ids currently stored.
    pub fn ids(&self) -> Vec<i64> {
        self.items
            .lock()
            .map(|v| v.iter().map(|b| b.id).collect())
            .unwrap_or_default()
    }

    fn unsupported(what: &str) -> NetworkError {
        NetworkError::Status {
            status: 501,
            url: format!("memory://{what}"),
        }
    }
}

#[async_trait]
impl BookmarkApi for MemoryApi {
    async fn fetch_page(&self, filter: &Filter) -> Result<PageResponse<Bookmark>> {
        if filter.search.is_some() && filter.search == self.slow_search {
            tokio::time::sleep(self.delay).await;
        }
        let matching: Vec<Bookmark> = self
            .items
            .lock()
            .map_err(|_| Self::unsupported("poisoned"))?
            .iter()
            .filter(|b| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|q| b.title.contains(q))
            })
            .cloned()
            .collect();
        let size = filter.page_size as usize;
        let total = matching.len();
        let content = matching
            .into_iter()
            .skip(filter.page as usize * size)
            .take(size)
            .collect();
        Ok(PageResponse {
            content,
            total_elements: total as u64,
            total_pages: u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX),
            size: filter.page_size,
            number: filter.page,
        })
    }

    async fn get_item(&self, _id: i64) -> Result<Bookmark> {
        Err(Self::unsupported("get"))
    }

    async fn create_item(&self, _draft: &BookmarkDraft) -> Result<Bookmark> {
        Err(Self::unsupported("create"))
    }

    async fn update_item(&self, _id: i64, _draft: &BookmarkDraft) -> Result<Bookmark> {
        Err(Self::unsupported("update"))
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.delete_items(&[id]).await
    }

    async fn delete_items(&self, ids: &[i64]) -> Result<()> {
        self.items
            .lock()
            .map_err(|_| Self::unsupported("poisoned"))?
            .retain(|b| !ids.contains(&b.id));
        Ok(())
    }

    async fn search_all(&self, _query: &str) -> Result<Vec<Bookmark>> {
        Err(Self::unsupported("search"))
    }

    async fn count_in_scope(&self, _scope_id: i64) -> Result<u64> {
        Err(Self::unsupported("count"))
    }

    async fn list_scopes(&self) -> Result<Vec<Folder>> {
        Ok(Vec::new())
    }

    async fn create_scope(&self, _draft: &FolderDraft) -> Result<Folder> {
        Err(Self::unsupported("create folder"))
    }

    async fn update_scope(&self, _id: i64, _draft: &FolderDraft) -> Result<Folder> {
        Err(Self::unsupported("update folder"))
    }

    async fn delete_scope(&self, _id: i64) -> Result<()> {
        Err(Self::unsupported("delete folder"))
    }

    async fn search_scopes(&self, _query: &str) -> Result<Vec<Folder>> {
        Ok(Vec::new())
    }
}

/// Sink that records renders and alerts and pings the test on every render.
pub struct ChannelSink {
    /// Every rendered snapshot.
    pub renders: Vec<ListSnapshot>,
    /// Every selection shown.
    pub selections: Vec<SelectionState>,
    /// Every alert.
    pub alerts: Vec<String>,
    /// Receives one message per render.
    pub rendered_tx: mpsc::UnboundedSender<ListSnapshot>,
}

impl ChannelSink {
    /// Sink plus the receiver the test waits on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ListSnapshot>) {
        let (rendered_tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                renders: Vec::new(),
                selections: Vec::new(),
                alerts: Vec::new(),
                rendered_tx,
            },
            rx,
        )
    }
}

impl RenderSink for ChannelSink {
    fn render(&mut self, snapshot: &ListSnapshot) {
        self.renders.push(snapshot.clone());
        let _ = self.rendered_tx.send(snapshot.clone());
    }

    fn selection(&mut self, state: &SelectionState) {
        self.selections.push(state.clone());
    }

    fn folders(&mut self, _folders: &[Folder]) {}

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn notice(&mut self, _message: &str) {}
}
