//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::logic::ListSnapshot;
use crate::sources::{BookmarkApi, NetworkError, Result};
use crate::state::{
    Bookmark, BookmarkDraft, Filter, Folder, FolderDraft, PageResponse, SelectionState,
    SortDirection, SortField,
};
use crate::ui::RenderSink;

/// What: Build a bookmark with predictable fields.
///
/// Inputs:
/// - `id`: Bookmark id
///
/// Output: `Bookmark { id, title: "Bookmark {id}", url: "https://example.com/{id}" }`
pub fn bookmark(id: i64) -> Bookmark {
    Bookmark {
        id,
        title: format!("Bookmark {id}"),
        url: format!("https://example.com/{id}"),
        description: None,
        folder_id: None,
        created_at: None,
        updated_at: None,
    }
}

/// What: Build a page response holding the given ids.
///
/// Inputs:
/// - `ids`: Ids on this page (an empty range gives an empty page)
/// - `total_pages`, `total_elements`: Backend counters
///
/// Output: Page with `size` set to the number of ids
pub fn page_of(
    ids: RangeInclusive<i64>,
    total_pages: u32,
    total_elements: u64,
) -> PageResponse<Bookmark> {
    let content: Vec<Bookmark> = ids.map(bookmark).collect();
    PageResponse {
        size: u32::try_from(content.len()).unwrap_or(u32::MAX),
        content,
        total_elements,
        total_pages,
        number: 0,
    }
}

/// In-memory backend with failure injection.
#[derive(Debug, Default)]
pub struct FakeApi {
    /// Stored bookmarks.
    pub bookmarks: Mutex<Vec<Bookmark>>,
    /// Stored folders.
    pub folders: Mutex<Vec<Folder>>,
    /// When set, every call fails with a 500.
    pub fail: AtomicBool,
    /// Filters passed to `fetch_page`, in call order.
    pub fetched: Mutex<Vec<Filter>>,
}

impl FakeApi {
    /// Backend holding bookmarks `1..=n`.
    pub fn with_bookmarks(n: i64) -> Self {
        let api = Self::default();
        if let Ok(mut b) = api.bookmarks.lock() {
            b.extend((1..=n).map(bookmark));
        }
        api
    }

    /// Toggle failure injection.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Ids currently stored.
    pub fn ids(&self) -> Vec<i64> {
        self.bookmarks
            .lock()
            .map(|b| b.iter().map(|x| x.id).collect())
            .unwrap_or_default()
    }

    /// Fail with a 500 when failure injection is on.
    fn check(&self, path: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(NetworkError::Status {
                status: 500,
                url: format!("http://fake/api/{path}"),
            });
        }
        Ok(())
    }

    /// Next free id in `items`.
    fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
        ids.max().unwrap_or(0) + 1
    }
}

/// Lock a mutex, mapping poisoning to a transport error.
fn lock<T>(m: &Mutex<T>) -> Result<std::sync::MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| NetworkError::Transport("fake backend poisoned".to_string()))
}

#[async_trait]
impl BookmarkApi for FakeApi {
    async fn fetch_page(&self, filter: &Filter) -> Result<PageResponse<Bookmark>> {
        lock(&self.fetched)?.push(filter.clone());
        self.check("bookmarks")?;
        let mut matching: Vec<Bookmark> = lock(&self.bookmarks)?
            .iter()
            .filter(|b| filter.scope_id.is_none() || b.folder_id == filter.scope_id)
            .filter(|b| {
                filter.search.as_deref().is_none_or(|q| {
                    let q = q.to_lowercase();
                    b.title.to_lowercase().contains(&q) || b.url.to_lowercase().contains(&q)
                })
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| match filter.sort_by {
            SortField::Title | SortField::CreatedAt => a.id.cmp(&b.id),
            SortField::Url => a.url.cmp(&b.url),
        });
        if filter.sort_direction == SortDirection::Desc {
            matching.reverse();
        }
        let size = filter.page_size.max(1) as usize;
        let total = matching.len();
        let start = (filter.page as usize).saturating_mul(size).min(total);
        let content: Vec<Bookmark> = matching.into_iter().skip(start).take(size).collect();
        Ok(PageResponse {
            size: filter.page_size,
            content,
            total_elements: total as u64,
            total_pages: u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX),
            number: filter.page,
        })
    }

    async fn get_item(&self, id: i64) -> Result<Bookmark> {
        self.check("bookmarks/id")?;
        lock(&self.bookmarks)?
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| NetworkError::Status {
                status: 404,
                url: format!("http://fake/api/bookmarks/{id}"),
            })
    }

    async fn create_item(&self, draft: &BookmarkDraft) -> Result<Bookmark> {
        self.check("bookmarks")?;
        let mut items = lock(&self.bookmarks)?;
        let created = Bookmark {
            id: Self::next_id(items.iter().map(|b| b.id)),
            title: draft.title.clone(),
            url: draft.url.clone(),
            description: draft.description.clone(),
            folder_id: draft.folder_id,
            created_at: None,
            updated_at: None,
        };
        items.push(created.clone());
        Ok(created)
    }

    async fn update_item(&self, id: i64, draft: &BookmarkDraft) -> Result<Bookmark> {
        self.check("bookmarks/id")?;
        let mut items = lock(&self.bookmarks)?;
        let b = items
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| NetworkError::Status {
                status: 404,
                url: format!("http://fake/api/bookmarks/{id}"),
            })?;
        b.title.clone_from(&draft.title);
        b.url.clone_from(&draft.url);
        b.description.clone_from(&draft.description);
        b.folder_id = draft.folder_id;
        Ok(b.clone())
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.check("bookmarks/id")?;
        lock(&self.bookmarks)?.retain(|b| b.id != id);
        Ok(())
    }

    async fn delete_items(&self, ids: &[i64]) -> Result<()> {
        self.check("bookmarks/bulk")?;
        lock(&self.bookmarks)?.retain(|b| !ids.contains(&b.id));
        Ok(())
    }

    async fn search_all(&self, query: &str) -> Result<Vec<Bookmark>> {
        self.check("bookmarks/search")?;
        let q = query.to_lowercase();
        Ok(lock(&self.bookmarks)?
            .iter()
            .filter(|b| b.title.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }

    async fn count_in_scope(&self, scope_id: i64) -> Result<u64> {
        self.check("bookmarks/folder/count")?;
        Ok(lock(&self.bookmarks)?
            .iter()
            .filter(|b| b.folder_id == Some(scope_id))
            .count() as u64)
    }

    async fn list_scopes(&self) -> Result<Vec<Folder>> {
        self.check("folders")?;
        Ok(lock(&self.folders)?.clone())
    }

    async fn create_scope(&self, draft: &FolderDraft) -> Result<Folder> {
        self.check("folders")?;
        let mut folders = lock(&self.folders)?;
        let created = Folder {
            id: Self::next_id(folders.iter().map(|f| f.id)),
            name: draft.name.clone(),
            description: draft.description.clone(),
            created_at: None,
            updated_at: None,
        };
        folders.push(created.clone());
        Ok(created)
    }

    async fn update_scope(&self, id: i64, draft: &FolderDraft) -> Result<Folder> {
        self.check("folders/id")?;
        let mut folders = lock(&self.folders)?;
        let f = folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| NetworkError::Status {
                status: 404,
                url: format!("http://fake/api/folders/{id}"),
            })?;
        f.name.clone_from(&draft.name);
        f.description.clone_from(&draft.description);
        Ok(f.clone())
    }

    async fn delete_scope(&self, id: i64) -> Result<()> {
        self.check("folders/id")?;
        lock(&self.folders)?.retain(|f| f.id != id);
        Ok(())
    }

    async fn search_scopes(&self, query: &str) -> Result<Vec<Folder>> {
        self.check("folders/search")?;
        let q = query.to_lowercase();
        Ok(lock(&self.folders)?
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }
}

/// What a [`RecordingSink`] was asked to show.
#[derive(Clone, Debug, PartialEq)]
pub enum Shown {
    /// `render` with the snapshot.
    Render(ListSnapshot),
    /// `selection` with the state.
    Selection(SelectionState),
    /// `folders` with the list.
    Folders(Vec<Folder>),
    /// `alert` with the message.
    Alert(String),
    /// `notice` with the message.
    Notice(String),
}

/// Render sink that records every call.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Calls in order.
    pub shown: Vec<Shown>,
}

impl RecordingSink {
    /// Alert messages received.
    pub fn alerts(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Alert(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Most recent rendered snapshot.
    pub fn last_render(&self) -> Option<&ListSnapshot> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Render(r) => Some(r),
            _ => None,
        })
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, snapshot: &ListSnapshot) {
        self.shown.push(Shown::Render(snapshot.clone()));
    }

    fn selection(&mut self, state: &SelectionState) {
        self.shown.push(Shown::Selection(state.clone()));
    }

    fn folders(&mut self, folders: &[Folder]) {
        self.shown.push(Shown::Folders(folders.to_vec()));
    }

    fn alert(&mut self, message: &str) {
        self.shown.push(Shown::Alert(message.to_string()));
    }

    fn notice(&mut self, message: &str) {
        self.shown.push(Shown::Notice(message.to_string()));
    }
}
