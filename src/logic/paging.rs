//! Incremental, filter-driven bookmark list with stale-response suppression.

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::logic::selection::SelectionTracker;
use crate::state::{
    Bookmark, Filter, PageLoaded, PageRequest, SortDirection, SortField, normalize_search,
};

/// One rendered row: a bookmark plus its selection flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRow {
    /// The bookmark.
    pub bookmark: Bookmark,
    /// Whether it is currently selected.
    pub selected: bool,
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListSnapshot {
    /// Rows in list order.
    pub rows: Vec<ListRow>,
    /// A page fetch is outstanding (spinner).
    pub loading: bool,
    /// More pages can be fetched (sentinel visible).
    pub has_more: bool,
    /// Number of selected ids.
    pub selected_count: usize,
    /// Every loaded bookmark is selected.
    pub all_selected: bool,
    /// Filter the rows were fetched with.
    pub filter: Filter,
}

/// Owns the filter, the accumulated bookmarks and the selection.
///
/// Page fetches are requested over `request_tx` and their results come back
/// through [`PagedListController::apply_page`]. Each request carries the
/// generation active when it was issued; `reset_and_reload` bumps the
/// generation, so a response issued before a reset is dropped.
#[derive(Debug)]
pub struct PagedListController {
    /// Current filter; `page` is the index of the next page to fetch.
    filter: Filter,
    /// Accumulated bookmarks, unique by id.
    items: Vec<Bookmark>,
    /// A fetch for the current generation is outstanding.
    loading: bool,
    /// The backend reported further pages.
    has_more: bool,
    /// Request sequence number, bumped on every reset.
    generation: u64,
    /// Selection over the loaded ids.
    selection: SelectionTracker,
    /// Outgoing page requests.
    request_tx: mpsc::UnboundedSender<PageRequest>,
}

impl PagedListController {
    /// What: Create a controller; nothing is fetched until the first reload.
    ///
    /// Inputs:
    /// - `filter`: Initial filter (page is forced to 0)
    /// - `selection`: Tracker the controller keeps in sync
    /// - `request_tx`: Channel to the page worker
    ///
    /// Output: Idle controller with `has_more == true`.
    #[must_use]
    pub fn new(
        mut filter: Filter,
        selection: SelectionTracker,
        request_tx: mpsc::UnboundedSender<PageRequest>,
    ) -> Self {
        filter.page = 0;
        Self {
            filter,
            items: Vec::new(),
            loading: false,
            has_more: true,
            generation: 0,
            selection,
            request_tx,
        }
    }

    /// Restrict the list to a folder (`None` for all bookmarks) and reload.
    pub fn set_scope(&mut self, scope_id: Option<i64>) {
        self.filter.scope_id = scope_id;
        self.reset_and_reload();
    }

    /// Switch folder and drop the search text in a single reload.
    pub fn select_scope(&mut self, scope_id: Option<i64>) {
        self.filter.search = None;
        self.set_scope(scope_id);
    }

    /// Set the search text (blank means no search) and reload.
    pub fn set_search(&mut self, text: Option<&str>) {
        self.filter.search = normalize_search(text);
        self.reset_and_reload();
    }

    /// Change the ordering and reload.
    pub fn set_sort(&mut self, field: SortField, direction: SortDirection) {
        self.filter.sort_by = field;
        self.filter.sort_direction = direction;
        self.reset_and_reload();
    }

    /// What: Drop everything loaded and fetch page 0 for the current filter.
    ///
    /// Inputs: None
    ///
    /// Output: None
    ///
    /// Details:
    /// - Clears items and selection, resets the page cursor and flags.
    /// - Bumps the generation so any in-flight response is ignored.
    /// - Issues exactly one `load_next_page`.
    pub fn reset_and_reload(&mut self) {
        self.items.clear();
        self.filter.page = 0;
        self.has_more = true;
        self.loading = false;
        self.generation = self.generation.wrapping_add(1);
        self.selection.reset();
        tracing::debug!(
            generation = self.generation,
            filter = ?self.filter,
            "[Paging] reset and reload"
        );
        self.load_next_page();
    }

    /// What: Request the next page if allowed.
    ///
    /// Inputs: None
    ///
    /// Output:
    /// - `true` when a request was sent; `false` when guarded or the worker is gone
    ///
    /// Details:
    /// - No-op while a fetch is outstanding or after the last page.
    /// - Sets `loading` before the request leaves.
    pub fn load_next_page(&mut self) -> bool {
        if self.loading || !self.has_more {
            tracing::debug!(
                loading = self.loading,
                has_more = self.has_more,
                "[Paging] skipping load"
            );
            return false;
        }
        self.loading = true;
        let request = PageRequest {
            generation: self.generation,
            filter: self.filter.clone(),
        };
        tracing::debug!(
            generation = self.generation,
            page = self.filter.page,
            "[Paging] requesting page"
        );
        if self.request_tx.send(request).is_err() {
            tracing::warn!("[Paging] page worker unavailable; request dropped");
            self.loading = false;
            return false;
        }
        true
    }

    /// What: Apply a page result from the worker.
    ///
    /// Inputs:
    /// - `loaded`: Result tagged with the generation and page it was requested for
    ///
    /// Output:
    /// - `true` when the list changed; `false` for stale results and failures
    ///
    /// Details:
    /// - Stale results (other generation or page) leave every field untouched.
    /// - Page 0 replaces the list; later pages append, skipping known ids.
    /// - Failures are logged and leave the list, cursor and `has_more` as they were.
    /// - `loading` is cleared for every current result.
    pub fn apply_page(&mut self, loaded: PageLoaded) -> bool {
        if loaded.generation != self.generation || loaded.page != self.filter.page {
            tracing::debug!(
                got_generation = loaded.generation,
                got_page = loaded.page,
                generation = self.generation,
                page = self.filter.page,
                "[Paging] dropping stale page"
            );
            return false;
        }
        self.loading = false;
        let page = match loaded.result {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    filter = ?self.filter,
                    "[Paging] error loading bookmarks"
                );
                return false;
            }
        };
        if self.filter.page == 0 {
            self.items.clear();
        }
        let mut seen: HashSet<i64> = self.items.iter().map(|b| b.id).collect();
        self.items
            .extend(page.content.into_iter().filter(|b| seen.insert(b.id)));
        self.has_more = self.filter.page.saturating_add(1) < page.total_pages;
        self.filter.page = self.filter.page.saturating_add(1);
        self.selection
            .set_available_ids(self.items.iter().map(|b| b.id));
        tracing::debug!(
            items = self.items.len(),
            total = page.total_elements,
            has_more = self.has_more,
            next_page = self.filter.page,
            "[Paging] page applied"
        );
        true
    }

    /// Loaded bookmarks in list order.
    #[must_use]
    pub fn items(&self) -> &[Bookmark] {
        &self.items
    }

    /// Current filter.
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether more pages exist.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether `load_next_page` would issue a request.
    #[must_use]
    pub const fn can_load_more(&self) -> bool {
        !self.loading && self.has_more
    }

    /// Current request generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Id of the last loaded bookmark, used as the scroll sentinel.
    #[must_use]
    pub fn last_item_id(&self) -> Option<i64> {
        self.items.last().map(|b| b.id)
    }

    /// Whether a loaded bookmark with `id` exists.
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|b| b.id == id)
    }

    /// Selection tracker.
    #[must_use]
    pub const fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    /// Mutable selection tracker for toggle/select-all/clear.
    pub const fn selection_mut(&mut self) -> &mut SelectionTracker {
        &mut self.selection
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selection.is_selected(id)
    }

    /// Build the view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            rows: self
                .items
                .iter()
                .map(|b| ListRow {
                    bookmark: b.clone(),
                    selected: self.selection.is_selected(b.id),
                })
                .collect(),
            loading: self.loading,
            has_more: self.has_more,
            selected_count: self.selection.len(),
            all_selected: self.selection.is_all_selected(),
            filter: self.filter.clone(),
        }
    }
}
