//! Multi-selection over bookmark ids, independent of the page they arrived on.

use std::collections::BTreeSet;
use std::fmt;

use crate::state::SelectionState;

/// Callback invoked synchronously after every selection mutation.
pub type SelectionObserver = Box<dyn FnMut(&SelectionState) + Send>;

/// Tracks selected ids against the set of ids currently loaded ("available").
///
/// `all_selected` is a cache derived from the two sets: it is never true while
/// the selected set differs from the available set, and every mutation
/// restores that before returning.
#[derive(Default)]
pub struct SelectionTracker {
    /// Current selection.
    state: SelectionState,
    /// Ids of every bookmark currently loaded by the controller.
    available: BTreeSet<i64>,
    /// Single registered observer.
    observer: Option<SelectionObserver>,
}

impl fmt::Debug for SelectionTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionTracker")
            .field("state", &self.state)
            .field("available", &self.available)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl SelectionTracker {
    /// Create an empty tracker with no observer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the observer, replacing any previous one.
    pub fn set_observer(&mut self, observer: SelectionObserver) {
        self.observer = Some(observer);
    }

    /// What: Flip membership of `id`.
    ///
    /// Inputs:
    /// - `id`: Bookmark id
    ///
    /// Output: None (notifies the observer)
    ///
    /// Details:
    /// - Recomputes `all_selected` against the available set.
    pub fn toggle(&mut self, id: i64) {
        if !self.state.selected_ids.remove(&id) {
            self.state.selected_ids.insert(id);
        }
        self.recompute_all_selected();
        tracing::trace!(
            id,
            selected = self.state.selected_ids.len(),
            all = self.state.all_selected,
            "[Selection] toggled"
        );
        self.notify();
    }

    /// What: Replace the available id set.
    ///
    /// Inputs:
    /// - `ids`: Ids currently loaded, in any order
    ///
    /// Output: None
    ///
    /// Details:
    /// - While "select all" is on, the selection is re-expanded to exactly the
    ///   new set so it keeps meaning "everything loaded".
    /// - Otherwise only the derived flag is recomputed.
    /// - The observer is notified only if the selection changed.
    pub fn set_available_ids<I: IntoIterator<Item = i64>>(&mut self, ids: I) {
        self.available = ids.into_iter().collect();
        let before = self.state.clone();
        if self.state.all_selected {
            self.state.selected_ids = self.available.clone();
        }
        self.recompute_all_selected();
        if self.state != before {
            self.notify();
        }
    }

    /// What: Flip "select all".
    ///
    /// Details:
    /// - On: selection becomes the full available set.
    /// - Off: selection is emptied.
    /// - Turning on with nothing loaded leaves the flag off.
    pub fn toggle_select_all(&mut self) {
        if self.state.all_selected {
            self.state.selected_ids.clear();
            self.state.all_selected = false;
        } else {
            self.state.selected_ids = self.available.clone();
            self.recompute_all_selected();
        }
        tracing::debug!(
            all = self.state.all_selected,
            selected = self.state.selected_ids.len(),
            "[Selection] select-all toggled"
        );
        self.notify();
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.state = SelectionState::default();
        self.notify();
    }

    /// Empty the selection and forget the available set.
    pub fn reset(&mut self) {
        self.available.clear();
        self.clear();
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.state.selected_ids.contains(&id)
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub const fn selected_ids(&self) -> &BTreeSet<i64> {
        &self.state.selected_ids
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.selected_ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.selected_ids.is_empty()
    }

    /// Whether the whole available set is selected.
    #[must_use]
    pub const fn is_all_selected(&self) -> bool {
        self.state.all_selected
    }

    /// Current selection snapshot.
    #[must_use]
    pub const fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Currently available ids.
    #[must_use]
    pub const fn available_ids(&self) -> &BTreeSet<i64> {
        &self.available
    }

    /// Derive `all_selected` from the two sets.
    fn recompute_all_selected(&mut self) {
        self.state.all_selected =
            !self.available.is_empty() && self.state.selected_ids == self.available;
    }

    /// Push the current state to the observer.
    fn notify(&mut self) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.state);
        }
    }
}
