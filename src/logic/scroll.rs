//! Infinite-scroll trigger bound to the last rendered bookmark.

use crate::logic::paging::PagedListController;

/// Visible fraction at which the sentinel counts as "in view" by default.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Watches one sentinel (the last rendered row) and asks for the next page
/// when it becomes visible.
///
/// Duplicate requests from a single crossing are stopped by the controller's
/// `loading` guard, not here.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollTrigger {
    /// Visible fraction in `(0, 1]` that counts as a crossing.
    threshold: f32,
    /// Id of the row currently observed.
    sentinel: Option<i64>,
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ScrollTrigger {
    /// What: Create a trigger.
    ///
    /// Inputs:
    /// - `threshold`: Visible fraction; clamped into `(0, 1]`, NaN falls back to the default
    ///
    /// Output: Trigger observing nothing.
    #[must_use]
    pub fn new(threshold: f32) -> Self {
        let threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(f32::EPSILON, 1.0)
        };
        Self {
            threshold,
            sentinel: None,
        }
    }

    /// Configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Currently observed sentinel.
    #[must_use]
    pub const fn sentinel(&self) -> Option<i64> {
        self.sentinel
    }

    /// Re-attach to the new last row after a render; the old sentinel is dropped.
    pub fn observe(&mut self, sentinel: Option<i64>) {
        if self.sentinel != sentinel {
            tracing::trace!(old = ?self.sentinel, new = ?sentinel, "[Scroll] sentinel moved");
        }
        self.sentinel = sentinel;
    }

    /// What: React to a visibility change reported by the presentation layer.
    ///
    /// Inputs:
    /// - `id`: Row whose visibility changed
    /// - `ratio`: Visible fraction of that row
    /// - `controller`: List controller to drive
    ///
    /// Output:
    /// - `true` if a page request was issued
    ///
    /// Details:
    /// - Ignores rows other than the current sentinel (stale after re-render).
    /// - Fires only when `ratio` reaches the threshold and the controller can load.
    pub fn on_visibility(
        &self,
        id: i64,
        ratio: f32,
        controller: &mut PagedListController,
    ) -> bool {
        if self.sentinel != Some(id) || ratio < self.threshold {
            return false;
        }
        if !controller.can_load_more() {
            tracing::trace!(
                loading = controller.is_loading(),
                has_more = controller.has_more(),
                "[Scroll] sentinel visible but load not allowed"
            );
            return false;
        }
        controller.load_next_page()
    }
}
