//! Debounced search input: collapses bursts of input into one filter update.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::AppEvent;
use crate::state::normalize_search;

/// Quiet period used when nothing else is configured.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Forwards search text after a quiet period.
///
/// Only the most recent pending update survives: each new input aborts the
/// previous pending task before scheduling its own. A commit that already
/// fired cannot be aborted, so each carries the input epoch; `reset_silently`
/// starts a new epoch and the loop drops commits from older ones.
#[derive(Debug)]
pub struct DebouncedSearchInput {
    /// Quiet period before an input is committed.
    delay: Duration,
    /// Destination for committed searches.
    tx: mpsc::UnboundedSender<AppEvent>,
    /// The single pending commit, if any.
    pending: Option<JoinHandle<()>>,
    /// Raw text of the last input, as typed.
    value: String,
    /// Bumped by `reset_silently`.
    epoch: u64,
}

impl DebouncedSearchInput {
    /// What: Create an input with the given quiet period.
    ///
    /// Inputs:
    /// - `delay`: Quiet period
    /// - `tx`: Event channel receiving `AppEvent::SearchCommitted`
    ///
    /// Output: Idle input.
    #[must_use]
    pub const fn new(delay: Duration, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            delay,
            tx,
            pending: None,
            value: String::new(),
            epoch: 0,
        }
    }

    /// What: Record an input event and (re)start the quiet period.
    ///
    /// Inputs:
    /// - `text`: Full current text of the field
    ///
    /// Output: None
    ///
    /// Details:
    /// - Aborts the previous pending commit.
    /// - After `delay` sends the trimmed text (`None` when blank).
    /// - Must be called from within a tokio runtime.
    pub fn input(&mut self, text: &str) {
        self.cancel_pending();
        self.value = text.to_string();
        let committed = normalize_search(Some(text));
        let tx = self.tx.clone();
        let delay = self.delay;
        let epoch = self.epoch;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(query = ?committed, epoch, "[Search] debounced commit");
            let _ = tx.send(AppEvent::SearchCommitted {
                query: committed,
                epoch,
            });
        }));
    }

    /// Set the text programmatically; debounced like typed input.
    pub fn set_value(&mut self, text: &str) {
        self.input(text);
    }

    /// What: Clear the field and commit immediately.
    ///
    /// Details:
    /// - Bypasses the quiet period and drops any pending commit.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.value.clear();
        tracing::debug!("[Search] cleared");
        let _ = self.tx.send(AppEvent::SearchCommitted {
            query: None,
            epoch: self.epoch,
        });
    }

    /// What: Drop the pending commit without sending anything.
    ///
    /// Details:
    /// - Starts a new epoch, so a commit that fired but is still queued goes stale.
    pub fn reset_silently(&mut self) {
        self.cancel_pending();
        self.value.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Current input epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a commit is scheduled and has not fired yet.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Text of the last input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Configured quiet period.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Abort the pending task, if any.
    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for DebouncedSearchInput {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
