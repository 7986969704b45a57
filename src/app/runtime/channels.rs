use std::sync::Arc;

use tokio::sync::mpsc;

use crate::events::AppEvent;
use crate::sources::BookmarkApi;
use crate::state::{PageLoaded, PageRequest};

use super::workers::spawn_page_worker;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - `request_tx` feeds the page worker; its results come back on `loaded_rx`.
/// - `event_tx`/`event_rx` carry commands, committed searches and selection changes.
#[derive(Debug)]
pub struct Channels {
    /// Page requests to the worker (cloned into the controller).
    pub request_tx: mpsc::UnboundedSender<PageRequest>,
    /// Page results from the worker.
    pub loaded_rx: mpsc::UnboundedReceiver<PageLoaded>,
    /// Event sender handed to the input reader, debouncer and selection observer.
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Events consumed by the loop.
    pub event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl Channels {
    /// What: Create every channel and start the page worker.
    ///
    /// Inputs:
    /// - `api`: Backend the worker fetches from
    ///
    /// Output: Channels with the worker already listening.
    ///
    /// Details:
    /// - Must be called from within a tokio runtime.
    pub fn new(api: Arc<dyn BookmarkApi>) -> Self {
        let (request_tx, request_rx) = mpsc::unbounded_channel::<PageRequest>();
        let (loaded_tx, loaded_rx) = mpsc::unbounded_channel::<PageLoaded>();
        let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
        spawn_page_worker(request_rx, loaded_tx, api);
        Self {
            request_tx,
            loaded_rx,
            event_tx,
            event_rx,
        }
    }
}
