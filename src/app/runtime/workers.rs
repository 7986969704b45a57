use std::io::BufRead;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::events::{AppEvent, Command};
use crate::sources::BookmarkApi;
use crate::state::{PageLoaded, PageRequest};

/// What: Spawn the background page-fetch worker.
///
/// Inputs:
/// - `request_rx`: Page requests from the controller
/// - `loaded_tx`: Destination for results
/// - `api`: Backend to fetch from
///
/// Output:
/// - Handle of the dispatch task (ends when every request sender is dropped)
///
/// Details:
/// - Each request runs on its own task, so a slow page never delays a newer one.
/// - Results carry the generation and page they were requested for; the
///   controller drops the ones that are stale by the time they arrive.
pub fn spawn_page_worker(
    mut request_rx: mpsc::UnboundedReceiver<PageRequest>,
    loaded_tx: mpsc::UnboundedSender<PageLoaded>,
    api: Arc<dyn BookmarkApi>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let api = Arc::clone(&api);
            let tx = loaded_tx.clone();
            tokio::spawn(async move {
                let PageRequest { generation, filter } = request;
                let result = api.fetch_page(&filter).await;
                if let Err(e) = &result {
                    tracing::warn!(generation, page = filter.page, error = %e, "[Worker] page fetch failed");
                }
                let _ = tx.send(PageLoaded {
                    generation,
                    page: filter.page,
                    result,
                });
            });
        }
        tracing::debug!("[Worker] page request channel closed");
    })
}

/// What: Read console lines on a dedicated thread and forward them as events.
///
/// Inputs:
/// - `reader`: Line source (stdin in the binary)
/// - `event_tx`: Event channel of the loop
///
/// Output: None
///
/// Details:
/// - Blank lines are skipped; unparseable lines become `AppEvent::InvalidInput`.
/// - End of input or a read error sends `AppEvent::InputClosed`.
/// - The thread exits once the loop drops its receiver.
pub fn spawn_input_thread<R>(reader: R, event_tx: mpsc::UnboundedSender<AppEvent>)
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    tracing::warn!(error = %e, "[Input] read failed");
                    break;
                }
            };
            let event = match Command::parse(&line) {
                Ok(Some(cmd)) => AppEvent::Command(cmd),
                Ok(None) => continue,
                Err(msg) => AppEvent::InvalidInput(msg),
            };
            if event_tx.send(event).is_err() {
                return;
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}
