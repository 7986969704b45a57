use tokio::select;

use crate::sources::BookmarkApi;
use crate::ui::RenderSink;

use super::channels::Channels;
use super::handlers::{handle_event, handle_page_loaded};
use super::init::Components;

/// What: Process one message from whichever channel is ready.
///
/// Output: `true` if the event loop should exit
async fn process_channel_messages(
    c: &mut Components,
    channels: &mut Channels,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
) -> bool {
    select! {
        Some(loaded) = channels.loaded_rx.recv() => {
            handle_page_loaded(loaded, c, sink);
            false
        }
        Some(event) = channels.event_rx.recv() => {
            handle_event(event, c, api, sink).await
        }
        else => {
            tracing::warn!("[Runtime] all channels closed");
            true
        }
    }
}

/// What: Drive the single event loop until quit or end of input.
///
/// Inputs:
/// - `c`: Components mutated by the loop
/// - `channels`: Worker and event channels
/// - `api`: Backend for direct calls
/// - `sink`: Presentation port
///
/// Output: None
///
/// Details:
/// - Page results and events are handled one at a time, so every state
///   change happens on this task.
pub async fn run_loop(
    c: &mut Components,
    channels: &mut Channels,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
) {
    loop {
        if process_channel_messages(c, channels, api, sink).await {
            break;
        }
    }
    c.search.reset_silently();
    tracing::info!("[Runtime] event loop finished");
}
