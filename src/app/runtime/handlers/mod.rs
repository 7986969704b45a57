//! Event handlers run on the loop. All list and selection state changes happen here.

use crate::events::{AppEvent, Command, HELP};
use crate::sources::BookmarkApi;
use crate::state::{PageLoaded, SelectionState};
use crate::ui::RenderSink;

use super::init::Components;

mod backend;

/// What: Apply a page result and redraw.
///
/// Inputs:
/// - `loaded`: Worker result
/// - `c`: Components
/// - `sink`: Presentation port
///
/// Output: None
///
/// Details:
/// - Stale results change nothing and draw nothing.
/// - A failed current page only redraws, so the loading flag clears.
/// - After a render the scroll trigger is re-attached to the new last row.
pub fn handle_page_loaded(loaded: PageLoaded, c: &mut Components, sink: &mut dyn RenderSink) {
    let was_loading = c.controller.is_loading();
    if c.controller.apply_page(loaded) || (was_loading && !c.controller.is_loading()) {
        sink.render(&c.controller.snapshot());
        c.scroll.observe(c.controller.last_item_id());
    }
}

/// What: Draw the emptied list after a reset and detach the scroll trigger.
///
/// Inputs:
/// - `c`: Components, just reset
/// - `sink`: Presentation port
///
/// Output: None
///
/// Details:
/// - The sentinel follows the cleared list (`None` until page 0 arrives).
/// - The snapshot carries `loading` so the spinner shows while page 0 is fetched.
pub fn handle_reset(c: &mut Components, sink: &mut dyn RenderSink) {
    c.scroll.observe(c.controller.last_item_id());
    sink.render(&c.controller.snapshot());
}

/// What: Show a selection change unless it is what was shown last.
fn handle_selection_changed(state: SelectionState, c: &mut Components, sink: &mut dyn RenderSink) {
    if state != c.shown_selection {
        sink.selection(&state);
        c.shown_selection = state;
    }
}

/// What: Dispatch one event.
///
/// Inputs:
/// - `event`: Event from the channel
/// - `c`: Components
/// - `api`: Backend for direct calls
/// - `sink`: Presentation port
///
/// Output:
/// - `true` when the loop should exit
///
/// Details:
/// - Any event that reset the list redraws it through [`handle_reset`].
pub async fn handle_event(
    event: AppEvent,
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
) -> bool {
    let generation = c.controller.generation();
    let exit = dispatch(event, c, api, sink).await;
    if c.controller.generation() != generation {
        handle_reset(c, sink);
    }
    exit
}

/// Route one event to its handler.
async fn dispatch(
    event: AppEvent,
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
) -> bool {
    match event {
        AppEvent::SearchCommitted { query, epoch } => {
            if epoch == c.search.epoch() {
                c.controller.set_search(query.as_deref());
            } else {
                tracing::debug!(
                    ?query,
                    epoch,
                    "[Runtime] dropping search from before a folder switch"
                );
            }
            false
        }
        AppEvent::SelectionChanged(state) => {
            handle_selection_changed(state, c, sink);
            false
        }
        AppEvent::InvalidInput(msg) => {
            sink.alert(&msg);
            false
        }
        AppEvent::InputClosed => {
            tracing::info!("[Runtime] input closed");
            true
        }
        AppEvent::Command(cmd) => handle_command(cmd, c, api, sink).await,
    }
}

/// What: Run one user command.
///
/// Output:
/// - `true` for `quit`
async fn handle_command(
    cmd: Command,
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
) -> bool {
    tracing::debug!(?cmd, "[Runtime] command");
    match cmd {
        Command::Search(text) => c.search.input(&text),
        Command::ClearSearch => c.search.clear(),
        Command::More => scroll_to_end(c, sink),
        Command::Sort(field, direction) => c.controller.set_sort(field, direction),
        Command::Folder(scope) => {
            c.search.reset_silently();
            c.controller.select_scope(scope);
        }
        Command::Folders => backend::show_folders(api, sink).await,
        Command::Toggle(id) => {
            if c.controller.contains(id) {
                c.controller.selection_mut().toggle(id);
            } else {
                sink.notice(&format!("bookmark {id} is not in the list"));
            }
        }
        Command::SelectAll => c.controller.selection_mut().toggle_select_all(),
        Command::DeleteSelected => backend::delete_selected(c, api, sink).await,
        Command::Add { url, title } => backend::add_bookmark(c, api, sink, &url, &title).await,
        Command::Edit { id, url, title } => {
            backend::edit_bookmark(c, api, sink, id, &url, &title).await;
        }
        Command::Remove(id) => backend::remove_bookmark(c, api, sink, id).await,
        Command::AddFolder(name) => backend::add_folder(api, sink, &name).await,
        Command::RenameFolder { id, name } => backend::rename_folder(api, sink, id, &name).await,
        Command::RemoveFolder(id) => backend::remove_folder(c, api, sink, id).await,
        Command::FindFolders(query) => backend::find_folders(api, sink, &query).await,
        Command::Find(query) => backend::find_all(api, sink, &query).await,
        Command::Count(id) => backend::count_folder(api, sink, id).await,
        Command::Reload => c.controller.reset_and_reload(),
        Command::Help => sink.notice(HELP),
        Command::Quit => return true,
    }
    false
}

/// What: Report the sentinel as fully visible.
///
/// Details:
/// - Explains why nothing happened when the trigger does not fire.
fn scroll_to_end(c: &mut Components, sink: &mut dyn RenderSink) {
    let Some(sentinel) = c.scroll.sentinel() else {
        sink.notice("nothing loaded yet");
        return;
    };
    if c.scroll.on_visibility(sentinel, 1.0, &mut c.controller) {
        return;
    }
    if c.controller.is_loading() {
        sink.notice("still loading");
    } else if !c.controller.has_more() {
        sink.notice("end of list");
    }
}
