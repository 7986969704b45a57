//! Commands that talk to the backend directly.
//!
//! Each one is awaited on the loop. Mutations reload the listing on success;
//! any failure raises an alert and leaves the list as it was.

use crate::app::runtime::init::Components;
use crate::sources::{self, BookmarkApi};
use crate::state::{BookmarkDraft, FolderDraft};
use crate::ui::RenderSink;

/// What: Alert and log a failed operation.
///
/// Inputs:
/// - `sink`: Where the alert goes
/// - `what`: Operation name for the message
/// - `result`: Backend result
///
/// Output:
/// - `Some(value)` on success; `None` after alerting
fn report<T>(sink: &mut dyn RenderSink, what: &str, result: sources::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::error!(operation = what, error = %e, "[Runtime] operation failed");
            sink.alert(&format!("failed to {what}: {e}"));
            None
        }
    }
}

/// Create a bookmark in the current folder.
pub async fn add_bookmark(
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
    url: &str,
    title: &str,
) {
    let mut draft = BookmarkDraft::new(url.trim(), title.trim());
    draft.folder_id = c.controller.filter().scope_id;
    if let Err(e) = draft.validate() {
        sink.alert(&e.to_string());
        return;
    }
    if let Some(created) = report(sink, "create bookmark", api.create_item(&draft).await) {
        sink.notice(&format!("created bookmark {}", created.id));
        c.controller.reset_and_reload();
    }
}

/// What: Replace a bookmark's URL and title.
///
/// Details:
/// - Fetches the stored record first so description and folder are kept.
pub async fn edit_bookmark(
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
    id: i64,
    url: &str,
    title: &str,
) {
    let Some(current) = report(sink, "load bookmark", api.get_item(id).await) else {
        return;
    };
    let draft = BookmarkDraft {
        title: title.trim().to_string(),
        url: url.trim().to_string(),
        description: current.description,
        folder_id: current.folder_id,
    };
    if let Err(e) = draft.validate() {
        sink.alert(&e.to_string());
        return;
    }
    if report(sink, "update bookmark", api.update_item(id, &draft).await).is_some() {
        sink.notice(&format!("updated bookmark {id}"));
        c.controller.reset_and_reload();
    }
}

/// Delete one bookmark.
pub async fn remove_bookmark(
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
    id: i64,
) {
    if report(sink, "delete bookmark", api.delete_item(id).await).is_some() {
        sink.notice(&format!("deleted bookmark {id}"));
        c.controller.reset_and_reload();
    }
}

/// What: Delete every selected bookmark in one request.
///
/// Details:
/// - An empty selection is a no-op.
/// - On success the selection is cleared and the listing reloaded; on failure
///   the selection stays so the user can retry.
pub async fn delete_selected(c: &mut Components, api: &dyn BookmarkApi, sink: &mut dyn RenderSink) {
    let ids: Vec<i64> = c.controller.selection().selected_ids().iter().copied().collect();
    if ids.is_empty() {
        sink.notice("nothing selected");
        return;
    }
    tracing::info!(count = ids.len(), "[Runtime] bulk delete");
    if report(sink, "delete bookmarks", api.delete_items(&ids).await).is_some() {
        c.controller.selection_mut().clear();
        sink.notice(&format!("deleted {} bookmark(s)", ids.len()));
        c.controller.reset_and_reload();
    }
}

/// Create a folder and show the updated folder list.
pub async fn add_folder(api: &dyn BookmarkApi, sink: &mut dyn RenderSink, name: &str) {
    let draft = FolderDraft {
        name: name.trim().to_string(),
        description: None,
    };
    if let Err(e) = draft.validate() {
        sink.alert(&e.to_string());
        return;
    }
    if let Some(created) = report(sink, "create folder", api.create_scope(&draft).await) {
        sink.notice(&format!("created folder {} ({})", created.id, created.name));
        show_folders(api, sink).await;
    }
}

/// Rename a folder, keeping its description.
pub async fn rename_folder(api: &dyn BookmarkApi, sink: &mut dyn RenderSink, id: i64, name: &str) {
    let Some(folders) = report(sink, "load folders", api.list_scopes().await) else {
        return;
    };
    let Some(current) = folders.into_iter().find(|f| f.id == id) else {
        sink.alert(&format!("no folder with id {id}"));
        return;
    };
    let draft = FolderDraft {
        name: name.trim().to_string(),
        description: current.description,
    };
    if let Err(e) = draft.validate() {
        sink.alert(&e.to_string());
        return;
    }
    if report(sink, "rename folder", api.update_scope(id, &draft).await).is_some() {
        sink.notice(&format!("renamed folder {id}"));
        show_folders(api, sink).await;
    }
}

/// What: Delete a folder.
///
/// Details:
/// - When the deleted folder is the one being shown, the list falls back to every bookmark.
pub async fn remove_folder(
    c: &mut Components,
    api: &dyn BookmarkApi,
    sink: &mut dyn RenderSink,
    id: i64,
) {
    if report(sink, "delete folder", api.delete_scope(id).await).is_none() {
        return;
    }
    sink.notice(&format!("deleted folder {id}"));
    if c.controller.filter().scope_id == Some(id) {
        c.search.reset_silently();
        c.controller.select_scope(None);
    }
}

/// Fetch and show every folder.
pub async fn show_folders(api: &dyn BookmarkApi, sink: &mut dyn RenderSink) {
    if let Some(folders) = report(sink, "load folders", api.list_scopes().await) {
        sink.folders(&folders);
    }
}

/// Search folders by name and show the matches.
pub async fn find_folders(api: &dyn BookmarkApi, sink: &mut dyn RenderSink, query: &str) {
    if let Some(folders) = report(sink, "search folders", api.search_scopes(query).await) {
        sink.folders(&folders);
    }
}

/// Unpaginated bookmark search, printed as notices.
pub async fn find_all(api: &dyn BookmarkApi, sink: &mut dyn RenderSink, query: &str) {
    let Some(found) = report(sink, "search bookmarks", api.search_all(query).await) else {
        return;
    };
    sink.notice(&format!("{} match(es) for \"{query}\"", found.len()));
    for b in &found {
        sink.notice(&format!("  {:>5}  {}  <{}>", b.id, b.title, b.url));
    }
}

/// Show how many bookmarks a folder holds.
pub async fn count_folder(api: &dyn BookmarkApi, sink: &mut dyn RenderSink, id: i64) {
    if let Some(n) = report(sink, "count bookmarks", api.count_in_scope(id).await) {
        sink.notice(&format!("folder {id}: {n} bookmark(s)"));
    }
}
