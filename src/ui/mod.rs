//! Presentation ports and the line-oriented console front-end.
//!
//! The runtime never formats output itself: it hands snapshots to a
//! [`RenderSink`]. [`ConsoleView`] prints them as plain text.

use std::io::Write;

use crate::logic::ListSnapshot;
use crate::state::{Folder, SelectionState};

/// Receives everything the runtime wants shown to the user.
pub trait RenderSink: Send {
    /// Redraw the bookmark list.
    fn render(&mut self, snapshot: &ListSnapshot);
    /// Selection changed (count and "all" flag).
    fn selection(&mut self, state: &SelectionState);
    /// Show the folder list.
    fn folders(&mut self, folders: &[Folder]);
    /// Report a failed user operation.
    fn alert(&mut self, message: &str);
    /// Informational message.
    fn notice(&mut self, message: &str);
}

/// Console implementation of [`RenderSink`] writing to any [`Write`].
#[derive(Debug)]
pub struct ConsoleView<W: Write + Send> {
    /// Output stream (stdout in the binary).
    out: W,
}

impl<W: Write + Send> ConsoleView<W> {
    /// Wrap an output stream.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the view and return the stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write one line; output errors are logged, never fatal.
    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, "[Console] write failed");
        }
    }
}

/// What: Format the header line of a list snapshot.
///
/// Inputs:
/// - `snapshot`: Current list view
///
/// Output:
/// - e.g. `bookmarks [search "rust", sort title asc, folder 3] 20 shown, 2 selected, more`
#[must_use]
pub fn header_line(snapshot: &ListSnapshot) -> String {
    let f = &snapshot.filter;
    let mut parts = Vec::new();
    if let Some(q) = f.search.as_deref() {
        parts.push(format!("search \"{q}\""));
    }
    parts.push(format!(
        "sort {} {}",
        f.sort_by.as_param(),
        f.sort_direction.as_param()
    ));
    match f.scope_id {
        Some(id) => parts.push(format!("folder {id}")),
        None => parts.push("all folders".to_string()),
    }
    let tail = if snapshot.loading {
        "loading..."
    } else if snapshot.has_more {
        "more"
    } else {
        "end"
    };
    format!(
        "bookmarks [{}] {} shown, {} selected{}, {tail}",
        parts.join(", "),
        snapshot.rows.len(),
        snapshot.selected_count,
        if snapshot.all_selected { " (all)" } else { "" },
    )
}

impl<W: Write + Send> RenderSink for ConsoleView<W> {
    fn render(&mut self, snapshot: &ListSnapshot) {
        self.line(&header_line(snapshot));
        for row in &snapshot.rows {
            let mark = if row.selected { "[x]" } else { "[ ]" };
            let b = &row.bookmark;
            self.line(&format!("  {mark} {:>5}  {}  <{}>", b.id, b.title, b.url));
        }
    }

    fn selection(&mut self, state: &SelectionState) {
        let all = if state.all_selected { " (all)" } else { "" };
        self.line(&format!("selected: {}{all}", state.selected_ids.len()));
    }

    fn folders(&mut self, folders: &[Folder]) {
        if folders.is_empty() {
            self.line("no folders");
            return;
        }
        for f in folders {
            match f.description.as_deref() {
                Some(d) if !d.is_empty() => self.line(&format!("  {:>5}  {}  ({d})", f.id, f.name)),
                _ => self.line(&format!("  {:>5}  {}", f.id, f.name)),
            }
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("error: {message}"));
    }

    fn notice(&mut self, message: &str) {
        self.line(message);
    }
}
