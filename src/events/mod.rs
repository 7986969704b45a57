//! Input side of the runtime: user commands and debounced search.
//!
//! The console front-end turns each input line into a [`Command`]; the
//! runtime dispatches commands and [`AppEvent`]s on its single event loop.

use crate::state::{SelectionState, SortDirection, SortField};

pub mod search;

pub use search::DebouncedSearchInput;

/// Events delivered to the runtime's event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The debounced search field settled on this text.
    SearchCommitted {
        /// Committed text (`None` for no search).
        query: Option<String>,
        /// Input epoch the commit was issued in; see [`DebouncedSearchInput::epoch`].
        epoch: u64,
    },
    /// A parsed user command.
    Command(Command),
    /// The selection observer fired.
    SelectionChanged(SelectionState),
    /// A console line that did not parse.
    InvalidInput(String),
    /// Input ended (stdin closed).
    InputClosed,
}

/// User-level commands accepted by the console front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Text typed into the search field (debounced).
    Search(String),
    /// Cancel key on the search field: clear and apply immediately.
    ClearSearch,
    /// The last row scrolled into view.
    More,
    /// Change sorting.
    Sort(SortField, SortDirection),
    /// Select a folder (`None` for all bookmarks).
    Folder(Option<i64>),
    /// List folders.
    Folders,
    /// Toggle selection of a bookmark.
    Toggle(i64),
    /// Toggle "select all".
    SelectAll,
    /// Delete every selected bookmark.
    DeleteSelected,
    /// Create a bookmark.
    Add {
        /// Target URL.
        url: String,
        /// Display title.
        title: String,
    },
    /// Replace a bookmark's URL and title.
    Edit {
        /// Bookmark id.
        id: i64,
        /// New URL.
        url: String,
        /// New title.
        title: String,
    },
    /// Delete one bookmark.
    Remove(i64),
    /// Create a folder.
    AddFolder(String),
    /// Rename a folder.
    RenameFolder {
        /// Folder id.
        id: i64,
        /// New name.
        name: String,
    },
    /// Delete a folder.
    RemoveFolder(i64),
    /// Search folders by name.
    FindFolders(String),
    /// Unpaginated search over every bookmark.
    Find(String),
    /// Show the bookmark count of a folder.
    Count(i64),
    /// Reload the current listing.
    Reload,
    /// Show help.
    Help,
    /// Exit.
    Quit,
}

/// Help text listing every command.
pub const HELP: &str = "\
commands:
  /<text> | search <text>     type into the search field (debounced)
  esc                         clear the search immediately
  more                        scroll the last row into view
  sort <title|createdAt|url> [asc|desc]
  folder <id|all>             show one folder or every bookmark
  folders                     list folders
  toggle <id>                 select / deselect a bookmark
  all                         select / deselect everything loaded
  delete                      delete the selected bookmarks
  add <url> <title...>        create a bookmark in the current folder
  edit <id> <url> <title...>  update a bookmark
  rm <id>                     delete a bookmark
  mkdir <name...>             create a folder
  mvdir <id> <name...>        rename a folder
  rmdir <id>                  delete a folder
  findfolder <text>           search folders by name
  find <text>                 search every bookmark at once (no paging)
  count <folder id>           number of bookmarks in a folder
  reload | help | quit";

impl Command {
    /// What: Parse one console line.
    ///
    /// Inputs:
    /// - `line`: Raw input line
    ///
    /// Output:
    /// - `Ok(Some(Command))` when recognized, `Ok(None)` for a blank line
    ///
    /// # Errors
    /// - Returns a usage message for unknown commands or bad arguments
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(None);
        }
        if let Some(rest) = line.strip_prefix('/') {
            return Ok(Some(Self::Search(rest.to_string())));
        }
        let trimmed = line.trim_start();
        let (head, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(h, r)| (h, r.trim()));
        let cmd = match head.to_ascii_lowercase().as_str() {
            "search" | "s" => Self::Search(rest.to_string()),
            "esc" | "clear" => Self::ClearSearch,
            "more" | "scroll" | "next" => Self::More,
            "sort" => parse_sort(rest)?,
            "folder" | "cd" => Self::Folder(parse_folder(rest)?),
            "folders" | "ls" => Self::Folders,
            "toggle" | "x" => Self::Toggle(parse_id(rest)?),
            "all" => Self::SelectAll,
            "delete" | "del" => Self::DeleteSelected,
            "add" => {
                let (url, title) = split_url_title(rest)?;
                Self::Add { url, title }
            }
            "edit" => {
                let (id, tail) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: edit <id> <url> <title...>".to_string())?;
                let (url, title) = split_url_title(tail.trim())?;
                Self::Edit {
                    id: parse_id(id)?,
                    url,
                    title,
                }
            }
            "rm" => Self::Remove(parse_id(rest)?),
            "mkdir" => {
                if rest.is_empty() {
                    return Err("usage: mkdir <name...>".to_string());
                }
                Self::AddFolder(rest.to_string())
            }
            "mvdir" => {
                let (id, name) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: mvdir <id> <name...>".to_string())?;
                Self::RenameFolder {
                    id: parse_id(id)?,
                    name: name.trim().to_string(),
                }
            }
            "rmdir" => Self::RemoveFolder(parse_id(rest)?),
            "findfolder" => Self::FindFolders(non_empty(rest, "findfolder <text>")?),
            "find" => Self::Find(non_empty(rest, "find <text>")?),
            "count" => Self::Count(parse_id(rest)?),
            "reload" | "r" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(cmd))
    }
}

/// Parse a bookmark or folder id.
fn parse_id(s: &str) -> Result<i64, String> {
    s.trim()
        .parse::<i64>()
        .map_err(|_| format!("expected a numeric id, got '{}'", s.trim()))
}

/// Require a non-empty argument.
fn non_empty(s: &str, usage: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err(format!("usage: {usage}"));
    }
    Ok(s.trim().to_string())
}

/// Parse `all` or a folder id.
fn parse_folder(s: &str) -> Result<Option<i64>, String> {
    match s.trim() {
        "" | "all" | "*" => Ok(None),
        other => parse_id(other).map(Some),
    }
}

/// Parse `<field> [direction]`.
fn parse_sort(s: &str) -> Result<Command, String> {
    let mut parts = s.split_whitespace();
    let field = parts
        .next()
        .and_then(SortField::from_param)
        .ok_or_else(|| "usage: sort <title|createdAt|url> [asc|desc]".to_string())?;
    let direction = match parts.next() {
        None => SortDirection::Asc,
        Some(d) => SortDirection::from_param(d)
            .ok_or_else(|| format!("unknown sort direction '{d}'"))?,
    };
    Ok(Command::Sort(field, direction))
}

/// Split `<url> <title...>`; the title defaults to the URL.
fn split_url_title(s: &str) -> Result<(String, String), String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("usage: add <url> <title...>".to_string());
    }
    let (url, title) = s
        .split_once(char::is_whitespace)
        .map_or((s, s), |(u, t)| (u, t.trim()));
    Ok((url.to_string(), title.to_string()))
}
