//! `settings.conf` parsing and the resolved runtime settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ConfigError;
use crate::config::paths::resolve_settings_path;
use crate::events::search::DEFAULT_DEBOUNCE_MS;
use crate::logic::scroll::DEFAULT_THRESHOLD;
use crate::state::{DEFAULT_PAGE_SIZE, Filter, SortDirection, SortField};

/// API root used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding `api_base_url`.
pub const ENV_API_BASE_URL: &str = "MARKSHELF_API_BASE_URL";
/// Environment variable overriding `page_size`.
pub const ENV_PAGE_SIZE: &str = "MARKSHELF_PAGE_SIZE";

/// Resolved runtime settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// REST API root, e.g. `http://localhost:8080/api`.
    pub api_base_url: String,
    /// Bookmarks per page (positive).
    pub page_size: u32,
    /// Initial sort field.
    pub sort_by: SortField,
    /// Initial sort direction.
    pub sort_direction: SortDirection,
    /// Quiet period of the search field.
    pub search_debounce_ms: u64,
    /// Visible fraction of the last row that loads the next page.
    pub scroll_threshold: f32,
    /// Whole-request timeout.
    pub request_timeout_secs: u64,
    /// Connect timeout.
    pub connect_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: SortField::default(),
            sort_direction: SortDirection::default(),
            search_debounce_ms: DEFAULT_DEBOUNCE_MS,
            scroll_threshold: DEFAULT_THRESHOLD,
            request_timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}

impl Settings {
    /// What: Load settings from a file, or from the default location.
    ///
    /// Inputs:
    /// - `explicit`: Path given on the command line, if any
    ///
    /// Output:
    /// - Parsed settings; defaults when no file is found at the default location
    ///
    /// # Errors
    /// - `ConfigError::NotFound` when `explicit` does not exist
    /// - `ConfigError::Read` when a file exists but cannot be read
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path: Option<PathBuf> = match explicit {
            Some(p) if !p.is_file() => return Err(ConfigError::NotFound(p.to_path_buf())),
            Some(p) => Some(p.to_path_buf()),
            None => resolve_settings_path(),
        };
        let mut settings = Self::default();
        let Some(path) = path else {
            debug!("[Config] no settings.conf found; using defaults");
            return Ok(settings);
        };
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        parse_settings(&content, &mut settings);
        debug!(path = %path.display(), "[Config] loaded settings");
        Ok(settings)
    }

    /// What: Apply environment overrides.
    ///
    /// Inputs:
    /// - `lookup`: Environment accessor (`std::env::var(..).ok()` in production)
    ///
    /// Output: None (modifies `self`)
    ///
    /// Details:
    /// - Unparseable or non-positive page sizes are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_PAGE_SIZE) {
            match raw.trim().parse::<u32>() {
                Ok(v) if v > 0 => self.page_size = v,
                _ => warn!(value = %raw, "[Config] ignoring invalid {ENV_PAGE_SIZE}"),
            }
        }
    }

    /// Initial list filter built from these settings.
    #[must_use]
    pub fn initial_filter(&self) -> Filter {
        Filter::new(self.page_size, self.sort_by, self.sort_direction)
    }

    /// Search debounce as a [`Duration`].
    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

/// What: Trim an inline `#` or `//` comment from a value.
///
/// Details:
/// - A leading `#` is kept so values such as `#tag` survive; the next `#` starts the comment.
fn strip_inline_comment(mut s: &str) -> &str {
    if let Some((i, _)) = s.match_indices("//").find(|(i, _)| !s[..*i].ends_with(':')) {
        s = &s[..i];
    }
    let cut = s
        .strip_prefix('#')
        .map_or_else(|| s.find('#'), |rest| rest.find('#').map(|j| j + 1));
    if let Some(i) = cut {
        s = &s[..i];
    }
    s.trim()
}

/// What: Parse `settings.conf` content into `settings`.
///
/// Inputs:
/// - `content`: File content
/// - `settings`: Settings to populate
///
/// Output: None (modifies `settings` in place)
///
/// Details:
/// - Blank lines and lines starting with `#` or `//` are skipped.
/// - Keys are case-insensitive; `.`, `-` and spaces normalize to `_`.
/// - Invalid values keep the previous value and log a warning; unknown keys are ignored.
pub fn parse_settings(content: &str, settings: &mut Settings) {
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val.trim());
        match key.as_str() {
            "api_base_url" | "api_url" | "base_url" => {
                if !val.is_empty() {
                    settings.api_base_url = val.trim_end_matches('/').to_string();
                }
            }
            "page_size" => match val.parse::<u32>() {
                Ok(v) if v > 0 => settings.page_size = v,
                _ => warn!(key = %key, value = val, "[Config] invalid page size"),
            },
            "sort_by" | "sort_field" => match SortField::from_param(val) {
                Some(v) => settings.sort_by = v,
                None => warn!(key = %key, value = val, "[Config] unknown sort field"),
            },
            "sort_direction" | "sort_dir" => match SortDirection::from_param(val) {
                Some(v) => settings.sort_direction = v,
                None => warn!(key = %key, value = val, "[Config] unknown sort direction"),
            },
            "search_debounce_ms" | "debounce_ms" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.search_debounce_ms = v;
                }
            }
            "scroll_threshold" => match val.parse::<f32>() {
                Ok(v) if v > 0.0 && v <= 1.0 => settings.scroll_threshold = v,
                _ => warn!(key = %key, value = val, "[Config] threshold must be in (0, 1]"),
            },
            "request_timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.request_timeout_secs = v.max(1);
                }
            }
            "connect_timeout_secs" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.connect_timeout_secs = v.max(1);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    /// What: Every key is parsed, with comments and key spelling variants.
    ///
    /// Inputs:
    /// - A settings file exercising each key, comment styles and `Sort-By` spelling
    ///
    /// Output:
    /// - All fields set from the file
    fn parse_all_keys() {
        let content = "\
# markshelf settings
// another comment
api_base_url = https://marks.example/api/  # trailing comment
page_size = 50
Sort-By = createdAt
sort_direction = desc
search_debounce_ms = 150
scroll_threshold = 0.8
request_timeout_secs = 30
connect_timeout_secs = 0
not a setting
";
        let mut s = Settings::default();
        parse_settings(content, &mut s);
        assert_eq!(s.api_base_url, "https://marks.example/api");
        assert_eq!(s.page_size, 50);
        assert_eq!(s.sort_by, SortField::CreatedAt);
        assert_eq!(s.sort_direction, SortDirection::Desc);
        assert_eq!(s.search_debounce_ms, 150);
        assert!((s.scroll_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.connect_timeout_secs, 1);
    }

    #[test]
    /// What: Invalid values keep the defaults.
    fn invalid_values_keep_defaults() {
        let mut s = Settings::default();
        parse_settings(
            "page_size = 0\nsort_by = rank\nscroll_threshold = 2.5\nsort_dir = sideways\n",
            &mut s,
        );
        assert_eq!(s, Settings::default());
    }

    #[test]
    /// What: URLs keep their `//` while inline comments are stripped.
    fn inline_comment_stripping() {
        assert_eq!(strip_inline_comment("http://h/api // local"), "http://h/api");
        assert_eq!(strip_inline_comment("20 # per page"), "20");
        assert_eq!(strip_inline_comment("#tag # note"), "#tag");
    }

    #[test]
    /// What: Environment overrides beat file values; bad page sizes are ignored.
    fn env_overrides() {
        let mut s = Settings::default();
        s.apply_env(|k| match k {
            ENV_API_BASE_URL => Some("http://remote:9000/api".to_string()),
            ENV_PAGE_SIZE => Some("35".to_string()),
            _ => None,
        });
        assert_eq!(s.api_base_url, "http://remote:9000/api");
        assert_eq!(s.page_size, 35);

        s.apply_env(|k| (k == ENV_PAGE_SIZE).then(|| "zero".to_string()));
        assert_eq!(s.page_size, 35);
    }

    #[test]
    /// What: Loading an explicit file reads it; a missing explicit file is an error.
    ///
    /// Inputs:
    /// - A temp file with `page_size = 7`, and a path that does not exist
    ///
    /// Output:
    /// - `page_size == 7`, then `ConfigError::NotFound`
    fn load_explicit_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        let mut f = fs::File::create(&path).expect("create");
        writeln!(f, "page_size = 7").expect("write");
        drop(f);

        let s = Settings::load(Some(&path)).expect("load");
        assert_eq!(s.page_size, 7);
        assert_eq!(s.initial_filter().page_size, 7);

        let missing = dir.path().join("nope.conf");
        assert!(matches!(
            Settings::load(Some(&missing)),
            Err(ConfigError::NotFound(p)) if p == missing
        ));
    }
}
