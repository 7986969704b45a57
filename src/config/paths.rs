use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the config root.
const APP_DIR: &str = "markshelf";

/// Determine the settings file path, searching in priority order.
///
/// Looks for `settings.conf` under `$HOME/.config/markshelf` first, then
/// under `$XDG_CONFIG_HOME/markshelf`.
pub(crate) fn resolve_settings_path() -> Option<PathBuf> {
    settings_candidates(
        env::var("HOME").ok().as_deref(),
        env::var("XDG_CONFIG_HOME").ok().as_deref(),
    )
    .into_iter()
    .find(|p| p.is_file())
}

/// What: List candidate settings paths for the given roots.
///
/// Inputs:
/// - `home`: Value of `$HOME`, if set
/// - `xdg_config`: Value of `$XDG_CONFIG_HOME`, if set
///
/// Output:
/// - Candidate paths in lookup order
fn settings_candidates(home: Option<&str>, xdg_config: Option<&str>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(h) = home {
        candidates.push(Path::new(h).join(".config").join(APP_DIR).join("settings.conf"));
    }
    if let Some(x) = xdg_config.filter(|x| !x.trim().is_empty()) {
        candidates.push(Path::new(x).join(APP_DIR).join("settings.conf"));
    }
    candidates
}

/// Resolve an XDG base directory from the environment or default to `$HOME` + segments.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/markshelf` when HOME is set and the directory can be created.
fn home_config_dir() -> Option<PathBuf> {
    let home = env::var("HOME").ok()?;
    let dir = Path::new(&home).join(".config").join(APP_DIR);
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Config directory for markshelf (ensured to exist).
///
/// Prefers `$HOME/.config/markshelf`, then `$XDG_CONFIG_HOME/markshelf`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let dir = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `$HOME/.config/markshelf/logs` (ensured to exist).
#[must_use]
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: HOME wins over `XDG_CONFIG_HOME`; blank XDG is ignored.
    fn candidates_follow_lookup_order() {
        let c = settings_candidates(Some("/home/u"), Some("/xdg"));
        assert_eq!(
            c,
            vec![
                PathBuf::from("/home/u/.config/markshelf/settings.conf"),
                PathBuf::from("/xdg/markshelf/settings.conf"),
            ]
        );
        assert_eq!(settings_candidates(None, Some("  ")), Vec::<PathBuf>::new());
    }
}
