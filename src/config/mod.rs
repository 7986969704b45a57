//! Configuration: settings file discovery, parsing and overrides.

use std::path::PathBuf;

mod paths;
pub mod settings;

pub use paths::{config_dir, logs_dir};
pub use settings::{Settings, parse_settings};

/// Failures while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A settings file named on the command line does not exist.
    #[error("settings file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// A settings file exists but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
