//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;

/// markshelf - browse, search and organize bookmarks stored on a REST backend
#[derive(Parser, Debug, Default)]
#[command(name = "markshelf")]
#[command(version)]
#[command(about = "Browse, search and organize bookmarks stored on a REST backend", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// REST API root (overrides settings.conf and MARKSHELF_API_BASE_URL)
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Bookmarks per page (overrides settings.conf and MARKSHELF_PAGE_SIZE)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Read settings from this file instead of ~/.config/markshelf/settings.conf
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// What: Apply command-line overrides on top of file and environment settings.
    ///
    /// Inputs:
    /// - `settings`: Settings to modify
    ///
    /// Output: None
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(url) = self.api_base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            settings.api_base_url = url.trim().to_string();
        }
        if let Some(size) = self.page_size {
            settings.page_size = size.max(1);
        }
    }
}

/// What: Determine the log level from command-line arguments.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - Log level string (trace, debug, info, warn, error)
///
/// Details:
/// - The verbose flag overrides `--log-level`.
#[must_use]
pub fn determine_log_level(args: &Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else {
        args.log_level.clone()
    }
}
