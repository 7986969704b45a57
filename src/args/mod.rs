//! Command-line argument parsing.

pub mod definition;

pub use definition::{Args, determine_log_level};
