//! Library entry for markshelf exposing the list core, backend port and runtime.

pub mod app;
pub mod args;
pub mod config;
pub mod events;
pub mod logic;
pub mod sources;
pub mod state;
pub mod ui;

#[cfg(test)]
mod test_utils;
