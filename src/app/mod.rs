//! markshelf runtime: assembly, background workers and the event loop.

/// Runtime event loop and background workers.
mod runtime;

pub use runtime::channels::Channels;
pub use runtime::event_loop::run_loop;
pub use runtime::handlers::{handle_event, handle_page_loaded};
pub use runtime::init::{Components, assemble};
pub use runtime::workers::{spawn_input_thread, spawn_page_worker};
pub use runtime::{resolve_settings, run};
