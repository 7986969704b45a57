use std::io::BufReader;
use std::sync::Arc;

use crate::args::Args;
use crate::config::Settings;
use crate::sources::{BookmarkApi, HttpApi};
use crate::ui::{ConsoleView, RenderSink};

pub mod channels;
pub mod event_loop;
pub mod handlers;
pub mod init;
pub mod workers;

use channels::Channels;
use event_loop::run_loop;
use handlers::handle_reset;
use init::assemble;
use workers::spawn_input_thread;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Resolve settings from file, environment and command line.
///
/// # Errors
/// - When an explicit settings file is missing or unreadable
pub fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_env(|k| std::env::var(k).ok());
    args.apply_to(&mut settings);
    Ok(settings)
}

/// What: Run markshelf end to end: settings, backend client, workers and the event loop.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - `Ok(())` on `quit` or end of input; `Err` when setup fails
///
/// Details:
/// - Settings: `settings.conf`, then `MARKSHELF_*` environment, then flags.
/// - Background: page-fetch worker on tokio tasks, console input on a thread.
/// - The first page is requested before the loop starts.
///
/// # Errors
/// - Unreadable settings or an invalid API base URL
pub async fn run(args: &Args) -> Result<()> {
    let settings = resolve_settings(args)?;
    tracing::info!(
        api = %settings.api_base_url,
        page_size = settings.page_size,
        "[Runtime] starting"
    );
    let api: Arc<dyn BookmarkApi> = Arc::new(HttpApi::new(
        settings.api_base_url.clone(),
        settings.connect_timeout(),
        settings.request_timeout(),
    )?);
    let mut channels = Channels::new(Arc::clone(&api));
    let mut components = assemble(
        &settings,
        channels.request_tx.clone(),
        channels.event_tx.clone(),
    );
    spawn_input_thread(BufReader::new(std::io::stdin()), channels.event_tx.clone());

    let mut sink = ConsoleView::new(std::io::stdout());
    sink.notice(&format!(
        "markshelf {} on {} (type 'help' for commands)",
        env!("CARGO_PKG_VERSION"),
        settings.api_base_url
    ));
    components.controller.reset_and_reload();
    handle_reset(&mut components, &mut sink);
    run_loop(&mut components, &mut channels, api.as_ref(), &mut sink).await;
    Ok(())
}
