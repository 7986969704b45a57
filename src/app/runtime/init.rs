use tokio::sync::mpsc;

use crate::config::Settings;
use crate::events::{AppEvent, DebouncedSearchInput};
use crate::logic::{PagedListController, ScrollTrigger, SelectionTracker};
use crate::state::{PageRequest, SelectionState};

/// Everything the event loop mutates, built once by [`assemble`].
#[derive(Debug)]
pub struct Components {
    /// List controller (owns the selection tracker).
    pub controller: PagedListController,
    /// Sentinel watcher for infinite scroll.
    pub scroll: ScrollTrigger,
    /// Debounced search field.
    pub search: DebouncedSearchInput,
    /// Selection last shown, so repeated identical notifications are not re-shown.
    pub shown_selection: SelectionState,
}

/// What: Build the core components in dependency order.
///
/// Inputs:
/// - `settings`: Resolved settings (page size, sort, debounce, threshold)
/// - `request_tx`: Page request channel of the worker
/// - `event_tx`: Event channel of the loop
///
/// Output:
/// - Wired [`Components`]; nothing is fetched yet
///
/// Details:
/// - Tracker first, then the controller that takes ownership of it, then the
///   scroll trigger and the search input.
/// - The selection observer forwards each change to the loop as
///   `AppEvent::SelectionChanged`.
pub fn assemble(
    settings: &Settings,
    request_tx: mpsc::UnboundedSender<PageRequest>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
) -> Components {
    let mut selection = SelectionTracker::new();
    let observer_tx = event_tx.clone();
    selection.set_observer(Box::new(move |state: &SelectionState| {
        let _ = observer_tx.send(AppEvent::SelectionChanged(state.clone()));
    }));
    let controller = PagedListController::new(settings.initial_filter(), selection, request_tx);
    let scroll = ScrollTrigger::new(settings.scroll_threshold);
    let search = DebouncedSearchInput::new(settings.search_debounce(), event_tx);
    tracing::debug!(
        page_size = settings.page_size,
        debounce_ms = settings.search_debounce_ms,
        threshold = settings.scroll_threshold,
        "[Runtime] components assembled"
    );
    Components {
        controller,
        scroll,
        search,
        shown_selection: SelectionState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SortDirection, SortField};

    #[test]
    /// What: Settings flow into the filter, trigger and debouncer; the observer reaches the loop.
    fn assemble_applies_settings() {
        let settings = Settings {
            page_size: 5,
            sort_by: SortField::Url,
            sort_direction: SortDirection::Desc,
            search_debounce_ms: 120,
            scroll_threshold: 0.75,
            ..Settings::default()
        };
        let (req_tx, _req_rx) = mpsc::unbounded_channel();
        let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
        let mut c = assemble(&settings, req_tx, ev_tx);
        assert_eq!(c.controller.filter().page_size, 5);
        assert_eq!(c.controller.filter().sort_by, SortField::Url);
        assert_eq!(c.search.delay().as_millis(), 120);
        assert!((c.scroll.threshold() - 0.75).abs() < f32::EPSILON);

        c.controller.selection_mut().toggle(9);
        match ev_rx.try_recv() {
            Ok(AppEvent::SelectionChanged(state)) => assert!(state.selected_ids.contains(&9)),
            other => panic!("unexpected {other:?}"),
        }
    }
}
