//! List logic: paging controller, selection tracking and the scroll trigger.

pub mod paging;
pub mod scroll;
pub mod selection;

pub use paging::{ListRow, ListSnapshot, PagedListController};
pub use scroll::ScrollTrigger;
pub use selection::{SelectionObserver, SelectionTracker};
