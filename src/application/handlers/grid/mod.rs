//! Grid reconciliation handlers.

mod build_grid;
mod selection_tracker;

pub use build_grid::{BuildGridError, BuildGridHandler, BuildGridQuery};
pub use selection_tracker::{SelectionToken, SelectionTracker};
