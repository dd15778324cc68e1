//! Cycle - the recurring planning period aggregate.

mod aggregate;
mod deadline;
mod events;
mod status;

pub use aggregate::Cycle;
pub use deadline::{evaluate_deadline, DeadlineStatus, Severity};
pub use events::CycleEvent;
pub use status::CycleStatus;
