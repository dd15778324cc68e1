//! Cycle lifecycle handlers.

mod get_active_cycle;
mod transition_cycle;

pub use get_active_cycle::{GetActiveCycleError, GetActiveCycleHandler};
pub use transition_cycle::{
    TransitionCycleCommand, TransitionCycleError, TransitionCycleHandler, TransitionedCycle,
};
