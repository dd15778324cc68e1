//! CycleStatus enum for tracking the lifecycle of planning cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a planning cycle.
///
/// Transitions only ever move forward through the order
/// Draft < Open < Closed < Archived; there is no path back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Draft,
    Open,
    Closed,
    Archived,
}

impl CycleStatus {
    /// Returns true if forecasts within the cycle can be edited.
    pub fn is_open(&self) -> bool {
        matches!(self, CycleStatus::Open)
    }

    /// Returns true if the cycle is finished (closed or archived).
    pub fn is_finished(&self) -> bool {
        matches!(self, CycleStatus::Closed | CycleStatus::Archived)
    }

    /// Position in the forward order; higher means later in the lifecycle.
    fn rank(&self) -> u8 {
        match self {
            CycleStatus::Draft => 0,
            CycleStatus::Open => 1,
            CycleStatus::Closed => 2,
            CycleStatus::Archived => 3,
        }
    }

    /// Validates a transition from this status to another.
    ///
    /// Any strictly forward move is valid; staying in place or moving
    /// backward is not.
    pub fn can_transition_to(&self, target: &CycleStatus) -> bool {
        target.rank() > self.rank()
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStatus::Draft => "Draft",
            CycleStatus::Open => "Open",
            CycleStatus::Closed => "Closed",
            CycleStatus::Archived => "Archived",
        };
        write!(f, "{}", s)
    }
}
