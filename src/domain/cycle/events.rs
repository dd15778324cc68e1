//! Domain events recorded by the Cycle aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::CycleId;

use super::CycleStatus;

/// Events emitted by cycle lifecycle transitions.
///
/// The aggregate buffers these; callers drain them with `take_events` and
/// dispatch side effects themselves. `Opened` is the trigger point for
/// notifying sales representatives that planning has started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CycleEvent {
    /// The cycle moved from Draft to Open and forecast entry is now allowed.
    Opened { cycle_id: CycleId },
    /// Any forward status move, including the one that produced `Opened`.
    StatusChanged {
        cycle_id: CycleId,
        from: CycleStatus,
        to: CycleStatus,
    },
}
