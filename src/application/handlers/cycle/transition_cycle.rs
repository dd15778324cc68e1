//! TransitionCycleHandler - command handler for cycle lifecycle moves.
//!
//! Validates the forward-only transition locally, so an illegal move is
//! rejected before any backend request is issued. Opening a cycle returns
//! the `Opened` event; dispatching notifications from it is the caller's
//! job, not this crate's.

use std::sync::Arc;

use crate::domain::cycle::{Cycle, CycleEvent, CycleStatus};
use crate::domain::foundation::{CycleId, DomainError, ErrorCode};
use crate::ports::CycleStore;

/// Command to move a cycle to a new status.
#[derive(Debug, Clone)]
pub struct TransitionCycleCommand {
    pub cycle_id: CycleId,
    pub target: CycleStatus,
}

/// Result of a successful transition.
#[derive(Debug, Clone)]
pub struct TransitionedCycle {
    /// The cycle as the backend returned it after the change.
    pub cycle: Cycle,
    /// Domain events for the caller to dispatch (notifications on open).
    pub events: Vec<CycleEvent>,
}

/// Error type for cycle transitions.
#[derive(Debug, Clone)]
pub enum TransitionCycleError {
    /// Cycle not found.
    NotFound(CycleId),
    /// The move is not a strictly forward transition.
    InvalidTransition(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl std::fmt::Display for TransitionCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransitionCycleError::NotFound(id) => write!(f, "Cycle not found: {}", id),
            TransitionCycleError::InvalidTransition(msg) => {
                write!(f, "Invalid transition: {}", msg)
            }
            TransitionCycleError::Infrastructure(msg) => {
                write!(f, "Infrastructure error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TransitionCycleError {}

impl From<DomainError> for TransitionCycleError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidTransition => TransitionCycleError::InvalidTransition(err.message),
            _ => TransitionCycleError::Infrastructure(err.message),
        }
    }
}

/// Handler for administrator-driven cycle status changes.
pub struct TransitionCycleHandler {
    store: Arc<dyn CycleStore>,
}

impl TransitionCycleHandler {
    pub fn new(store: Arc<dyn CycleStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: TransitionCycleCommand,
    ) -> Result<TransitionedCycle, TransitionCycleError> {
        // 1. Load and validate locally before touching the backend.
        let mut cycle = self
            .store
            .get(cmd.cycle_id)
            .await?
            .ok_or(TransitionCycleError::NotFound(cmd.cycle_id))?;

        cycle.transition(cmd.target)?;
        let events = cycle.take_events();

        // 2. Persist the change; the backend's view wins.
        let updated = self.store.change_status(cmd.cycle_id, cmd.target).await?;

        tracing::info!(
            cycle_id = %cmd.cycle_id,
            target = %cmd.target,
            "cycle transitioned"
        );

        Ok(TransitionedCycle {
            cycle: updated,
            events,
        })
    }
}
