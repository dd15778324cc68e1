//! GetActiveCycleHandler - query for the cycle currently in planning.

use std::sync::Arc;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::DomainError;
use crate::ports::CycleStore;

/// Error type for the active-cycle query.
#[derive(Debug, Clone)]
pub enum GetActiveCycleError {
    /// Infrastructure error.
    Infrastructure(String),
}

impl std::fmt::Display for GetActiveCycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetActiveCycleError::Infrastructure(msg) => {
                write!(f, "Infrastructure error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GetActiveCycleError {}

impl From<DomainError> for GetActiveCycleError {
    fn from(err: DomainError) -> Self {
        GetActiveCycleError::Infrastructure(err.message)
    }
}

/// Handler returning the active cycle, or None when nothing is in planning.
pub struct GetActiveCycleHandler {
    store: Arc<dyn CycleStore>,
}

impl GetActiveCycleHandler {
    pub fn new(store: Arc<dyn CycleStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Option<Cycle>, GetActiveCycleError> {
        Ok(self.store.active_cycle().await?)
    }
}
