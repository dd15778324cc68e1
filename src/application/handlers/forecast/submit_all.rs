//! SubmitAllHandler - save everything, then submit row by row.
//!
//! Submission is best-effort, not all-or-nothing: a single record's
//! validation or backend failure is logged and recorded but never aborts
//! the remaining submissions. Within a row the save always completes
//! before that row's submit is attempted.

use std::sync::Arc;

use crate::domain::cycle::Cycle;
use crate::domain::forecast::{validate_for_submit, GridRow, RecordStatus};
use crate::domain::foundation::{CustomerId, DomainError, ProductId};
use crate::ports::ForecastStore;

use super::{SaveAllCommand, SaveAllError, SaveAllHandler, SaveSummary};

/// Command to save and submit a customer's grid.
#[derive(Debug, Clone)]
pub struct SubmitAllCommand {
    pub customer_id: CustomerId,
    pub rows: Vec<GridRow>,
}

/// One record that could not be submitted.
#[derive(Debug, Clone)]
pub struct SubmitFailure {
    pub product_id: ProductId,
    pub error: DomainError,
}

/// Outcome of a save-and-submit pass.
#[derive(Debug, Clone)]
pub struct SubmitSummary {
    /// The preceding batch save.
    pub save: SaveSummary,
    /// Records the backend accepted as submitted.
    pub submitted: u32,
    /// Per-record validation and persistence failures.
    pub failures: Vec<SubmitFailure>,
}

/// Error type for the submit workflow.
#[derive(Debug, Clone)]
pub enum SubmitAllError {
    /// The batch save or the refetch failed outright.
    Infrastructure(String),
}

impl std::fmt::Display for SubmitAllError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitAllError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
        }
    }
}

impl std::error::Error for SubmitAllError {}

impl From<DomainError> for SubmitAllError {
    fn from(err: DomainError) -> Self {
        SubmitAllError::Infrastructure(err.message)
    }
}

impl From<SaveAllError> for SubmitAllError {
    fn from(err: SaveAllError) -> Self {
        match err {
            SaveAllError::Infrastructure(msg) => SubmitAllError::Infrastructure(msg),
        }
    }
}

/// Handler driving the full submit workflow for one customer's grid.
pub struct SubmitAllHandler {
    saver: SaveAllHandler,
    store: Arc<dyn ForecastStore>,
}

impl SubmitAllHandler {
    pub fn new(store: Arc<dyn ForecastStore>) -> Self {
        Self {
            saver: SaveAllHandler::new(store.clone()),
            store,
        }
    }

    /// Saves all draft rows, then submits each persisted draft in turn.
    ///
    /// The batch create/update response carries no identifiers, so the
    /// persisted records are refetched before submitting; rows whose
    /// create failed are naturally absent and skipped. Each record must
    /// pass mandatory-month validation before its submit is issued.
    pub async fn handle(
        &self,
        cycle: &Cycle,
        cmd: SubmitAllCommand,
    ) -> Result<SubmitSummary, SubmitAllError> {
        let save = self
            .saver
            .handle(SaveAllCommand {
                cycle_id: cycle.id(),
                customer_id: cmd.customer_id,
                rows: cmd.rows,
            })
            .await?;

        let calendar = cycle.planning_calendar();
        let persisted = self.store.list(cycle.id(), cmd.customer_id).await?;

        let mut submitted = 0u32;
        let mut failures = Vec::new();

        for record in persisted {
            if record.status() != RecordStatus::Draft {
                continue;
            }
            let id = match record.identity().forecast_id() {
                Some(id) => id.clone(),
                // A draft without an identifier never reached the backend.
                None => continue,
            };

            if let Err(error) = validate_for_submit(&record, &calendar) {
                failures.push(SubmitFailure {
                    product_id: record.product_id(),
                    error,
                });
                continue;
            }

            match self.store.submit(&id).await {
                Ok(_) => submitted += 1,
                Err(error) => {
                    tracing::warn!(
                        forecast_id = %id,
                        product_id = %record.product_id(),
                        error = %error,
                        "submit failed for one record, continuing with the rest"
                    );
                    failures.push(SubmitFailure {
                        product_id: record.product_id(),
                        error,
                    });
                }
            }
        }

        Ok(SubmitSummary {
            save,
            submitted,
            failures,
        })
    }
}
