//! SaveAllHandler - persists the grid's bound records in one batch.

use std::sync::Arc;

use crate::domain::forecast::{ForecastRecord, GridRow};
use crate::domain::foundation::{CustomerId, CycleId, DomainError};
use crate::ports::{ForecastStore, RowFailure};

/// Command to save every editable bound row of a grid.
#[derive(Debug, Clone)]
pub struct SaveAllCommand {
    pub cycle_id: CycleId,
    pub customer_id: CustomerId,
    pub rows: Vec<GridRow>,
}

/// Outcome of a batch save.
///
/// Partial backend failure is an expected shape: successes stay saved and
/// the rejected rows are listed, never rolled back.
#[derive(Debug, Clone, Default)]
pub struct SaveSummary {
    pub created: u32,
    pub updated: u32,
    pub failures: Vec<RowFailure>,
}

impl SaveSummary {
    /// Number of rows the backend accepted.
    pub fn saved(&self) -> u32 {
        self.created + self.updated
    }
}

/// Error type for batch saves.
#[derive(Debug, Clone)]
pub enum SaveAllError {
    /// The batch request itself failed; nothing was persisted.
    Infrastructure(String),
}

impl std::fmt::Display for SaveAllError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveAllError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
        }
    }
}

impl std::error::Error for SaveAllError {}

impl From<DomainError> for SaveAllError {
    fn from(err: DomainError) -> Self {
        SaveAllError::Infrastructure(err.message)
    }
}

/// Handler that saves all draft records of a grid in a single request.
pub struct SaveAllHandler {
    store: Arc<dyn ForecastStore>,
}

impl SaveAllHandler {
    pub fn new(store: Arc<dyn ForecastStore>) -> Self {
        Self { store }
    }

    /// Persists every bound, still-draft record.
    ///
    /// Rows without a record (never edited) and rows whose record has
    /// left Draft are skipped; the latter cannot have local modifications
    /// because edits on them are rejected up front.
    pub async fn handle(&self, cmd: SaveAllCommand) -> Result<SaveSummary, SaveAllError> {
        let records: Vec<ForecastRecord> = cmd
            .rows
            .into_iter()
            .filter_map(|row| row.record)
            .filter(|record| record.status().is_mutable())
            .collect();

        if records.is_empty() {
            return Ok(SaveSummary::default());
        }

        let report = self
            .store
            .create_or_update(cmd.cycle_id, cmd.customer_id, records)
            .await?;

        if !report.failures.is_empty() {
            tracing::warn!(
                failed = report.failures.len(),
                created = report.created,
                updated = report.updated,
                "batch save completed with row failures"
            );
        }

        Ok(SaveSummary {
            created: report.created,
            updated: report.updated,
            failures: report.failures,
        })
    }
}
