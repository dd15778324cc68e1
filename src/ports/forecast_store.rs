//! Forecast store port (read and write side).

use async_trait::async_trait;

use crate::domain::forecast::ForecastRecord;
use crate::domain::foundation::{CustomerId, CycleId, DomainError, ForecastId, ProductId};

/// A single row the backend rejected during a batch write.
#[derive(Debug, Clone)]
pub struct RowFailure {
    pub product_id: ProductId,
    pub message: String,
}

/// Outcome of a batch create-or-update.
///
/// Partial failure is the expected shape: successes are never rolled back
/// when sibling rows fail.
#[derive(Debug, Clone, Default)]
pub struct BatchWriteReport {
    pub created: u32,
    pub updated: u32,
    pub failures: Vec<RowFailure>,
}

/// Persistence for forecast records.
///
/// The import path (parsed upload rows) and manual grid edits both flow
/// through `create_or_update`; implementations must not distinguish them.
#[async_trait]
pub trait ForecastStore: Send + Sync {
    /// Lists all records for (cycle, customer).
    ///
    /// # Errors
    ///
    /// - `ApiError` on transport or decoding failure
    async fn list(
        &self,
        cycle_id: CycleId,
        customer_id: CustomerId,
    ) -> Result<Vec<ForecastRecord>, DomainError>;

    /// Persists a batch of records in one request.
    ///
    /// Unsaved records are created, persisted ones updated. Row-level
    /// rejections land in the report, not in the error channel.
    ///
    /// # Errors
    ///
    /// - `PersistenceFailure` if the batch request itself fails
    async fn create_or_update(
        &self,
        cycle_id: CycleId,
        customer_id: CustomerId,
        records: Vec<ForecastRecord>,
    ) -> Result<BatchWriteReport, DomainError>;

    /// Submits one persisted record, returning its new state.
    ///
    /// # Errors
    ///
    /// - `ForecastNotFound` if the identifier is unknown
    /// - `PersistenceFailure` if the backend rejects the submit
    async fn submit(&self, id: &ForecastId) -> Result<ForecastRecord, DomainError>;
}
