//! In-memory forecast store.
//!
//! Mirrors the backend's batch semantics: unsaved records get an assigned
//! identifier, per-row rejections land in the report, and a submit flips
//! the stored record to Submitted.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::forecast::ForecastRecord;
use crate::domain::foundation::{
    CustomerId, CycleId, DomainError, ErrorCode, ForecastId, ProductId,
};
use crate::ports::{BatchWriteReport, ForecastStore, RowFailure};

/// In-memory implementation of [`ForecastStore`].
#[derive(Debug, Default)]
pub struct InMemoryForecastStore {
    records: RwLock<Vec<ForecastRecord>>,
    next_id: AtomicU64,
    failing_writes: RwLock<HashSet<ProductId>>,
    failing_submits: RwLock<HashSet<ProductId>>,
}

impl InMemoryForecastStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects future writes for this product with a row-level failure.
    pub fn fail_writes_for(&self, product_id: ProductId) {
        self.failing_writes
            .write()
            .expect("lock poisoned")
            .insert(product_id);
    }

    /// Rejects future submits for records of this product.
    pub fn fail_submits_for(&self, product_id: ProductId) {
        self.failing_submits
            .write()
            .expect("lock poisoned")
            .insert(product_id);
    }

    /// Number of stored records across all cycles and customers.
    pub fn record_count(&self) -> usize {
        self.records.read().expect("lock poisoned").len()
    }

    fn assign_id(&self) -> ForecastId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        ForecastId::new(format!("fc-{n}")).expect("generated identifier is non-empty")
    }
}

#[async_trait]
impl ForecastStore for InMemoryForecastStore {
    async fn list(
        &self,
        cycle_id: CycleId,
        customer_id: CustomerId,
    ) -> Result<Vec<ForecastRecord>, DomainError> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records
            .iter()
            .filter(|r| r.cycle_id() == cycle_id && r.customer_id() == customer_id)
            .cloned()
            .collect())
    }

    async fn create_or_update(
        &self,
        _cycle_id: CycleId,
        _customer_id: CustomerId,
        records: Vec<ForecastRecord>,
    ) -> Result<BatchWriteReport, DomainError> {
        let mut report = BatchWriteReport::default();
        let failing = self.failing_writes.read().expect("lock poisoned").clone();
        let mut stored = self.records.write().expect("lock poisoned");

        for mut record in records {
            if failing.contains(&record.product_id()) {
                report.failures.push(RowFailure {
                    product_id: record.product_id(),
                    message: "row rejected by store".to_string(),
                });
                continue;
            }

            match record.identity().forecast_id().cloned() {
                None => {
                    record.mark_persisted(self.assign_id());
                    stored.push(record);
                    report.created += 1;
                }
                Some(id) => {
                    match stored
                        .iter_mut()
                        .find(|r| r.identity().forecast_id() == Some(&id))
                    {
                        Some(existing) => *existing = record,
                        // Unknown identifier; treat as an upsert.
                        None => stored.push(record),
                    }
                    report.updated += 1;
                }
            }
        }

        Ok(report)
    }

    async fn submit(&self, id: &ForecastId) -> Result<ForecastRecord, DomainError> {
        let mut stored = self.records.write().expect("lock poisoned");
        let record = stored
            .iter_mut()
            .find(|r| r.identity().forecast_id() == Some(id))
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ForecastNotFound, "No forecast with this identifier")
                    .with_detail("forecast_id", id.to_string())
            })?;

        if self
            .failing_submits
            .read()
            .expect("lock poisoned")
            .contains(&record.product_id())
        {
            return Err(DomainError::new(
                ErrorCode::PersistenceFailure,
                "Submit rejected by store",
            )
            .with_detail("forecast_id", id.to_string()));
        }

        record.mark_submitted();
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::RecordStatus;
    use crate::domain::foundation::{PlanningCalendar, PlanningMonth};

    fn draft(cycle_id: CycleId, customer_id: CustomerId) -> ForecastRecord {
        let calendar = PlanningCalendar::from_start(PlanningMonth::new(2025, 1).unwrap());
        ForecastRecord::draft(cycle_id, customer_id, ProductId::new(), &calendar)
    }

    #[tokio::test]
    async fn create_assigns_identifiers() {
        let store = InMemoryForecastStore::new();
        let cycle_id = CycleId::new();
        let customer_id = CustomerId::new();

        let report = store
            .create_or_update(
                cycle_id,
                customer_id,
                vec![draft(cycle_id, customer_id), draft(cycle_id, customer_id)],
            )
            .await
            .unwrap();

        assert_eq!(report.created, 2);
        let listed = store.list(cycle_id, customer_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|r| !r.identity().is_unsaved()));
    }

    #[tokio::test]
    async fn list_is_scoped_to_cycle_and_customer() {
        let store = InMemoryForecastStore::new();
        let cycle_id = CycleId::new();
        let customer_a = CustomerId::new();
        let customer_b = CustomerId::new();

        store
            .create_or_update(cycle_id, customer_a, vec![draft(cycle_id, customer_a)])
            .await
            .unwrap();
        store
            .create_or_update(cycle_id, customer_b, vec![draft(cycle_id, customer_b)])
            .await
            .unwrap();

        assert_eq!(store.list(cycle_id, customer_a).await.unwrap().len(), 1);
        assert_eq!(store.record_count(), 2);
    }

    #[tokio::test]
    async fn submit_flips_the_stored_record() {
        let store = InMemoryForecastStore::new();
        let cycle_id = CycleId::new();
        let customer_id = CustomerId::new();

        store
            .create_or_update(cycle_id, customer_id, vec![draft(cycle_id, customer_id)])
            .await
            .unwrap();
        let id = store.list(cycle_id, customer_id).await.unwrap()[0]
            .identity()
            .forecast_id()
            .cloned()
            .unwrap();

        let submitted = store.submit(&id).await.unwrap();
        assert_eq!(submitted.status(), RecordStatus::Submitted);
        assert_eq!(
            store.list(cycle_id, customer_id).await.unwrap()[0].status(),
            RecordStatus::Submitted
        );
    }

    #[tokio::test]
    async fn submit_of_unknown_id_is_not_found() {
        let store = InMemoryForecastStore::new();
        let err = store
            .submit(&ForecastId::new("fc-404").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ForecastNotFound);
    }
}
