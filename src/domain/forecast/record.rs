//! ForecastRecord - a customer/product/cycle-scoped set of monthly quantities.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CustomerId, CycleId, DomainError, ErrorCode, ForecastId, PlanningCalendar, PlanningMonth,
    ProductId,
};

/// Approval status of a forecast record.
///
/// Only `Draft` is mutable. A rejected record does not reopen for editing
/// here; reactivation is an explicit administrator action outside this
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl RecordStatus {
    /// Returns true if quantity edits are allowed in this status.
    pub fn is_mutable(&self) -> bool {
        matches!(self, RecordStatus::Draft)
    }
}

/// Whether the record has been persisted by the backend.
///
/// A tagged variant instead of a sentinel identifier, so the
/// create-vs-update branch in the save path is exhaustive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordIdentity {
    /// Synthesized locally on first edit; the backend has never seen it.
    Unsaved,
    /// Persisted; the backend assigned this identifier.
    Persisted(ForecastId),
}

impl RecordIdentity {
    /// Returns the persisted identifier, if any.
    pub fn forecast_id(&self) -> Option<&ForecastId> {
        match self {
            RecordIdentity::Unsaved => None,
            RecordIdentity::Persisted(id) => Some(id),
        }
    }

    /// Returns true if the backend has never seen this record.
    pub fn is_unsaved(&self) -> bool {
        matches!(self, RecordIdentity::Unsaved)
    }
}

/// One month's forecast quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub month: PlanningMonth,
    pub quantity: u32,
}

/// Pricing mode for a forecast line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    /// Use the customer-negotiated price instead of the product default.
    pub use_customer_price: bool,
    /// Manual override; takes precedence when set.
    pub override_price: Option<f64>,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            use_customer_price: true,
            override_price: None,
        }
    }
}

/// A forecast for one (cycle, customer, product) triple.
///
/// At most one record exists per triple; the backend is the arbiter of
/// that invariant and this type merely tolerates violations upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    identity: RecordIdentity,
    cycle_id: CycleId,
    customer_id: CustomerId,
    product_id: ProductId,
    status: RecordStatus,
    months: Vec<MonthEntry>,
    pricing: Pricing,
}

impl ForecastRecord {
    /// Synthesizes the in-memory placeholder created on first edit.
    ///
    /// Status Draft, identity Unsaved, and one zero-quantity entry per
    /// planning month so every cell of the row is addressable.
    pub fn draft(
        cycle_id: CycleId,
        customer_id: CustomerId,
        product_id: ProductId,
        calendar: &PlanningCalendar,
    ) -> Self {
        let months = calendar
            .slots()
            .iter()
            .map(|slot| MonthEntry {
                month: slot.month,
                quantity: 0,
            })
            .collect();

        Self {
            identity: RecordIdentity::Unsaved,
            cycle_id,
            customer_id,
            product_id,
            status: RecordStatus::Draft,
            months,
            pricing: Pricing::default(),
        }
    }

    /// Reconstitutes a persisted record from backend data.
    pub fn reconstitute(
        id: ForecastId,
        cycle_id: CycleId,
        customer_id: CustomerId,
        product_id: ProductId,
        status: RecordStatus,
        months: Vec<MonthEntry>,
        pricing: Pricing,
    ) -> Self {
        Self {
            identity: RecordIdentity::Persisted(id),
            cycle_id,
            customer_id,
            product_id,
            status,
            months,
            pricing,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the persistence identity.
    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    /// Returns the owning cycle.
    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    /// Returns the owning customer.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the forecasted product.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Returns the approval status.
    pub fn status(&self) -> RecordStatus {
        self.status
    }

    /// Returns the month entries in calendar order.
    pub fn months(&self) -> &[MonthEntry] {
        &self.months
    }

    /// Returns the pricing mode.
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Returns the quantity entered for `month`, or None if absent.
    pub fn quantity_for(&self, month: PlanningMonth) -> Option<u32> {
        self.months
            .iter()
            .find(|e| e.month == month)
            .map(|e| e.quantity)
    }

    /// Sum of all month quantities, computed on demand.
    pub fn total_quantity(&self) -> u64 {
        self.months.iter().map(|e| e.quantity as u64).sum()
    }

    // ───────────────────────────────────────────────────────────────
    // Mutation
    // ───────────────────────────────────────────────────────────────

    /// Sets the quantity for a single month.
    ///
    /// Inserts the entry if absent, replaces it if present; never touches
    /// any other month. Rejected with `NotEditable` unless the record is
    /// still Draft - submitted, approved, and rejected records are
    /// immutable here, before any backend round trip.
    pub fn set_quantity(&mut self, month: PlanningMonth, quantity: u32) -> Result<(), DomainError> {
        if !self.status.is_mutable() {
            return Err(DomainError::new(
                ErrorCode::NotEditable,
                format!("Forecast is {:?} and can no longer be edited", self.status),
            )
            .with_detail("product_id", self.product_id.to_string()));
        }

        match self.months.iter_mut().find(|e| e.month == month) {
            Some(entry) => entry.quantity = quantity,
            None => {
                self.months.push(MonthEntry { month, quantity });
                self.months.sort_by_key(|e| e.month);
            }
        }
        Ok(())
    }

    /// Sets the pricing mode (same editability rule as quantities).
    pub fn set_pricing(&mut self, pricing: Pricing) -> Result<(), DomainError> {
        if !self.status.is_mutable() {
            return Err(DomainError::new(
                ErrorCode::NotEditable,
                format!("Forecast is {:?} and can no longer be edited", self.status),
            ));
        }
        self.pricing = pricing;
        Ok(())
    }

    /// Marks the record submitted (used when mirroring a backend submit).
    pub fn mark_submitted(&mut self) {
        self.status = RecordStatus::Submitted;
    }

    /// Marks the record persisted under the backend-assigned identifier.
    pub fn mark_persisted(&mut self, id: ForecastId) {
        self.identity = RecordIdentity::Persisted(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar() -> PlanningCalendar {
        PlanningCalendar::from_start(PlanningMonth::new(2025, 1).unwrap())
    }

    fn draft_record() -> ForecastRecord {
        ForecastRecord::draft(
            CycleId::new(),
            CustomerId::new(),
            ProductId::new(),
            &calendar(),
        )
    }

    #[test]
    fn draft_is_unsaved_with_zeroed_horizon() {
        let record = draft_record();
        assert!(record.identity().is_unsaved());
        assert_eq!(record.status(), RecordStatus::Draft);
        assert_eq!(record.months().len(), 16);
        assert!(record.months().iter().all(|e| e.quantity == 0));
        assert_eq!(record.total_quantity(), 0);
    }

    #[test]
    fn set_quantity_replaces_only_the_targeted_month() {
        let mut record = draft_record();
        let jan = PlanningMonth::new(2025, 1).unwrap();
        let feb = PlanningMonth::new(2025, 2).unwrap();

        record.set_quantity(jan, 100).unwrap();
        record.set_quantity(feb, 40).unwrap();
        record.set_quantity(jan, 70).unwrap();

        assert_eq!(record.quantity_for(jan), Some(70));
        assert_eq!(record.quantity_for(feb), Some(40));
        assert_eq!(record.total_quantity(), 110);
    }

    #[test]
    fn set_quantity_is_idempotent_for_totals() {
        let mut record = draft_record();
        let mar = PlanningMonth::new(2025, 3).unwrap();

        record.set_quantity(mar, 55).unwrap();
        let total = record.total_quantity();
        record.set_quantity(mar, 55).unwrap();
        assert_eq!(record.total_quantity(), total);
    }

    #[test]
    fn set_quantity_inserts_missing_months_in_order() {
        let id = ForecastId::new("fc-1").unwrap();
        // Sparse record as the backend may return it.
        let mut record = ForecastRecord::reconstitute(
            id,
            CycleId::new(),
            CustomerId::new(),
            ProductId::new(),
            RecordStatus::Draft,
            vec![MonthEntry {
                month: PlanningMonth::new(2025, 3).unwrap(),
                quantity: 10,
            }],
            Pricing::default(),
        );

        record
            .set_quantity(PlanningMonth::new(2025, 1).unwrap(), 5)
            .unwrap();

        let labels: Vec<String> = record.months().iter().map(|e| e.month.label()).collect();
        assert_eq!(labels, vec!["2025-01", "2025-03"]);
        assert_eq!(record.total_quantity(), 15);
    }

    #[test]
    fn submitted_record_rejects_edits_locally() {
        let mut record = draft_record();
        record.mark_submitted();

        let result = record.set_quantity(PlanningMonth::new(2025, 1).unwrap(), 10);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::NotEditable);
    }

    #[test]
    fn approved_and_rejected_records_are_immutable() {
        for status in [RecordStatus::Approved, RecordStatus::Rejected] {
            let mut record = ForecastRecord::reconstitute(
                ForecastId::new("fc-2").unwrap(),
                CycleId::new(),
                CustomerId::new(),
                ProductId::new(),
                status,
                Vec::new(),
                Pricing::default(),
            );
            let result = record.set_quantity(PlanningMonth::new(2025, 1).unwrap(), 1);
            assert_eq!(result.unwrap_err().code, ErrorCode::NotEditable);
            assert!(record.set_pricing(Pricing::default()).is_err());
        }
    }

    #[test]
    fn mark_persisted_switches_identity() {
        let mut record = draft_record();
        record.mark_persisted(ForecastId::new("fc-9").unwrap());
        assert_eq!(
            record.identity().forecast_id().map(|id| id.as_str()),
            Some("fc-9")
        );
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecordStatus::Draft).unwrap(),
            "\"DRAFT\""
        );
        assert_eq!(
            serde_json::to_string(&RecordStatus::Submitted).unwrap(),
            "\"SUBMITTED\""
        );
    }
}
