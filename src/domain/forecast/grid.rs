//! Forecast grid - the reconciled view of one customer's products.
//!
//! The grid is a pure projection: catalog products and fetched forecast
//! records merge into one row per product, keyed by explicit identifier
//! matching. It is rebuilt from scratch on every customer or cycle change,
//! never patched incrementally.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::catalog::Product;
use crate::domain::cycle::CycleStatus;
use crate::domain::foundation::{
    CustomerId, CycleId, DomainError, ErrorCode, PlanningCalendar, PlanningMonth, ProductId,
};

use super::{check_editable, ForecastRecord};

/// One row of the grid: a product and its forecast, if one exists yet.
///
/// The record stays None until the first edit; no placeholder is
/// synthesized just for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub product: Product,
    pub record: Option<ForecastRecord>,
}

impl GridRow {
    /// Total quantity of the bound record, zero when unbound.
    pub fn total_quantity(&self) -> u64 {
        self.record.as_ref().map_or(0, ForecastRecord::total_quantity)
    }
}

/// Merges catalog products with fetched forecast records.
///
/// Produces exactly one row per product, in catalog order. Repeated
/// catalog entries (a capped pagination overrun can re-serve earlier
/// pages) collapse to their first occurrence. Records for products no
/// longer in the catalog are ignored. Duplicate records for one product
/// violate the backend uniqueness invariant; the first one wins and a
/// `DataIntegrityWarning` is collected instead of failing the build.
pub fn reconcile(
    products: Vec<Product>,
    records: Vec<ForecastRecord>,
) -> (Vec<GridRow>, Vec<DomainError>) {
    let mut by_product: HashMap<ProductId, ForecastRecord> = HashMap::new();
    let mut warnings = Vec::new();

    for record in records {
        let product_id = record.product_id();
        if by_product.contains_key(&product_id) {
            tracing::warn!(product_id = %product_id, "duplicate forecast record for product, binding the first");
            warnings.push(
                DomainError::new(
                    ErrorCode::DataIntegrityWarning,
                    "Duplicate forecast record for product",
                )
                .with_detail("product_id", product_id.to_string()),
            );
            continue;
        }
        by_product.insert(product_id, record);
    }

    let mut seen: HashSet<ProductId> = HashSet::new();
    let rows = products
        .into_iter()
        .filter(|product| seen.insert(product.id))
        .map(|product| {
            let record = by_product.remove(&product.id);
            GridRow { product, record }
        })
        .collect();

    (rows, warnings)
}

/// The materialized grid for one customer within one cycle.
#[derive(Debug, Clone)]
pub struct ForecastGrid {
    cycle_id: CycleId,
    customer_id: CustomerId,
    cycle_status: CycleStatus,
    calendar: PlanningCalendar,
    rows: Vec<GridRow>,
    warnings: Vec<DomainError>,
}

impl ForecastGrid {
    /// Builds the grid from reconciled rows and cycle context.
    pub fn new(
        cycle_id: CycleId,
        customer_id: CustomerId,
        cycle_status: CycleStatus,
        calendar: PlanningCalendar,
        rows: Vec<GridRow>,
        warnings: Vec<DomainError>,
    ) -> Self {
        Self {
            cycle_id,
            customer_id,
            cycle_status,
            calendar,
            rows,
            warnings,
        }
    }

    /// Returns the owning cycle.
    pub fn cycle_id(&self) -> CycleId {
        self.cycle_id
    }

    /// Returns the selected customer.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Returns the status of the owning cycle at build time.
    pub fn cycle_status(&self) -> CycleStatus {
        self.cycle_status
    }

    /// Returns the planning calendar the grid addresses.
    pub fn calendar(&self) -> &PlanningCalendar {
        &self.calendar
    }

    /// Flat row sequence, one per product, for external formatters.
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Non-fatal data-quality warnings collected during the build.
    pub fn warnings(&self) -> &[DomainError] {
        &self.warnings
    }

    /// Returns the row for `product_id`, if the product is in the catalog.
    pub fn row(&self, product_id: ProductId) -> Option<&GridRow> {
        self.rows.iter().find(|r| r.product.id == product_id)
    }

    /// Sum of all row totals.
    pub fn total_quantity(&self) -> u64 {
        self.rows.iter().map(GridRow::total_quantity).sum()
    }

    /// Sets a single cell's quantity - the only edit entry point.
    ///
    /// Fails with `NotEditable` unless the cycle is Open and the bound
    /// record (if any) is Draft. The first edit on an unbound row
    /// synthesizes an unsaved Draft record covering the whole planning
    /// horizon. Other rows are never touched.
    pub fn set_quantity(
        &mut self,
        product_id: ProductId,
        month: PlanningMonth,
        quantity: u32,
    ) -> Result<(), DomainError> {
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.product.id == product_id)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ValidationFailed,
                    "Product is not part of this customer's grid",
                )
                .with_detail("product_id", product_id.to_string())
            })?;

        check_editable(self.cycle_status, row.record.as_ref().map(|r| r.status()))?;

        let record = row.record.get_or_insert_with(|| {
            ForecastRecord::draft(self.cycle_id, self.customer_id, product_id, &self.calendar)
        });
        record.set_quantity(month, quantity)
    }
}
