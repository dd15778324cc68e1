//! BuildGridHandler - the forecast grid reconciler.
//!
//! Merges three independently fetched collections - the active cycle, the
//! customer's product catalog, and the existing forecast records - into
//! one coherent grid. The merge is a pure function from the fetched
//! sequences to rows; this handler only orchestrates the fetches and the
//! staleness check.

use std::sync::Arc;

use crate::domain::catalog::{CatalogFilter, CatalogKind};
use crate::domain::cycle::Cycle;
use crate::domain::forecast::{reconcile, ForecastGrid};
use crate::domain::foundation::{CustomerId, DomainError};
use crate::ports::{CatalogSource, ForecastStore};

use super::{SelectionToken, SelectionTracker};
use crate::application::handlers::catalog::CatalogPager;

/// Query to build the grid for one customer within the active cycle.
#[derive(Debug, Clone)]
pub struct BuildGridQuery {
    pub customer_id: CustomerId,
    pub token: SelectionToken,
}

/// Error type for grid builds.
#[derive(Debug, Clone)]
pub enum BuildGridError {
    /// The selection changed while the fetches were in flight; the result
    /// was discarded, not applied.
    SelectionChanged,
    /// Infrastructure error.
    Infrastructure(String),
}

impl std::fmt::Display for BuildGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildGridError::SelectionChanged => {
                write!(f, "Selection changed while the grid was loading")
            }
            BuildGridError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
        }
    }
}

impl std::error::Error for BuildGridError {}

impl From<DomainError> for BuildGridError {
    fn from(err: DomainError) -> Self {
        BuildGridError::Infrastructure(err.message)
    }
}

/// Handler that rebuilds the grid from scratch for a customer selection.
///
/// Every rebuild fully replaces the prior row set; nothing is patched in
/// place, so a degraded fetch can at worst produce a degraded grid, never
/// a half-updated one.
pub struct BuildGridHandler {
    pager: CatalogPager,
    forecasts: Arc<dyn ForecastStore>,
    tracker: Arc<SelectionTracker>,
}

impl BuildGridHandler {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        forecasts: Arc<dyn ForecastStore>,
        tracker: Arc<SelectionTracker>,
        page_size: u32,
    ) -> Self {
        Self {
            pager: CatalogPager::new(catalog, page_size),
            forecasts,
            tracker,
        }
    }

    pub async fn handle(
        &self,
        cycle: &Cycle,
        query: BuildGridQuery,
    ) -> Result<ForecastGrid, BuildGridError> {
        // 1. Drain the customer's active-product catalog subset.
        let filter = CatalogFilter::active_products_for(query.customer_id);
        let fetch = self.pager.fetch_all(CatalogKind::Products, &filter).await?;

        // 2. Fetch existing records for (cycle, customer).
        let records = self
            .forecasts
            .list(cycle.id(), query.customer_id)
            .await?;

        // 3. Discard stale results: the user has moved on.
        if !self.tracker.is_current(query.token) {
            tracing::debug!(
                customer_id = %query.customer_id,
                "discarding grid build for a superseded selection"
            );
            return Err(BuildGridError::SelectionChanged);
        }

        // 4. Pure merge, one row per active product.
        let products = fetch
            .entries
            .iter()
            .filter_map(|e| e.as_product())
            .filter(|p| p.active)
            .cloned()
            .collect();
        let (rows, mut warnings) = reconcile(products, records);
        if let Some(overrun) = fetch.overrun {
            warnings.push(overrun);
        }

        Ok(ForecastGrid::new(
            cycle.id(),
            query.customer_id,
            cycle.status(),
            cycle.planning_calendar(),
            rows,
            warnings,
        ))
    }
}
