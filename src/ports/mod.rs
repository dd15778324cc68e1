//! Ports - contracts to the backend data-access API.
//!
//! Following hexagonal architecture, ports define what this crate needs
//! from the outside world; adapters implement them. The backend remains
//! the sole arbiter of the one-record-per-(cycle, customer, product)
//! invariant, so conflicting writes surface as ordinary row failures,
//! never as logic faults.

mod catalog_source;
mod cycle_store;
mod forecast_store;

pub use catalog_source::{CatalogPage, CatalogSource};
pub use cycle_store::CycleStore;
pub use forecast_store::{BatchWriteReport, ForecastStore, RowFailure};
