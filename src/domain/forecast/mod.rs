//! Forecast - monthly quantity records and the reconciled customer grid.

mod grid;
mod record;
mod validation;

pub use grid::{reconcile, ForecastGrid, GridRow};
pub use record::{ForecastRecord, MonthEntry, Pricing, RecordIdentity, RecordStatus};
pub use validation::{check_editable, validate_for_submit};
