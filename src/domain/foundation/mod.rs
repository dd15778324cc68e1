//! Foundation - shared value objects and error types.

mod errors;
mod ids;
mod month;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{CustomerId, CycleId, ForecastId, ProductId, SalesRepId};
pub use month::{PlanningCalendar, PlanningMonth, PlanningSlot, MANDATORY_MONTHS, PLANNING_HORIZON};
