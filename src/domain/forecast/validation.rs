//! Submission validation and editability rules.

use crate::domain::cycle::CycleStatus;
use crate::domain::foundation::{DomainError, ErrorCode, PlanningCalendar};

use super::{ForecastRecord, RecordStatus};

/// Checks whether a row may be edited at all.
///
/// Edits are allowed only while the owning cycle is Open and the bound
/// record, if any, is still Draft. Everything else fails with
/// `NotEditable` before reaching persistence.
pub fn check_editable(
    cycle_status: CycleStatus,
    record_status: Option<RecordStatus>,
) -> Result<(), DomainError> {
    if !cycle_status.is_open() {
        return Err(DomainError::new(
            ErrorCode::NotEditable,
            format!("Cycle is {} - forecasts can only be edited while it is open", cycle_status),
        )
        .with_detail("cycle_status", cycle_status.to_string()));
    }
    if let Some(status) = record_status {
        if !status.is_mutable() {
            return Err(DomainError::new(
                ErrorCode::NotEditable,
                format!("Forecast is {:?} and can no longer be edited", status),
            ));
        }
    }
    Ok(())
}

/// Validates a record for submission.
///
/// Every mandatory month (the first 12 of the planning calendar) must
/// carry at least 1 unit; a zero or absent quantity blocks the submit.
/// Optional months may legitimately stay at zero. On failure the error
/// lists exactly the offending month labels.
pub fn validate_for_submit(
    record: &ForecastRecord,
    calendar: &PlanningCalendar,
) -> Result<(), DomainError> {
    let missing: Vec<String> = calendar
        .mandatory_months()
        .filter(|month| record.quantity_for(*month).unwrap_or(0) == 0)
        .map(|month| month.label())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(DomainError::new(
        ErrorCode::MissingMandatoryMonths,
        format!("{} mandatory months have no quantity", missing.len()),
    )
    .with_detail("months", missing.join(",")))
}
