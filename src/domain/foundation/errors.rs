//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidFormat,
    MissingMandatoryMonths,

    // Not found errors
    CycleNotFound,
    ForecastNotFound,

    // State errors
    InvalidTransition,
    NotEditable,

    // Data quality warnings (non-fatal)
    PaginationOverrun,
    DataIntegrityWarning,

    // Persistence / infrastructure errors
    PersistenceFailure,
    ApiError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::MissingMandatoryMonths => "MISSING_MANDATORY_MONTHS",
            ErrorCode::CycleNotFound => "CYCLE_NOT_FOUND",
            ErrorCode::ForecastNotFound => "FORECAST_NOT_FOUND",
            ErrorCode::InvalidTransition => "INVALID_TRANSITION",
            ErrorCode::NotEditable => "NOT_EDITABLE",
            ErrorCode::PaginationOverrun => "PAGINATION_OVERRUN",
            ErrorCode::DataIntegrityWarning => "DATA_INTEGRITY_WARNING",
            ErrorCode::PersistenceFailure => "PERSISTENCE_FAILURE",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("customer_id");
        assert_eq!(format!("{}", err), "Field 'customer_id' cannot be empty");
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("close_date", "not an ISO date");
        assert_eq!(
            format!("{}", err),
            "Field 'close_date' has invalid format: not an ISO date"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::InvalidTransition, "Cannot move backward");
        assert_eq!(format!("{}", err), "[INVALID_TRANSITION] Cannot move backward");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::NotEditable, "Cycle is closed")
            .with_detail("cycle_status", "closed")
            .with_detail("record_status", "submitted");

        assert_eq!(err.details.get("cycle_status"), Some(&"closed".to_string()));
        assert_eq!(
            err.details.get("record_status"),
            Some(&"submitted".to_string())
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(
            format!("{}", ErrorCode::MissingMandatoryMonths),
            "MISSING_MANDATORY_MONTHS"
        );
        assert_eq!(format!("{}", ErrorCode::PaginationOverrun), "PAGINATION_OVERRUN");
    }
}
