//! Deadline evaluation for cycle close dates.
//!
//! Classifies how much time remains before a cycle closes. This never
//! returns an error: a missing or unparseable close date degrades to an
//! `Error`-severity status with a diagnostic message so the rest of the
//! page can still render.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Cycle;

/// How urgently the deadline should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Result of evaluating a cycle's deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineStatus {
    pub severity: Severity,
    pub days_remaining: i64,
    pub message: String,
}

/// Within this many days of the close date the deadline turns to a warning.
const WARNING_WINDOW_DAYS: i64 = 3;

/// Parses a close date, tolerating the formats upstream actually sends.
///
/// Tries RFC 3339 with time first, then a naive datetime, then a bare date.
fn parse_close_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Evaluates the deadline state of `cycle` as of `today`.
///
/// `days_remaining` is calendar-day granularity (midnight to midnight),
/// not wall-clock hours. Classification:
/// - status not Open: Info, editing is disabled anyway
/// - deadline passed: Error
/// - closes today: Warning
/// - 1..=3 days left: Warning
/// - otherwise: Info
pub fn evaluate_deadline(cycle: &Cycle, today: NaiveDate) -> DeadlineStatus {
    let close_date = match cycle.close_date() {
        Some(raw) => match parse_close_date(raw) {
            Some(date) => date,
            None => {
                return DeadlineStatus {
                    severity: Severity::Error,
                    days_remaining: 0,
                    message: format!("Close date '{}' could not be parsed", raw),
                }
            }
        },
        None => {
            return DeadlineStatus {
                severity: Severity::Error,
                days_remaining: 0,
                message: "Cycle has no close date".to_string(),
            }
        }
    };

    let days_remaining = (close_date - today).num_days();

    if !cycle.status().is_open() {
        return DeadlineStatus {
            severity: Severity::Info,
            days_remaining,
            message: "Cycle not open, editing disabled".to_string(),
        };
    }

    let (severity, message) = if days_remaining < 0 {
        (Severity::Error, "Deadline passed".to_string())
    } else if days_remaining == 0 {
        (Severity::Warning, "Cycle closes today".to_string())
    } else if days_remaining <= WARNING_WINDOW_DAYS {
        (
            Severity::Warning,
            format!("Cycle closes in {} days", days_remaining),
        )
    } else {
        (
            Severity::Info,
            format!("{} days remaining", days_remaining),
        )
    };

    DeadlineStatus {
        severity,
        days_remaining,
        message,
    }
}
