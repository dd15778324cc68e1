//! Cycle aggregate - the recurring planning period.
//!
//! A cycle covers a 16-month planning horizon and gates all forecast
//! editing through its status. Status transitions are validated locally
//! before any backend request is issued.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CycleId, DomainError, ErrorCode, PlanningCalendar, PlanningMonth,
};

use super::{CycleEvent, CycleStatus};

/// The Cycle aggregate root.
///
/// `start_date` and `close_date` are kept as the raw strings the backend
/// delivers: upstream sources are inconsistent about including a time
/// component, so parsing is deferred to the deadline evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cycle {
    id: CycleId,
    name: String,
    year: i32,
    month: u32,
    status: CycleStatus,
    start_date: Option<String>,
    close_date: Option<String>,
    planning_start_month: PlanningMonth,
    #[serde(skip)]
    domain_events: Vec<CycleEvent>,
}

impl Cycle {
    /// Creates a new cycle in Draft status (administrator action).
    pub fn new(
        name: impl Into<String>,
        year: i32,
        month: u32,
        planning_start_month: PlanningMonth,
    ) -> Self {
        Self {
            id: CycleId::new(),
            name: name.into(),
            year,
            month,
            status: CycleStatus::Draft,
            start_date: None,
            close_date: None,
            planning_start_month,
            domain_events: Vec::new(),
        }
    }

    /// Reconstitutes a cycle from backend data.
    ///
    /// Used by adapters to rebuild the aggregate from API responses; it
    /// bypasses domain event recording.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: CycleId,
        name: String,
        year: i32,
        month: u32,
        status: CycleStatus,
        start_date: Option<String>,
        close_date: Option<String>,
        planning_start_month: PlanningMonth,
    ) -> Self {
        Self {
            id,
            name,
            year,
            month,
            status,
            start_date,
            close_date,
            planning_start_month,
            domain_events: Vec::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    /// Returns the cycle ID.
    pub fn id(&self) -> CycleId {
        self.id
    }

    /// Returns the cycle's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the planning year the cycle belongs to.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the planning month the cycle belongs to (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the cycle status.
    pub fn status(&self) -> CycleStatus {
        self.status
    }

    /// Returns the raw start date string, if the backend supplied one.
    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    /// Returns the raw close date string, if the backend supplied one.
    pub fn close_date(&self) -> Option<&str> {
        self.close_date.as_deref()
    }

    /// Sets the date window (administrator action while drafting).
    pub fn set_dates(&mut self, start_date: Option<String>, close_date: Option<String>) {
        self.start_date = start_date;
        self.close_date = close_date;
    }

    /// Returns the first month of the planning horizon.
    pub fn planning_start_month(&self) -> PlanningMonth {
        self.planning_start_month
    }

    /// Returns the last month of the planning horizon (start + 15).
    pub fn planning_end_month(&self) -> PlanningMonth {
        self.planning_start_month.plus_months(15)
    }

    /// Returns the 16-month planning calendar.
    ///
    /// Recomputed on every call; never cached, so a changed active cycle
    /// can never serve a stale horizon.
    pub fn planning_calendar(&self) -> PlanningCalendar {
        PlanningCalendar::from_start(self.planning_start_month)
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<CycleEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Status Transitions
    // ───────────────────────────────────────────────────────────────

    /// Validates a transition without applying it.
    pub fn validate_transition(&self, target: CycleStatus) -> Result<(), DomainError> {
        if target == self.status {
            return Err(DomainError::new(
                ErrorCode::InvalidTransition,
                format!("Cycle is already {}", target),
            ));
        }
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidTransition,
                format!("Cannot move cycle backward from {} to {}", self.status, target),
            ));
        }
        Ok(())
    }

    /// Moves the cycle forward to `target`.
    ///
    /// Rejects `InvalidTransition` for same-status or backward moves.
    /// Opening a cycle records `CycleEvent::Opened` so the caller can
    /// dispatch notifications; this aggregate never dispatches anything
    /// itself.
    pub fn transition(&mut self, target: CycleStatus) -> Result<(), DomainError> {
        self.validate_transition(target)?;

        let from = self.status;
        self.status = target;

        self.record_event(CycleEvent::StatusChanged {
            cycle_id: self.id,
            from,
            to: target,
        });
        if from == CycleStatus::Draft && target == CycleStatus::Open {
            self.record_event(CycleEvent::Opened { cycle_id: self.id });
        }

        Ok(())
    }

    fn record_event(&mut self, event: CycleEvent) {
        self.domain_events.push(event);
    }
}
