//! Planning month value objects and the 16-month planning calendar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Number of consecutive calendar months a cycle plans over.
pub const PLANNING_HORIZON: usize = 16;

/// Number of leading months whose quantities are mandatory for submission.
pub const MANDATORY_MONTHS: usize = 12;

/// A calendar month, labeled `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanningMonth {
    year: i32,
    month: u32,
}

impl PlanningMonth {
    /// Creates a planning month, rejecting month values outside 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::out_of_range("month", 1, 12, month as i32));
        }
        Ok(Self { year, month })
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1..=12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the `YYYY-MM` label.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Returns the next calendar month, rolling over the year at December.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns this month advanced by `n` calendar months.
    pub fn plus_months(&self, n: u32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + n as i32;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }
}

impl fmt::Display for PlanningMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PlanningMonth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| ValidationError::invalid_format("planning_month", "expected YYYY-MM"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| ValidationError::invalid_format("planning_month", "invalid year"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ValidationError::invalid_format("planning_month", "invalid month"))?;
        Self::new(year, month)
    }
}

/// One month of the planning horizon, tagged mandatory or optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningSlot {
    pub month: PlanningMonth,
    pub is_mandatory: bool,
}

/// The 16-month planning horizon derived from a cycle's start month.
///
/// The first 12 slots are mandatory, the last 4 optional. This is pure and
/// deterministic from the start month; callers recompute it whenever the
/// active cycle changes rather than caching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningCalendar {
    slots: Vec<PlanningSlot>,
}

impl PlanningCalendar {
    /// Generates the ordered 16-month sequence starting at `start`.
    pub fn from_start(start: PlanningMonth) -> Self {
        let mut slots = Vec::with_capacity(PLANNING_HORIZON);
        let mut current = start;
        for index in 0..PLANNING_HORIZON {
            slots.push(PlanningSlot {
                month: current,
                is_mandatory: index < MANDATORY_MONTHS,
            });
            current = current.succ();
        }
        Self { slots }
    }

    /// Returns all 16 slots in calendar order.
    pub fn slots(&self) -> &[PlanningSlot] {
        &self.slots
    }

    /// Returns the first planning month.
    pub fn start_month(&self) -> PlanningMonth {
        self.slots[0].month
    }

    /// Returns the last planning month (start + 15 months).
    pub fn end_month(&self) -> PlanningMonth {
        self.slots[PLANNING_HORIZON - 1].month
    }

    /// Returns the mandatory months (first 12).
    pub fn mandatory_months(&self) -> impl Iterator<Item = PlanningMonth> + '_ {
        self.slots
            .iter()
            .filter(|s| s.is_mandatory)
            .map(|s| s.month)
    }

    /// Returns true if `month` falls inside the planning horizon.
    pub fn contains(&self, month: PlanningMonth) -> bool {
        self.slots.iter().any(|s| s.month == month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn month_label_is_zero_padded() {
        let m = PlanningMonth::new(2025, 3).unwrap();
        assert_eq!(m.label(), "2025-03");
    }

    #[test]
    fn month_rejects_invalid_values() {
        assert!(PlanningMonth::new(2025, 0).is_err());
        assert!(PlanningMonth::new(2025, 13).is_err());
    }

    #[test]
    fn succ_rolls_over_december() {
        let m = PlanningMonth::new(2025, 12).unwrap();
        assert_eq!(m.succ(), PlanningMonth::new(2026, 1).unwrap());
    }

    #[test]
    fn plus_months_crosses_year_boundary() {
        let m = PlanningMonth::new(2025, 11).unwrap();
        assert_eq!(m.plus_months(3), PlanningMonth::new(2026, 2).unwrap());
        assert_eq!(m.plus_months(15), PlanningMonth::new(2027, 2).unwrap());
    }

    #[test]
    fn parses_from_label() {
        let m: PlanningMonth = "2025-01".parse().unwrap();
        assert_eq!(m, PlanningMonth::new(2025, 1).unwrap());
    }

    #[test]
    fn rejects_malformed_labels() {
        assert!("202501".parse::<PlanningMonth>().is_err());
        assert!("2025-1x".parse::<PlanningMonth>().is_err());
    }

    #[test]
    fn calendar_spans_sixteen_months() {
        let cal = PlanningCalendar::from_start(PlanningMonth::new(2025, 1).unwrap());
        assert_eq!(cal.slots().len(), 16);
        assert_eq!(cal.start_month().label(), "2025-01");
        assert_eq!(cal.end_month().label(), "2026-04");
    }

    #[test]
    fn first_twelve_slots_are_mandatory() {
        let cal = PlanningCalendar::from_start(PlanningMonth::new(2025, 6).unwrap());
        for (i, slot) in cal.slots().iter().enumerate() {
            assert_eq!(slot.is_mandatory, i < 12, "slot {} tagged wrong", i);
        }
        assert_eq!(cal.mandatory_months().count(), 12);
    }

    #[test]
    fn contains_covers_only_the_horizon() {
        let cal = PlanningCalendar::from_start(PlanningMonth::new(2025, 1).unwrap());
        assert!(cal.contains(PlanningMonth::new(2025, 1).unwrap()));
        assert!(cal.contains(PlanningMonth::new(2026, 4).unwrap()));
        assert!(!cal.contains(PlanningMonth::new(2026, 5).unwrap()));
        assert!(!cal.contains(PlanningMonth::new(2024, 12).unwrap()));
    }

    proptest! {
        #[test]
        fn calendar_is_strictly_increasing_with_mandatory_prefix(
            year in 2000i32..2100,
            month in 1u32..=12,
        ) {
            let start = PlanningMonth::new(year, month).unwrap();
            let cal = PlanningCalendar::from_start(start);

            prop_assert_eq!(cal.slots().len(), PLANNING_HORIZON);
            for pair in cal.slots().windows(2) {
                prop_assert!(pair[0].month < pair[1].month);
                prop_assert_eq!(pair[1].month, pair[0].month.succ());
            }
            let mandatory = cal.slots().iter().filter(|s| s.is_mandatory).count();
            prop_assert_eq!(mandatory, MANDATORY_MONTHS);
            prop_assert!(cal.slots()[..MANDATORY_MONTHS].iter().all(|s| s.is_mandatory));
            prop_assert!(cal.slots()[MANDATORY_MONTHS..].iter().all(|s| !s.is_mandatory));
            prop_assert_eq!(cal.end_month(), start.plus_months(15));
        }
    }
}
