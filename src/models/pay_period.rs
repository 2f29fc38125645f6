//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type and the [`PeriodState`]
//! lifecycle that decides whether a period still accepts payroll writes.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Lifecycle state of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodState {
    /// Accepting calculations.
    Open,
    /// Calculations under way.
    InProgress,
    /// Closed for changes.
    Closed,
    /// Paid out; closed for changes.
    Paid,
}

impl PeriodState {
    /// Returns true if the period no longer accepts payroll writes.
    pub fn is_closed(&self) -> bool {
        matches!(self, PeriodState::Closed | PeriodState::Paid)
    }
}

impl fmt::Display for PeriodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PeriodState::Open => "OPEN",
            PeriodState::InProgress => "IN_PROGRESS",
            PeriodState::Closed => "CLOSED",
            PeriodState::Paid => "PAID",
        })
    }
}

/// One calendar month for which payroll is computed.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollPeriod, PeriodState};
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     id: "2026-01".to_string(),
///     year: 2026,
///     month: 1,
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     payment_date: NaiveDate::from_ymd_opt(2026, 2, 5).unwrap(),
///     state: PeriodState::Open,
/// };
///
/// assert_eq!(period.label(), "2026-01");
/// assert_eq!(period.evaluation_date(), period.end_date);
/// assert!(!period.is_closed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier for the period.
    pub id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Scheduled payment date.
    pub payment_date: NaiveDate,
    /// Current lifecycle state.
    pub state: PeriodState,
}

impl PayrollPeriod {
    /// Returns the period as `YYYY-MM`.
    pub fn label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }

    /// The date tenure-dependent rules are evaluated against.
    pub fn evaluation_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Returns true if the period is closed or paid.
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// Checks the month is in range and the date range is well-formed.
    pub fn validate(&self) -> EngineResult<()> {
        if !(1..=12).contains(&self.month) {
            return Err(EngineError::invalid_input(
                "month",
                format!("must be between 1 and 12, got {}", self.month),
            ));
        }
        if self.end_date < self.start_date {
            return Err(EngineError::invalid_input(
                "end_date",
                format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            ));
        }
        Ok(())
    }
}
