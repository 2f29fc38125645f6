//! Period-specific calculation inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::{MAX_MONETARY_AMOUNT, within_limit};
use crate::error::EngineResult;

/// Most hours either hour field may report: every hour of a 31-day month.
pub const MAX_PERIOD_HOURS: Decimal = Decimal::from_parts(744, 0, 0, false, 0);

/// Hours and sales reported for one employee in one period.
///
/// All fields default to zero. Only the fields matching the employee's type
/// are read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInputs {
    /// Total hours worked in the period (hourly employees).
    #[serde(default)]
    pub hours_worked: Decimal,
    /// Explicitly reported overtime hours (hourly employees).
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Sales closed in the period (commission employees).
    #[serde(default)]
    pub sales_amount: Decimal,
}

impl PeriodInputs {
    /// Inputs for an hourly employee.
    pub fn hours(hours_worked: Decimal, overtime_hours: Decimal) -> Self {
        Self {
            hours_worked,
            overtime_hours,
            ..Self::default()
        }
    }

    /// Inputs for a commission employee.
    pub fn sales(sales_amount: Decimal) -> Self {
        Self {
            sales_amount,
            ..Self::default()
        }
    }

    /// Rejects negative hours or sales, hours above [`MAX_PERIOD_HOURS`] and
    /// sales above [`MAX_MONETARY_AMOUNT`](super::MAX_MONETARY_AMOUNT).
    ///
    /// The service calls this at its boundary and the assembler calls it again
    /// before any arithmetic.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PeriodInputs;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(PeriodInputs::hours(Decimal::new(160, 0), Decimal::ZERO).validate().is_ok());
    /// assert!(PeriodInputs::sales(Decimal::new(-1, 0)).validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        within_limit("hours_worked", self.hours_worked, MAX_PERIOD_HOURS)?;
        within_limit("overtime_hours", self.overtime_hours, MAX_PERIOD_HOURS)?;
        within_limit("sales_amount", self.sales_amount, MAX_MONETARY_AMOUNT)
    }

    /// Returns true if any hour figure is non-zero.
    pub fn has_hours(&self) -> bool {
        !self.hours_worked.is_zero() || !self.overtime_hours.is_zero()
    }

    /// Returns true if a sales figure was reported.
    pub fn has_sales(&self) -> bool {
        !self.sales_amount.is_zero()
    }
}
