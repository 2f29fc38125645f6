//! Employee snapshot and compensation types.
//!
//! This module defines the [`EmployeeSnapshot`] handed to the engine and the
//! [`Compensation`] variant that carries only the fields relevant to each
//! employee type.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The four compensation types the engine knows how to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeType {
    /// Fixed monthly salary.
    Salaried,
    /// Paid per hour worked, with overtime.
    Hourly,
    /// Base salary plus a percentage of sales.
    Commission,
    /// Fixed-term contract paid a fixed monthly salary.
    Temporary,
}

impl EmployeeType {
    /// Returns the stable string form used in audit output.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::Salaried => "SALARIED",
            EmployeeType::Hourly => "HOURLY",
            EmployeeType::Commission => "COMMISSION",
            EmployeeType::Temporary => "TEMPORARY",
        }
    }
}

impl fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employment status of an employee record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    /// Currently employed and payable.
    Active,
    /// No longer employed.
    Inactive,
    /// Temporarily suspended; not payable.
    Suspended,
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmployeeStatus::Active => "ACTIVE",
            EmployeeStatus::Inactive => "INACTIVE",
            EmployeeStatus::Suspended => "SUSPENDED",
        })
    }
}

/// Type-specific compensation parameters.
///
/// Each variant carries exactly the fields its rules read, so attributes that
/// belong to another type cannot leak into a calculation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Compensation, EmployeeType};
/// use rust_decimal::Decimal;
///
/// let comp = Compensation::Commission {
///     base_salary: Decimal::new(2_000_000, 0),
///     commission_percentage: Decimal::new(5, 0),
/// };
/// assert_eq!(comp.employee_type(), EmployeeType::Commission);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Compensation {
    /// Fixed monthly salary.
    Salaried {
        /// Monthly base salary.
        base_salary: Decimal,
    },
    /// Hourly pay.
    Hourly {
        /// Rate paid per ordinary hour.
        hourly_rate: Decimal,
        /// Whether the employee contributes to the savings fund.
        #[serde(default)]
        opts_into_savings_fund: bool,
    },
    /// Base salary plus sales commission.
    Commission {
        /// Monthly base salary.
        base_salary: Decimal,
        /// Commission on sales, as a percentage between 0 and 100.
        commission_percentage: Decimal,
    },
    /// Fixed-term contract.
    Temporary {
        /// Monthly base salary.
        base_salary: Decimal,
    },
}

impl Compensation {
    /// Returns the employee type this compensation belongs to.
    pub fn employee_type(&self) -> EmployeeType {
        match self {
            Compensation::Salaried { .. } => EmployeeType::Salaried,
            Compensation::Hourly { .. } => EmployeeType::Hourly,
            Compensation::Commission { .. } => EmployeeType::Commission,
            Compensation::Temporary { .. } => EmployeeType::Temporary,
        }
    }
}

/// An immutable view of an employee at calculation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name, used only for reporting.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Type-specific compensation parameters.
    pub compensation: Compensation,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// Current employment status.
    pub status: EmployeeStatus,
}

impl EmployeeSnapshot {
    /// Returns the employee's compensation type.
    pub fn employee_type(&self) -> EmployeeType {
        self.compensation.employee_type()
    }

    /// Returns true if the employee can be paid.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Checks the compensation parameters are within range.
    ///
    /// Monetary amounts must be non-negative and a commission percentage must
    /// lie in `0..=100`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{Compensation, EmployeeSnapshot, EmployeeStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = EmployeeSnapshot {
    ///     id: "emp_003".to_string(),
    ///     full_name: None,
    ///     compensation: Compensation::Commission {
    ///         base_salary: Decimal::new(2_000_000, 0),
    ///         commission_percentage: Decimal::new(101, 0),
    ///     },
    ///     hire_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
    ///     status: EmployeeStatus::Active,
    /// };
    /// assert!(employee.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        match &self.compensation {
            Compensation::Salaried { base_salary } | Compensation::Temporary { base_salary } => {
                within_limit("base_salary", *base_salary, MAX_MONETARY_AMOUNT)
            }
            Compensation::Hourly { hourly_rate, .. } => {
                within_limit("hourly_rate", *hourly_rate, MAX_MONETARY_AMOUNT)
            }
            Compensation::Commission {
                base_salary,
                commission_percentage,
            } => {
                within_limit("base_salary", *base_salary, MAX_MONETARY_AMOUNT)?;
                if *commission_percentage < Decimal::ZERO
                    || *commission_percentage > Decimal::ONE_HUNDRED
                {
                    return Err(EngineError::invalid_input(
                        "commission_percentage",
                        format!("must be between 0 and 100, got {}", commission_percentage),
                    ));
                }
                Ok(())
            }
        }
    }
}

/// Largest salary, rate or sales figure the engine accepts (10^15).
///
/// Every product the rules form from amounts below this limit stays far
/// inside `Decimal`'s range.
pub const MAX_MONETARY_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

pub(crate) fn within_limit(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("cannot be negative, got {}", value),
        ));
    }
    if value > max {
        return Err(EngineError::invalid_input(
            field,
            format!("must be at most {}, got {}", max, value),
        ));
    }
    Ok(())
}
