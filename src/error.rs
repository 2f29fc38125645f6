//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while validating inputs,
//! guarding periods and assembling payroll results.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculation::AssemblyState;
use crate::models::{EmployeeStatus, PeriodState};

/// The main error type for the Payroll Engine.
///
/// Every variant maps to a stable error code (see [`EngineError::code`]) so
/// that callers can distinguish bad input from configuration defects.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// assert_eq!(error.code(), "CONFIG_ERROR");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but contains an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// A period input or employee attribute failed validation.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: String,
    },

    /// The employee exists but is not payable.
    #[error("Employee '{employee_id}' is not active (status: {status})")]
    EmployeeInactive {
        /// The employee identifier.
        employee_id: String,
        /// The employee's current status.
        status: EmployeeStatus,
    },

    /// No payroll period exists with the given identifier.
    #[error("Payroll period not found: {period_id}")]
    PeriodNotFound {
        /// The identifier that was looked up.
        period_id: String,
    },

    /// A payroll already exists for the (employee, period) key.
    #[error("Payroll already calculated for employee '{employee_id}' in period '{period_id}'")]
    DuplicateCalculation {
        /// The employee identifier.
        employee_id: String,
        /// The period identifier.
        period_id: String,
    },

    /// The period is closed or paid and can no longer be modified.
    #[error("Payroll period '{period_id}' is {state} and cannot be modified")]
    PeriodClosed {
        /// The period identifier.
        period_id: String,
        /// The state that blocked the write.
        state: PeriodState,
    },

    /// An update or delete targeted a key with no payroll.
    #[error("No payroll calculated for employee '{employee_id}' in period '{period_id}'")]
    PayrollNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The period identifier.
        period_id: String,
    },

    /// Net pay came out negative, which means the rule table is misconfigured.
    #[error("Net pay for employee '{employee_id}' would be negative ({net_pay}); check deduction rates")]
    NegativeNetPay {
        /// The employee identifier.
        employee_id: String,
        /// The computed (negative) net pay.
        net_pay: Decimal,
    },

    /// A payroll assembler was run a second time.
    #[error("Payroll assembler already used (state: {state})")]
    AssemblerReused {
        /// The state the assembler finished in.
        state: AssemblyState,
    },
}

impl EngineError {
    /// Returns the stable, machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => "CONFIG_ERROR",
            EngineError::InvalidInput { .. } => "INVALID_INPUT",
            EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
            EngineError::EmployeeInactive { .. } => "EMPLOYEE_INACTIVE",
            EngineError::PeriodNotFound { .. } => "PERIOD_NOT_FOUND",
            EngineError::DuplicateCalculation { .. } => "DUPLICATE_CALCULATION",
            EngineError::PeriodClosed { .. } => "PERIOD_CLOSED",
            EngineError::PayrollNotFound { .. } => "PAYROLL_NOT_FOUND",
            EngineError::NegativeNetPay { .. } => "NEGATIVE_NET_PAY",
            EngineError::AssemblerReused { .. } => "ASSEMBLER_REUSED",
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rules.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rules.yaml"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("hours_worked", "cannot be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input 'hours_worked': cannot be negative"
        );
        assert_eq!(error.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_period_closed_displays_state() {
        let error = EngineError::PeriodClosed {
            period_id: "2026-01".to_string(),
            state: PeriodState::Paid,
        };
        assert_eq!(
            error.to_string(),
            "Payroll period '2026-01' is PAID and cannot be modified"
        );
    }

    #[test]
    fn test_employee_inactive_displays_status() {
        let error = EngineError::EmployeeInactive {
            employee_id: "emp_007".to_string(),
            status: EmployeeStatus::Suspended,
        };
        assert_eq!(
            error.to_string(),
            "Employee 'emp_007' is not active (status: SUSPENDED)"
        );
    }

    #[test]
    fn test_negative_net_pay_is_distinct_from_input_errors() {
        let error = EngineError::NegativeNetPay {
            employee_id: "emp_001".to_string(),
            net_pay: Decimal::from_str("-10.50").unwrap(),
        };
        assert_eq!(error.code(), "NEGATIVE_NET_PAY");
        assert_ne!(error.code(), EngineError::invalid_input("x", "y").code());
        assert!(error.to_string().contains("-10.50"));
    }

    #[test]
    fn test_taxonomy_codes_are_distinct() {
        let errors = vec![
            EngineError::invalid_input("sales_amount", "negative"),
            EngineError::EmployeeNotFound {
                employee_id: "e".to_string(),
            },
            EngineError::EmployeeInactive {
                employee_id: "e".to_string(),
                status: EmployeeStatus::Inactive,
            },
            EngineError::PeriodNotFound {
                period_id: "p".to_string(),
            },
            EngineError::DuplicateCalculation {
                employee_id: "e".to_string(),
                period_id: "p".to_string(),
            },
            EngineError::PeriodClosed {
                period_id: "p".to_string(),
                state: PeriodState::Closed,
            },
            EngineError::PayrollNotFound {
                employee_id: "e".to_string(),
                period_id: "p".to_string(),
            },
            EngineError::NegativeNetPay {
                employee_id: "e".to_string(),
                net_pay: Decimal::NEGATIVE_ONE,
            },
            EngineError::ConfigNotFound {
                path: "x".to_string(),
            },
            EngineError::AssemblerReused {
                state: AssemblyState::Assembled,
            },
        ];

        let codes: HashSet<&str> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> EngineResult<()> {
            Err(EngineError::PeriodNotFound {
                period_id: "2026-13".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
