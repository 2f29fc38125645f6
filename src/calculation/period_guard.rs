//! Period and duplicate guard.
//!
//! Decides whether a payroll write is admissible for a period before any
//! calculation runs. The decision is pure: it inspects the period state and
//! whether a result already exists, and never changes either.

use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollResult, PeriodState};

/// The write a caller intends to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOperation {
    /// First calculation for a key.
    Create,
    /// Recalculation replacing an existing result.
    Update,
    /// Removal of an existing result.
    Delete,
}

impl fmt::Display for GuardOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GuardOperation::Create => "CREATE",
            GuardOperation::Update => "UPDATE",
            GuardOperation::Delete => "DELETE",
        })
    }
}

/// Why a write was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The period is closed or paid.
    PeriodClosed(PeriodState),
    /// A result already exists for the key.
    Duplicate,
    /// No result exists to update or delete.
    NotCalculated,
}

/// The outcome of [`authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    /// The write may proceed.
    Allowed,
    /// The write must not proceed.
    Denied(DenialReason),
}

impl Authorization {
    /// Returns true if the write may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Authorization::Allowed)
    }

    /// Converts a denial into the matching [`EngineError`].
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::calculation::{Authorization, DenialReason};
    /// use payroll_engine::error::EngineError;
    ///
    /// let denied = Authorization::Denied(DenialReason::Duplicate);
    /// let err = denied.into_result("emp_001", "2026-01").unwrap_err();
    /// assert!(matches!(err, EngineError::DuplicateCalculation { .. }));
    /// ```
    pub fn into_result(self, employee_id: &str, period_id: &str) -> EngineResult<()> {
        match self {
            Authorization::Allowed => Ok(()),
            Authorization::Denied(DenialReason::PeriodClosed(state)) => {
                Err(EngineError::PeriodClosed {
                    period_id: period_id.to_string(),
                    state,
                })
            }
            Authorization::Denied(DenialReason::Duplicate) => {
                Err(EngineError::DuplicateCalculation {
                    employee_id: employee_id.to_string(),
                    period_id: period_id.to_string(),
                })
            }
            Authorization::Denied(DenialReason::NotCalculated) => {
                Err(EngineError::PayrollNotFound {
                    employee_id: employee_id.to_string(),
                    period_id: period_id.to_string(),
                })
            }
        }
    }
}

/// Decides whether `operation` is admissible.
///
/// A closed period is checked first, so a duplicate in a closed period is
/// reported as closed.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{authorize, Authorization, DenialReason, GuardOperation};
/// use payroll_engine::models::PeriodState;
///
/// assert_eq!(
///     authorize(PeriodState::Open, None, GuardOperation::Create),
///     Authorization::Allowed
/// );
/// assert_eq!(
///     authorize(PeriodState::Paid, None, GuardOperation::Create),
///     Authorization::Denied(DenialReason::PeriodClosed(PeriodState::Paid))
/// );
/// ```
pub fn authorize(
    period_state: PeriodState,
    existing_result: Option<&PayrollResult>,
    operation: GuardOperation,
) -> Authorization {
    if period_state.is_closed() {
        return Authorization::Denied(DenialReason::PeriodClosed(period_state));
    }

    match (operation, existing_result.is_some()) {
        (GuardOperation::Create, true) => Authorization::Denied(DenialReason::Duplicate),
        (GuardOperation::Update | GuardOperation::Delete, false) => {
            Authorization::Denied(DenialReason::NotCalculated)
        }
        _ => Authorization::Allowed,
    }
}
