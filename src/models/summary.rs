//! Period-level aggregates and batch outcomes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollResult;

/// Totals across every payroll stored for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The period summarized.
    pub period_id: String,
    /// Number of payrolls in the period.
    pub employee_count: usize,
    /// Sum of gross pay.
    pub total_gross: Decimal,
    /// Sum of bonuses.
    pub total_bonuses: Decimal,
    /// Sum of benefits.
    pub total_benefits: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net: Decimal,
    /// Mean net pay, rounded to 2 decimals; zero for an empty period.
    pub average_net: Decimal,
}

impl PeriodSummary {
    /// Aggregates a set of results. No rule is re-evaluated.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{PayrollResult, PeriodSummary};
    /// use rust_decimal::Decimal;
    ///
    /// let results: Vec<PayrollResult> = Vec::new();
    /// let summary = PeriodSummary::from_results("2026-01", &results);
    /// assert_eq!(summary.employee_count, 0);
    /// assert_eq!(summary.average_net, Decimal::ZERO);
    /// ```
    pub fn from_results<'a, I>(period_id: impl Into<String>, results: I) -> Self
    where
        I: IntoIterator<Item = &'a PayrollResult>,
    {
        let mut summary = Self {
            period_id: period_id.into(),
            employee_count: 0,
            total_gross: Decimal::ZERO,
            total_bonuses: Decimal::ZERO,
            total_benefits: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_net: Decimal::ZERO,
            average_net: Decimal::ZERO,
        };

        for result in results {
            let totals = &result.totals;
            summary.employee_count += 1;
            summary.total_gross += totals.gross_pay;
            summary.total_bonuses += totals.total_bonuses;
            summary.total_benefits += totals.total_benefits;
            summary.total_deductions += totals.total_deductions;
            summary.total_net += totals.net_pay;
        }

        if summary.employee_count > 0 {
            summary.average_net =
                (summary.total_net / Decimal::from(summary.employee_count)).round_dp(2);
        }

        summary
    }
}

/// One employee that a batch calculation could not pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee identifier.
    pub employee_id: String,
    /// Stable error code.
    pub code: String,
    /// Human-readable reason.
    pub message: String,
}

/// The result of calculating a whole period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// The period calculated.
    pub period_id: String,
    /// Active employees considered.
    pub total_employees: usize,
    /// Employees whose payroll was stored.
    pub succeeded: Vec<PayrollResult>,
    /// Employees that were skipped or rejected.
    pub failed: Vec<BatchFailure>,
}
