//! Payroll result models for the Payroll Engine.
//!
//! This module contains the [`PayrollResult`] type and its associated structures
//! that capture all outputs from one payroll calculation: itemized bonuses,
//! benefits and deductions, totals, and a deterministic audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeType;

/// Whether a line item adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemCategory {
    /// Performance or seniority bonus, added after gross.
    Bonus,
    /// Fixed benefit, added after gross.
    Benefit,
    /// Amount withheld from pay.
    Deduction,
}

/// Stable identifier of the rule that produced a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemCode {
    /// Percentage of base salary after enough years of service.
    SeniorityBonus,
    /// Percentage of sales above the sales threshold.
    SalesBonus,
    /// Fixed monthly meal allowance.
    MealAllowance,
    /// Social security and pension contribution.
    SocialSecurityPension,
    /// Occupational risk insurance (ARL).
    OccupationalRisk,
    /// Employee savings-fund contribution.
    SavingsFund,
}

impl LineItemCode {
    /// The category every item with this code belongs to.
    pub fn category(&self) -> LineItemCategory {
        match self {
            LineItemCode::SeniorityBonus | LineItemCode::SalesBonus => LineItemCategory::Bonus,
            LineItemCode::MealAllowance => LineItemCategory::Benefit,
            LineItemCode::SocialSecurityPension
            | LineItemCode::OccupationalRisk
            | LineItemCode::SavingsFund => LineItemCategory::Deduction,
        }
    }

    /// Returns the code as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemCode::SeniorityBonus => "SENIORITY_BONUS",
            LineItemCode::SalesBonus => "SALES_BONUS",
            LineItemCode::MealAllowance => "MEAL_ALLOWANCE",
            LineItemCode::SocialSecurityPension => "SOCIAL_SECURITY_PENSION",
            LineItemCode::OccupationalRisk => "OCCUPATIONAL_RISK",
            LineItemCode::SavingsFund => "SAVINGS_FUND",
        }
    }
}

/// One itemized bonus, benefit or deduction.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{LineItem, LineItemCategory, LineItemCode};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = LineItem {
///     category: LineItemCategory::Deduction,
///     code: LineItemCode::OccupationalRisk,
///     description: "Occupational risk insurance (ARL)".to_string(),
///     amount: Decimal::from_str("26100.00").unwrap(),
///     rate_applied: Some(Decimal::from_str("0.522").unwrap()),
///     base_amount: Some(Decimal::from_str("5000000").unwrap()),
/// };
/// assert_eq!(item.code.as_str(), "OCCUPATIONAL_RISK");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Bonus, benefit or deduction.
    pub category: LineItemCategory,
    /// The rule that produced this item.
    pub code: LineItemCode,
    /// Human-readable description for pay statements.
    pub description: String,
    /// The rounded amount (never negative).
    pub amount: Decimal,
    /// The percentage applied, when the item is rate-based.
    pub rate_applied: Option<Decimal>,
    /// The amount the rate was applied to.
    pub base_amount: Option<Decimal>,
}

/// Aggregated totals for a payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Compensation before bonuses, benefits and deductions.
    pub gross_pay: Decimal,
    /// Sum of all bonus items.
    pub total_bonuses: Decimal,
    /// Sum of all benefit items.
    pub total_benefits: Decimal,
    /// Sum of all deduction items.
    pub total_deductions: Decimal,
    /// `gross + bonuses + benefits - deductions`.
    pub net_pay: Decimal,
}

impl PayrollTotals {
    /// Builds totals from gross pay and line items, deriving net pay.
    pub fn from_line_items(gross_pay: Decimal, line_items: &[LineItem]) -> Self {
        let sum = |category: LineItemCategory| -> Decimal {
            line_items
                .iter()
                .filter(|item| item.category == category)
                .map(|item| item.amount)
                .sum()
        };

        let total_bonuses = sum(LineItemCategory::Bonus);
        let total_benefits = sum(LineItemCategory::Benefit);
        let total_deductions = sum(LineItemCategory::Deduction);

        Self {
            gross_pay,
            total_bonuses,
            total_benefits,
            total_deductions,
            net_pay: gross_pay + total_bonuses + total_benefits - total_deductions,
        }
    }

    /// Gross pay plus bonuses and benefits.
    pub fn total_income(&self) -> Decimal {
        self.gross_pay + self.total_bonuses + self.total_benefits
    }
}

/// A single step in the audit trace recording a rule decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings never block a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for a calculation.
///
/// Unlike a timing log this trace is fully determined by the inputs, so two
/// calculations over the same inputs produce identical traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The complete, itemized result of one payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// The employee the payroll is for.
    pub employee_id: String,
    /// The period the payroll is for.
    pub period_id: String,
    /// The employee's compensation type at calculation time.
    pub employee_type: EmployeeType,
    /// Ordinary hours paid (hourly employees, zero otherwise).
    pub normal_hours: Decimal,
    /// Overtime hours paid (hourly employees, zero otherwise).
    pub overtime_hours: Decimal,
    /// Bonuses, then benefits, then deductions, each in rule order.
    pub line_items: Vec<LineItem>,
    /// Aggregated totals.
    pub totals: PayrollTotals,
    /// Record of every rule decision.
    pub audit_trace: AuditTrace,
}

impl PayrollResult {
    /// Returns the line item produced by the given rule, if it fired.
    pub fn line_item(&self, code: LineItemCode) -> Option<&LineItem> {
        self.line_items.iter().find(|item| item.code == code)
    }

    /// Returns the line items of one category, in order.
    pub fn items_in(&self, category: LineItemCategory) -> impl Iterator<Item = &LineItem> {
        self.line_items
            .iter()
            .filter(move |item| item.category == category)
    }

    /// Deductions as a percentage of gross pay, rounded to 2 decimals.
    ///
    /// Returns zero when gross pay is zero.
    pub fn deduction_percentage(&self) -> Decimal {
        if self.totals.gross_pay.is_zero() {
            return Decimal::ZERO;
        }
        (self.totals.total_deductions * Decimal::ONE_HUNDRED / self.totals.gross_pay).round_dp(2)
    }
}
