//! Deduction evaluation.
//!
//! Every employee pays social security and pension plus occupational risk
//! insurance on gross pay. Hourly employees who opted into the savings fund
//! and have enough service also contribute a share of gross pay to it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::models::{AuditStep, Compensation, EmployeeSnapshot, LineItem, LineItemCode};

use super::money::percentage_item;
use super::tenure::tenure_years;

/// Deductions for one employee, with one audit step per rule evaluated.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// Deduction items in rule order.
    pub line_items: Vec<LineItem>,
    /// The audit steps, numbered consecutively from the first step given.
    pub audit_steps: Vec<AuditStep>,
}

/// Evaluates the deductions withheld from an employee's pay.
///
/// Each item records the percentage applied and gross pay as its base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::evaluate_deductions;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Compensation, EmployeeSnapshot, EmployeeStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = EmployeeSnapshot {
///     id: "emp_004".to_string(),
///     full_name: None,
///     compensation: Compensation::Temporary { base_salary: Decimal::from(2_500_000) },
///     hire_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///     status: EmployeeStatus::Active,
/// };
///
/// let result = evaluate_deductions(
///     &employee,
///     Decimal::from(2_500_000),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     &PayrollRules::default(),
///     1,
/// );
///
/// let total: Decimal = result.line_items.iter().map(|i| i.amount).sum();
/// assert_eq!(total, Decimal::from_str("113050").unwrap());
/// ```
pub fn evaluate_deductions(
    employee: &EmployeeSnapshot,
    gross_pay: Decimal,
    evaluation_date: NaiveDate,
    rules: &PayrollRules,
    first_step: u32,
) -> DeductionResult {
    let scale = rules.amount_scale;
    let mut line_items = Vec::new();
    let mut audit_steps = Vec::new();

    let statutory = [
        (
            LineItemCode::SocialSecurityPension,
            "social_security_pension",
            "Social Security and Pension",
            rules.deductions.social_security_pension_percentage,
        ),
        (
            LineItemCode::OccupationalRisk,
            "occupational_risk",
            "Occupational Risk Insurance (ARL)",
            rules.deductions.occupational_risk_percentage,
        ),
    ];

    let mut step_number = first_step;
    for (code, rule_id, rule_name, percentage) in statutory {
        let item = percentage_item(code, rule_name, gross_pay, percentage, scale);

        audit_steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "percentage": percentage.normalize().to_string()
            }),
            output: serde_json::json!({
                "amount": item.amount.to_string()
            }),
            reasoning: format!(
                "{}% × ${} = ${}",
                percentage.normalize(),
                gross_pay.normalize(),
                item.amount.normalize()
            ),
        });
        line_items.push(item);
        step_number += 1;
    }

    if let Compensation::Hourly {
        opts_into_savings_fund,
        ..
    } = &employee.compensation
    {
        let config = &rules.savings_fund;
        let tenure = tenure_years(employee.hire_date, evaluation_date);
        let eligible = *opts_into_savings_fund && tenure >= config.min_tenure_years;

        let item = eligible.then(|| {
            percentage_item(
                LineItemCode::SavingsFund,
                "Savings fund contribution",
                gross_pay,
                config.percentage,
                scale,
            )
        });

        let reasoning = match (&item, *opts_into_savings_fund) {
            (Some(item), _) => format!(
                "Opted in with {} years of service: {}% × ${} = ${}",
                tenure,
                config.percentage.normalize(),
                gross_pay.normalize(),
                item.amount.normalize()
            ),
            (None, false) => "Employee has not opted into the savings fund".to_string(),
            (None, true) => format!(
                "{} years of service is below the {} required for the savings fund",
                tenure, config.min_tenure_years
            ),
        };

        audit_steps.push(AuditStep {
            step_number,
            rule_id: "savings_fund".to_string(),
            rule_name: "Savings Fund".to_string(),
            input: serde_json::json!({
                "opts_into_savings_fund": opts_into_savings_fund,
                "tenure_years": tenure,
                "min_tenure_years": config.min_tenure_years,
                "gross_pay": gross_pay.to_string()
            }),
            output: serde_json::json!({
                "eligible": eligible,
                "amount": item.as_ref().map_or(Decimal::ZERO, |i| i.amount).to_string()
            }),
            reasoning,
        });
        line_items.extend(item);
    }

    DeductionResult {
        line_items,
        audit_steps,
    }
}
