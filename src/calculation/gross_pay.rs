//! Gross pay calculation functionality.
//!
//! This module turns an employee's compensation parameters and the period's
//! reported hours or sales into gross pay. Dispatch is an exhaustive match
//! over [`Compensation`], so each type only ever reads its own fields.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::models::{AuditStep, Compensation, EmployeeSnapshot, PeriodInputs};

use super::money::{percentage_of, round_amount};

/// The result of a gross pay calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct GrossPayResult {
    /// Gross pay rounded to the configured amount scale.
    pub gross_pay: Decimal,
    /// Hours paid at the ordinary rate (zero for non-hourly types).
    pub normal_hours: Decimal,
    /// Hours paid at the overtime rate (zero for non-hourly types).
    pub overtime_hours: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates gross pay for one employee for one period.
///
/// - Salaried and temporary employees receive their base salary; inputs are
///   ignored.
/// - Hourly employees are paid `normal × rate + overtime × rate × multiplier`,
///   where hours beyond the monthly threshold plus any explicitly reported
///   overtime count as overtime.
/// - Commission employees receive `base + sales × commission% / 100`.
///
/// # Arguments
///
/// * `employee` - The employee being paid
/// * `inputs` - Hours and sales reported for the period
/// * `rules` - Rates and thresholds
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_gross_pay;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Compensation, EmployeeSnapshot, EmployeeStatus, PeriodInputs};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let employee = EmployeeSnapshot {
///     id: "emp_002".to_string(),
///     full_name: None,
///     compensation: Compensation::Hourly {
///         hourly_rate: Decimal::from_str("25000").unwrap(),
///         opts_into_savings_fund: true,
///     },
///     hire_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
///     status: EmployeeStatus::Active,
/// };
/// let inputs = PeriodInputs::hours(Decimal::from(160), Decimal::from(10));
///
/// let result = calculate_gross_pay(&employee, &inputs, &PayrollRules::default(), 1);
/// assert_eq!(result.gross_pay, Decimal::from_str("4375000").unwrap());
/// assert_eq!(result.overtime_hours, Decimal::from(10));
/// ```
pub fn calculate_gross_pay(
    employee: &EmployeeSnapshot,
    inputs: &PeriodInputs,
    rules: &PayrollRules,
    step_number: u32,
) -> GrossPayResult {
    let scale = rules.amount_scale;
    let employee_type = employee.employee_type().as_str();

    match &employee.compensation {
        Compensation::Salaried { base_salary } | Compensation::Temporary { base_salary } => {
            let gross_pay = round_amount(*base_salary, scale);

            GrossPayResult {
                gross_pay,
                normal_hours: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "gross_pay_fixed_salary".to_string(),
                    rule_name: "Fixed Monthly Salary".to_string(),
                    input: serde_json::json!({
                        "employee_type": employee_type,
                        "base_salary": base_salary.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "gross_pay": gross_pay.to_string()
                    }),
                    reasoning: format!(
                        "{} employee paid base salary ${}",
                        employee_type,
                        gross_pay.normalize()
                    ),
                },
            }
        }
        Compensation::Hourly { hourly_rate, .. } => {
            let threshold = rules.hourly.monthly_normal_hours;
            let multiplier = rules.hourly.overtime_multiplier;

            let normal_hours = inputs.hours_worked.min(threshold);
            let excess_hours = (inputs.hours_worked - threshold).max(Decimal::ZERO);
            let overtime_hours = excess_hours + inputs.overtime_hours;

            let normal_pay = normal_hours * *hourly_rate;
            let overtime_pay = overtime_hours * *hourly_rate * multiplier;
            let gross_pay = round_amount(normal_pay + overtime_pay, scale);

            let reasoning = if overtime_hours.is_zero() {
                format!(
                    "{}h × ${} = ${}",
                    normal_hours.normalize(),
                    hourly_rate.normalize(),
                    gross_pay.normalize()
                )
            } else {
                format!(
                    "{}h × ${} + {}h × ${} × {} = ${}",
                    normal_hours.normalize(),
                    hourly_rate.normalize(),
                    overtime_hours.normalize(),
                    hourly_rate.normalize(),
                    multiplier.normalize(),
                    gross_pay.normalize()
                )
            };

            GrossPayResult {
                gross_pay,
                normal_hours,
                overtime_hours,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "gross_pay_hourly".to_string(),
                    rule_name: "Hourly Pay".to_string(),
                    input: serde_json::json!({
                        "employee_type": employee_type,
                        "hourly_rate": hourly_rate.normalize().to_string(),
                        "hours_worked": inputs.hours_worked.normalize().to_string(),
                        "reported_overtime_hours": inputs.overtime_hours.normalize().to_string(),
                        "monthly_normal_hours": threshold.normalize().to_string(),
                        "overtime_multiplier": multiplier.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "normal_hours": normal_hours.normalize().to_string(),
                        "overtime_hours": overtime_hours.normalize().to_string(),
                        "normal_pay": normal_pay.normalize().to_string(),
                        "overtime_pay": overtime_pay.normalize().to_string(),
                        "gross_pay": gross_pay.to_string()
                    }),
                    reasoning,
                },
            }
        }
        Compensation::Commission {
            base_salary,
            commission_percentage,
        } => {
            let commission = percentage_of(inputs.sales_amount, *commission_percentage);
            let gross_pay = round_amount(*base_salary + commission, scale);

            GrossPayResult {
                gross_pay,
                normal_hours: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
                audit_step: AuditStep {
                    step_number,
                    rule_id: "gross_pay_commission".to_string(),
                    rule_name: "Base Salary Plus Commission".to_string(),
                    input: serde_json::json!({
                        "employee_type": employee_type,
                        "base_salary": base_salary.normalize().to_string(),
                        "sales_amount": inputs.sales_amount.normalize().to_string(),
                        "commission_percentage": commission_percentage.normalize().to_string()
                    }),
                    output: serde_json::json!({
                        "commission": commission.normalize().to_string(),
                        "gross_pay": gross_pay.to_string()
                    }),
                    reasoning: format!(
                        "${} + ${} × {}% = ${}",
                        base_salary.normalize(),
                        inputs.sales_amount.normalize(),
                        commission_percentage.normalize(),
                        gross_pay.normalize()
                    ),
                },
            }
        }
    }
}
