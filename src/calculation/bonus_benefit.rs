//! Bonus and benefit evaluation.
//!
//! | Type       | Bonus                                   | Benefit        |
//! |------------|-----------------------------------------|----------------|
//! | Salaried   | Seniority bonus once tenure is reached  | Meal allowance |
//! | Commission | Sales bonus when sales exceed threshold | Meal allowance |
//! | Hourly     | none                                    | none           |
//! | Temporary  | none                                    | none           |

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::models::{AuditStep, Compensation, EmployeeSnapshot, LineItem, LineItemCode, PeriodInputs};

use super::money::{fixed_item, percentage_item};
use super::tenure::tenure_years;

/// Bonuses and benefits for one employee, with one audit step per rule evaluated.
#[derive(Debug, Clone)]
pub struct BonusBenefitResult {
    /// Bonus items followed by benefit items.
    pub line_items: Vec<LineItem>,
    /// The audit steps, numbered consecutively from the first step given.
    pub audit_steps: Vec<AuditStep>,
}

/// Evaluates the bonuses and benefits an employee is entitled to.
///
/// Rules that do not fire still record an audit step explaining why.
///
/// # Arguments
///
/// * `employee` - The employee being paid
/// * `inputs` - Period inputs (only the sales amount is read)
/// * `gross_pay` - Gross pay already computed for the period
/// * `evaluation_date` - The date tenure is measured at (period end)
/// * `rules` - Rates and thresholds
/// * `first_step` - The step number of the first audit step produced
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::evaluate_bonuses_and_benefits;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{Compensation, EmployeeSnapshot, EmployeeStatus, PeriodInputs};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeSnapshot {
///     id: "emp_001".to_string(),
///     full_name: None,
///     compensation: Compensation::Salaried { base_salary: Decimal::from(5_000_000) },
///     hire_date: NaiveDate::from_ymd_opt(2019, 6, 15).unwrap(),
///     status: EmployeeStatus::Active,
/// };
///
/// let result = evaluate_bonuses_and_benefits(
///     &employee,
///     &PeriodInputs::default(),
///     Decimal::from(5_000_000),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     &PayrollRules::default(),
///     2,
/// );
///
/// assert_eq!(result.line_items.len(), 2);
/// assert_eq!(result.line_items[0].amount, Decimal::from(500_000));
/// ```
pub fn evaluate_bonuses_and_benefits(
    employee: &EmployeeSnapshot,
    inputs: &PeriodInputs,
    gross_pay: Decimal,
    evaluation_date: NaiveDate,
    rules: &PayrollRules,
    first_step: u32,
) -> BonusBenefitResult {
    let mut line_items = Vec::new();
    let mut audit_steps = Vec::new();
    let mut step_number = first_step;

    match &employee.compensation {
        Compensation::Salaried { base_salary } => {
            let (item, step) =
                seniority_bonus(employee, *base_salary, evaluation_date, rules, step_number);
            line_items.extend(item);
            audit_steps.push(step);
            step_number += 1;

            let (item, step) = meal_allowance(employee, rules, step_number);
            line_items.push(item);
            audit_steps.push(step);
        }
        Compensation::Commission { .. } => {
            let (item, step) = sales_bonus(inputs.sales_amount, rules, step_number);
            line_items.extend(item);
            audit_steps.push(step);
            step_number += 1;

            let (item, step) = meal_allowance(employee, rules, step_number);
            line_items.push(item);
            audit_steps.push(step);
        }
        Compensation::Hourly { .. } | Compensation::Temporary { .. } => {
            let employee_type = employee.employee_type().as_str();
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "bonuses_and_benefits".to_string(),
                rule_name: "Bonuses and Benefits".to_string(),
                input: serde_json::json!({
                    "employee_type": employee_type,
                    "gross_pay": gross_pay.to_string()
                }),
                output: serde_json::json!({
                    "bonuses": [],
                    "benefits": []
                }),
                reasoning: format!("{} employees receive no bonuses or benefits", employee_type),
            });
        }
    }

    BonusBenefitResult {
        line_items,
        audit_steps,
    }
}

fn seniority_bonus(
    employee: &EmployeeSnapshot,
    base_salary: Decimal,
    evaluation_date: NaiveDate,
    rules: &PayrollRules,
    step_number: u32,
) -> (Option<LineItem>, AuditStep) {
    let config = &rules.seniority_bonus;
    let tenure = tenure_years(employee.hire_date, evaluation_date);
    let eligible = tenure >= config.min_tenure_years;

    let item = eligible.then(|| {
        percentage_item(
            LineItemCode::SeniorityBonus,
            "Seniority bonus",
            base_salary,
            config.percentage,
            rules.amount_scale,
        )
    });

    let reasoning = match &item {
        Some(item) => format!(
            "{} years of service (≥ {}): {}% × ${} = ${}",
            tenure,
            config.min_tenure_years,
            config.percentage.normalize(),
            base_salary.normalize(),
            item.amount.normalize()
        ),
        None => format!(
            "{} years of service is below the {} required for the seniority bonus",
            tenure, config.min_tenure_years
        ),
    };

    let step = AuditStep {
        step_number,
        rule_id: "seniority_bonus".to_string(),
        rule_name: "Seniority Bonus".to_string(),
        input: serde_json::json!({
            "hire_date": employee.hire_date.to_string(),
            "evaluation_date": evaluation_date.to_string(),
            "tenure_years": tenure,
            "min_tenure_years": config.min_tenure_years,
            "base_salary": base_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": eligible,
            "amount": item.as_ref().map_or(Decimal::ZERO, |i| i.amount).to_string()
        }),
        reasoning,
    };

    (item, step)
}

fn sales_bonus(
    sales_amount: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> (Option<LineItem>, AuditStep) {
    let config = &rules.sales_bonus;
    let eligible = sales_amount > config.sales_threshold;

    let item = eligible.then(|| {
        percentage_item(
            LineItemCode::SalesBonus,
            "Sales bonus",
            sales_amount,
            config.percentage,
            rules.amount_scale,
        )
    });

    let reasoning = match &item {
        Some(item) => format!(
            "Sales ${} exceed ${}: {}% × ${} = ${}",
            sales_amount.normalize(),
            config.sales_threshold.normalize(),
            config.percentage.normalize(),
            sales_amount.normalize(),
            item.amount.normalize()
        ),
        None => format!(
            "Sales ${} do not exceed the ${} threshold",
            sales_amount.normalize(),
            config.sales_threshold.normalize()
        ),
    };

    let step = AuditStep {
        step_number,
        rule_id: "sales_bonus".to_string(),
        rule_name: "Sales Bonus".to_string(),
        input: serde_json::json!({
            "sales_amount": sales_amount.normalize().to_string(),
            "sales_threshold": config.sales_threshold.normalize().to_string()
        }),
        output: serde_json::json!({
            "eligible": eligible,
            "amount": item.as_ref().map_or(Decimal::ZERO, |i| i.amount).to_string()
        }),
        reasoning,
    };

    (item, step)
}

fn meal_allowance(
    employee: &EmployeeSnapshot,
    rules: &PayrollRules,
    step_number: u32,
) -> (LineItem, AuditStep) {
    let item = fixed_item(
        LineItemCode::MealAllowance,
        "Meal allowance",
        rules.meal_allowance.amount,
        rules.amount_scale,
    );

    let step = AuditStep {
        step_number,
        rule_id: "meal_allowance".to_string(),
        rule_name: "Meal Allowance".to_string(),
        input: serde_json::json!({
            "employee_type": employee.employee_type().as_str()
        }),
        output: serde_json::json!({
            "amount": item.amount.to_string()
        }),
        reasoning: format!(
            "Fixed monthly meal allowance of ${}",
            item.amount.normalize()
        ),
    };

    (item, step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeStatus, LineItemCategory};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period_end() -> NaiveDate {
        date(2026, 1, 31)
    }

    fn create_test_employee(compensation: Compensation, hire_date: NaiveDate) -> EmployeeSnapshot {
        EmployeeSnapshot {
            id: "emp_001".to_string(),
            full_name: None,
            compensation,
            hire_date,
            status: EmployeeStatus::Active,
        }
    }

    fn salaried(hire_date: NaiveDate) -> EmployeeSnapshot {
        create_test_employee(
            Compensation::Salaried {
                base_salary: dec("5000000"),
            },
            hire_date,
        )
    }

    fn commission() -> EmployeeSnapshot {
        create_test_employee(
            Compensation::Commission {
                base_salary: dec("2000000"),
                commission_percentage: dec("5"),
            },
            date(2022, 3, 1),
        )
    }

    fn evaluate(employee: &EmployeeSnapshot, inputs: &PeriodInputs) -> BonusBenefitResult {
        evaluate_bonuses_and_benefits(
            employee,
            inputs,
            dec("5000000"),
            period_end(),
            &PayrollRules::default(),
            2,
        )
    }

    /// BB-001: salaried with 6 years gets 10% seniority bonus and meal allowance
    #[test]
    fn test_salaried_senior_gets_bonus_and_allowance() {
        let result = evaluate(&salaried(date(2019, 6, 15)), &PeriodInputs::default());

        assert_eq!(result.line_items.len(), 2);
        assert_eq!(result.line_items[0].code, LineItemCode::SeniorityBonus);
        assert_eq!(result.line_items[0].amount, dec("500000"));
        assert_eq!(result.line_items[0].rate_applied, Some(dec("10")));
        assert_eq!(result.line_items[0].base_amount, Some(dec("5000000")));
        assert_eq!(result.line_items[1].code, LineItemCode::MealAllowance);
        assert_eq!(result.line_items[1].category, LineItemCategory::Benefit);
        assert_eq!(result.line_items[1].amount, dec("1000000"));
    }

    /// BB-002: exactly five years at period end qualifies
    #[test]
    fn test_seniority_exactly_five_years() {
        let result = evaluate(&salaried(date(2021, 1, 31)), &PeriodInputs::default());

        assert!(
            result
                .line_items
                .iter()
                .any(|i| i.code == LineItemCode::SeniorityBonus)
        );
        assert_eq!(result.audit_steps[0].input["tenure_years"], 5);
    }

    /// BB-003: one day short of five years does not qualify
    #[test]
    fn test_seniority_one_day_short() {
        let result = evaluate(&salaried(date(2021, 2, 1)), &PeriodInputs::default());

        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.line_items[0].code, LineItemCode::MealAllowance);
        assert_eq!(result.audit_steps[0].output["eligible"], false);
        assert_eq!(result.audit_steps.len(), 2);
    }

    /// BB-004: sales above 20,000,000 earn 3%
    #[test]
    fn test_sales_bonus_above_threshold() {
        let result = evaluate(&commission(), &PeriodInputs::sales(dec("25000000")));

        assert_eq!(result.line_items[0].code, LineItemCode::SalesBonus);
        assert_eq!(result.line_items[0].amount, dec("750000"));
        assert_eq!(result.line_items[0].base_amount, Some(dec("25000000")));
        assert_eq!(result.line_items[1].code, LineItemCode::MealAllowance);
    }

    /// BB-005: sales exactly at the threshold earn nothing
    #[test]
    fn test_sales_bonus_at_threshold_is_not_paid() {
        let result = evaluate(&commission(), &PeriodInputs::sales(dec("20000000")));

        assert_eq!(result.line_items.len(), 1);
        assert_eq!(result.line_items[0].code, LineItemCode::MealAllowance);
    }

    /// BB-006: one cent above the threshold earns the bonus
    #[test]
    fn test_sales_bonus_one_cent_above_threshold() {
        let result = evaluate(&commission(), &PeriodInputs::sales(dec("20000000.01")));

        assert_eq!(result.line_items[0].code, LineItemCode::SalesBonus);
        // 3% of 20,000,000.01 = 600,000.0003
        assert_eq!(result.line_items[0].amount, dec("600000.00"));
    }

    #[test]
    fn test_hourly_and_temporary_get_nothing() {
        let hourly = create_test_employee(
            Compensation::Hourly {
                hourly_rate: dec("25000"),
                opts_into_savings_fund: true,
            },
            date(2010, 1, 1),
        );
        let temporary = create_test_employee(
            Compensation::Temporary {
                base_salary: dec("2500000"),
            },
            date(2010, 1, 1),
        );

        for employee in [hourly, temporary] {
            let result = evaluate(&employee, &PeriodInputs::sales(dec("90000000")));
            assert!(result.line_items.is_empty());
            assert_eq!(result.audit_steps.len(), 1);
            assert_eq!(result.audit_steps[0].rule_id, "bonuses_and_benefits");
        }
    }

    #[test]
    fn test_steps_are_numbered_from_first_step() {
        let result = evaluate(&salaried(date(2019, 6, 15)), &PeriodInputs::default());

        let numbers: Vec<u32> = result.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn test_configured_meal_allowance() {
        let mut rules = PayrollRules::default();
        rules.meal_allowance.amount = dec("250000.505");

        let result = evaluate_bonuses_and_benefits(
            &commission(),
            &PeriodInputs::default(),
            dec("2000000"),
            period_end(),
            &rules,
            1,
        );

        assert_eq!(result.line_items[0].amount, dec("250000.51"));
    }
}
