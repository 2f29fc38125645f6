//! Payroll assembly.
//!
//! The [`PayrollAssembler`] runs the gross pay calculator, then the bonus,
//! benefit and deduction evaluators, and finally checks the net pay
//! invariant. It moves through a small state machine:
//!
//! ```text
//! PENDING → COMPUTING_GROSS → COMPUTING_ADJUSTMENTS → ASSEMBLED
//!    │                                  │
//!    └────────────→ REJECTED ←──────────┘
//! ```
//!
//! An employee who is not active, or whose figures are out of range, is
//! rejected before gross pay is computed.
//! Net pay below zero is rejected after adjustments; it is never clamped.

use std::fmt;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EmployeeSnapshot, EmployeeType, PayrollPeriod,
    PayrollResult, PayrollTotals, PeriodInputs,
};

use super::bonus_benefit::evaluate_bonuses_and_benefits;
use super::deductions::evaluate_deductions;
use super::gross_pay::calculate_gross_pay;

/// The warning code emitted when an input is supplied to a type that ignores it.
pub const IGNORED_INPUT_WARNING: &str = "IGNORED_INPUT";

/// The lifecycle of a single assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    /// Created, not yet run.
    Pending,
    /// Gross pay is being calculated.
    ComputingGross,
    /// Bonuses, benefits and deductions are being evaluated.
    ComputingAdjustments,
    /// A result was produced.
    Assembled,
    /// The calculation was refused.
    Rejected,
}

impl AssemblyState {
    /// Returns true once the assembler can no longer change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssemblyState::Assembled | AssemblyState::Rejected)
    }
}

impl fmt::Display for AssemblyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AssemblyState::Pending => "PENDING",
            AssemblyState::ComputingGross => "COMPUTING_GROSS",
            AssemblyState::ComputingAdjustments => "COMPUTING_ADJUSTMENTS",
            AssemblyState::Assembled => "ASSEMBLED",
            AssemblyState::Rejected => "REJECTED",
        })
    }
}

/// Builds one [`PayrollResult`] from an employee, a period and period inputs.
///
/// An assembler is single-use: once it has assembled or rejected, further
/// calls to [`assemble`](Self::assemble) fail with
/// [`EngineError::AssemblerReused`].
///
/// The employee and inputs are validated again before any arithmetic, so an
/// out-of-range salary, hour count or sales figure is rejected with
/// [`EngineError::InvalidInput`] instead of overflowing.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{AssemblyState, PayrollAssembler};
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{
///     Compensation, EmployeeSnapshot, EmployeeStatus, PayrollPeriod, PeriodInputs, PeriodState,
/// };
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
/// let rules = PayrollRules::default();
/// let mut assembler = PayrollAssembler::new(&rules);
/// let result = assembler.assemble(&employee, &period, &PeriodInputs::default()).unwrap();
///
/// assert_eq!(assembler.state(), AssemblyState::Assembled);
/// assert_eq!(result.totals.net_pay, Decimal::from_str("2386950").unwrap());
/// ```
#[derive(Debug)]
pub struct PayrollAssembler<'a> {
    rules: &'a PayrollRules,
    state: AssemblyState,
}

impl<'a> PayrollAssembler<'a> {
    /// Creates a pending assembler over a rule set.
    pub fn new(rules: &'a PayrollRules) -> Self {
        Self {
            rules,
            state: AssemblyState::Pending,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Computes the payroll for `employee` in `period`.
    pub fn assemble(
        &mut self,
        employee: &EmployeeSnapshot,
        period: &PayrollPeriod,
        inputs: &PeriodInputs,
    ) -> EngineResult<PayrollResult> {
        if self.state != AssemblyState::Pending {
            return Err(EngineError::AssemblerReused { state: self.state });
        }

        if !employee.is_active() {
            self.transition(AssemblyState::Rejected);
            warn!(
                employee_id = %employee.id,
                period_id = %period.id,
                status = %employee.status,
                "Payroll rejected: employee not active"
            );
            return Err(EngineError::EmployeeInactive {
                employee_id: employee.id.clone(),
                status: employee.status,
            });
        }

        if let Err(error) = employee.validate().and_then(|_| inputs.validate()) {
            self.transition(AssemblyState::Rejected);
            warn!(
                employee_id = %employee.id,
                period_id = %period.id,
                error = %error,
                "Payroll rejected: values out of range"
            );
            return Err(error);
        }

        self.transition(AssemblyState::ComputingGross);
        let gross = calculate_gross_pay(employee, inputs, self.rules, 1);
        let gross_pay = gross.gross_pay;

        self.transition(AssemblyState::ComputingAdjustments);
        let evaluation_date = period.evaluation_date();
        let bonuses = evaluate_bonuses_and_benefits(
            employee,
            inputs,
            gross_pay,
            evaluation_date,
            self.rules,
            2,
        );
        let deductions_first_step = 2 + bonuses.audit_steps.len() as u32;
        let deductions = evaluate_deductions(
            employee,
            gross_pay,
            evaluation_date,
            self.rules,
            deductions_first_step,
        );
        let totals_step = deductions_first_step + deductions.audit_steps.len() as u32;

        let mut line_items = bonuses.line_items;
        line_items.extend(deductions.line_items);
        let totals = PayrollTotals::from_line_items(gross_pay, &line_items);

        let mut steps = Vec::with_capacity(totals_step as usize);
        steps.push(gross.audit_step);
        steps.extend(bonuses.audit_steps);
        steps.extend(deductions.audit_steps);
        steps.push(totals_step_for(&totals, totals_step));

        if totals.net_pay < Decimal::ZERO {
            self.transition(AssemblyState::Rejected);
            warn!(
                employee_id = %employee.id,
                period_id = %period.id,
                net_pay = %totals.net_pay,
                "Payroll rejected: negative net pay"
            );
            return Err(EngineError::NegativeNetPay {
                employee_id: employee.id.clone(),
                net_pay: totals.net_pay,
            });
        }

        let employee_type = employee.employee_type();
        let result = PayrollResult {
            employee_id: employee.id.clone(),
            period_id: period.id.clone(),
            employee_type,
            normal_hours: gross.normal_hours,
            overtime_hours: gross.overtime_hours,
            line_items,
            totals,
            audit_trace: AuditTrace {
                steps,
                warnings: ignored_input_warnings(employee_type, inputs),
            },
        };

        self.transition(AssemblyState::Assembled);
        debug!(
            employee_id = %result.employee_id,
            period_id = %result.period_id,
            gross_pay = %result.totals.gross_pay,
            net_pay = %result.totals.net_pay,
            "Payroll assembled"
        );

        Ok(result)
    }

    fn transition(&mut self, next: AssemblyState) {
        debug!(from = %self.state, to = %next, "Assembler state transition");
        self.state = next;
    }
}

/// Assembles a payroll with a fresh [`PayrollAssembler`].
pub fn assemble_payroll(
    employee: &EmployeeSnapshot,
    period: &PayrollPeriod,
    inputs: &PeriodInputs,
    rules: &PayrollRules,
) -> EngineResult<PayrollResult> {
    PayrollAssembler::new(rules).assemble(employee, period, inputs)
}

fn totals_step_for(totals: &PayrollTotals, step_number: u32) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": totals.gross_pay.to_string(),
            "total_bonuses": totals.total_bonuses.to_string(),
            "total_benefits": totals.total_benefits.to_string(),
            "total_deductions": totals.total_deductions.to_string()
        }),
        output: serde_json::json!({
            "net_pay": totals.net_pay.to_string()
        }),
        reasoning: format!(
            "${} + ${} + ${} - ${} = ${}",
            totals.gross_pay.normalize(),
            totals.total_bonuses.normalize(),
            totals.total_benefits.normalize(),
            totals.total_deductions.normalize(),
            totals.net_pay.normalize()
        ),
    }
}

fn ignored_input_warnings(employee_type: EmployeeType, inputs: &PeriodInputs) -> Vec<AuditWarning> {
    let reads_hours = employee_type == EmployeeType::Hourly;
    let reads_sales = employee_type == EmployeeType::Commission;

    let mut warnings = Vec::new();
    if inputs.has_hours() && !reads_hours {
        warnings.push(AuditWarning {
            code: IGNORED_INPUT_WARNING.to_string(),
            message: format!(
                "Hours were reported ({} worked, {} overtime) but {} employees are not paid by the hour",
                inputs.hours_worked.normalize(),
                inputs.overtime_hours.normalize(),
                employee_type
            ),
            severity: "low".to_string(),
        });
    }
    if inputs.has_sales() && !reads_sales {
        warnings.push(AuditWarning {
            code: IGNORED_INPUT_WARNING.to_string(),
            message: format!(
                "Sales of ${} were reported but {} employees earn no commission",
                inputs.sales_amount.normalize(),
                employee_type
            ),
            severity: "low".to_string(),
        });
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Compensation, EmployeeStatus, LineItemCategory, LineItemCode, PeriodState,
    };
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_period() -> PayrollPeriod {
        PayrollPeriod {
            id: "2026-01".to_string(),
            year: 2026,
            month: 1,
            start_date: date(2026, 1, 1),
            end_date: date(2026, 1, 31),
            payment_date: date(2026, 2, 5),
            state: PeriodState::Open,
        }
    }

    fn create_test_employee(
        id: &str,
        compensation: Compensation,
        hire_date: NaiveDate,
    ) -> EmployeeSnapshot {
        EmployeeSnapshot {
            id: id.to_string(),
            full_name: None,
            compensation,
            hire_date,
            status: EmployeeStatus::Active,
        }
    }

    fn salaried_senior() -> EmployeeSnapshot {
        create_test_employee(
            "emp_001",
            Compensation::Salaried {
                base_salary: dec("5000000"),
            },
            date(2019, 6, 15),
        )
    }

    fn hourly_opted_in() -> EmployeeSnapshot {
        create_test_employee(
            "emp_002",
            Compensation::Hourly {
                hourly_rate: dec("25000"),
                opts_into_savings_fund: true,
            },
            date(2023, 9, 1),
        )
    }

    fn commission() -> EmployeeSnapshot {
        create_test_employee(
            "emp_003",
            Compensation::Commission {
                base_salary: dec("2000000"),
                commission_percentage: dec("5"),
            },
            date(2022, 3, 1),
        )
    }

    fn temporary() -> EmployeeSnapshot {
        create_test_employee(
            "emp_004",
            Compensation::Temporary {
                base_salary: dec("2500000"),
            },
            date(2025, 8, 1),
        )
    }

    fn assemble(employee: &EmployeeSnapshot, inputs: &PeriodInputs) -> PayrollResult {
        assemble_payroll(
            employee,
            &create_test_period(),
            inputs,
            &PayrollRules::default(),
        )
        .unwrap()
    }

    fn amount(result: &PayrollResult, code: LineItemCode) -> Decimal {
        result.line_item(code).map(|i| i.amount).unwrap_or_default()
    }

    /// SC-001: salaried, 5,000,000 base, 6 years of service
    #[test]
    fn test_salaried_scenario() {
        let result = assemble(&salaried_senior(), &PeriodInputs::default());

        assert_eq!(result.totals.gross_pay, dec("5000000"));
        assert_eq!(amount(&result, LineItemCode::SeniorityBonus), dec("500000"));
        assert_eq!(amount(&result, LineItemCode::MealAllowance), dec("1000000"));
        assert_eq!(
            amount(&result, LineItemCode::SocialSecurityPension),
            dec("200000")
        );
        assert_eq!(amount(&result, LineItemCode::OccupationalRisk), dec("26100"));
        assert_eq!(result.totals.total_deductions, dec("226100"));
        assert_eq!(result.totals.net_pay, dec("6273900"));
    }

    /// SC-002: hourly, 25,000/h, 160 + 10 overtime hours, opted into savings fund
    #[test]
    fn test_hourly_scenario() {
        let inputs = PeriodInputs::hours(dec("160"), dec("10"));
        let result = assemble(&hourly_opted_in(), &inputs);

        assert_eq!(result.normal_hours, dec("160"));
        assert_eq!(result.overtime_hours, dec("10"));
        assert_eq!(result.totals.gross_pay, dec("4375000"));
        assert_eq!(
            amount(&result, LineItemCode::SocialSecurityPension),
            dec("175000")
        );
        assert_eq!(
            amount(&result, LineItemCode::OccupationalRisk),
            dec("22837.50")
        );
        assert_eq!(amount(&result, LineItemCode::SavingsFund), dec("87500"));
        assert_eq!(result.totals.total_bonuses, Decimal::ZERO);
        assert_eq!(result.totals.total_benefits, Decimal::ZERO);
        assert_eq!(result.totals.net_pay, dec("4089662.50"));
    }

    /// SC-002b: whole-unit rounding reproduces 22,838 and 4,089,662
    #[test]
    fn test_hourly_scenario_whole_units() {
        let rules = PayrollRules {
            amount_scale: 0,
            ..PayrollRules::default()
        };
        let inputs = PeriodInputs::hours(dec("160"), dec("10"));

        let result =
            assemble_payroll(&hourly_opted_in(), &create_test_period(), &inputs, &rules).unwrap();

        assert_eq!(amount(&result, LineItemCode::OccupationalRisk), dec("22838"));
        assert_eq!(result.totals.net_pay, dec("4089662"));
    }

    /// SC-003: commission, 2,000,000 base, 25,000,000 sales at 5%
    #[test]
    fn test_commission_scenario() {
        let result = assemble(&commission(), &PeriodInputs::sales(dec("25000000")));

        assert_eq!(result.totals.gross_pay, dec("3250000"));
        assert_eq!(amount(&result, LineItemCode::SalesBonus), dec("750000"));
        assert_eq!(amount(&result, LineItemCode::MealAllowance), dec("1000000"));
        assert_eq!(
            amount(&result, LineItemCode::SocialSecurityPension),
            dec("130000")
        );
        assert_eq!(amount(&result, LineItemCode::OccupationalRisk), dec("16965"));
        assert_eq!(result.totals.net_pay, dec("4853035"));
    }

    /// SC-004: temporary, 2,500,000 base
    #[test]
    fn test_temporary_scenario() {
        let result = assemble(&temporary(), &PeriodInputs::default());

        assert_eq!(result.totals.gross_pay, dec("2500000"));
        assert_eq!(result.items_in(LineItemCategory::Bonus).count(), 0);
        assert_eq!(result.items_in(LineItemCategory::Benefit).count(), 0);
        assert_eq!(
            amount(&result, LineItemCode::SocialSecurityPension),
            dec("100000")
        );
        assert_eq!(amount(&result, LineItemCode::OccupationalRisk), dec("13050"));
        assert_eq!(result.totals.net_pay, dec("2386950"));
    }

    #[test]
    fn test_line_items_ordered_bonuses_benefits_deductions() {
        let result = assemble(&salaried_senior(), &PeriodInputs::default());

        let categories: Vec<LineItemCategory> =
            result.line_items.iter().map(|i| i.category).collect();
        assert_eq!(
            categories,
            vec![
                LineItemCategory::Bonus,
                LineItemCategory::Benefit,
                LineItemCategory::Deduction,
                LineItemCategory::Deduction,
            ]
        );
    }

    #[test]
    fn test_audit_steps_are_sequential() {
        let inputs = PeriodInputs::hours(dec("160"), dec("10"));
        let result = assemble(&hourly_opted_in(), &inputs);

        let steps = &result.audit_trace.steps;
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.step_number, (i + 1) as u32);
        }
        assert_eq!(steps.first().unwrap().rule_id, "gross_pay_hourly");
        assert_eq!(steps.last().unwrap().rule_id, "net_pay");
        assert_eq!(steps.last().unwrap().output["net_pay"], "4089662.50");
    }

    #[test]
    fn test_state_moves_to_assembled() {
        let rules = PayrollRules::default();
        let mut assembler = PayrollAssembler::new(&rules);
        assert_eq!(assembler.state(), AssemblyState::Pending);

        assembler
            .assemble(&temporary(), &create_test_period(), &PeriodInputs::default())
            .unwrap();

        assert_eq!(assembler.state(), AssemblyState::Assembled);
        assert!(assembler.state().is_terminal());
    }

    #[test]
    fn test_inactive_employee_is_rejected() {
        let mut employee = salaried_senior();
        employee.status = EmployeeStatus::Inactive;

        let rules = PayrollRules::default();
        let mut assembler = PayrollAssembler::new(&rules);
        let result = assembler.assemble(&employee, &create_test_period(), &PeriodInputs::default());

        match result {
            Err(EngineError::EmployeeInactive { employee_id, status }) => {
                assert_eq!(employee_id, "emp_001");
                assert_eq!(status, EmployeeStatus::Inactive);
            }
            other => panic!("Expected EmployeeInactive, got {:?}", other),
        }
        assert_eq!(assembler.state(), AssemblyState::Rejected);
    }

    #[test]
    fn test_suspended_employee_is_rejected() {
        let mut employee = temporary();
        employee.status = EmployeeStatus::Suspended;

        let result = assemble_payroll(
            &employee,
            &create_test_period(),
            &PeriodInputs::default(),
            &PayrollRules::default(),
        );

        assert!(matches!(result, Err(EngineError::EmployeeInactive { .. })));
    }

    #[test]
    fn test_out_of_range_inputs_are_rejected_before_arithmetic() {
        let rules = PayrollRules::default();
        let mut assembler = PayrollAssembler::new(&rules);
        let inputs = PeriodInputs::hours(Decimal::ZERO, dec("50000000000000000000000000"));

        let result = assembler.assemble(&hourly_opted_in(), &create_test_period(), &inputs);

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "overtime_hours"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
        assert_eq!(assembler.state(), AssemblyState::Rejected);
    }

    #[test]
    fn test_huge_sales_are_rejected() {
        let result = assemble_payroll(
            &commission(),
            &create_test_period(),
            &PeriodInputs::sales(Decimal::MAX),
            &PayrollRules::default(),
        );

        assert!(matches!(
            result,
            Err(EngineError::InvalidInput { ref field, .. }) if field == "sales_amount"
        ));
    }

    /// NN-001: a deduction rate over 100% yields NegativeNetPay, not a clamp
    #[test]
    fn test_negative_net_pay_is_rejected() {
        let mut rules = PayrollRules::default();
        rules.deductions.social_security_pension_percentage = dec("150");

        let mut assembler = PayrollAssembler::new(&rules);
        let result = assembler.assemble(&temporary(), &create_test_period(), &PeriodInputs::default());

        match result {
            Err(EngineError::NegativeNetPay {
                employee_id,
                net_pay,
            }) => {
                assert_eq!(employee_id, "emp_004");
                // 2,500,000 - 3,750,000 - 13,050
                assert_eq!(net_pay, dec("-1263050"));
            }
            other => panic!("Expected NegativeNetPay, got {:?}", other),
        }
        assert_eq!(assembler.state(), AssemblyState::Rejected);
    }

    #[test]
    fn test_zero_net_pay_is_allowed() {
        let mut rules = PayrollRules::default();
        rules.deductions.social_security_pension_percentage = dec("100");
        rules.deductions.occupational_risk_percentage = Decimal::ZERO;

        let result = assemble_payroll(
            &temporary(),
            &create_test_period(),
            &PeriodInputs::default(),
            &rules,
        )
        .unwrap();

        assert!(result.totals.net_pay.is_zero());
    }

    #[test]
    fn test_assembler_is_single_use() {
        let rules = PayrollRules::default();
        let mut assembler = PayrollAssembler::new(&rules);
        let period = create_test_period();

        assert!(
            assembler
                .assemble(&temporary(), &period, &PeriodInputs::default())
                .is_ok()
        );
        match assembler.assemble(&temporary(), &period, &PeriodInputs::default()) {
            Err(EngineError::AssemblerReused { state }) => {
                assert_eq!(state, AssemblyState::Assembled)
            }
            other => panic!("Expected AssemblerReused, got {:?}", other),
        }
    }

    #[test]
    fn test_identical_inputs_give_identical_results() {
        let inputs = PeriodInputs::sales(dec("25000000"));
        let first = assemble(&commission(), &inputs);
        let second = assemble(&commission(), &inputs);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_ignored_inputs_produce_warnings() {
        let inputs = PeriodInputs {
            hours_worked: dec("160"),
            overtime_hours: Decimal::ZERO,
            sales_amount: dec("1000"),
        };
        let result = assemble(&salaried_senior(), &inputs);

        let warnings = &result.audit_trace.warnings;
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.code == IGNORED_INPUT_WARNING));
        assert_eq!(result.totals.net_pay, dec("6273900"));
    }

    #[test]
    fn test_matching_inputs_produce_no_warnings() {
        let result = assemble(&commission(), &PeriodInputs::sales(dec("25000000")));
        assert!(result.audit_trace.warnings.is_empty());

        let result = assemble(&hourly_opted_in(), &PeriodInputs::hours(dec("1"), dec("0")));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_hourly_sales_input_is_ignored_with_warning() {
        let inputs = PeriodInputs {
            hours_worked: dec("160"),
            overtime_hours: dec("10"),
            sales_amount: dec("5000000"),
        };
        let result = assemble(&hourly_opted_in(), &inputs);

        assert_eq!(result.totals.gross_pay, dec("4375000"));
        assert_eq!(result.audit_trace.warnings.len(), 1);
        assert!(result.audit_trace.warnings[0].message.contains("commission"));
    }
}
