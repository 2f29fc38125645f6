//! Calculation logic for the Payroll Engine.
//!
//! This module contains the pure rule evaluation that turns an employee
//! snapshot, a period and period inputs into an itemized payroll: gross pay
//! per compensation type, bonuses and benefits, statutory and optional
//! deductions, assembly of the final result, and the guard deciding whether
//! a payroll write is admissible for a period.

mod assembler;
mod bonus_benefit;
mod deductions;
mod gross_pay;
mod money;
mod period_guard;
mod tenure;

pub use assembler::{AssemblyState, IGNORED_INPUT_WARNING, PayrollAssembler, assemble_payroll};
pub use bonus_benefit::{BonusBenefitResult, evaluate_bonuses_and_benefits};
pub use deductions::{DeductionResult, evaluate_deductions};
pub use gross_pay::{GrossPayResult, calculate_gross_pay};
pub use money::{percentage_of, round_amount};
pub use period_guard::{Authorization, DenialReason, GuardOperation, authorize};
pub use tenure::tenure_years;
