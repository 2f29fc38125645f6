//! Core data models for the Payroll Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod pay_period;
mod payroll_record;
mod payroll_result;
mod period_inputs;
mod summary;

pub use employee::{
    Compensation, EmployeeSnapshot, EmployeeStatus, EmployeeType, MAX_MONETARY_AMOUNT,
};
pub use pay_period::{PayrollPeriod, PeriodState};
pub use payroll_record::{AuditAction, AuditSnapshot, PayrollAuditEvent, PayrollKey, PayrollRecord};
pub use payroll_result::{
    AuditStep, AuditTrace, AuditWarning, LineItem, LineItemCategory, LineItemCode, PayrollResult,
    PayrollTotals,
};
pub use period_inputs::{MAX_PERIOD_HOURS, PeriodInputs};
pub use summary::{BatchFailure, BatchOutcome, PeriodSummary};
