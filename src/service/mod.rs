//! Payroll service and its collaborators.
//!
//! [`PayrollService`] sits between callers (the HTTP API, batch jobs) and the
//! pure calculation engine. It resolves employees and periods through the
//! [`ports`] traits, asks the period guard whether a write is admissible, and
//! persists results through a [`PayrollStore`].

mod memory;
mod payroll_service;
pub mod ports;

pub use memory::{InMemoryEmployeeDirectory, InMemoryPayrollStore, InMemoryPeriodDirectory, SeedData};
pub use payroll_service::PayrollService;
pub use ports::{EmployeeDirectory, PayrollStore, PeriodDirectory};
