//! Ports the payroll service depends on.
//!
//! The service never touches storage directly; it reads employees and periods
//! through the directories and persists records through a [`PayrollStore`].
//! In-memory implementations live in [`super::memory`].

use crate::error::EngineResult;
use crate::models::{EmployeeSnapshot, PayrollAuditEvent, PayrollKey, PayrollPeriod, PayrollRecord};

/// Read access to employee records.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up one employee by identifier.
    fn find_employee(&self, employee_id: &str) -> Option<EmployeeSnapshot>;

    /// Returns every employee with `ACTIVE` status, ordered by identifier.
    fn active_employees(&self) -> Vec<EmployeeSnapshot>;
}

/// Read access to payroll periods.
pub trait PeriodDirectory: Send + Sync {
    /// Looks up one period by identifier.
    fn find_period(&self, period_id: &str) -> Option<PayrollPeriod>;
}

/// Persistence for payroll records and their audit trail.
///
/// Implementations must enforce the uniqueness of [`PayrollKey`] atomically:
/// two concurrent inserts for the same key must not both succeed.
pub trait PayrollStore: Send + Sync {
    /// Returns the record stored for a key.
    fn find(&self, key: &PayrollKey) -> Option<PayrollRecord>;

    /// Stores a new record and audits it as a creation.
    ///
    /// Fails with `DuplicateCalculation` if the key is already taken.
    fn insert(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Replaces the record for the same key and audits it as a recalculation.
    ///
    /// Fails with `PayrollNotFound` if there is nothing to replace.
    fn replace(&self, record: PayrollRecord) -> EngineResult<PayrollRecord>;

    /// Removes the record for a key and audits the deletion.
    ///
    /// Fails with `PayrollNotFound` if there is nothing to remove.
    fn remove(&self, key: &PayrollKey, performed_by: &str) -> EngineResult<PayrollRecord>;

    /// Returns every record for a period, ordered by employee identifier.
    fn list_by_period(&self, period_id: &str) -> Vec<PayrollRecord>;

    /// Returns every record for an employee, ordered by period identifier.
    fn list_by_employee(&self, employee_id: &str) -> Vec<PayrollRecord>;

    /// Returns the audit events for a key, oldest first.
    fn audit_trail(&self, key: &PayrollKey) -> Vec<PayrollAuditEvent>;
}
