//! Persisted payroll records and their audit events.
//!
//! A [`PayrollRecord`] wraps a [`PayrollResult`] with the bookkeeping a store
//! needs (identifier, actor, timestamp). The engine never builds these; the
//! service does, right before handing them to a store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollResult, PayrollTotals, PeriodInputs};

/// The uniqueness key for payroll records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PayrollKey {
    /// The employee identifier.
    pub employee_id: String,
    /// The period identifier.
    pub period_id: String,
}

impl PayrollKey {
    /// Creates a key from its parts.
    pub fn new(employee_id: impl Into<String>, period_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            period_id: period_id.into(),
        }
    }
}

impl fmt::Display for PayrollKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.employee_id, self.period_id)
    }
}

/// A stored payroll calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Identifier assigned when the record was written.
    pub payroll_id: Uuid,
    /// The inputs the result was computed from.
    pub inputs: PeriodInputs,
    /// The calculation output.
    pub result: PayrollResult,
    /// Who requested the calculation.
    pub calculated_by: String,
    /// When the calculation was stored.
    pub calculated_at: DateTime<Utc>,
}

impl PayrollRecord {
    /// Wraps a fresh result in a new record.
    pub fn new(result: PayrollResult, inputs: PeriodInputs, calculated_by: impl Into<String>) -> Self {
        Self {
            payroll_id: Uuid::new_v4(),
            inputs,
            result,
            calculated_by: calculated_by.into(),
            calculated_at: Utc::now(),
        }
    }

    /// Returns the record's uniqueness key.
    pub fn key(&self) -> PayrollKey {
        PayrollKey::new(&self.result.employee_id, &self.result.period_id)
    }
}

/// The kind of change an audit event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// First calculation for a key.
    Create,
    /// A calculation replaced a previous one.
    Recalculate,
    /// A calculation was removed.
    Delete,
}

/// A before/after snapshot of one change to a payroll key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollAuditEvent {
    /// The key that changed.
    pub key: PayrollKey,
    /// What happened.
    pub action: AuditAction,
    /// Who made the change.
    pub performed_by: String,
    /// Inputs and totals before the change, if any.
    pub before: Option<AuditSnapshot>,
    /// Inputs and totals after the change, if any.
    pub after: Option<AuditSnapshot>,
    /// When the change was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// The values an audit event captures from a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSnapshot {
    /// The inputs in force.
    pub inputs: PeriodInputs,
    /// The totals in force.
    pub totals: PayrollTotals,
}

impl From<&PayrollRecord> for AuditSnapshot {
    fn from(record: &PayrollRecord) -> Self {
        Self {
            inputs: record.inputs.clone(),
            totals: record.result.totals.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payroll_key_display() {
        let key = PayrollKey::new("emp_001", "2026-01");
        assert_eq!(key.to_string(), "emp_001@2026-01");
    }

    #[test]
    fn test_payroll_keys_order_by_employee_then_period() {
        let mut keys = vec![
            PayrollKey::new("emp_002", "2026-01"),
            PayrollKey::new("emp_001", "2026-02"),
            PayrollKey::new("emp_001", "2026-01"),
        ];
        keys.sort();
        assert_eq!(keys[0], PayrollKey::new("emp_001", "2026-01"));
        assert_eq!(keys[2], PayrollKey::new("emp_002", "2026-01"));
    }

    #[test]
    fn test_audit_action_serialization() {
        assert_eq!(
            serde_json::to_string(&AuditAction::Recalculate).unwrap(),
            "\"RECALCULATE\""
        );
    }
}
