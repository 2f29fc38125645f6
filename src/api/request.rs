//! Request types for the Payroll Engine API.
//!
//! This module defines the JSON request structures for the payroll and
//! period endpoints.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::PeriodInputs;

/// The actor recorded when a request does not name one.
pub const DEFAULT_ACTOR: &str = "system";

fn default_actor() -> String {
    DEFAULT_ACTOR.to_string()
}

/// Request body for `POST /payrolls`.
///
/// # Example
///
/// ```
/// use payroll_engine::api::CalculatePayrollRequest;
///
/// let request: CalculatePayrollRequest = serde_json::from_str(
///     r#"{"employee_id": "emp_002", "period_id": "2026-01",
///         "inputs": {"hours_worked": "160", "overtime_hours": "10"}}"#,
/// ).unwrap();
/// assert_eq!(request.performed_by, "system");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// The employee to pay.
    pub employee_id: String,
    /// The period to pay for.
    pub period_id: String,
    /// Hours and sales for the period; omitted fields are zero.
    #[serde(default)]
    pub inputs: PeriodInputs,
    /// Who is requesting the calculation.
    #[serde(default = "default_actor")]
    pub performed_by: String,
}

impl CalculatePayrollRequest {
    /// Returns the name of the first identifier left blank, if any.
    pub fn blank_field(&self) -> Option<&'static str> {
        if self.employee_id.trim().is_empty() {
            Some("employee_id")
        } else if self.period_id.trim().is_empty() {
            Some("period_id")
        } else {
            None
        }
    }
}

/// Request body for `PUT /payrolls/{employee_id}/{period_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalculatePayrollRequest {
    /// Replacement hours and sales for the period.
    #[serde(default)]
    pub inputs: PeriodInputs,
    /// Who is requesting the recalculation.
    #[serde(default = "default_actor")]
    pub performed_by: String,
}

/// Request body for `POST /periods/{period_id}/calculate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatePeriodRequest {
    /// Inputs keyed by employee identifier; employees not listed get zero inputs.
    #[serde(default)]
    pub inputs: HashMap<String, PeriodInputs>,
    /// Who is requesting the batch.
    #[serde(default = "default_actor")]
    pub performed_by: String,
}

/// Query string accepted by `DELETE /payrolls/{employee_id}/{period_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorQuery {
    /// Who is requesting the change.
    #[serde(default = "default_actor")]
    pub performed_by: String,
}
