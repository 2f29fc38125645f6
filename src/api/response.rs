//! Response types for the Payroll Engine API.
//!
//! This module defines the payroll detail view, the error response
//! structures and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::models::PayrollRecord;

/// A stored payroll plus the figures derived from its totals.
///
/// Serializes as the record's own fields with `total_income` and
/// `deduction_percentage` added alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollDetail {
    /// The stored record.
    #[serde(flatten)]
    pub record: PayrollRecord,
    /// Gross pay plus bonuses and benefits.
    pub total_income: Decimal,
    /// Deductions as a percentage of gross pay.
    pub deduction_percentage: Decimal,
}

impl From<PayrollRecord> for PayrollDetail {
    fn from(record: PayrollRecord) -> Self {
        Self {
            total_income: record.result.totals.total_income(),
            deduction_percentage: record.result.deduction_percentage(),
            record,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Returns the HTTP status an engine error is reported with.
pub fn status_for(error: &EngineError) -> StatusCode {
    match error {
        EngineError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        EngineError::EmployeeNotFound { .. }
        | EngineError::PeriodNotFound { .. }
        | EngineError::PayrollNotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::EmployeeInactive { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::DuplicateCalculation { .. } | EngineError::PeriodClosed { .. } => {
            StatusCode::CONFLICT
        }
        EngineError::NegativeNetPay { .. }
        | EngineError::AssemblerReused { .. }
        | EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidConfig { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(&error);
        let code = error.code();

        let body = match &error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => {
                ApiError::with_details(code, "Configuration error", error.to_string())
            }
            EngineError::NegativeNetPay { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Deductions exceed income; the rule table is misconfigured",
            ),
            EngineError::PeriodClosed { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "Closed and paid periods accept no calculations, recalculations or deletions",
            ),
            _ => ApiError::new(code, error.to_string()),
        };

        ApiErrorResponse {
            status,
            error: body,
        }
    }
}
