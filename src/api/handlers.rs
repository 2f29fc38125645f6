//! HTTP request handlers for the Payroll Engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! handler delegates to [`PayrollService`](crate::service::PayrollService)
//! and translates its errors through [`ApiErrorResponse`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::{
    ActorQuery, CalculatePayrollRequest, CalculatePeriodRequest, RecalculatePayrollRequest,
};
use super::response::{ApiError, ApiErrorResponse, PayrollDetail};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payrolls", post(calculate_payroll_handler))
        .route(
            "/payrolls/:employee_id/:period_id",
            get(get_payroll_handler)
                .put(recalculate_payroll_handler)
                .delete(delete_payroll_handler),
        )
        .route(
            "/payrolls/:employee_id/:period_id/audit",
            get(payroll_audit_handler),
        )
        .route(
            "/employees/:employee_id/payrolls",
            get(list_employee_handler),
        )
        .route("/periods/:period_id/calculate", post(calculate_period_handler))
        .route("/periods/:period_id/payrolls", get(list_period_handler))
        .route("/periods/:period_id/summary", get(period_summary_handler))
        .with_state(state)
}

/// Handler for `POST /payrolls`.
///
/// Calculates and stores the first payroll for an employee and period.
async fn calculate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Some(field) = request.blank_field() {
        warn!(correlation_id = %correlation_id, field, "Blank identifier in request");
        return json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error(format!("{} must not be blank", field)),
        );
    }

    let start_time = Instant::now();
    match state.service().calculate(
        &request.employee_id,
        &request.period_id,
        request.inputs,
        &request.performed_by,
    ) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %record.result.employee_id,
                period_id = %record.result.period_id,
                net_pay = %record.result.totals.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Payroll calculation completed successfully"
            );
            json_response(StatusCode::CREATED, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /payrolls/{employee_id}/{period_id}`.
///
/// Responds with the record plus its total income and deduction percentage.
async fn get_payroll_handler(
    State(state): State<AppState>,
    Path((employee_id, period_id)): Path<(String, String)>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().find(&employee_id, &period_id) {
        Ok(record) => json_response(StatusCode::OK, PayrollDetail::from(record)),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `PUT /payrolls/{employee_id}/{period_id}`.
///
/// Replaces an existing payroll with one computed from new inputs.
async fn recalculate_payroll_handler(
    State(state): State<AppState>,
    Path((employee_id, period_id)): Path<(String, String)>,
    payload: Result<Json<RecalculatePayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        period_id = %period_id,
        "Processing payroll recalculation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.service().recalculate(
        &employee_id,
        &period_id,
        request.inputs,
        &request.performed_by,
    ) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                net_pay = %record.result.totals.net_pay,
                "Payroll recalculation completed successfully"
            );
            json_response(StatusCode::OK, record)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `DELETE /payrolls/{employee_id}/{period_id}`.
///
/// Responds with the removed record.
async fn delete_payroll_handler(
    State(state): State<AppState>,
    Path((employee_id, period_id)): Path<(String, String)>,
    Query(actor): Query<ActorQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        period_id = %period_id,
        performed_by = %actor.performed_by,
        "Processing payroll deletion request"
    );

    match state
        .service()
        .remove(&employee_id, &period_id, &actor.performed_by)
    {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /payrolls/{employee_id}/{period_id}/audit`.
///
/// An unknown key yields an empty trail rather than an error.
async fn payroll_audit_handler(
    State(state): State<AppState>,
    Path((employee_id, period_id)): Path<(String, String)>,
) -> Response {
    json_response(
        StatusCode::OK,
        state.service().audit_trail(&employee_id, &period_id),
    )
}

/// Handler for `GET /employees/{employee_id}/payrolls`.
///
/// Lists the employee's stored payrolls, oldest period first.
async fn list_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().list_employee(&employee_id) {
        Ok(records) => json_response(StatusCode::OK, records),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /periods/{period_id}/calculate`.
///
/// Runs the payroll for every active employee. Per-employee failures are
/// reported in the body; only a closed or unknown period fails the request.
async fn calculate_period_handler(
    State(state): State<AppState>,
    Path(period_id): Path<String>,
    payload: Result<Json<CalculatePeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        period_id = %period_id,
        "Processing period calculation request"
    );

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match state
        .service()
        .calculate_period(&period_id, &request.inputs, &request.performed_by)
    {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                succeeded = outcome.succeeded.len(),
                failed = outcome.failed.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Period calculation completed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /periods/{period_id}/payrolls`.
async fn list_period_handler(
    State(state): State<AppState>,
    Path(period_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().list_period(&period_id) {
        Ok(records) => json_response(StatusCode::OK, records),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `GET /periods/{period_id}/summary`.
async fn period_summary_handler(
    State(state): State<AppState>,
    Path(period_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.service().summarize(&period_id) {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => error_response(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = err.code(),
        error = %err,
        "Payroll request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}
