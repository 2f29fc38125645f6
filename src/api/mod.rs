//! HTTP API module for the Payroll Engine.
//!
//! This module exposes payroll calculation, recalculation, deletion, audit,
//! per-employee history and period-level operations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ActorQuery, CalculatePayrollRequest, CalculatePeriodRequest, DEFAULT_ACTOR,
    RecalculatePayrollRequest,
};
pub use response::{ApiError, ApiErrorResponse, PayrollDetail, status_for};
pub use state::AppState;
