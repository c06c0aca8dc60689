//! HTTP API module for the HR engine.
//!
//! This module exposes benefit valuation and salary records as a JSON REST
//! API. Handlers validate at the boundary and forward to the services.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BenefitItemRequest, IssueBenefitRequest, SalaryReportQuery, ValuationRequest};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, SalaryRecordResponse};
pub use state::AppState;
