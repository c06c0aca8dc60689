//! HTTP request handlers for the HR engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{
    BenefitItem, PayrollBreakdown, PayrollReport, SalaryComponents, SalaryKey, ValuationReport,
};

use super::request::{
    BenefitItemRequest, IssueBenefitRequest, SalaryReportQuery, ValuationRequest,
};
use super::response::{ApiError, ApiErrorResponse, HealthResponse, SalaryRecordResponse};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/benefits", get(list_all_benefits_handler))
        .route("/benefits/valuate", post(valuate_handler))
        .route(
            "/benefits/:id",
            put(correct_benefit_handler).delete(delete_benefit_handler),
        )
        .route(
            "/employees/:owner_id/benefits",
            post(issue_benefit_handler).get(list_benefits_handler),
        )
        .route("/payroll/calculate", post(calculate_payroll_handler))
        .route("/salaries", get(salary_report_handler))
        .route(
            "/salaries/:employee_id/:year",
            put(save_salary_handler)
                .get(get_salary_handler)
                .delete(delete_salary_handler),
        )
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

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
    Err(ApiErrorResponse::bad_request(error))
}

/// Unwraps path parameters, reporting a bad segment as a validation error.
fn parse_path<T>(
    path: Result<Path<T>, PathRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    path.map(|Path(params)| params).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(
            correlation_id = %correlation_id,
            error = %body_text,
            "Path parameter error"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Unwraps a query string, reporting a bad parameter as a validation error.
fn parse_query<T>(
    query: Result<Query<T>, QueryRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    query.map(|Query(params)| params).map_err(|rejection| {
        let body_text = rejection.body_text();
        warn!(
            correlation_id = %correlation_id,
            error = %body_text,
            "Query string error"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
    })
}

/// Logs a failed request and converts the error for the response.
fn rejected(correlation_id: Uuid, err: EngineError) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let metadata = state.config().metadata();
    Json(HealthResponse {
        status: "ok".to_string(),
        name: metadata.name.clone(),
        config_version: metadata.version.clone(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handler for POST /benefits/valuate.
///
/// Values the posted items without storing them. Every item is validated
/// before any is valued.
async fn valuate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ValuationRequest>, JsonRejection>,
) -> ApiResult<Json<ValuationReport>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing valuation request");

    let request = parse_body(payload, correlation_id)?;
    let items: Vec<BenefitItem> = request.items.into_iter().map(Into::into).collect();
    for item in &items {
        item.validate().map_err(|err| rejected(correlation_id, err))?;
    }

    let start_time = Instant::now();
    let report = state.benefits().valuate(&items, request.as_of);
    info!(
        correlation_id = %correlation_id,
        as_of = %report.as_of,
        items = items.len(),
        active_total = %report.active_total,
        expired = report.expired_count,
        duration_us = start_time.elapsed().as_micros(),
        "Valuation completed"
    );
    Ok(Json(report))
}

/// Handler for POST /employees/:owner_id/benefits.
async fn issue_benefit_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
    payload: Result<Json<IssueBenefitRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<BenefitItem>)> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, owner_id = %owner_id, "Issuing benefit");

    let request = parse_body(payload, correlation_id)?;
    let item = state
        .benefits()
        .issue(request.into_item(owner_id))
        .map_err(|err| rejected(correlation_id, err))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for GET /employees/:owner_id/benefits.
///
/// Returns the owner's active items valued at the clock's today.
async fn list_benefits_handler(
    State(state): State<AppState>,
    Path(owner_id): Path<String>,
) -> ApiResult<Json<ValuationReport>> {
    let correlation_id = Uuid::new_v4();
    let report = state
        .benefits()
        .active_for_owner(&owner_id)
        .map_err(|err| rejected(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        owner_id = %owner_id,
        active = report.active_count,
        outstanding = %report.active_total,
        "Listed active benefits"
    );
    Ok(Json(report))
}

/// Handler for GET /benefits.
///
/// Returns every employee's active items valued at the clock's today.
async fn list_all_benefits_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ValuationReport>> {
    let correlation_id = Uuid::new_v4();
    let report = state
        .benefits()
        .active_all()
        .map_err(|err| rejected(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        active = report.active_count,
        outstanding = %report.active_total,
        "Listed all active benefits"
    );
    Ok(Json(report))
}

/// Handler for PUT /benefits/:id.
///
/// Replaces a stored item with a corrected version. The path ID wins over
/// any ID in the body.
async fn correct_benefit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BenefitItemRequest>, JsonRejection>,
) -> ApiResult<Json<BenefitItem>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, item_id = %id, "Correcting benefit");

    let mut request = parse_body(payload, correlation_id)?;
    request.id = Some(id);
    let item = state
        .benefits()
        .correct(request.into())
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(item))
}

/// Handler for DELETE /benefits/:id.
async fn delete_benefit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    state
        .benefits()
        .remove(&id)
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /payroll/calculate.
///
/// Derives totals for the posted components without storing anything.
async fn calculate_payroll_handler(
    payload: Result<Json<SalaryComponents>, JsonRejection>,
) -> ApiResult<Json<PayrollBreakdown>> {
    let correlation_id = Uuid::new_v4();
    let components = parse_body(payload, correlation_id)?;
    components
        .validate()
        .map_err(|err| rejected(correlation_id, err))?;

    let totals = crate::calculation::breakdown(&components);
    info!(
        correlation_id = %correlation_id,
        gross = %totals.gross,
        net = %totals.net,
        "Payroll calculated"
    );
    Ok(Json(totals))
}

/// Handler for PUT /salaries/:employee_id/:year.
async fn save_salary_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32)>, PathRejection>,
    payload: Result<Json<SalaryComponents>, JsonRejection>,
) -> ApiResult<Json<SalaryRecordResponse>> {
    let correlation_id = Uuid::new_v4();
    let (employee_id, year) = parse_path(path, correlation_id)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        "Saving salary record"
    );

    let components = parse_body(payload, correlation_id)?;
    let record = state
        .payroll()
        .save(&employee_id, year, components)
        .map_err(|err| rejected(correlation_id, err))?;
    let breakdown = crate::calculation::breakdown(&record.components);
    Ok(Json(SalaryRecordResponse { record, breakdown }))
}

/// Handler for GET /salaries/:employee_id/:year.
async fn get_salary_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> ApiResult<Json<SalaryRecordResponse>> {
    let correlation_id = Uuid::new_v4();
    let (employee_id, year) = parse_path(path, correlation_id)?;
    let (record, breakdown) = state
        .payroll()
        .breakdown(&SalaryKey::new(employee_id, year))
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(Json(SalaryRecordResponse { record, breakdown }))
}

/// Handler for DELETE /salaries/:employee_id/:year.
async fn delete_salary_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32)>, PathRejection>,
) -> ApiResult<StatusCode> {
    let correlation_id = Uuid::new_v4();
    let (employee_id, year) = parse_path(path, correlation_id)?;
    state
        .payroll()
        .delete(&SalaryKey::new(employee_id, year))
        .map_err(|err| rejected(correlation_id, err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /salaries.
async fn salary_report_handler(
    State(state): State<AppState>,
    query: Result<Query<SalaryReportQuery>, QueryRejection>,
) -> ApiResult<Json<PayrollReport>> {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(query, correlation_id)?;
    let report = state
        .payroll()
        .report(query.year)
        .map_err(|err| rejected(correlation_id, err))?;
    info!(
        correlation_id = %correlation_id,
        year = ?query.year,
        headcount = report.headcount,
        "Payroll report generated"
    );
    Ok(Json(report))
}
