//! End-to-end HTTP tests for the HR engine.
//!
//! This test suite covers:
//! - Uniform depreciation tiers and their boundaries
//! - Training debt expiry
//! - Active views per employee and expiry filtering
//! - Payroll derivation and salary record upserts
//! - Error cases

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::str::FromStr;
use tower::ServiceExt;

use hr_engine::api::{create_router, AppState};
use hr_engine::clock::FixedClock;
use hr_engine::config::ConfigLoader;
use hr_engine::store::{BenefitStore, InMemoryBenefitStore, InMemorySalaryStore, SalaryStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn create_router_on(today: &str) -> Router {
    create_router_over(
        today,
        Arc::new(InMemorySalaryStore::new()),
        Arc::new(InMemoryBenefitStore::new()),
    )
}

/// Builds a router whose clock reads `today`, over shared stores.
fn create_router_over(
    today: &str,
    salaries: Arc<dyn SalaryStore>,
    benefits: Arc<dyn BenefitStore>,
) -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let state = AppState::with_parts(config, salaries, benefits, Arc::new(FixedClock::on(date(today))));
    create_router(state)
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

fn assert_decimal(value: &Value, expected: &str) {
    let actual = value.as_str().unwrap_or_else(|| panic!("Expected decimal string, got {}", value));
    assert_eq!(
        normalize_decimal(actual),
        normalize_decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

fn uniform(id: &str, issued_on: &str, value: &str) -> Value {
    json!({
        "id": id,
        "owner_id": "emp_001",
        "kind": "uniform",
        "description": "Work shirt",
        "quantity": 3,
        "issued_on": issued_on,
        "original_value": value
    })
}

fn training_debt(id: &str, issued_on: &str, value: &str) -> Value {
    json!({
        "id": id,
        "owner_id": "emp_001",
        "kind": "training_debt",
        "description": "Safety certification",
        "issued_on": issued_on,
        "original_value": value
    })
}

async fn valuate(as_of: &str, items: Vec<Value>) -> Value {
    let router = create_router_on("2030-01-01");
    let (status, report) = send(
        &router,
        "POST",
        "/benefits/valuate",
        Some(json!({ "as_of": as_of, "items": items })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "valuation failed: {}", report);
    report
}

fn sample_components() -> Value {
    json!({
        "basic_salary": "10000",
        "transport_allowance": "500",
        "incentives": "300",
        "living_allowance": "200",
        "station_allowance": "100",
        "mobile_allowance": "50",
        "employee_insurance": "400",
        "employer_social_insurance": "750",
        "health_insurance": "120",
        "income_tax": "900"
    })
}

// =============================================================================
// SECTION 1: Uniform Depreciation
// =============================================================================

#[tokio::test]
async fn test_uniform_exactly_three_months_is_75_percent() {
    let report = valuate("2024-04-15", vec![uniform("uni_001", "2024-01-15", "1000.00")]).await;
    let line = &report["lines"][0];

    assert_eq!(line["months_elapsed"], 3);
    assert_eq!(line["tier_percent"], 75);
    assert_decimal(&line["current_value"], "750");
    assert_eq!(line["is_expired"], false);
}

#[tokio::test]
async fn test_uniform_one_day_short_of_three_months_is_full_value() {
    let report = valuate("2024-04-14", vec![uniform("uni_001", "2024-01-15", "1000.00")]).await;
    let line = &report["lines"][0];

    assert_eq!(line["months_elapsed"], 2);
    assert_eq!(line["tier_percent"], 100);
    assert_decimal(&line["current_value"], "1000");
}

#[tokio::test]
async fn test_uniform_past_twelve_months_is_expired() {
    let report = valuate("2024-01-02", vec![uniform("uni_001", "2023-01-01", "800")]).await;
    let line = &report["lines"][0];

    assert_eq!(line["tier_percent"], 0);
    assert_decimal(&line["current_value"], "0");
    assert_eq!(line["is_expired"], true);
    assert_eq!(report["expired_count"], 1);
    assert_eq!(report["active_count"], 0);
    assert_decimal(&report["active_total"], "0");
}

#[tokio::test]
async fn test_uniform_each_tier_boundary() {
    let cases = [
        ("2024-03-31", 100),
        ("2024-04-01", 75),
        ("2024-07-01", 50),
        ("2024-10-01", 25),
        ("2024-12-31", 25),
        ("2025-01-01", 0),
    ];

    for (as_of, expected) in cases {
        let report = valuate(as_of, vec![uniform("uni_001", "2024-01-01", "400")]).await;
        assert_eq!(
            report["lines"][0]["tier_percent"], expected,
            "as_of {} should give {}%",
            as_of, expected
        );
    }
}

#[tokio::test]
async fn test_future_issue_date_keeps_full_value() {
    let report = valuate("2024-01-01", vec![uniform("uni_001", "2024-06-01", "500")]).await;
    let line = &report["lines"][0];

    assert_eq!(line["tier_percent"], 100);
    assert_decimal(&line["current_value"], "500");
}

#[tokio::test]
async fn test_fractional_values_are_not_rounded() {
    let report = valuate("2024-07-10", vec![uniform("uni_001", "2024-01-10", "333.33")]).await;

    // 50% of 333.33
    assert_decimal(&report["lines"][0]["current_value"], "166.665");
}

#[tokio::test]
async fn test_valuation_carries_audit_step() {
    let report = valuate("2024-04-15", vec![uniform("uni_001", "2024-01-15", "1000")]).await;
    let step = &report["lines"][0]["audit_step"];

    assert_eq!(step["step_number"], 1);
    assert_eq!(step["rule_id"], "uniform_depreciation");
    assert!(step["reasoning"].as_str().unwrap().contains("75%"));
}

// =============================================================================
// SECTION 2: Training Debt
// =============================================================================

#[tokio::test]
async fn test_training_debt_at_35_months_is_full() {
    let report = valuate("2024-05-01", vec![training_debt("trn_001", "2021-06-01", "12000")]).await;
    let line = &report["lines"][0];

    assert_eq!(line["months_elapsed"], 35);
    assert_eq!(line["tier_percent"], 100);
    assert_eq!(line["is_expired"], false);
    assert_decimal(&report["active_total"], "12000");
}

#[tokio::test]
async fn test_training_debt_at_37_months_is_expired_and_excluded() {
    let report = valuate("2024-07-01", vec![training_debt("trn_001", "2021-06-01", "12000")]).await;
    let line = &report["lines"][0];

    assert_eq!(line["months_elapsed"], 37);
    assert_eq!(line["is_expired"], true);
    assert_decimal(&report["active_total"], "0");
}

#[tokio::test]
async fn test_mixed_batch_totals_only_active_items() {
    let report = valuate(
        "2024-07-01",
        vec![
            uniform("uni_001", "2024-01-01", "600"),
            training_debt("trn_old", "2021-06-01", "12000"),
            training_debt("trn_new", "2023-01-01", "4000"),
        ],
    )
    .await;

    assert_eq!(report["active_count"], 2);
    assert_eq!(report["expired_count"], 1);
    // 600 * 50% + 4000
    assert_decimal(&report["active_total"], "4300");

    let steps: Vec<u64> = report["lines"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["audit_step"]["step_number"].as_u64().unwrap())
        .collect();
    assert_eq!(steps, vec![1, 2, 3]);
}

// =============================================================================
// SECTION 3: Stored Benefits and the Injected Clock
// =============================================================================

#[tokio::test]
async fn test_active_view_drops_item_once_clock_passes_horizon() {
    let salaries: Arc<dyn SalaryStore> = Arc::new(InMemorySalaryStore::new());
    let benefits: Arc<dyn BenefitStore> = Arc::new(InMemoryBenefitStore::new());

    let before = create_router_over("2024-05-01", salaries.clone(), benefits.clone());
    let (status, _) = send(
        &before,
        "POST",
        "/employees/emp_001/benefits",
        Some(json!({
            "id": "trn_001",
            "kind": "training_debt",
            "issued_on": "2021-06-01",
            "original_value": "12000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, report) = send(&before, "GET", "/employees/emp_001/benefits", None).await;
    assert_eq!(report["active_count"], 1);
    assert_decimal(&report["active_total"], "12000");

    let after = create_router_over("2024-07-01", salaries, benefits.clone());
    let (_, report) = send(&after, "GET", "/employees/emp_001/benefits", None).await;
    assert_eq!(report["lines"].as_array().unwrap().len(), 0);
    assert_eq!(report["expired_count"], 1);
    assert_decimal(&report["active_total"], "0");

    // Expiry is a view filter; the record is still stored
    assert!(benefits.get("trn_001").unwrap().is_some());
}

#[tokio::test]
async fn test_benefit_overview_covers_every_owner() {
    let router = create_router_on("2024-07-01");
    for (owner, id, issued_on, value) in [
        ("emp_001", "uni_001", "2024-01-01", "600"),
        ("emp_002", "trn_001", "2023-01-01", "4000"),
        ("emp_002", "trn_old", "2021-06-01", "12000"),
    ] {
        let kind = if id.starts_with("uni") { "uniform" } else { "training_debt" };
        let (status, _) = send(
            &router,
            "POST",
            &format!("/employees/{}/benefits", owner),
            Some(json!({
                "id": id,
                "kind": kind,
                "issued_on": issued_on,
                "original_value": value
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, report) = send(&router, "GET", "/benefits", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["active_count"], 2);
    assert_eq!(report["expired_count"], 1);
    // 600 * 50% + 4000
    assert_decimal(&report["active_total"], "4300");
}

#[tokio::test]
async fn test_issue_generates_id_when_missing() {
    let router = create_router_on("2024-01-01");
    let (status, item) = send(
        &router,
        "POST",
        "/employees/emp_002/benefits",
        Some(json!({
            "kind": "uniform",
            "issued_on": "2024-01-01",
            "original_value": "250"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["owner_id"], "emp_002");
    assert!(item["id"].as_str().unwrap().starts_with("uniform_"));
}

#[tokio::test]
async fn test_duplicate_benefit_id_is_store_error() {
    let router = create_router_on("2024-01-01");
    let body = json!({
        "id": "uni_dup",
        "kind": "uniform",
        "issued_on": "2024-01-01",
        "original_value": "250"
    });

    let (status, _) = send(&router, "POST", "/employees/emp_001/benefits", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(&router, "POST", "/employees/emp_001/benefits", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["code"], "STORE_ERROR");
}

#[tokio::test]
async fn test_valuate_defaults_as_of_to_clock() {
    let router = create_router_on("2024-04-15");
    let (status, report) = send(
        &router,
        "POST",
        "/benefits/valuate",
        Some(json!({ "items": [uniform("uni_001", "2024-01-15", "1000")] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["as_of"], "2024-04-15");
    assert_eq!(report["lines"][0]["tier_percent"], 75);
}

// =============================================================================
// SECTION 4: Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_sample_totals() {
    let router = create_router_on("2025-01-01");
    let (status, totals) = send(&router, "POST", "/payroll/calculate", Some(sample_components())).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&totals["gross"], "10950");
    assert_decimal(&totals["full_gross"], "11150");
    assert_decimal(&totals["net"], "10750");
    // Reporting-only fields are echoed, not subtracted
    assert_decimal(&totals["income_tax"], "900");
    assert_decimal(&totals["employer_social_insurance"], "750");
}

#[tokio::test]
async fn test_missing_components_default_to_zero() {
    let router = create_router_on("2025-01-01");
    let (status, totals) = send(
        &router,
        "POST",
        "/payroll/calculate",
        Some(json!({ "living_allowance": "200" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&totals["gross"], "0");
    assert_decimal(&totals["full_gross"], "200");
    assert_decimal(&totals["net"], "200");
}

#[tokio::test]
async fn test_upsert_replaces_record() {
    let router = create_router_on("2025-01-01");

    let (status, _) = send(&router, "PUT", "/salaries/E1/2025", Some(sample_components())).await;
    assert_eq!(status, StatusCode::OK);

    let mut revised = sample_components();
    revised["basic_salary"] = json!("12000");
    let (status, saved) = send(&router, "PUT", "/salaries/E1/2025", Some(revised)).await;
    assert_eq!(status, StatusCode::OK);
    assert_decimal(&saved["breakdown"]["gross"], "12950");

    let (_, report) = send(&router, "GET", "/salaries", None).await;
    assert_eq!(report["headcount"], 1);
    assert_decimal(&report["total_net"], "12750");

    let (status, loaded) = send(&router, "GET", "/salaries/E1/2025", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded["record"]["employee_id"], "E1");
    assert_eq!(loaded["record"]["year"], 2025);
    assert_decimal(&loaded["record"]["basic_salary"], "12000");
}

#[tokio::test]
async fn test_salary_report_filters_by_year() {
    let router = create_router_on("2025-01-01");
    send(&router, "PUT", "/salaries/E1/2024", Some(sample_components())).await;
    send(&router, "PUT", "/salaries/E1/2025", Some(sample_components())).await;
    send(&router, "PUT", "/salaries/E2/2025", Some(sample_components())).await;

    let (status, report) = send(&router, "GET", "/salaries?year=2025", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["headcount"], 2);
    assert_decimal(&report["total_gross"], "21900");
    assert_decimal(&report["total_income_tax"], "1800");

    let (_, all) = send(&router, "GET", "/salaries", None).await;
    assert_eq!(all["headcount"], 3);
}

#[tokio::test]
async fn test_empty_salary_report_is_zero() {
    let router = create_router_on("2025-01-01");
    let (status, report) = send(&router, "GET", "/salaries?year=1999", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["headcount"], 0);
    assert_decimal(&report["total_net"], "0");
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_negative_salary_is_rejected_and_not_stored() {
    let router = create_router_on("2025-01-01");
    let mut bad = sample_components();
    bad["mobile_allowance"] = json!("-50");

    let (status, error) = send(&router, "PUT", "/salaries/E1/2025", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SALARY");

    let (status, _) = send(&router, "GET", "/salaries/E1/2025", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_benefit_kind_is_rejected() {
    let router = create_router_on("2025-01-01");
    let mut item = uniform("x_001", "2024-01-01", "10");
    item["kind"] = json!("laptop");

    let (status, error) = send(
        &router,
        "POST",
        "/benefits/valuate",
        Some(json!({ "items": [item] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_blank_owner_is_invalid_benefit() {
    let router = create_router_on("2025-01-01");
    let mut item = uniform("uni_001", "2024-01-01", "10");
    item["owner_id"] = json!("  ");

    let (status, error) = send(
        &router,
        "POST",
        "/benefits/valuate",
        Some(json!({ "items": [item] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_BENEFIT");
}

#[tokio::test]
async fn test_delete_missing_records_returns_404() {
    let router = create_router_on("2025-01-01");

    let (status, error) = send(&router, "DELETE", "/salaries/E404/2025", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "SALARY_RECORD_NOT_FOUND");

    let (status, error) = send(&router, "DELETE", "/benefits/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "BENEFIT_NOT_FOUND");
}

#[tokio::test]
async fn test_empty_body_is_malformed_json() {
    let router = create_router_on("2025-01-01");
    let (status, error) = send(&router, "POST", "/payroll/calculate", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_non_numeric_year_in_path_is_json_validation_error() {
    let router = create_router_on("2025-01-01");

    for method in ["GET", "DELETE"] {
        let (status, error) = send(&router, method, "/salaries/E1/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "VALIDATION_ERROR");
        assert!(error["message"].as_str().unwrap().contains("abc"));
    }

    let (status, error) = send(&router, "PUT", "/salaries/E1/abc", Some(sample_components())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_non_numeric_year_in_query_is_json_validation_error() {
    let router = create_router_on("2025-01-01");
    let (status, error) = send(&router, "GET", "/salaries?year=abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].is_string());
}
