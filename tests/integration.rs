//! Integration tests for the payroll engine.
//!
//! This test suite covers:
//! - The end-to-end payroll scenarios with the bundled parameters
//! - Validation errors and their order
//! - The overtime limit and transport subsidy boundaries
//! - Parameter administration through the API
//! - Settlement creation

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use nomina_engine::api::{AppState, create_router};
use nomina_engine::calculation::{PayrollCalculator, SubsidyRule, calculate_net_total, settle};
use nomina_engine::config::{
    ConfigLoader, ConfigurationResolver, InMemoryParameterStore, PayrollConfig,
};
use nomina_engine::error::ValidationError;
use nomina_engine::models::{Employee, PayrollInput};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config").expect("Failed to load config");
    AppState::new(loader.into_store())
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Normalize decimal string by removing trailing zeros after decimal point
fn normalize_decimal(s: &str) -> String {
    Decimal::from_str(s).unwrap().normalize().to_string()
}

async fn send(
    router: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, "POST", "/calculate", Some(body)).await
}

fn calculation_body(
    base_salary: &str,
    day: i32,
    night: i32,
    bonus: &str,
    deduction: &str,
) -> Value {
    json!({
        "base_salary": base_salary,
        "day_overtime_hours": day,
        "night_overtime_hours": night,
        "extra_bonus": bonus,
        "extra_deduction": deduction
    })
}

fn amount(json: &Value, field: &str) -> String {
    normalize_decimal(json[field].as_str().unwrap())
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_1_salary_only() {
    let (status, json) =
        post_calculate(create_router_for_test(), calculation_body("2000000", 0, 0, "0", "0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json, "overtime_pay"), "0");
    assert_eq!(amount(&json, "transport_subsidy"), "162000");
    assert_eq!(amount(&json, "total_deductions"), "172960");
    assert_eq!(amount(&json, "net_total"), "1989040");
}

#[tokio::test]
async fn test_scenario_2_day_and_night_overtime() {
    let (status, json) =
        post_calculate(create_router_for_test(), calculation_body("1500000", 2, 1, "0", "0")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json, "overtime_pay"), "7736.25");
    assert_eq!(amount(&json, "net_total"), "1536157.35");
}

#[tokio::test]
async fn test_scenario_3_extra_bonus() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        calculation_body("1800000", 0, 0, "300000", "0"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json, "total_bonuses"), "462000");
    assert_eq!(amount(&json, "net_total"), "2081040");
}

#[tokio::test]
async fn test_scenario_4_overtime_limit_exceeded() {
    let (status, json) =
        post_calculate(create_router_for_test(), calculation_body("1300000", 36, 55, "0", "0"))
            .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "OVERTIME_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_scenario_5_negative_salary_regardless_of_other_fields() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        calculation_body("-1", 3, 4, "1000", "2000"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "NEGATIVE_SALARY");
    assert_eq!(
        json["message"],
        "Negative salary: the base salary cannot be negative"
    );
}

#[tokio::test]
async fn test_calculation_includes_ordered_audit_trace() {
    let (status, json) =
        post_calculate(create_router_for_test(), calculation_body("1500000", 2, 1, "0", "0")).await;

    assert_eq!(status, StatusCode::OK);
    let rule_ids: Vec<&str> = json["audit_trace"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "input_validation",
            "overtime_pay",
            "transport_subsidy",
            "deduction_cap",
            "deductions",
            "net_total"
        ]
    );
}

// =============================================================================
// Validation order and boundaries
// =============================================================================

#[tokio::test]
async fn test_negative_bonus_is_reported_before_negative_salary() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        calculation_body("-1", -1, 0, "-5", "-5"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "NEGATIVE_BONUS");
}

#[tokio::test]
async fn test_negative_hours_are_reported_before_negative_salary() {
    let (status, json) =
        post_calculate(create_router_for_test(), calculation_body("-1", 0, -2, "0", "0")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "NEGATIVE_HOURS");
}

#[tokio::test]
async fn test_negative_deduction_is_rejected() {
    let (status, json) = post_calculate(
        create_router_for_test(),
        calculation_body("1500000", 0, 0, "0", "-1"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "NEGATIVE_DEDUCTION");
}

#[tokio::test]
async fn test_deduction_cap_is_enforced() {
    // 2,000,000 * 0.40 = 800,000 cap
    let (status, json) = post_calculate(
        create_router_for_test(),
        calculation_body("2000000", 0, 0, "0", "700000"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "DEDUCTION_CAP_EXCEEDED");
}

#[test]
fn test_overtime_limit_boundary() {
    let calculator = PayrollCalculator::new(PayrollConfig::default());

    let at_limit = calculator.compute(&PayrollInput::new(decimal("1500000"), 45, 45));
    assert_eq!(
        at_limit,
        Err(ValidationError::OvertimeLimitExceeded {
            total_hours: 90,
            limit: 90
        })
    );

    let below_limit = calculator.compute(&PayrollInput::new(decimal("1500000"), 45, 44));
    assert!(below_limit.is_ok());
}

#[test]
fn test_subsidy_threshold_with_default_config() {
    let calculator = PayrollCalculator::new(PayrollConfig::default());

    let below = calculator
        .compute(&PayrollInput::new(decimal("2846999"), 0, 0))
        .unwrap();
    let at = calculator
        .compute(&PayrollInput::new(decimal("2847000"), 0, 0))
        .unwrap();

    assert_eq!(below.transport_subsidy, decimal("162000"));
    assert_eq!(at.transport_subsidy, Decimal::ZERO);
}

#[test]
fn test_subsidy_threshold_with_stored_minimum_wage() {
    // 2 * 1,300,000 = 2,600,000
    let store = InMemoryParameterStore::new();
    store
        .set(
            "minimum_wage",
            decimal("1300000"),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();
    let config = ConfigurationResolver::new(Arc::new(store)).resolve();
    let calculator = PayrollCalculator::new(config);

    let below = calculator
        .compute(&PayrollInput::new(decimal("2599999"), 0, 0))
        .unwrap();
    let at = calculator
        .compute(&PayrollInput::new(decimal("2600000"), 0, 0))
        .unwrap();

    assert_eq!(below.transport_subsidy, decimal("162000"));
    assert_eq!(at.transport_subsidy, Decimal::ZERO);
}

#[test]
fn test_calculate_net_total_matches_calculator() {
    let config = PayrollConfig::default();
    let net_total = calculate_net_total(
        decimal("1800000"),
        0,
        0,
        decimal("300000"),
        Decimal::ZERO,
        &config,
    )
    .unwrap();

    assert_eq!(net_total, decimal("2081040"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_bundled_parameters_match_defaults() {
    let store = ConfigLoader::load("./config").unwrap().into_store();
    let resolver = ConfigurationResolver::new(Arc::new(store));

    assert_eq!(resolver.resolve(), PayrollConfig::default());
}

#[tokio::test]
async fn test_get_parameters_returns_resolved_config() {
    let (status, json) = send(create_router_for_test(), "GET", "/parameters", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(normalize_decimal(json["minimum_wage"].as_str().unwrap()), "1300000");
    assert_eq!(amount(&json, "subsidy_salary_threshold"), "2847000");
    assert_eq!(json["max_overtime_hours"], 90);
}

#[tokio::test]
async fn test_updated_minimum_wage_moves_subsidy_threshold() {
    let state = AppState::new(InMemoryParameterStore::new());
    let router = create_router(state);

    let (status, _) = send(
        router.clone(),
        "PUT",
        "/parameters/minimum_wage",
        Some(json!({ "value": "1300000" })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, json) =
        post_calculate(router.clone(), calculation_body("2599999", 0, 0, "0", "0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json, "transport_subsidy"), "162000");

    let (status, json) =
        post_calculate(router, calculation_body("2600000", 0, 0, "0", "0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&json, "transport_subsidy"), "0");
}

#[tokio::test]
async fn test_unknown_parameter_update_is_rejected() {
    let (status, json) = send(
        create_router_for_test(),
        "PUT",
        "/parameters/not_a_parameter",
        Some(json!({ "value": "1" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_PARAMETER");
}

// =============================================================================
// Settlements
// =============================================================================

#[tokio::test]
async fn test_settlement_is_created() {
    let body = json!({
        "employee": {
            "name": "Carlos Gomez",
            "document": "79111222",
            "base_salary": "1500000",
            "hire_date": "2022-03-01"
        },
        "input": {
            "base_salary": "1500000",
            "day_overtime_hours": 2,
            "night_overtime_hours": 1
        },
        "settlement_date": "2025-01-31"
    });

    let (status, json) = send(create_router_for_test(), "POST", "/settlements", Some(body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(amount(&json, "net_total"), "1536157.35");
    assert_eq!(json["settlement_date"], "2025-01-31");
}

#[tokio::test]
async fn test_settlement_with_future_hire_date_is_rejected() {
    let body = json!({
        "employee": {
            "name": "Carlos Gomez",
            "document": "79111222",
            "base_salary": "1500000",
            "hire_date": "2025-06-01"
        },
        "input": { "base_salary": "1500000" },
        "settlement_date": "2025-01-31"
    });

    let (status, json) = send(create_router_for_test(), "POST", "/settlements", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_EMPLOYEE");
}

#[test]
fn test_settlement_subsidy_rules_differ_only_at_threshold() {
    let employee = Employee::new(
        "Ana Restrepo",
        "1020304050",
        decimal("2847000"),
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    );
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let config = PayrollConfig::default();

    for (salary, strict, inclusive) in [
        ("2846999", "162000", "162000"),
        ("2847000", "0", "162000"),
        ("2847001", "0", "0"),
    ] {
        let input = PayrollInput::new(decimal(salary), 0, 0);
        let below = settle(&employee, &input, date, &config, SubsidyRule::BelowThreshold).unwrap();
        let at_or_below =
            settle(&employee, &input, date, &config, SubsidyRule::AtOrBelowThreshold).unwrap();

        assert_eq!(below.transport_subsidy, decimal(strict), "salary {}", salary);
        assert_eq!(at_or_below.transport_subsidy, decimal(inclusive), "salary {}", salary);
        assert_eq!(below.net_total, at_or_below.net_total);
    }
}
