//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollCalculator, settle};
use crate::models::{Employee, PayrollInput};

use super::request::{CalculationRequest, ParameterUpdateRequest, SettlementRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/settlements", post(settlement_handler))
        .route("/parameters", get(list_parameters_handler))
        .route(
            "/parameters/:name",
            put(update_parameter_handler).delete(reset_parameter_handler),
        )
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a payroll input and returns the payroll result with its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };
    let input: PayrollInput = request.into();

    let calculator = PayrollCalculator::new(state.resolve_config());
    let start_time = Instant::now();
    match calculator.compute_with_audit(&input) {
        Ok(calculation) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                base_salary = %input.base_salary,
                net_total = %calculation.result.net_total,
                duration_us = duration.as_micros(),
                "Calculation completed successfully"
            );
            let response = CalculationResponse {
                calculation_id: correlation_id,
                calculated_at: Utc::now(),
                result: calculation.result,
                audit_trace: calculation.audit_trace,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                code = err.code(),
                error = %err,
                "Calculation rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /settlements endpoint.
///
/// Validates the employee, computes the payroll and returns the settlement
/// record for the caller to persist.
async fn settlement_handler(
    State(state): State<AppState>,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settlement request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let settlement_date = request
        .settlement_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let employee: Employee = request.employee.into();
    let input: PayrollInput = request.input.into();

    let config = state.resolve_config();
    match settle(
        &employee,
        &input,
        settlement_date,
        &config,
        state.settlement_subsidy_rule(),
    ) {
        Ok(settlement) => {
            info!(
                correlation_id = %correlation_id,
                settlement_id = %settlement.id,
                employee_id = %settlement.employee_id,
                "Settlement created"
            );
            json_response(StatusCode::CREATED, settlement)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                error = %err,
                "Settlement rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /parameters endpoint.
///
/// Returns the configuration a calculation would currently run with.
async fn list_parameters_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.resolve_config())
}

/// Handler for PUT /parameters/{name} endpoint.
async fn update_parameter_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<ParameterUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state
        .store()
        .set(&name, request.value, Utc::now().date_naive())
    {
        Ok(()) => {
            info!(
                correlation_id = %correlation_id,
                parameter = %name,
                value = %request.value,
                "Parameter updated"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                parameter = %name,
                error = %err,
                "Parameter update rejected"
            );
            error_response(err.into())
        }
    }
}

/// Handler for DELETE /parameters/{name} endpoint.
///
/// Removes a stored value so the parameter falls back to its default.
async fn reset_parameter_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    match state.store().remove(&name) {
        Ok(Some(_)) => {
            info!(parameter = %name, "Parameter reset to default");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(None) => error_response(ApiErrorResponse {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new(
                "PARAMETER_NOT_SET",
                format!("Parameter '{}' has no stored value", name),
            ),
        }),
        Err(err) => error_response(err.into()),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InMemoryParameterStore, PayrollConfig};
    use crate::models::Settlement;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        AppState::new(InMemoryParameterStore::new())
    }

    fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_calculate_returns_result_and_audit_trace() {
        let router = create_router(create_test_state());
        let body = r#"{
            "base_salary": "1500000",
            "day_overtime_hours": 2,
            "night_overtime_hours": 1
        }"#;

        let response = router
            .oneshot(json_request("POST", "/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let result: CalculationResponse = body_json(response).await;
        assert_eq!(result.result.net_total, dec("1536157.35"));
        assert_eq!(result.result.transport_subsidy, dec("162000"));
        assert_eq!(result.audit_trace.steps.len(), 6);
    }

    #[tokio::test]
    async fn test_calculate_validation_error_returns_422() {
        let router = create_router(create_test_state());
        let body = r#"{"base_salary": "-1"}"#;

        let response = router
            .oneshot(json_request("POST", "/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "NEGATIVE_SALARY");
        assert_eq!(
            error.message,
            "Negative salary: the base salary cannot be negative"
        );
    }

    #[tokio::test]
    async fn test_calculate_overflowing_bonus_returns_422() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "base_salary": "3000000",
            "extra_bonus": Decimal::MAX
        });

        let response = router
            .oneshot(json_request("POST", "/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "AMOUNT_OUT_OF_RANGE");
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request("POST", "/calculate", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_missing_salary_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "POST",
                "/calculate",
                r#"{"day_overtime_hours": 2}"#.to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("base_salary"));
    }

    #[tokio::test]
    async fn test_settlement_returns_201() {
        let router = create_router(create_test_state());
        let body = r#"{
            "employee": {
                "name": "Ana Restrepo",
                "document": "1020304050",
                "base_salary": "1800000",
                "hire_date": "2023-06-01"
            },
            "input": {
                "base_salary": "1800000",
                "extra_bonus": "300000"
            },
            "settlement_date": "2025-01-31"
        }"#;

        let response = router
            .oneshot(json_request("POST", "/settlements", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let settlement: Settlement = body_json(response).await;
        assert_eq!(settlement.net_total, dec("2081040"));
        assert_eq!(settlement.transport_subsidy, dec("162000"));
        assert_eq!(settlement.extra_bonus, dec("300000"));
    }

    #[tokio::test]
    async fn test_settlement_with_invalid_employee_returns_422() {
        let router = create_router(create_test_state());
        let body = r#"{
            "employee": {
                "name": "",
                "document": "1020304050",
                "base_salary": "2000000",
                "hire_date": "2023-06-01"
            },
            "input": { "base_salary": "2000000" },
            "settlement_date": "2025-01-31"
        }"#;

        let response = router
            .oneshot(json_request("POST", "/settlements", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_EMPLOYEE");
    }

    #[tokio::test]
    async fn test_settlement_uses_configured_subsidy_rule() {
        let state = create_test_state()
            .with_settlement_subsidy_rule(crate::calculation::SubsidyRule::AtOrBelowThreshold);
        let router = create_router(state);
        let body = r#"{
            "employee": {
                "name": "Carlos Gomez",
                "document": "79111222",
                "base_salary": "2847000",
                "hire_date": "2022-03-01"
            },
            "input": { "base_salary": "2847000" },
            "settlement_date": "2025-01-31"
        }"#;

        let response = router
            .oneshot(json_request("POST", "/settlements", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let settlement: Settlement = body_json(response).await;
        // Recorded under the inclusive rule; the net total still uses the strict one.
        assert_eq!(settlement.transport_subsidy, dec("162000"));
        assert_eq!(settlement.net_total, dec("2619240"));
    }

    #[tokio::test]
    async fn test_get_parameters_returns_defaults() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/parameters")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let config: PayrollConfig = body_json(response).await;
        assert_eq!(config, PayrollConfig::default());
    }

    #[tokio::test]
    async fn test_parameter_update_applies_to_next_calculation() {
        let state = create_test_state();
        let router = create_router(state.clone());

        let response = router
            .clone()
            .oneshot(json_request(
                "PUT",
                "/parameters/transport_subsidy_amount",
                r#"{"value": "200000"}"#.to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            state.resolve_config().transport_subsidy_amount,
            dec("200000")
        );

        let response = router
            .oneshot(json_request(
                "POST",
                "/calculate",
                r#"{"base_salary": "1300000"}"#.to_string(),
            ))
            .await
            .unwrap();
        let result: CalculationResponse = body_json(response).await;
        assert_eq!(result.result.transport_subsidy, dec("200000"));
    }

    #[tokio::test]
    async fn test_unknown_parameter_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(json_request(
                "PUT",
                "/parameters/retencion_fuente",
                r#"{"value": "0.1"}"#.to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_PARAMETER");
    }

    #[tokio::test]
    async fn test_reset_parameter_restores_default() {
        let state = create_test_state();
        state
            .store()
            .set("deduction_rate", dec("0.1"), Utc::now().date_naive())
            .unwrap();
        let router = create_router(state.clone());

        let reset = || {
            Request::builder()
                .method("DELETE")
                .uri("/parameters/deduction_rate")
                .body(Body::empty())
                .unwrap()
        };

        let response = router.clone().oneshot(reset()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.resolve_config().deduction_rate, dec("0.08"));

        let response = router.oneshot(reset()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
