//! HTTP request handlers for the time-clock API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::{
    ClockActionRequest, CreateEmployeeRequest, DateRangeQuery, QuantityRequest, StockOperation,
    UpsertItemRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/clock/action", post(clock_action_handler))
        .route("/clock/timecard/:employee_id", get(timecard_handler))
        .route("/clock/export", get(export_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/:employee_id",
            get(get_employee_handler).delete(delete_employee_handler),
        )
        .route("/inventory", get(list_items_handler))
        .route("/inventory/:sku", get(get_item_handler).put(put_item_handler))
        .route("/inventory/:sku/:operation", post(stock_operation_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, api_error: ApiErrorResponse) -> Response {
    warn!(
        correlation_id = %correlation_id,
        code = %api_error.error.code,
        error = %api_error.error.message,
        "Request failed"
    );
    json_response(api_error.status, api_error.error)
}

/// Unwraps a JSON body or builds the 400 response for the rejection.
fn parse_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
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
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for POST /clock/action.
///
/// Advances the employee one step through the clock cycle.
async fn clock_action_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockActionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing clock action");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .service()
        .perform_clock_action(&request.employee_id, request.device_id)
        .await
    {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                punch_type = %result.punch_event.punch_type.as_str(),
                "Clock action completed"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for GET /clock/timecard/:employee_id.
async fn timecard_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing timecard request"
    );

    let range = match query.to_range() {
        Ok(range) => range,
        Err(err) => return error_response(correlation_id, err.into()),
    };

    let start_time = Instant::now();
    match state.service().compute_timecard(&employee_id, &range).await {
        Ok(timecard) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                days = timecard.days.len(),
                total_hours = %timecard.total_hours,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Timecard computed"
            );
            json_response(StatusCode::OK, timecard)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for GET /clock/export.
async fn export_handler(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll export");

    let range = match query.to_range() {
        Ok(range) => range,
        Err(err) => return error_response(correlation_id, err.into()),
    };

    match state.service().export_all_hours(&range).await {
        Ok(report) => json_response(StatusCode::OK, report),
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Maps a missing employee to 404 on the administration routes.
fn admin_error(err: EngineError) -> ApiErrorResponse {
    let not_found = matches!(err, EngineError::EmployeeNotFound { .. });
    let api_error: ApiErrorResponse = err.into();
    if not_found {
        api_error.with_status(StatusCode::NOT_FOUND)
    } else {
        api_error
    }
}

async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().list_employees().await {
        Ok(employees) => json_response(StatusCode::OK, employees),
        Err(err) => error_response(correlation_id, err.into()),
    }
}

async fn create_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee creation");

    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state
        .service()
        .create_employee(&request.name, request.pay_rate)
        .await
    {
        Ok(employee) => json_response(StatusCode::CREATED, employee),
        Err(err) => error_response(correlation_id, err.into()),
    }
}

async fn get_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().get_employee(&employee_id).await {
        Ok(employee) => json_response(StatusCode::OK, employee),
        Err(err) => error_response(correlation_id, admin_error(err)),
    }
}

async fn delete_employee_handler(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        "Processing employee deletion"
    );
    match state.service().delete_employee(&employee_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(correlation_id, admin_error(err)),
    }
}

async fn list_items_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.ledger().list_items().await {
        Ok(items) => json_response(StatusCode::OK, items),
        Err(err) => error_response(correlation_id, err.into()),
    }
}

async fn get_item_handler(State(state): State<AppState>, Path(sku): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.ledger().get_item(&sku).await {
        Ok(Some(item)) => json_response(StatusCode::OK, item),
        Ok(None) => error_response(correlation_id, EngineError::ItemNotFound { sku }.into()),
        Err(err) => error_response(correlation_id, err.into()),
    }
}

async fn put_item_handler(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    payload: Result<Json<UpsertItemRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.ledger().upsert_item(request.into_item(sku)).await {
        Ok(item) => {
            info!(correlation_id = %correlation_id, sku = %item.sku, "Stock item saved");
            json_response(StatusCode::OK, item)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}

/// Handler for POST /inventory/:sku/:operation.
///
/// Applies one of reserve, release, consume or receive to the item.
async fn stock_operation_handler(
    State(state): State<AppState>,
    Path((sku, operation)): Path<(String, String)>,
    payload: Result<Json<QuantityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let operation: StockOperation = match operation.parse() {
        Ok(operation) => operation,
        Err(unknown) => {
            return json_response(
                StatusCode::NOT_FOUND,
                ApiError::not_found(format!("Unknown inventory operation: {}", unknown)),
            );
        }
    };
    let QuantityRequest { quantity } = match parse_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let ledger = state.ledger();
    let result = match operation {
        StockOperation::Reserve => ledger.reserve(&sku, quantity).await,
        StockOperation::Release => ledger.release(&sku, quantity).await,
        StockOperation::Consume => ledger.consume(&sku, quantity).await,
        StockOperation::Receive => ledger.receive(&sku, quantity).await,
    };

    match result {
        Ok(item) => {
            info!(
                correlation_id = %correlation_id,
                sku = %sku,
                operation = operation.as_str(),
                quantity,
                available = item.available(),
                "Stock operation applied"
            );
            json_response(StatusCode::OK, item)
        }
        Err(err) => error_response(correlation_id, err.into()),
    }
}
