//! HTTP request handlers for the Tip Distribution Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{allocate_weekly_kitchen, calculate_obligations, distribute_shift};
use crate::error::EngineResult;

use super::request::{
    ObligationInputs, ObligationRequest, ShiftRequest, WeeklyKitchenRequest, effective_rules,
};
use super::response::{ApiError, ApiErrorResponse, CalculationEnvelope};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/obligations", post(obligations_handler))
        .route("/shifts/distribute", post(distribute_shift_handler))
        .route("/kitchen/weekly", post(weekly_kitchen_handler))
        .with_state(state)
}

/// Handler for POST /obligations.
///
/// Computes one worker's tip-out obligations from dollar figures.
async fn obligations_handler(
    State(state): State<AppState>,
    payload: Result<Json<ObligationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing obligation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = ObligationInputs::try_from(&request).and_then(|inputs| {
        let rules = effective_rules(state.rules(), request.rules.as_ref());
        calculate_obligations(
            inputs.role,
            inputs.sales_cents,
            inputs.tips_cents,
            inputs.bartender_count,
            &rules,
        )
    });

    if let Ok(obligation) = &result {
        info!(
            correlation_id = %correlation_id,
            role = %request.role,
            eligible = obligation.eligible,
            net_cents = obligation.net_after_contributions_cents,
            duration_us = start_time.elapsed().as_micros(),
            "Obligation calculation completed"
        );
    }
    calculation_response(correlation_id, result)
}

/// Handler for POST /shifts/distribute.
///
/// Distributes one service period's kitchen and bartender pools.
async fn distribute_shift_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShiftRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing shift distribution request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let rules = effective_rules(state.rules(), request.rules.as_ref());
    let result = request
        .worker_entries()
        .and_then(|workers| distribute_shift(&request.service_period_id, &workers, &rules));

    if let Ok(shift) = &result {
        info!(
            correlation_id = %correlation_id,
            service_period_id = %shift.service_period_id,
            workers = shift.payouts.len(),
            kitchen_pool_cents = shift.kitchen_pool_total_cents,
            bartender_pool_cents = shift.bartender_pool_total_cents,
            duration_us = start_time.elapsed().as_micros(),
            "Shift distribution completed"
        );
    }
    calculation_response(correlation_id, result)
}

/// Handler for POST /kitchen/weekly.
///
/// Allocates a week's kitchen pools to kitchen staff.
async fn weekly_kitchen_handler(
    payload: Result<Json<WeeklyKitchenRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing weekly kitchen request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    let result = allocate_weekly_kitchen(
        &request.week_id,
        &request.period_kitchen_pools,
        &request.kitchen_work_logs,
    );

    if let Ok(week) = &result {
        info!(
            correlation_id = %correlation_id,
            week_id = %week.week_id,
            employees = week.payouts.len(),
            total_kitchen_pool_cents = week.total_kitchen_pool_cents,
            duration_us = start_time.elapsed().as_micros(),
            "Weekly kitchen allocation completed"
        );
    }
    calculation_response(correlation_id, result)
}

/// Wraps a calculation outcome in the envelope or an error body.
fn calculation_response<T: Serialize>(correlation_id: Uuid, result: EngineResult<T>) -> Response {
    match result {
        Ok(value) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(CalculationEnvelope::new(correlation_id, value)),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
