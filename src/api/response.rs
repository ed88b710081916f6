//! Response types for the Tip Distribution Engine API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// Wrapper around every successful calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationEnvelope<T> {
    /// Unique identifier for this calculation; also the request's correlation id.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The calculation result.
    pub result: T,
}

impl<T> CalculationEnvelope<T> {
    /// Wraps `result` under the given calculation id, stamped now.
    pub fn new(calculation_id: Uuid, result: T) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            result,
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

impl ApiErrorResponse {
    fn bad_request(code: &str, error: &EngineError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(code, error.to_string()),
        }
    }

    fn unprocessable(code: &str, error: &EngineError, details: &str) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: ApiError::with_details(code, error.to_string(), details),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details(
                        "CONFIG_ERROR",
                        "Configuration error",
                        error.to_string(),
                    ),
                }
            }
            EngineError::InvalidRules { .. } => Self::bad_request("INVALID_RULES", &error),
            EngineError::InvalidRole { .. } => Self::bad_request("INVALID_ROLE", &error),
            EngineError::InvalidAmount { .. } => Self::bad_request("INVALID_AMOUNT", &error),
            EngineError::MissingIdentifier { .. } | EngineError::EmptyInput { .. } => {
                Self::bad_request("VALIDATION_ERROR", &error)
            }
            EngineError::DuplicateEmployee { .. } => {
                Self::bad_request("DUPLICATE_EMPLOYEE", &error)
            }
            EngineError::InvalidBartenderCount { .. } => {
                Self::bad_request("INVALID_BARTENDER_COUNT", &error)
            }
            EngineError::InvalidWorker { .. } => Self::bad_request("INVALID_WORKER", &error),
            EngineError::UnallocatablePool { .. } => Self::unprocessable(
                "UNALLOCATABLE_POOL",
                &error,
                "Every service period with a kitchen pool needs kitchen work logs",
            ),
            EngineError::ZeroWeightedUnits { .. } => Self::unprocessable(
                "ZERO_WEIGHTED_UNITS",
                &error,
                "Kitchen work logs for a funded service period carry no weighted hours",
            ),
            EngineError::Overflow { .. } => Self::unprocessable(
                "OVERFLOW",
                &error,
                "An amount exceeds the range the engine can compute exactly",
            ),
        }
    }
}
