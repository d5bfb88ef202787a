#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::scheduling::zoom::SchedulingError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing credentials, unknown role, or an invalid role profile.
    /// Fatal to the specific operation; never silently defaulted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The uploaded document could not be turned into text.
    /// Aborts the evaluation for that candidate only.
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Scheduling error: {0}")]
    Scheduling(#[from] SchedulingError),

    /// Mail delivery failure. Non-fatal to the workflow; handlers log it and
    /// report it in the response body rather than returning this variant.
    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Configuration(msg) => {
                (StatusCode::BAD_REQUEST, "CONFIGURATION_ERROR", msg.clone())
            }
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Scheduling(e) => {
                tracing::error!("Scheduling error: {e}");
                let code = match e {
                    SchedulingError::AuthFailure(_) => "SCHEDULING_AUTH_FAILURE",
                    SchedulingError::BookingFailure(_) => "SCHEDULING_BOOKING_FAILURE",
                };
                (StatusCode::BAD_GATEWAY, code, e.to_string())
            }
            AppError::Notification(msg) => {
                tracing::error!("Notification error: {msg}");
                (StatusCode::BAD_GATEWAY, "NOTIFICATION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
