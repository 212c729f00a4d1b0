use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::gateway::GatewayError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::NotFound(msg) => {
                error_response(StatusCode::NOT_FOUND, "NOT_FOUND", msg)
            }
            AppError::Validation(msg) => {
                error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg)
            }
            AppError::Gateway(e) => {
                tracing::warn!("Gateway error: {e}");
                error_response(
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_ERROR",
                    &format!("The generation service failed: {e}"),
                )
            }
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                // the raw text rides along so the user can recover content by hand
                let body = Json(json!({
                    "error": {
                        "code": "EXTRACTION_FAILED",
                        "message": e.to_string(),
                        "raw_text": e.raw_text()
                    }
                }));
                (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred",
                )
            }
        }
    }
}

fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    let body = Json(json!({
        "error": {
            "code": code,
            "message": message
        }
    }));
    (status, body).into_response()
}
