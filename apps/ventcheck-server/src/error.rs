//! Error types for the ventcheck server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use compliance_engine::ComplianceError;
use scorecard_pdf::ReportError;

/// Shown to clients for any missing or unusable calculation input
pub const INVALID_INPUT_MESSAGE: &str =
    "Invalid input. Please provide square footage and ventilation details.";

/// Shown to clients for anything that should never happen
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again.";

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Report generation failed: {0}")]
    Report(#[from] ReportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::InvalidRequest(msg) => {
                warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg.clone())
            }
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Method not allowed".to_string(),
            ),
            ServerError::Report(err) => {
                error!("Report generation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "REPORT_ERROR",
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
            ServerError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    SERVER_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = ErrorResponse {
            success: false,
            message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ComplianceError> for ServerError {
    fn from(err: ComplianceError) -> Self {
        ServerError::InvalidRequest(err.to_string())
    }
}

/// Malformed bodies are client errors (400), never axum's default 422
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(format!(
            "{} {}",
            INVALID_INPUT_MESSAGE,
            rejection.body_text()
        ))
    }
}
