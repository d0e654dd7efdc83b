use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::capability::CapabilityError;
use crate::stage::PipelineError;
use crate::storage::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A required stage could not reach the generation service, or research
    /// could not identify the hiring company.
    #[error("AI service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The generation service answered with output that violates its contract.
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match &e {
            PipelineError::Stage {
                source: CapabilityError::ServiceUnavailable(_),
                ..
            }
            | PipelineError::CompanyNotIdentified => AppError::ServiceUnavailable(e.to_string()),
            PipelineError::Stage {
                source: CapabilityError::GenerationFailed(_),
                ..
            }
            | PipelineError::InvalidRecommendation { .. } => AppError::GenerationFailed(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("AI service unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "AI_SERVICE_UNAVAILABLE",
                    msg.clone(),
                )
            }
            AppError::GenerationFailed(msg) => {
                tracing::error!("Generation failed: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", msg.clone())
            }
            AppError::Store(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
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
