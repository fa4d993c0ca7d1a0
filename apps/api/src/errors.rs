#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::summarize::SummarizerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A screening run was triggered with no resume uploaded. Non-fatal:
    /// the session keeps whatever state it had.
    #[error("No resume uploaded")]
    MissingDocument,

    #[error("Document format error: {0}")]
    DocumentFormat(String),

    #[error("Summarizer error: {0}")]
    Summarizer(#[from] SummarizerError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingDocument => (
                StatusCode::CONFLICT,
                "NO_DOCUMENT",
                "Please upload a resume PDF before screening".to_string(),
            ),
            AppError::DocumentFormat(msg) => {
                tracing::warn!("Rejected upload: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "DOCUMENT_FORMAT_ERROR",
                    "The uploaded file is not a readable PDF".to_string(),
                )
            }
            AppError::Summarizer(e) => {
                tracing::error!("Summarizer error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SUMMARIZER_ERROR",
                    "The summarization service failed".to_string(),
                )
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "Word cloud rendering failed".to_string(),
                )
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
