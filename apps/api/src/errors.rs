use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::format::form::render_upload_form;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The service is a single-page flow, so every variant re-renders the
/// upload form with the error flashed above it. The extraction pipeline
/// itself never produces one of these — only the surrounding plumbing
/// (file handling, rendering) does.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Error processing file: {0}")]
    FileProcessing(String),

    #[error("Processing error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::FileProcessing(_) => StatusCode::BAD_REQUEST,
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        (status, Html(render_upload_form(Some(&message)))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_flashes_message() {
        let response = AppError::Validation("Please select a resume file".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_file_processing_error_includes_prefix() {
        let err = AppError::FileProcessing("Unsupported file format: resume.rtf".to_string());
        assert_eq!(
            err.to_string(),
            "Error processing file: Unsupported file format: resume.rtf"
        );
    }
}
