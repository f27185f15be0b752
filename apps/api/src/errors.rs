use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::intake::ValidationError;
use crate::llm_client::GenerationError;
use crate::render::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing here is fatal to the process: every failure becomes a structured
/// JSON response for the caller to act on.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, missing_fields) = match &self {
            AppError::Validation(e) => {
                let missing = e.missing_fields();
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    e.to_string(),
                    if missing.is_empty() { None } else { Some(missing) },
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                let (status, code) = match e {
                    GenerationError::MissingCredential => {
                        (StatusCode::SERVICE_UNAVAILABLE, "MISSING_CREDENTIAL")
                    }
                    GenerationError::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK_FAILURE"),
                    GenerationError::Service { .. } => (StatusCode::BAD_GATEWAY, "SERVICE_ERROR"),
                    GenerationError::EmptyResponse => (StatusCode::BAD_GATEWAY, "EMPTY_RESPONSE"),
                };
                (status, code, e.to_string(), None)
            }
            AppError::Render(e) => {
                let (status, code) = match e {
                    RenderError::EmptyInput => (StatusCode::BAD_REQUEST, "EMPTY_INPUT"),
                    RenderError::EncodingFailure { .. } => {
                        (StatusCode::UNPROCESSABLE_ENTITY, "ENCODING_FAILURE")
                    }
                    RenderError::Backend { .. } => {
                        tracing::error!("Render backend error: {e}");
                        (StatusCode::INTERNAL_SERVER_ERROR, "RENDER_ERROR")
                    }
                };
                (status, code, e.to_string(), None)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(missing) = missing_fields {
            error["missing_fields"] = json!(missing);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn test_missing_fields_map_to_bad_request() {
        let err = AppError::from(ValidationError::MissingFields(BTreeSet::from([
            "email".to_string(),
        ])));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_credential_maps_to_service_unavailable() {
        let err = AppError::from(GenerationError::MissingCredential);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_service_error_maps_to_bad_gateway() {
        let err = AppError::from(GenerationError::Service {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_empty_input_maps_to_bad_request() {
        let err = AppError::from(RenderError::EmptyInput);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_encoding_failure_maps_to_unprocessable() {
        let err = AppError::from(RenderError::EncodingFailure {
            format: "pdf",
            detail: "control character U+0000".to_string(),
        });
        assert_eq!(
            err.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
