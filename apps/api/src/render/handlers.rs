//! Axum route handlers for the Export API.

use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::artifact::slugify;
use crate::models::ExportFormat;
use crate::render;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Generated resume text, section markers included.
    pub text: String,
    pub format: ExportFormat,
    /// Optional filename stem; slugified, defaults to `resume`.
    #[serde(default)]
    pub filename_stem: Option<String>,
}

/// POST /api/v1/resumes/export
///
/// Renders generated text into one downloadable artifact. Encoding is
/// CPU-bound, so it runs on the blocking pool rather than an async worker.
pub async fn handle_export(
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let artifact = tokio::task::spawn_blocking(move || {
        let stem = request
            .filename_stem
            .as_deref()
            .map(slugify)
            .unwrap_or_default();
        if stem.is_empty() {
            render::render(&request.text, request.format)
        } else {
            render::render_with_stem(&request.text, request.format, &stem)
        }
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    let headers = [
        (
            header::CONTENT_TYPE,
            artifact.format.mime_type().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.filename),
        ),
    ];

    Ok((headers, artifact.bytes))
}
