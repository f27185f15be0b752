//! Axum route handlers for the Generation API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::generation::generator::generate_resume;
use crate::intake;
use crate::llm_client::catalog::{self, DEFAULT_MODELS};
use crate::models::ResumeStyle;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateResumeRequest {
    /// Raw form fields, field name → value. Unknown keys are ignored.
    pub fields: BTreeMap<String, String>,
    #[serde(default)]
    pub style: ResumeStyle,
    #[serde(default)]
    pub industry: Option<String>,
    /// Optional hosted-model override for this request.
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResumeResponse {
    pub resume_text: String,
    pub style: ResumeStyle,
    pub industry: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub models: Vec<String>,
    pub recommended: Option<String>,
    /// "live" when the catalog came from the API, "fallback" otherwise.
    pub source: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Validates the submitted fields, builds the prompt, and calls the model.
/// Validation failures return the exact missing-field set so the form can
/// highlight each one.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateResumeRequest>,
) -> Result<Json<GenerateResumeResponse>, AppError> {
    let industry = request.industry.as_deref().unwrap_or("General");
    let validated = intake::validate(&request.fields, request.style, industry)?;

    let resume = match &request.model {
        Some(model) => {
            let client = state.llm.with_model(model.clone());
            generate_resume(&client, &validated).await?
        }
        None => generate_resume(state.generator.as_ref(), &validated).await?,
    };

    Ok(Json(GenerateResumeResponse {
        resume_text: resume.text().to_string(),
        style: validated.style(),
        industry: validated.industry().to_string(),
        model: request
            .model
            .unwrap_or_else(|| state.llm.model().to_string()),
    }))
}

/// GET /api/v1/models
///
/// Lists text-generation-capable model variants with a recommendation.
/// Serves the static default list when the live listing fails, so the form
/// stays usable without a reachable catalog endpoint.
pub async fn handle_list_models(
    State(state): State<AppState>,
) -> Result<Json<ListModelsResponse>, AppError> {
    match state.llm.list_models().await {
        Ok(listed) => {
            let recommended = catalog::pick_text_model(&listed);
            let mut models = Vec::new();
            for info in listed.iter().filter(|m| catalog::is_text_generation_model(m)) {
                let short = catalog::short_name(&info.name).to_string();
                if !models.contains(&short) {
                    models.push(short);
                }
            }
            Ok(Json(ListModelsResponse {
                models,
                recommended,
                source: "live",
            }))
        }
        Err(e) => {
            warn!("model listing failed, serving default catalog: {e}");
            Ok(Json(ListModelsResponse {
                models: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
                recommended: Some(DEFAULT_MODELS[0].to_string()),
                source: "fallback",
            }))
        }
    }
}
