//! Resume generation — orchestrates the pipeline for one validated request.
//!
//! Flow: build_prompt → TextGenerator::generate → clean_resume_text →
//! GeneratedResume. The pipeline takes the generator as a trait object so
//! tests run against a mock and never touch the network.

use tracing::{debug, info};

use crate::generation::cleanup::clean_resume_text;
use crate::generation::prompts::build_prompt;
use crate::llm_client::{GenerationError, TextGenerator};
use crate::models::{GeneratedResume, ResumeRequest};

/// Runs the generation pipeline for a validated request.
///
/// The request is the only input that shapes the prompt; no session state
/// leaks in. Cleanup that strips the entire response surfaces as
/// `EmptyResponse` rather than an empty artifact downstream.
pub async fn generate_resume(
    llm: &dyn TextGenerator,
    request: &ResumeRequest,
) -> Result<GeneratedResume, GenerationError> {
    let prompt = build_prompt(request);
    debug!("prompt built ({} chars)", prompt.len());

    let raw = llm.generate(&prompt).await?;

    let text = clean_resume_text(&raw);
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    info!(
        "resume generated for '{}' ({} chars)",
        request.full_name(),
        text.len()
    );

    Ok(GeneratedResume::new(text, request.clone()))
}
