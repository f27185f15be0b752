use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Concrete client — model catalog access and per-request model overrides.
    pub llm: GeminiClient,
    /// Pluggable generation seam used by the pipeline; mocked in tests.
    pub generator: Arc<dyn TextGenerator>,
    /// Retained for handlers that need runtime settings beyond the client.
    #[allow(dead_code)]
    pub config: Config,
}
