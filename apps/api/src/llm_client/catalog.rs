//! Model catalog — filters the hosted model list down to text-generation
//! variants and picks a sensible default.

use serde::{Deserialize, Serialize};

/// Static fallback shown when the live model listing is unavailable.
pub const DEFAULT_MODELS: &[&str] = &["gemini-1.5-flash", "gemini-1.5-pro", "gemini-2.0-flash-exp"];

/// Preferred variants, best first.
const PRIORITY_MODELS: &[&str] = &[
    "gemini-2.5-pro",
    "gemini-2.5-flash",
    "gemini-1.5-pro",
    "gemini-1.5-flash",
];

/// Name fragments that mark a model as unusable for text generation.
const NON_TEXT_MARKERS: &[&str] = &["embedding", "vision", "image", "audio", "speech"];

/// One entry from the `GET /v1beta/models` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    /// Fully-qualified name, e.g. `models/gemini-1.5-flash`.
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

/// The short variant name callers pass to `generateContent`.
pub fn short_name(full: &str) -> &str {
    full.rsplit('/').next().unwrap_or(full)
}

/// Whether a model can serve `generateContent` text requests.
///
/// Skips embedding/vision/image/audio/speech variants by name, then requires
/// `generateContent` among the supported methods.
pub fn is_text_generation_model(model: &ModelInfo) -> bool {
    let lname = model.name.to_lowercase();
    if NON_TEXT_MARKERS.iter().any(|m| lname.contains(m)) {
        return false;
    }
    model
        .supported_generation_methods
        .iter()
        .any(|m| m.eq_ignore_ascii_case("generateContent"))
}

/// Picks the best text-generation model from a listing.
///
/// Prefers the priority variants in order, then falls back to the first
/// text-capable candidate. `None` when nothing in the list can generate text.
pub fn pick_text_model(models: &[ModelInfo]) -> Option<String> {
    let candidates: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| is_text_generation_model(m))
        .collect();

    for preferred in PRIORITY_MODELS {
        if let Some(found) = candidates.iter().find(|c| c.name.contains(preferred)) {
            return Some(short_name(&found.name).to_string());
        }
    }

    candidates.first().map(|c| short_name(&c.name).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, methods: &[&str]) -> ModelInfo {
        ModelInfo {
            name: name.to_string(),
            supported_generation_methods: methods.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn test_short_name_strips_prefix() {
        assert_eq!(short_name("models/gemini-1.5-flash"), "gemini-1.5-flash");
        assert_eq!(short_name("gemini-1.5-flash"), "gemini-1.5-flash");
    }

    #[test]
    fn test_embedding_models_excluded() {
        let m = model("models/text-embedding-004", &["embedContent"]);
        assert!(!is_text_generation_model(&m));
    }

    #[test]
    fn test_vision_and_audio_models_excluded_by_name() {
        for name in ["models/gemini-pro-vision", "models/speech-gen-1"] {
            assert!(!is_text_generation_model(&model(name, &["generateContent"])));
        }
    }

    #[test]
    fn test_model_without_generate_content_excluded() {
        let m = model("models/gemini-1.5-flash", &["countTokens"]);
        assert!(!is_text_generation_model(&m));
    }

    #[test]
    fn test_pick_prefers_priority_order() {
        let models = vec![
            model("models/gemini-1.5-flash", &["generateContent"]),
            model("models/gemini-2.5-pro", &["generateContent"]),
            model("models/gemini-1.5-pro", &["generateContent"]),
        ];
        assert_eq!(pick_text_model(&models).as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_pick_falls_back_to_first_candidate() {
        let models = vec![
            model("models/text-embedding-004", &["embedContent"]),
            model("models/gemini-exp-1206", &["generateContent"]),
        ];
        assert_eq!(pick_text_model(&models).as_deref(), Some("gemini-exp-1206"));
    }

    #[test]
    fn test_pick_returns_none_without_text_models() {
        let models = vec![model("models/text-embedding-004", &["embedContent"])];
        assert_eq!(pick_text_model(&models), None);
    }
}
