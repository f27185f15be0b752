#![allow(dead_code)]

//! Generated resume text, tied to the request that produced it.

use serde::Serialize;

use crate::models::artifact::{slugify, ExportArtifact, ExportFormat};
use crate::models::request::ResumeRequest;
use crate::render::{self, RenderError};

/// The model's cleaned output for one generation call.
///
/// Never mutated after construction; a regeneration produces a new value.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedResume {
    text: String,
    request: ResumeRequest,
}

impl GeneratedResume {
    pub(crate) fn new(text: String, request: ResumeRequest) -> Self {
        Self { text, request }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn request(&self) -> &ResumeRequest {
        &self.request
    }

    /// Renders this resume into a downloadable artifact.
    ///
    /// The filename stem is derived from the candidate name, so the same
    /// resume always exports under the same name regardless of format.
    pub fn export(&self, format: ExportFormat) -> Result<ExportArtifact, RenderError> {
        render::render_with_stem(&self.text, format, &slugify(self.request.full_name()))
    }
}
