//! Validated resume input — the only source of truth for prompt building.

use serde::{Deserialize, Serialize};

/// The resume styles the prompt builder knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStyle {
    #[default]
    Professional,
    Ats,
    Creative,
}

impl ResumeStyle {
    /// The style name as it appears in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStyle::Professional => "professional",
            ResumeStyle::Ats => "ats",
            ResumeStyle::Creative => "creative",
        }
    }
}

/// A validated, immutable resume request.
///
/// Only `intake::validate` constructs one, and only after every mandatory
/// field survived trimming non-empty. All values are stored trimmed.
/// Optional fields default to the empty string.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeRequest {
    full_name: String,
    job_title: String,
    email: String,
    phone: String,
    linkedin_url: String,
    github_url: String,
    education: String,
    summary: String,
    skills: String,
    experience: String,
    projects: String,
    style: ResumeStyle,
    industry: String,
}

impl ResumeRequest {
    /// Assembles a request from already-validated parts.
    ///
    /// Crate-private on purpose: `intake::validate` is the single constructor.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_validated_parts(
        full_name: String,
        job_title: String,
        email: String,
        phone: String,
        linkedin_url: String,
        github_url: String,
        education: String,
        summary: String,
        skills: String,
        experience: String,
        projects: String,
        style: ResumeStyle,
        industry: String,
    ) -> Self {
        Self {
            full_name,
            job_title,
            email,
            phone,
            linkedin_url,
            github_url,
            education,
            summary,
            skills,
            experience,
            projects,
            style,
            industry,
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn linkedin_url(&self) -> &str {
        &self.linkedin_url
    }

    pub fn github_url(&self) -> &str {
        &self.github_url
    }

    pub fn education(&self) -> &str {
        &self.education
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn skills(&self) -> &str {
        &self.skills
    }

    pub fn experience(&self) -> &str {
        &self.experience
    }

    pub fn projects(&self) -> &str {
        &self.projects
    }

    pub fn style(&self) -> ResumeStyle {
        self.style
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }
}
