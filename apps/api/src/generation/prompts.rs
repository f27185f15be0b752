//! Prompt builder — renders a validated `ResumeRequest` into the single
//! natural-language instruction sent to the model.
//!
//! Pure and deterministic: the prompt is a function of the request's fields
//! and nothing else. Identical requests always produce identical strings.

use crate::llm_client::prompts::{ATS_FORMAT_INSTRUCTION, SECTION_MARKER_INSTRUCTION};
use crate::models::ResumeRequest;

/// Optional sections, in the order they appear in the prompt.
/// Empty values are omitted entirely, heading included.
const OPTIONAL_SECTIONS: &[(&str, fn(&ResumeRequest) -> &str)] = &[
    ("Professional Summary", |r| r.summary()),
    ("Skills", |r| r.skills()),
    ("Experience", |r| r.experience()),
    ("Projects", |r| r.projects()),
];

/// Builds the generation prompt for a validated request.
pub fn build_prompt(request: &ResumeRequest) -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(&format!(
        "You are an expert resume writer skilled in ATS-friendly formatting.\n\
         Write a polished, well-structured {} resume for the {} industry\n\
         based on the details below.\n",
        request.style().as_str(),
        request.industry()
    ));

    prompt.push_str("\n--- Personal Details ---\n");
    prompt.push_str(&format!("Name: {}\n", request.full_name()));
    prompt.push_str(&format!("Job Title: {}\n", request.job_title()));
    prompt.push_str(&format!("Email: {}\n", request.email()));
    prompt.push_str(&format!("Phone: {}\n", request.phone()));
    prompt.push_str(&format!("LinkedIn: {}\n", request.linkedin_url()));
    prompt.push_str(&format!("GitHub: {}\n", request.github_url()));

    prompt.push_str(&format!("\n--- Education ---\n{}\n", request.education()));

    for (heading, value) in OPTIONAL_SECTIONS {
        let value = value(request);
        if !value.is_empty() {
            prompt.push_str(&format!("\n--- {heading} ---\n{value}\n"));
        }
    }

    prompt.push_str("\n--- Requirements ---\n");
    prompt.push_str(&format!("- Resume style: {}\n", request.style().as_str()));
    prompt.push_str(&format!("- Industry focus: {}\n", request.industry()));
    prompt.push_str(&format!("- {ATS_FORMAT_INSTRUCTION}\n"));
    prompt.push_str(&format!("- {SECTION_MARKER_INSTRUCTION}\n"));
    prompt.push_str(
        "- Use strong action verbs and measurable achievements\n\
         - Do NOT invent employers, dates, or credentials not present in the details\n\
         - Do NOT add placeholders for missing information\n\
         - Output only resume content. No explanations.\n",
    );

    prompt
}
