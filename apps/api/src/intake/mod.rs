//! Field intake — turns a raw form submission into a validated `ResumeRequest`.
//!
//! Validation is pure: no side effects, and on failure the caller gets the
//! exact set of missing mandatory field names so each one can be highlighted
//! individually in the form.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::models::{ResumeRequest, ResumeStyle};

/// The fields a submission must carry, non-empty after trimming.
pub const MANDATORY_FIELDS: &[&str] = &[
    "full_name",
    "job_title",
    "email",
    "phone",
    "linkedin_url",
    "github_url",
    "education",
];

/// Optional fields; absent ones default to the empty string.
pub const OPTIONAL_FIELDS: [&str; 4] = ["summary", "skills", "experience", "projects"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The exact set of mandatory fields that were absent or trim-empty.
    #[error("missing mandatory fields: {}", .0.iter().cloned().collect::<Vec<_>>().join(", "))]
    MissingFields(BTreeSet<String>),

    /// Email was present but failed the minimal syntactic check.
    #[error("email address '{0}' is not plausibly formed")]
    InvalidEmail(String),
}

impl ValidationError {
    /// Missing field names, sorted; empty for `InvalidEmail`.
    pub fn missing_fields(&self) -> Vec<String> {
        match self {
            ValidationError::MissingFields(set) => set.iter().cloned().collect(),
            ValidationError::InvalidEmail(_) => Vec::new(),
        }
    }
}

/// Validates a raw field mapping against the mandatory-field policy.
///
/// A field counts as missing if it is absent from the map or empty after
/// trimming surrounding whitespace. On success the returned request holds the
/// trimmed values, with absent optional fields defaulted to `""`. Unknown
/// keys in the map are ignored.
pub fn validate(
    fields: &BTreeMap<String, String>,
    style: ResumeStyle,
    industry: &str,
) -> Result<ResumeRequest, ValidationError> {
    let missing: BTreeSet<String> = MANDATORY_FIELDS
        .iter()
        .filter(|name| trimmed(fields, name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let email = trimmed(fields, "email").unwrap_or_default();
    if !email_looks_plausible(&email) {
        return Err(ValidationError::InvalidEmail(email));
    }

    let mandatory = |name: &str| trimmed(fields, name).unwrap_or_default();
    let [summary, skills, experience, projects] =
        OPTIONAL_FIELDS.map(|name| trimmed(fields, name).unwrap_or_default());

    let industry = industry.trim();
    let industry = if industry.is_empty() { "General" } else { industry };

    Ok(ResumeRequest::from_validated_parts(
        mandatory("full_name"),
        mandatory("job_title"),
        email,
        mandatory("phone"),
        mandatory("linkedin_url"),
        mandatory("github_url"),
        mandatory("education"),
        summary,
        skills,
        experience,
        projects,
        style,
        industry.to_string(),
    ))
}

/// Minimal email plausibility check: an `@` with at least one `.` after it.
///
/// Deliberately NOT RFC 5322 validation — real-world addresses that full
/// validators reject are common, and the generation model does not care.
fn email_looks_plausible(email: &str) -> bool {
    match email.find('@') {
        Some(at) => email[at + 1..].contains('.'),
        None => false,
    }
}

/// Trimmed value of a field, or `None` if absent or trim-empty.
fn trimmed(fields: &BTreeMap<String, String>, name: &str) -> Option<String> {
    fields.get(name).map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_fields() -> BTreeMap<String, String> {
        [
            ("full_name", "Jane Doe"),
            ("job_title", "Backend Engineer"),
            ("email", "jane@x.com"),
            ("phone", "555-0100"),
            ("linkedin_url", "linkedin.com/in/jane"),
            ("github_url", "github.com/jane"),
            ("education", "B.S. CS"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_complete_submission_validates() {
        let request = validate(&complete_fields(), ResumeStyle::Professional, "General")
            .expect("all mandatory fields present");
        assert_eq!(request.full_name(), "Jane Doe");
        assert_eq!(request.job_title(), "Backend Engineer");
        assert_eq!(request.email(), "jane@x.com");
        assert_eq!(request.phone(), "555-0100");
        assert_eq!(request.linkedin_url(), "linkedin.com/in/jane");
        assert_eq!(request.github_url(), "github.com/jane");
        assert_eq!(request.education(), "B.S. CS");
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let request = validate(&complete_fields(), ResumeStyle::Professional, "General").unwrap();
        assert_eq!(request.summary(), "");
        assert_eq!(request.skills(), "");
        assert_eq!(request.experience(), "");
        assert_eq!(request.projects(), "");
    }

    #[test]
    fn test_missing_email_reported_exactly() {
        let mut fields = complete_fields();
        fields.remove("email");
        let err = validate(&fields, ResumeStyle::Professional, "General").unwrap_err();
        assert_eq!(err.missing_fields(), vec!["email".to_string()]);
    }

    #[test]
    fn test_missing_set_is_exact_no_more_no_less() {
        let mut fields = complete_fields();
        fields.remove("phone");
        fields.remove("github_url");
        fields.insert("education".to_string(), "   ".to_string());
        let err = validate(&fields, ResumeStyle::Professional, "General").unwrap_err();
        assert_eq!(
            err.missing_fields(),
            vec![
                "education".to_string(),
                "github_url".to_string(),
                "phone".to_string()
            ]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut fields = complete_fields();
        fields.insert("full_name".to_string(), " \t ".to_string());
        let err = validate(&fields, ResumeStyle::Professional, "General").unwrap_err();
        assert_eq!(err.missing_fields(), vec!["full_name".to_string()]);
    }

    #[test]
    fn test_empty_map_reports_all_mandatory_fields() {
        let err =
            validate(&BTreeMap::new(), ResumeStyle::Professional, "General").unwrap_err();
        assert_eq!(err.missing_fields().len(), MANDATORY_FIELDS.len());
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut fields = complete_fields();
        fields.insert("full_name".to_string(), "  Jane Doe  ".to_string());
        fields.insert("summary".to_string(), "  Ships things.  ".to_string());
        let request = validate(&fields, ResumeStyle::Professional, "General").unwrap();
        assert_eq!(request.full_name(), "Jane Doe");
        assert_eq!(request.summary(), "Ships things.");
    }

    #[test]
    fn test_email_without_at_rejected() {
        let mut fields = complete_fields();
        fields.insert("email".to_string(), "jane.x.com".to_string());
        let err = validate(&fields, ResumeStyle::Professional, "General").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail(_)));
    }

    #[test]
    fn test_email_without_dot_after_at_rejected() {
        let mut fields = complete_fields();
        fields.insert("email".to_string(), "jane@localhost".to_string());
        let err = validate(&fields, ResumeStyle::Professional, "General").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail(_)));
    }

    #[test]
    fn test_unusual_but_plausible_email_accepted() {
        let mut fields = complete_fields();
        fields.insert("email".to_string(), "jane+resume@sub.example.co".to_string());
        assert!(validate(&fields, ResumeStyle::Professional, "General").is_ok());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let mut fields = complete_fields();
        fields.insert("favorite_color".to_string(), "teal".to_string());
        assert!(validate(&fields, ResumeStyle::Professional, "General").is_ok());
    }

    #[test]
    fn test_blank_industry_defaults_to_general() {
        let request = validate(&complete_fields(), ResumeStyle::Ats, "  ").unwrap();
        assert_eq!(request.industry(), "General");
        assert_eq!(request.style(), ResumeStyle::Ats);
    }
}
