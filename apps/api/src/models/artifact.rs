//! Export artifacts — ephemeral value objects carrying rendered bytes.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The three supported download formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Text,
    Docx,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

/// One rendered output: format, payload, suggested filename.
///
/// Derived deterministically from generated text; regenerable at any time and
/// carries no identity beyond its content.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Bytes,
    pub filename: String,
}

impl ExportArtifact {
    pub fn new(format: ExportFormat, bytes: Vec<u8>, stem: &str) -> Self {
        let stem = if stem.is_empty() { "resume" } else { stem };
        Self {
            format,
            bytes: Bytes::from(bytes),
            filename: format!("{stem}.{}", format.extension()),
        }
    }
}

/// Reduces an arbitrary display name to a safe filename stem.
///
/// Lowercases, maps runs of non-alphanumerics to single underscores, and
/// trims them from the ends. Empty input yields an empty stem (the artifact
/// constructor falls back to `resume`).
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}
