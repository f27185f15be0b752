// Document Export
// Implements: marker-based section splitting, TEXT/DOCX/PDF encoders.
// Encoders are pure: same text + format → byte-identical artifacts.
// CPU-bound encoding runs inside tokio::task::spawn_blocking (see handlers).

pub mod docx;
pub mod handlers;
pub mod pdf;
pub mod sections;
pub mod text;

use thiserror::Error;

use crate::models::{ExportArtifact, ExportFormat};

/// Filename stem used when the caller does not supply one.
pub const DEFAULT_FILENAME_STEM: &str = "resume";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot render an empty document")]
    EmptyInput,

    /// The text carries characters the target format cannot represent and no
    /// substitution is defined for them (control characters, mostly). Where a
    /// substitution IS defined — non-WinAnsi text in PDFs becomes `?` — the
    /// encoder substitutes instead of failing; see the `pdf` module docs.
    #[error("text contains characters the {format} encoder cannot represent: {detail}")]
    EncodingFailure {
        format: &'static str,
        detail: String,
    },

    #[error("{format} encoder failed: {message}")]
    Backend {
        format: &'static str,
        message: String,
    },
}

/// Renders generated text into a downloadable artifact with the default
/// filename stem.
pub fn render(text: &str, format: ExportFormat) -> Result<ExportArtifact, RenderError> {
    render_with_stem(text, format, DEFAULT_FILENAME_STEM)
}

/// Renders generated text into a downloadable artifact.
///
/// Empty or whitespace-only text is `EmptyInput` for every format; no partial
/// artifact is ever produced.
pub fn render_with_stem(
    text: &str,
    format: ExportFormat,
    stem: &str,
) -> Result<ExportArtifact, RenderError> {
    if text.trim().is_empty() {
        return Err(RenderError::EmptyInput);
    }
    let bytes = match format {
        ExportFormat::Text => text::encode(text)?,
        ExportFormat::Docx => docx::encode(text)?,
        ExportFormat::Pdf => pdf::encode(text)?,
    };
    Ok(ExportArtifact::new(format, bytes, stem))
}

/// First control character the structured formats cannot carry, if any.
/// Tab and the line separators are fine; everything else in C0/C1 is not.
pub(crate) fn find_unrepresentable_control(text: &str) -> Option<char> {
    text.chars()
        .find(|c| c.is_control() && !matches!(c, '\n' | '\t' | '\r'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_empty_input() {
        assert!(matches!(
            render("", ExportFormat::Text),
            Err(RenderError::EmptyInput)
        ));
    }

    #[test]
    fn test_whitespace_only_is_empty_input_for_all_formats() {
        for format in [ExportFormat::Text, ExportFormat::Docx, ExportFormat::Pdf] {
            assert!(matches!(
                render("  \n \t ", format),
                Err(RenderError::EmptyInput)
            ));
        }
    }

    #[test]
    fn test_default_filename_stem() {
        let artifact = render("## Jane Doe\nBackend Engineer", ExportFormat::Text).unwrap();
        assert_eq!(artifact.filename, "resume.txt");
    }

    #[test]
    fn test_explicit_stem_used() {
        let artifact =
            render_with_stem("## Jane Doe", ExportFormat::Pdf, "jane_doe").unwrap();
        assert_eq!(artifact.filename, "jane_doe.pdf");
    }

    #[test]
    fn test_find_unrepresentable_control() {
        assert_eq!(find_unrepresentable_control("a\tb\nc"), None);
        assert_eq!(find_unrepresentable_control("a\u{0000}b"), Some('\u{0000}'));
        assert_eq!(find_unrepresentable_control("bell\u{0007}"), Some('\u{0007}'));
    }
}
