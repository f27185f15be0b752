// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction that keeps output parseable by Applicant Tracking Systems.
pub const ATS_FORMAT_INSTRUCTION: &str = "\
    Keep the formatting ATS-friendly: plain section headers, simple bullet \
    points, no tables, no graphics, no columns, and no decorative punctuation \
    that breaks automated resume parsers.";

/// Instruction that makes section boundaries machine-readable.
///
/// The document renderers split on these markers instead of guessing at
/// headings, so every generation prompt must carry this fragment.
pub const SECTION_MARKER_INSTRUCTION: &str = "\
    Start every section heading on its own line prefixed with '## ' \
    (for example '## EDUCATION'), and start the document with the \
    candidate's full name as the first '## ' heading.";
