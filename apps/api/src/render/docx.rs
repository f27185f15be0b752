//! DOCX encoder built on docx-rs.
//!
//! The first `## ` heading becomes the document title, later headings become
//! styled section headings, body lines become plain paragraphs. XML 1.0
//! cannot carry C0 control characters and no substitution is defined for
//! them, so they fail the render instead of corrupting the package.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::render::sections::split_sections;
use crate::render::{find_unrepresentable_control, RenderError};

const TITLE_STYLE: &str = "Title";
const HEADING_STYLE: &str = "SectionHeading";

pub(crate) fn encode(text: &str) -> Result<Vec<u8>, RenderError> {
    if let Some(c) = find_unrepresentable_control(text) {
        return Err(RenderError::EncodingFailure {
            format: "docx",
            detail: format!("control character U+{:04X}", c as u32),
        });
    }

    // Sizes are half-points: 40 = 20pt title, 28 = 14pt headings.
    let mut docx = Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(40)
                .bold(),
        )
        .add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Section Heading")
                .size(28)
                .bold(),
        );

    let mut title_done = false;
    for section in split_sections(text) {
        if let Some(heading) = &section.heading {
            let style = if title_done { HEADING_STYLE } else { TITLE_STYLE };
            title_done = true;
            docx = docx.add_paragraph(
                Paragraph::new()
                    .style(style)
                    .add_run(Run::new().add_text(heading.as_str())),
            );
        }
        for line in &section.body {
            docx = docx
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text(line.as_str())));
        }
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| RenderError::Backend {
            format: "docx",
            message: e.to_string(),
        })?;
    Ok(cursor.into_inner())
}
