//! PDF encoder built on printpdf's built-in Helvetica fonts.
//!
//! Layout uses a static AFM width table (em units per character) to wrap and
//! paginate. Static tables are an intentional approximation: exact enough to
//! catch real overflows while tolerating ±1-2% of line-width ambiguity.
//!
//! Encoding policy: built-in fonts are limited to WinAnsi (CP-1252), so any
//! character outside it is substituted with `?`. C0 control characters have
//! no substitution and fail the render. Creation and modification dates are
//! pinned to the epoch so identical input yields identical bytes.

use printpdf::{BuiltinFont, CustomPdfConformance, Mm, PdfConformance, PdfDocument};
use time::OffsetDateTime;

use crate::render::sections::{split_sections, Section};
use crate::render::{find_unrepresentable_control, RenderError};

// US letter, 1" margins, 11pt body — the classic single-column resume page.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 25.4;
const BODY_SIZE_PT: f32 = 11.0;
const HEADING_SIZE_PT: f32 = 13.0;
const TITLE_SIZE_PT: f32 = 17.0;
const LINE_FACTOR: f32 = 1.35;
const HEADING_GAP_MM: f32 = 2.5;
const PT_TO_MM: f32 = 0.352_778;
/// Bold glyphs run a shade wider than the regular table; close enough.
const BOLD_WIDTH_FACTOR: f32 = 1.05;

const SUBSTITUTE_GLYPH: char = '?';

/// Helvetica AFM widths for ASCII 0x20..=0x7E, in 1/1000 em.
/// Index = (char as usize) - 32.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Fallback width for WinAnsi characters above ASCII.
const AVERAGE_CHAR_WIDTH_EM: f32 = 0.556;
const SPACE_WIDTH_EM: f32 = 0.278;

fn char_width_em(c: char) -> f32 {
    let code = c as usize;
    if (32..=126).contains(&code) {
        f32::from(HELVETICA_WIDTHS[code - 32]) / 1000.0
    } else {
        AVERAGE_CHAR_WIDTH_EM
    }
}

fn measure_em(s: &str) -> f32 {
    s.chars().map(char_width_em).sum()
}

/// Whether a character survives WinAnsi (CP-1252) encoding.
fn is_winansi(c: char) -> bool {
    matches!(c, ' '..='~')
        || ('\u{00A0}'..='\u{00FF}').contains(&c)
        || matches!(
            c,
            '\u{20AC}' | '\u{201A}' | '\u{0192}' | '\u{201E}' | '\u{2026}' | '\u{2020}'
                | '\u{2021}' | '\u{02C6}' | '\u{2030}' | '\u{0160}' | '\u{2039}' | '\u{0152}'
                | '\u{017D}' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' | '\u{2022}'
                | '\u{2013}' | '\u{2014}' | '\u{02DC}' | '\u{2122}' | '\u{0161}' | '\u{203A}'
                | '\u{0153}' | '\u{017E}' | '\u{0178}'
        )
}

/// Applies the substitution policy: non-WinAnsi characters become `?`.
fn sanitize_line(line: &str) -> String {
    line.chars()
        .map(|c| if is_winansi(c) { c } else { SUBSTITUTE_GLYPH })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// One laid-out line, ready to place on a page. Empty text is vertical space.
struct LaidOutLine {
    text: String,
    size_pt: f32,
    bold: bool,
    gap_before_mm: f32,
}

fn max_line_em(size_pt: f32, bold: bool) -> f32 {
    let usable_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let em = usable_mm / (size_pt * PT_TO_MM);
    if bold {
        em / BOLD_WIDTH_FACTOR
    } else {
        em
    }
}

/// Greedy word wrap against the measured width budget.
/// Words wider than a whole line are hard-split mid-word.
fn wrap_line(line: &str, max_em: f32) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_em = 0.0_f32;

    let flush = |current: &mut String, current_em: &mut f32, out: &mut Vec<String>| {
        if !current.is_empty() {
            out.push(std::mem::take(current));
            *current_em = 0.0;
        }
    };

    for word in line.split_whitespace() {
        let word_em = measure_em(word);
        if word_em > max_em {
            // Overlong token: flush, then split it across lines by width.
            flush(&mut current, &mut current_em, &mut out);
            let mut piece = String::new();
            let mut piece_em = 0.0_f32;
            for c in word.chars() {
                let w = char_width_em(c);
                if piece_em + w > max_em && !piece.is_empty() {
                    out.push(std::mem::take(&mut piece));
                    piece_em = 0.0;
                }
                piece.push(c);
                piece_em += w;
            }
            current = piece;
            current_em = piece_em;
            continue;
        }

        let sep_em = if current.is_empty() { 0.0 } else { SPACE_WIDTH_EM };
        if current_em + sep_em + word_em > max_em {
            flush(&mut current, &mut current_em, &mut out);
        }
        if !current.is_empty() {
            current.push(' ');
            current_em += SPACE_WIDTH_EM;
        }
        current.push_str(word);
        current_em += word_em;
    }
    flush(&mut current, &mut current_em, &mut out);
    out
}

/// Flattens sections into a single stream of positioned lines.
fn lay_out(sections: &[Section]) -> Vec<LaidOutLine> {
    let mut lines = Vec::new();
    let mut title_done = false;

    for section in sections {
        if let Some(heading) = &section.heading {
            let size_pt = if title_done { HEADING_SIZE_PT } else { TITLE_SIZE_PT };
            let gap = if lines.is_empty() { 0.0 } else { HEADING_GAP_MM };
            for (i, piece) in wrap_line(&sanitize_line(heading), max_line_em(size_pt, true))
                .into_iter()
                .enumerate()
            {
                lines.push(LaidOutLine {
                    text: piece,
                    size_pt,
                    bold: true,
                    gap_before_mm: if i == 0 { gap } else { 0.0 },
                });
            }
            title_done = true;
        }
        for body_line in &section.body {
            if body_line.is_empty() {
                lines.push(LaidOutLine {
                    text: String::new(),
                    size_pt: BODY_SIZE_PT,
                    bold: false,
                    gap_before_mm: 0.0,
                });
                continue;
            }
            for piece in wrap_line(&sanitize_line(body_line), max_line_em(BODY_SIZE_PT, false)) {
                lines.push(LaidOutLine {
                    text: piece,
                    size_pt: BODY_SIZE_PT,
                    bold: false,
                    gap_before_mm: 0.0,
                });
            }
        }
    }

    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Encoder
// ────────────────────────────────────────────────────────────────────────────

fn backend_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend {
        format: "pdf",
        message: e.to_string(),
    }
}

pub(crate) fn encode(text: &str) -> Result<Vec<u8>, RenderError> {
    if let Some(c) = find_unrepresentable_control(text) {
        return Err(RenderError::EncodingFailure {
            format: "pdf",
            detail: format!("control character U+{:04X}", c as u32),
        });
    }

    let sections = split_sections(text);
    let lines = lay_out(&sections);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Resume",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    // Plain PDF 1.3, no ICC profile or XMP packet, dates pinned to the epoch:
    // identical input must yield identical bytes.
    let doc = doc
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_icc_profile: false,
            requires_xmp_metadata: false,
            ..Default::default()
        }))
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(backend_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(backend_error)?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y_mm = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in &lines {
        let line_height_mm = line.size_pt * PT_TO_MM * LINE_FACTOR;
        y_mm -= line.gap_before_mm;
        if y_mm - line_height_mm < MARGIN_MM {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
        y_mm -= line_height_mm;
        if !line.text.is_empty() {
            let font = if line.bold { &bold } else { &regular };
            layer.use_text(line.text.clone(), line.size_pt, Mm(MARGIN_MM), Mm(y_mm), font);
        }
    }

    doc.save_to_bytes().map_err(backend_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "## Jane Doe\nBackend Engineer\n\n## SKILLS\nRust\nPostgreSQL";

    #[test]
    fn test_artifact_opens_and_contains_source_values() {
        let bytes = encode(SAMPLE).unwrap();
        let extracted = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        for value in ["Jane Doe", "Backend Engineer", "Rust", "PostgreSQL"] {
            assert!(extracted.contains(value), "pdf missing {value:?}");
        }
    }

    #[test]
    fn test_encoding_is_deterministic() {
        assert_eq!(encode(SAMPLE).unwrap(), encode(SAMPLE).unwrap());
    }

    #[test]
    fn test_long_text_paginates() {
        let mut text = String::from("## Jane Doe\n");
        for i in 0..120 {
            text.push_str(&format!("Shipped feature number {i} across three services\n"));
        }
        text.push_str("FINAL LINE MARKER\n");
        let bytes = encode(&text).unwrap();
        let extracted = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(extracted.contains("Jane Doe"));
        assert!(extracted.contains("FINAL LINE MARKER"));
    }

    #[test]
    fn test_non_winansi_characters_substituted_not_fatal() {
        let bytes = encode("## Jane Doe\nSpeaks 日本語 fluently").unwrap();
        let extracted = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(extracted.contains("???"));
        assert!(extracted.contains("fluently"));
        assert!(!extracted.contains('日'));
    }

    #[test]
    fn test_control_characters_fail_encoding() {
        let err = encode("## Jane Doe\nbody\u{0000}").unwrap_err();
        assert!(matches!(
            err,
            RenderError::EncodingFailure { format: "pdf", .. }
        ));
    }

    #[test]
    fn test_wrap_line_respects_budget() {
        let budget = max_line_em(BODY_SIZE_PT, false);
        let line = "word ".repeat(60);
        let pieces = wrap_line(&line, budget);
        assert!(pieces.len() > 1);
        for piece in &pieces {
            // small tolerance for float accumulation order
            assert!(measure_em(piece) <= budget + 0.01);
        }
    }

    #[test]
    fn test_wrap_line_hard_splits_overlong_token() {
        let token = "x".repeat(400);
        let pieces = wrap_line(&token, max_line_em(BODY_SIZE_PT, false));
        assert!(pieces.len() > 1);
        assert_eq!(pieces.join(""), token);
    }

    #[test]
    fn test_sanitize_keeps_winansi_accents() {
        assert_eq!(sanitize_line("naïve café – résumé"), "naïve café – résumé");
    }
}
