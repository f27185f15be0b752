//! Plain-text encoder — UTF-8 bytes, line endings normalized to LF.
//!
//! The one transformation applied is CRLF/CR → LF; everything else round-trips
//! exactly, so decoding the artifact yields the generated text back.

use crate::render::RenderError;

pub(crate) fn encode(text: &str) -> Result<Vec<u8>, RenderError> {
    Ok(normalize_line_endings(text).into_bytes())
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_exact() {
        let text = "## Jane Doe\nBackend Engineer\n\n## SKILLS\nRust";
        let bytes = encode(text).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), text);
    }

    #[test]
    fn test_crlf_normalized_to_lf() {
        let bytes = encode("a\r\nb\rc").unwrap();
        assert_eq!(bytes, b"a\nb\nc");
    }

    #[test]
    fn test_unicode_passes_through() {
        let text = "naïve café — 日本語";
        assert_eq!(encode(text).unwrap(), text.as_bytes());
    }
}
