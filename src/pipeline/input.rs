//! Input resolution: read the extractor's markdown output.
//!
//! ## Why an encoding fallback?
//!
//! Extractors inherit whatever code page the original deck was authored
//! under; the markdown they emit is usually UTF-8 but occasionally legacy
//! Windows-1252 (the observed failure mode for decks made on older Office
//! installs). Strict UTF-8 is tried first; on failure the bytes are decoded
//! as Windows-1252, which cannot fail — every byte maps to something. That
//! keeps the read path total at the cost of the occasional odd glyph, which
//! the mojibake repair table downstream usually fixes anyway.

use crate::error::Md2SlidevError;
use std::path::Path;
use tracing::debug;

/// Read a markdown file, falling back from UTF-8 to Windows-1252.
pub async fn read_markdown(path: &Path) -> Result<String, Md2SlidevError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Md2SlidevError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Md2SlidevError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    Ok(decode_text(&bytes, path))
}

/// Decode extractor output: strict UTF-8 first, Windows-1252 second.
fn decode_text(bytes: &[u8], path: &Path) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            debug!(
                "'{}' is not valid UTF-8, decoding as Windows-1252",
                path.display()
            );
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

/// Derive a human-readable deck title from a file stem: underscores and
/// hyphens become spaces, words are title-cased.
pub fn derive_title(stem: &str) -> String {
    stem.replace(['_', '-'], " ")
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn utf8_bytes_decode_directly() {
        let text = "héllo — wörld";
        assert_eq!(
            decode_text(text.as_bytes(), &PathBuf::from("x.md")),
            text
        );
    }

    #[test]
    fn non_utf8_bytes_fall_back_to_windows_1252() {
        // 0xE9 is 'é' in Windows-1252 but invalid as a UTF-8 start byte here.
        let bytes = b"caf\xe9";
        assert_eq!(decode_text(bytes, &PathBuf::from("x.md")), "café");
    }

    #[test]
    fn windows_smart_quote_byte_decodes() {
        // 0x93 is the left curly quote in Windows-1252.
        let bytes = b"\x93quoted\x94";
        assert_eq!(
            decode_text(bytes, &PathBuf::from("x.md")),
            "\u{201c}quoted\u{201d}"
        );
    }

    #[test]
    fn derive_title_replaces_separators_and_cases_words() {
        assert_eq!(derive_title("intro_to_databases"), "Intro To Databases");
        assert_eq!(derive_title("week-3-transactions"), "Week 3 Transactions");
        assert_eq!(derive_title("CS101_LECTURES"), "Cs101 Lectures");
    }

    #[test]
    fn derive_title_collapses_repeated_separators() {
        assert_eq!(derive_title("a__b--c"), "A B C");
    }

    #[tokio::test]
    async fn missing_file_is_a_not_found_error() {
        let result = read_markdown(Path::new("/definitely/not/here.md")).await;
        assert!(matches!(
            result,
            Err(Md2SlidevError::FileNotFound { .. })
        ));
    }
}
