//! Image path rewriting: canonicalise extractor image references.
//!
//! The extraction step writes image links whose paths point wherever the
//! extractor happened to unpack them, frequently with percent-encoded
//! Windows separators (`media/img1%5Cpic1.png`). Slidev serves assets from a
//! predictable location instead, so every reference is rewritten onto
//! `./img/<presentation>/<filename>`. A reference with no extractable
//! filename gets a synthesized `slide_<n>.png` name rather than failing —
//! the slide number comes from the segmenter's running counter.

use crate::output::ImageReference;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Whether the line contains an inline image reference.
pub fn is_image_line(line: &str) -> bool {
    RE_IMAGE.is_match(line)
}

/// Extract and rewrite the image reference in `line`, if any.
pub fn extract_image(
    line: &str,
    presentation_name: &str,
    slide_number: usize,
) -> Option<ImageReference> {
    let caps = RE_IMAGE.captures(line)?;
    let alt_text = caps[1].to_string();
    let original_path = &caps[2];

    // Encoded backslash separators come from Windows-side extraction.
    let clean_path = original_path.replace("%5C", "/").replace("%5c", "/");
    let filename = clean_path.rsplit('/').next().unwrap_or("");

    let encoded_name = url_encode_spaces(presentation_name);
    let path = if filename.is_empty() {
        format!("./img/{encoded_name}/slide_{slide_number}.png")
    } else {
        format!("./img/{encoded_name}/{filename}")
    };

    Some(ImageReference { alt_text, path })
}

/// Rewrite an image line onto the canonical asset path.
///
/// Lines without a recognisable image reference pass through unchanged.
pub fn rewrite_image_line(line: &str, presentation_name: &str, slide_number: usize) -> String {
    extract_image(line, presentation_name, slide_number)
        .map(|img| img.render())
        .unwrap_or_else(|| line.to_string())
}

/// Spaces become `%20`; nothing else is encoded. Slidev's static server
/// takes the rest of the characters literally.
fn url_encode_spaces(name: &str) -> String {
    name.replace(' ', "%20")
}
