//! Line classification: decide what each raw line *is* and how it renders.
//!
//! ## The decision list
//!
//! Classification is an ordered list of `(predicate, renderer)` rules,
//! evaluated top to bottom, first match wins. The ordering is the policy:
//! an existing heading must short-circuit before the header heuristic can
//! second-guess it, and a bullet must be recognised before the heuristic
//! mistakes a short bullet for a title. Keeping the rules in one table makes
//! the priority explicit and each rule testable on its own.
//!
//! Classification is total — every line maps to exactly one [`ContentLine`],
//! worst case a paragraph. There is no rejection path.
//!
//! ## Why paragraphs render as bullets
//!
//! Slidev has no native paragraph block that sits well in the two-column
//! deck layout, so free-standing prose is promoted to a bullet item. Source
//! bullet indentation is discarded for the same reason: the target layout
//! does not support nested bullet levels, so every bullet renders at a fixed
//! two-space indent.

use crate::pipeline::images;
use crate::pipeline::normalize::{clean_text, normalize};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

/// Semantic kind of one classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Bullet,
    Paragraph,
    ImageRef,
}

/// One classified line: its kind and rendered form.
///
/// For [`LineKind::ImageRef`] the text is the raw line — rewriting needs the
/// presentation name and slide number, which only the assembler has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub kind: LineKind,
    pub text: String,
}

/// Fixed indent for rendered bullet items.
pub const BULLET_INDENT: &str = "  ";

/// Keywords whose presence marks a short line as a section header.
///
/// Matched case-insensitively as substrings of the emphasis-stripped line.
const HEADER_KEYWORDS: &[&str] = &[
    "background job",
    "the web side",
    "what is",
    "why",
    "how",
    "choosing",
    "part ",
    "lesson",
    "introduction",
    "history",
];

static RE_BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\*\s+(.+)$").unwrap());

struct Rule {
    name: &'static str,
    applies: fn(&str) -> bool,
    render: fn(&str) -> ContentLine,
}

static RULES: &[Rule] = &[
    Rule {
        name: "image-reference",
        applies: is_image_line,
        render: render_image,
    },
    Rule {
        name: "heading-passthrough",
        applies: is_heading_line,
        render: render_heading_passthrough,
    },
    Rule {
        name: "bullet",
        applies: is_bullet_line,
        render: render_bullet,
    },
    Rule {
        name: "header-heuristic",
        applies: is_likely_header,
        render: render_header,
    },
];

/// Classify one raw line into a [`ContentLine`]. Total: lines matched by no
/// rule fall through to the paragraph renderer.
pub fn classify_line(line: &str) -> ContentLine {
    let line = line.trim_end();
    match RULES.iter().find(|rule| (rule.applies)(line)) {
        Some(rule) => {
            trace!(rule = rule.name, "matched classification rule");
            (rule.render)(line)
        }
        None => render_paragraph(line),
    }
}

// ── Rule 1: image reference ──────────────────────────────────────────────

fn is_image_line(line: &str) -> bool {
    images::is_image_line(line)
}

fn render_image(line: &str) -> ContentLine {
    ContentLine {
        kind: LineKind::ImageRef,
        text: line.to_string(),
    }
}

// ── Rule 2: existing heading passes through ──────────────────────────────

fn is_heading_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

fn render_heading_passthrough(line: &str) -> ContentLine {
    ContentLine {
        kind: LineKind::Header,
        text: normalize(line),
    }
}

// ── Rule 3: bullet ───────────────────────────────────────────────────────

fn is_bullet_line(line: &str) -> bool {
    RE_BULLET.is_match(line)
}

fn render_bullet(line: &str) -> ContentLine {
    let content = RE_BULLET
        .captures(line)
        .map(|caps| normalize(caps[1].trim()))
        .unwrap_or_default();
    let text = if content.is_empty() {
        String::new()
    } else {
        format!("{BULLET_INDENT}* {content}")
    };
    ContentLine {
        kind: LineKind::Bullet,
        text,
    }
}

// ── Rule 4: header heuristic ─────────────────────────────────────────────

fn strip_emphasis(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, '*' | '_'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Decide whether a plain line should be promoted to a heading.
///
/// Evaluated on the emphasis-stripped line. A trailing question mark always
/// wins. Otherwise the line must be heading-sized (3–120 chars, at most one
/// period) and either carry a section keyword, end with a colon, or be
/// written entirely in capitals — title slides in extracted decks are
/// usually shouted.
fn is_likely_header(line: &str) -> bool {
    let clean = strip_emphasis(line);

    if clean.ends_with('?') {
        return true;
    }

    let len = clean.chars().count();
    if len < 3 || len > 120 {
        return false;
    }
    if clean.matches('.').count() > 1 {
        return false;
    }

    let lower = clean.to_lowercase();
    let has_keyword = HEADER_KEYWORDS.iter().any(|kw| lower.contains(kw));
    let ends_with_colon = clean.ends_with(':');
    let all_caps = clean.chars().any(|c| c.is_alphabetic())
        && !clean.chars().any(|c| c.is_lowercase());

    has_keyword || ends_with_colon || all_caps
}

fn render_header(line: &str) -> ContentLine {
    let text = clean_text(&strip_emphasis(line));
    ContentLine {
        kind: LineKind::Header,
        text: format!("# {}", text.trim()),
    }
}

// ── Fallback: paragraph, promoted to a bullet ────────────────────────────

fn render_paragraph(line: &str) -> ContentLine {
    let processed = normalize(line.trim());
    let unwrapped = unwrap_full_bold(&processed);
    let text = if unwrapped.is_empty() {
        String::new()
    } else {
        format!("{BULLET_INDENT}* {unwrapped}")
    };
    ContentLine {
        kind: LineKind::Paragraph,
        text,
    }
}

/// Unwrap a paragraph that is one single bold span covering the whole line,
/// so slides don't render entire paragraphs in solid bold.
fn unwrap_full_bold(text: &str) -> &str {
    if text.len() >= 4
        && text.starts_with("**")
        && text.ends_with("**")
        && text.matches("**").count() == 2
    {
        &text[2..text.len() - 2]
    } else {
        text
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> LineKind {
        classify_line(line).kind
    }

    #[test]
    fn existing_heading_passes_through() {
        let result = classify_line("# Already a heading");
        assert_eq!(result.kind, LineKind::Header);
        assert_eq!(result.text, "# Already a heading");
    }

    #[test]
    fn heading_passthrough_is_idempotent() {
        let once = classify_line("## Some __bold__ title");
        let twice = classify_line(&once.text);
        assert_eq!(once, twice);
    }

    #[test]
    fn bullet_renders_with_fixed_indent() {
        let result = classify_line("* Intro to course");
        assert_eq!(result.kind, LineKind::Bullet);
        assert_eq!(result.text, "  * Intro to course");
    }

    #[test]
    fn nested_bullet_is_flattened() {
        let result = classify_line("        * deeply nested item");
        assert_eq!(result.kind, LineKind::Bullet);
        assert_eq!(result.text, "  * deeply nested item");
    }

    #[test]
    fn bullet_content_is_normalized() {
        let result = classify_line("* __emphasis__ fixed");
        assert_eq!(result.text, "  * **emphasis** fixed");
    }

    #[test]
    fn bold_all_caps_line_becomes_header() {
        let result = classify_line("**DATABASE SYSTEMS**");
        assert_eq!(result.kind, LineKind::Header);
        assert_eq!(result.text, "# DATABASE SYSTEMS");
    }

    #[test]
    fn question_becomes_header() {
        let result = classify_line("Why do we need transactions?");
        assert_eq!(result.kind, LineKind::Header);
        assert_eq!(result.text, "# Why do we need transactions?");
    }

    #[test]
    fn keyword_line_becomes_header() {
        assert_eq!(kind_of("What is a lock manager"), LineKind::Header);
        assert_eq!(kind_of("Introduction and overview"), LineKind::Header);
    }

    #[test]
    fn colon_line_becomes_header() {
        assert_eq!(kind_of("Agenda for today:"), LineKind::Header);
    }

    #[test]
    fn long_prose_is_not_a_header() {
        let prose = "This sentence talks about many things. It has periods. \
                     It rambles on well past the point where a slide title would end.";
        assert_eq!(kind_of(prose), LineKind::Paragraph);
    }

    #[test]
    fn plain_sentence_becomes_bulleted_paragraph() {
        let result = classify_line("Transactions group operations together");
        assert_eq!(result.kind, LineKind::Paragraph);
        assert_eq!(result.text, "  * Transactions group operations together");
    }

    #[test]
    fn fully_bold_paragraph_is_unwrapped() {
        let result = classify_line("**An important point stands alone**");
        assert_eq!(result.kind, LineKind::Paragraph);
        assert_eq!(result.text, "  * An important point stands alone");
    }

    #[test]
    fn partially_bold_paragraph_keeps_its_bold() {
        let result = classify_line("**Key term** and its definition");
        assert_eq!(result.text, "  * **Key term** and its definition");
    }

    #[test]
    fn image_line_is_recognised_and_passed_through() {
        let result = classify_line("![alt text](media/image1.png)");
        assert_eq!(result.kind, LineKind::ImageRef);
        assert_eq!(result.text, "![alt text](media/image1.png)");
    }

    #[test]
    fn classification_is_total_on_junk() {
        // No input may panic or escape the four kinds.
        for line in ["", "   ", "\\", "***", "![broken", "# ", "????", "_"] {
            let result = classify_line(line);
            assert!(matches!(
                result.kind,
                LineKind::Header | LineKind::Bullet | LineKind::Paragraph | LineKind::ImageRef
            ));
        }
    }

    #[test]
    fn two_letter_line_is_not_a_header() {
        assert_eq!(kind_of("OK"), LineKind::Paragraph);
    }

    #[test]
    fn identifier_underscores_survive_bullets() {
        let result = classify_line("* call send_batch_async carefully");
        assert_eq!(result.text, "  * call send_batch_async carefully");
    }
}
