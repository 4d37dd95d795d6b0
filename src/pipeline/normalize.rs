//! Formatting repair: deterministic cleanup of extractor-mangled text.
//!
//! ## Why is normalization necessary?
//!
//! The pptx extraction step produces markdown that is *textually present* but
//! *structurally mangled* — for example:
//!
//! - Smart quotes double-encoded into mojibake (`â€™` where `'` belongs)
//! - Bold and italic runs nested into garbage like `__ ** text ** __`
//! - Escaped commas (`\,`) and stray backslashes left over from the
//!   extractor's own escaping pass
//! - Whitespace pushed inside emphasis markers (`** text **`), which most
//!   markdown renderers refuse to style
//!
//! This module applies cheap, deterministic string/regex rules that fix those
//! artefacts without touching content. Character repair always runs before
//! markup repair: a mojibake sequence can contain characters that look like
//! markup, so fixing bytes first keeps the markup rules honest.
//!
//! ## Idempotence
//!
//! `normalize(normalize(x)) == normalize(x)` is a hard contract, relied on by
//! the classifier's heading passthrough. Every rule below fires only on
//! non-canonical input: once a span is in canonical form, no rule matches it
//! again.

use once_cell::sync::Lazy;
use regex::Regex;

/// Mojibake repair table, applied as literal substring replacement.
///
/// Ordered longest-sequence-first so that no entry is shadowed by a shorter
/// prefix of itself (`Ã¢â‚¬` is a prefix of three other entries).
static CHAR_REPAIRS: &[(&str, &str)] = &[
    ("Ã¢â‚¬â„¢", "'"),
    ("Ã¢â‚¬Å\"", "\""),
    ("Ã¢â‚¬Ëœ", "'"),
    ("Ã¢â‚¬", "\""),
    ("â€œ", "\""),
    ("â€™", "'"),
    ("â€", "\""),
    ("\\,", ","),
];

static RE_MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"  +").unwrap());

/// Repair mis-decoded characters and escaping artefacts in `text`.
///
/// Applies the mojibake table, removes stray backslashes that do not escape
/// a markup control character, and collapses runs of spaces.
pub fn clean_text(text: &str) -> String {
    let mut s = text.to_string();
    for (from, to) in CHAR_REPAIRS {
        s = s.replace(from, to);
    }
    let s = strip_stray_backslashes(&s);
    RE_MULTI_SPACE.replace_all(&s, " ").into_owned()
}

/// Remove backslashes that do not precede a markup control character.
///
/// A backslash survives only when escaping one of `\ * _ [ ]`. An escaped
/// backslash pair is consumed as a unit so repeated application cannot eat
/// the pair one half at a time.
fn strip_stray_backslashes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                out.push('\\');
                out.push('\\');
                chars.next();
            }
            Some('*') | Some('_') | Some('[') | Some(']') => out.push('\\'),
            _ => {}
        }
    }
    out
}

// ── Emphasis normalization ───────────────────────────────────────────────

// Malformed nestings the extractor produces when a pptx run mixes bold and
// italic. Each pattern can only match pre-canonical text: the replacements
// contain no underscores, so none of these can fire twice.
static RE_BOLD_IN_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__\s*\*\*\s*([^*]+?)\s*\*\*\s*__").unwrap());
static RE_ITALIC_IN_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__\s*_([^_]+?)_\s*__").unwrap());
static RE_SPLIT_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([a-z])\*([a-z]+)\*__").unwrap());
static RE_UNDERSCORE_BOLD_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"_\*\*([a-z]+)\*__").unwrap());
static RE_STAR_UNDERSCORE_BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*_\*\*([^*]+?)\*__").unwrap());
static RE_DOUBLE_UNDERSCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([^_\s][^_]*?[^_\s])__").unwrap());

/// Normalize bold and italic markup to canonical `**bold**` / `*italic*`.
///
/// Repairs malformed bold+italic nestings, converts underscore emphasis to
/// asterisk emphasis (skipping underscores adjacent to word characters, so
/// identifiers like `snake_case_name` survive), trims whitespace immediately
/// inside emphasis markers, and drops spans left empty by the trim.
pub fn normalize_emphasis(text: &str) -> String {
    let s = RE_BOLD_IN_UNDERSCORE.replace_all(text, "**$1**");
    let s = RE_ITALIC_IN_UNDERSCORE.replace_all(&s, "*$1*");
    let s = RE_SPLIT_BOLD.replace_all(&s, "**${1}${2}**");
    let s = RE_UNDERSCORE_BOLD_TAIL.replace_all(&s, "**$1**");
    let s = RE_STAR_UNDERSCORE_BOLD.replace_all(&s, "**$1**");
    let s = RE_DOUBLE_UNDERSCORE.replace_all(&s, "**$1**");
    let s = convert_underscore_italics(&s);
    tidy_emphasis_spans(&s)
}

/// Full normalization: character repair, then emphasis repair.
///
/// The order matters — mojibake sequences must be fixed before the markup
/// rules inspect the text. A final space-collapse pass closes the gap a
/// dropped empty span leaves behind, which keeps the whole function
/// idempotent.
pub fn normalize(text: &str) -> String {
    let s = normalize_emphasis(&clean_text(text));
    RE_MULTI_SPACE.replace_all(&s, " ").into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convert `_italic_` spans to `*italic*`.
///
/// The `regex` crate has no look-around, and the guard here is exactly a
/// look-around: the underscore pair only counts as emphasis when the outside
/// neighbours are not word characters. A hand-rolled scan expresses that
/// directly.
fn convert_underscore_italics(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '_' && underscore_opens_span(&chars, i) {
            if let Some(close) = find_underscore_close(&chars, i) {
                out.push('*');
                out.extend(chars[i + 1..close].iter());
                out.push('*');
                i = close + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

fn underscore_opens_span(chars: &[char], i: usize) -> bool {
    let prev_ok = i == 0 || !is_word_char(chars[i - 1]);
    let first_inner = match chars.get(i + 1) {
        Some(&c) => c,
        None => return false,
    };
    prev_ok && first_inner != '_' && !first_inner.is_whitespace()
}

fn find_underscore_close(chars: &[char], open: usize) -> Option<usize> {
    for (offset, &c) in chars[open + 1..].iter().enumerate() {
        if c != '_' {
            continue;
        }
        let close = open + 1 + offset;
        let inner_len = close - open - 1;
        let last_inner = chars[close - 1];
        let next_is_word = chars
            .get(close + 1)
            .map(|&c| is_word_char(c))
            .unwrap_or(false);
        if inner_len >= 2 && !last_inner.is_whitespace() && !next_is_word {
            return Some(close);
        }
        // The span cannot contain an underscore; a failed close kills it.
        return None;
    }
    None
}

/// Trim whitespace immediately inside `**bold**` and `*italic*` spans and
/// drop spans whose content trims to nothing.
///
/// Unpaired markers pass through untouched; `3 * 4` is arithmetic, not a
/// half-open italic.
fn tidy_emphasis_spans(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '*' {
            let bold = chars.get(i + 1) == Some(&'*');
            let marker_len = if bold { 2 } else { 1 };
            if let Some(close) = find_span_close(&chars, i + marker_len, bold) {
                let inner: String = chars[i + marker_len..close].iter().collect();
                let trimmed = inner.trim();
                if !trimmed.is_empty() {
                    let marker = if bold { "**" } else { "*" };
                    out.push_str(marker);
                    out.push_str(trimmed);
                    out.push_str(marker);
                }
                i = close + marker_len;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out
}

fn find_span_close(chars: &[char], from: usize, bold: bool) -> Option<usize> {
    for (offset, &c) in chars[from..].iter().enumerate() {
        if c != '*' {
            continue;
        }
        let at = from + offset;
        if !bold {
            return Some(at);
        }
        // A lone asterisk inside a bold span means the markup is malformed;
        // leave it for the caller to pass through unchanged.
        return if chars.get(at + 1) == Some(&'*') {
            Some(at)
        } else {
            None
        };
    }
    None
}

// ── Tests ────────────────────────────────────────────────────────────────
