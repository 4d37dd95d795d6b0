//! Slide assembly: turn one raw block into body lines, images, and a layout.
//!
//! Runs classification over every line of a block, routes image references
//! through the path rewriter, and compacts the body (consecutive duplicates
//! dropped, blank runs collapsed — extractors love repeating a line once per
//! text box). The layout decision is deliberately small: images mean
//! two-column, otherwise the document default, with an opt-in full-width
//! override for long text-only slides.

use crate::config::ConversionConfig;
use crate::output::{ImageReference, SlideLayout};
use crate::pipeline::classify::{classify_line, LineKind};
use crate::pipeline::images::extract_image;
use crate::pipeline::segment::SlideBlock;

/// Intermediate result of assembling one slide block.
#[derive(Debug, Clone)]
pub struct ProcessedSlide {
    /// Rendered non-image lines in source order, compacted.
    pub body: Vec<String>,
    /// Rewritten image references in source order.
    pub images: Vec<ImageReference>,
    /// Layout variant chosen for this slide.
    pub layout: SlideLayout,
}

/// Assemble one slide block: classify lines, rewrite images, compact, and
/// pick a layout.
pub fn assemble_slide(
    block: &SlideBlock,
    presentation_name: &str,
    config: &ConversionConfig,
) -> ProcessedSlide {
    let mut body: Vec<String> = Vec::new();
    let mut images: Vec<ImageReference> = Vec::new();

    for raw_line in block.text.lines() {
        if raw_line.trim().is_empty() {
            continue;
        }

        let line = classify_line(raw_line);
        match line.kind {
            LineKind::ImageRef => {
                if let Some(img) = extract_image(&line.text, presentation_name, block.index) {
                    images.push(img);
                }
            }
            _ => {
                if !line.text.trim().is_empty() {
                    body.push(line.text);
                }
            }
        }
    }

    let body = compact_body(body);
    let layout = choose_layout(&body, &images, config);

    ProcessedSlide {
        body,
        images,
        layout,
    }
}

/// Drop lines that exactly repeat their immediate predecessor and collapse
/// any run of blank lines down to a single blank.
fn compact_body(lines: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        if cleaned.last().map(|prev| *prev == line).unwrap_or(false) {
            continue;
        }
        let blank = line.trim().is_empty();
        let prev_blank = cleaned
            .last()
            .map(|prev| prev.trim().is_empty())
            .unwrap_or(true);
        if blank && prev_blank {
            continue;
        }
        cleaned.push(line);
    }

    // A trailing blank adds nothing between the body and the separator.
    while cleaned.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
        cleaned.pop();
    }

    cleaned
}

fn choose_layout(
    body: &[String],
    images: &[ImageReference],
    config: &ConversionConfig,
) -> SlideLayout {
    if !images.is_empty() {
        return SlideLayout::TwoCols;
    }
    let body_chars: usize = body.iter().map(|l| l.chars().count()).sum();
    match config.full_layout_threshold {
        Some(threshold) if body_chars > threshold => SlideLayout::Full,
        _ => SlideLayout::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> SlideBlock {
        SlideBlock {
            index: 1,
            text: text.to_string(),
        }
    }

    fn config() -> ConversionConfig {
        ConversionConfig::default()
    }

    #[test]
    fn separates_body_from_images() {
        let slide = assemble_slide(
            &block("# Title\n![](media/pic.png)\n* a point"),
            "Deck",
            &config(),
        );
        assert_eq!(slide.body, vec!["# Title", "  * a point"]);
        assert_eq!(slide.images.len(), 1);
        assert_eq!(slide.images[0].path, "./img/Deck/pic.png");
    }

    #[test]
    fn layout_is_two_cols_iff_images_present() {
        let with_image = assemble_slide(&block("text line\n![](a.png)"), "D", &config());
        assert_eq!(with_image.layout, SlideLayout::TwoCols);

        let without_image = assemble_slide(&block("text line only"), "D", &config());
        assert_eq!(without_image.layout, SlideLayout::Default);
    }

    #[test]
    fn full_override_applies_only_when_configured() {
        let long_body = "A line of prose that keeps going for quite a while\n".repeat(20);

        let default_config = config();
        let slide = assemble_slide(&block(&long_body), "D", &default_config);
        assert_eq!(slide.layout, SlideLayout::Default);

        let thresholded = ConversionConfig::builder()
            .full_layout_threshold(200)
            .build()
            .unwrap();
        let slide = assemble_slide(&block(&long_body), "D", &thresholded);
        assert_eq!(slide.layout, SlideLayout::Full);
    }

    #[test]
    fn images_beat_full_override() {
        let long_body = format!("{}\n![](a.png)", "words ".repeat(100));
        let thresholded = ConversionConfig::builder()
            .full_layout_threshold(50)
            .build()
            .unwrap();
        let slide = assemble_slide(&block(&long_body), "D", &thresholded);
        assert_eq!(slide.layout, SlideLayout::TwoCols);
    }

    #[test]
    fn consecutive_duplicates_are_dropped() {
        let slide = assemble_slide(
            &block("* repeated point\n* repeated point\n* different point"),
            "D",
            &config(),
        );
        assert_eq!(
            slide.body,
            vec!["  * repeated point", "  * different point"]
        );
    }

    #[test]
    fn non_adjacent_duplicates_survive() {
        let slide = assemble_slide(
            &block("* point\n* other\n* point"),
            "D",
            &config(),
        );
        assert_eq!(slide.body.len(), 3);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let slide = assemble_slide(&block("first line\n\n\n\nsecond line"), "D", &config());
        assert_eq!(slide.body, vec!["  * first line", "  * second line"]);
    }

    #[test]
    fn lines_that_process_to_nothing_are_skipped() {
        // "** **" normalizes to empty content.
        let slide = assemble_slide(&block("** **\nreal content"), "D", &config());
        assert_eq!(slide.body, vec!["  * real content"]);
    }

    #[test]
    fn image_slide_uses_block_index_for_fallback_names() {
        let b = SlideBlock {
            index: 4,
            text: "caption text\n![](media%5C)".to_string(),
        };
        let slide = assemble_slide(&b, "My Deck", &config());
        assert_eq!(slide.images[0].path, "./img/My%20Deck/slide_4.png");
    }

    #[test]
    fn compact_body_collapses_blank_runs() {
        let lines: Vec<String> = ["a", "", "", "b", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(compact_body(lines), vec!["a", "", "b"]);
    }
}
