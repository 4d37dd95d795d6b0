//! Output types: per-slide results, run statistics, and batch summaries.
//!
//! Everything here is serde-serializable so the CLI can emit `--json` and
//! callers can persist run reports. The types are plain data — all behaviour
//! lives in the pipeline stages that produce them.

use crate::error::SlideError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single rewritten image reference, destined for a slide's right column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Alt text carried over from the source reference (may be empty).
    pub alt_text: String,
    /// Canonical asset path, e.g. `./img/CS%20101/pic1.png`.
    pub path: String,
}

impl ImageReference {
    /// Render back to inline-markdown form: `![alt](path)`.
    pub fn render(&self) -> String {
        format!("![{}]({})", self.alt_text, self.path)
    }
}

/// Layout variant chosen for one slide.
///
/// `TwoCols` is triggered solely by image presence; it is expressed through
/// the document-level `defaults` block rather than a per-slide directive.
/// `Full` is an opt-in override for long text-only slides (see
/// [`crate::config::ConversionConfig::full_layout_threshold`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    /// Plain slide, no layout directive emitted.
    #[default]
    Default,
    /// Body on the left, images on the right. Implied by the document default.
    TwoCols,
    /// Full-width override for long text-only slides; emitted as a
    /// `layout: full` directive on the slide separator.
    Full,
}

/// Result of processing one slide block.
///
/// The `error` field is `Some` only when assembly of this slide failed; the
/// slide is then skipped by the document builder while the rest of the deck
/// is emitted normally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideResult {
    /// 1-indexed position among the slide blocks that survived segmentation.
    pub slide_num: usize,
    /// Rendered slide content (body lines, plus the `::right::` column when
    /// images are present). Empty when the slide produced no content.
    pub markdown: String,
    /// Layout variant chosen for this slide.
    pub layout: SlideLayout,
    /// Rewritten image references, in source order.
    pub images: Vec<ImageReference>,
    /// Set when this slide failed to assemble and was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SlideError>,
}

/// Statistics for one document conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Candidate blocks produced by splitting on the slide marker,
    /// including the ones later dropped as noise.
    pub total_blocks: usize,
    /// Slides that produced content and appear in the output document.
    pub processed_slides: usize,
    /// Candidate blocks dropped by the segmenter's minimum-length filter.
    pub skipped_blocks: usize,
    /// Kept blocks whose processed content came out empty.
    pub empty_slides: usize,
    /// Slides that failed to assemble and were skipped.
    pub failed_slides: usize,
    /// Total image references rewritten across all slides.
    pub total_images: usize,
    /// Wall-clock duration of the conversion in milliseconds.
    pub duration_ms: u64,
}

/// Complete result of converting one raw document.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutput {
    /// The assembled Slidev markdown document.
    pub markdown: String,
    /// Per-slide results in document order, including failed slides.
    pub slides: Vec<SlideResult>,
    /// Run statistics.
    pub stats: ConversionStats,
}

/// Outcome of converting one file in a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Input file path.
    pub input: PathBuf,
    /// Output file path; `None` when the conversion failed before writing.
    pub output: Option<PathBuf>,
    /// Stats for the file; `None` when the conversion failed.
    pub stats: Option<ConversionStats>,
    /// Human-readable error when the file failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a directory batch conversion.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Files converted successfully.
    pub converted: usize,
    /// Files that failed.
    pub failed: usize,
    /// Per-file outcomes in discovery order.
    pub files: Vec<FileOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_reference_renders_inline_form() {
        let img = ImageReference {
            alt_text: "diagram".into(),
            path: "./img/CS%20101/pic1.png".into(),
        };
        assert_eq!(img.render(), "![diagram](./img/CS%20101/pic1.png)");
    }

    #[test]
    fn image_reference_renders_empty_alt() {
        let img = ImageReference {
            alt_text: String::new(),
            path: "./img/Deck/slide_3.png".into(),
        };
        assert_eq!(img.render(), "![](./img/Deck/slide_3.png)");
    }

    #[test]
    fn slide_layout_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&SlideLayout::TwoCols).unwrap(),
            "\"two-cols\""
        );
        assert_eq!(
            serde_json::to_string(&SlideLayout::Default).unwrap(),
            "\"default\""
        );
        assert_eq!(
            serde_json::to_string(&SlideLayout::Full).unwrap(),
            "\"full\""
        );
    }

    #[test]
    fn slide_result_omits_absent_error() {
        let r = SlideResult {
            slide_num: 1,
            markdown: "# Title".into(),
            layout: SlideLayout::Default,
            images: vec![],
            error: None,
        };
        let json = serde_json::to_string(&r).unwrap();
        assert!(!json.contains("error"));
    }
}
