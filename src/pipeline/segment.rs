//! Segmentation: split a raw document into slide blocks.
//!
//! pptx extractors separate slides with a horizontal rule. Splitting on it
//! yields the real slides plus noise — empty fragments around leading and
//! trailing rules, or stray metadata lines shorter than any plausible slide.
//! Candidates under the minimum length are dropped here so downstream stages
//! only ever see blocks worth rendering.

use tracing::debug;

/// One slide's worth of raw text, as delimited in the extraction output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideBlock {
    /// 1-based position among the blocks that survived the length filter.
    /// Used only as a fallback for synthesized image filenames, not as a
    /// semantic identity.
    pub index: usize,
    /// Trimmed block text.
    pub text: String,
}

/// Split `raw` on `marker`, trim each candidate, and drop the ones whose
/// trimmed length falls below `min_chars`.
///
/// Order is preserved; indices are assigned after filtering.
pub fn split_blocks(raw: &str, marker: &str, min_chars: usize) -> Vec<SlideBlock> {
    let mut blocks: Vec<SlideBlock> = Vec::new();

    for candidate in raw.split(marker) {
        let trimmed = candidate.trim();
        if trimmed.is_empty() || trimmed.chars().count() < min_chars {
            if !trimmed.is_empty() {
                debug!("Dropping sub-threshold block: {:?}", trimmed);
            }
            continue;
        }
        blocks.push(SlideBlock {
            index: blocks.len() + 1,
            text: trimmed.to_string(),
        });
    }

    blocks
}

/// Count the candidates produced by splitting, before any filtering.
///
/// Used for run statistics only.
pub fn count_candidates(raw: &str, marker: &str) -> usize {
    raw.split(marker).filter(|c| !c.trim().is_empty()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_marker_and_indexes_kept_blocks() {
        let raw = "First slide content here\n---\nSecond slide content here";
        let blocks = split_blocks(raw, "---", 10);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].index, 1);
        assert_eq!(blocks[0].text, "First slide content here");
        assert_eq!(blocks[1].index, 2);
        assert_eq!(blocks[1].text, "Second slide content here");
    }

    #[test]
    fn drops_short_blocks_without_gaps_in_index() {
        let raw = "A real slide with content\n---\nnoise\n---\nAnother real slide here";
        let blocks = split_blocks(raw, "---", 10);
        assert_eq!(blocks.len(), 2);
        // The dropped block does not leave a hole in the numbering.
        assert_eq!(blocks[1].index, 2);
        assert_eq!(blocks[1].text, "Another real slide here");
    }

    #[test]
    fn drops_empty_fragments_from_leading_and_trailing_markers() {
        let raw = "---\nOnly slide, long enough\n---";
        let blocks = split_blocks(raw, "---", 10);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].index, 1);
    }

    #[test]
    fn five_char_block_is_dropped() {
        let blocks = split_blocks("tiny!", "---", 10);
        assert!(blocks.is_empty());
    }

    #[test]
    fn empty_document_yields_no_blocks() {
        assert!(split_blocks("", "---", 10).is_empty());
        assert!(split_blocks("   \n  ", "---", 10).is_empty());
    }

    #[test]
    fn threshold_counts_characters_not_bytes() {
        // 9 multibyte characters — still under a threshold of 10.
        let raw = "ééééééééé";
        assert!(split_blocks(raw, "---", 10).is_empty());
    }

    #[test]
    fn candidate_count_ignores_blank_fragments() {
        let raw = "---\nFirst slide content\n---\nshort\n---\n";
        assert_eq!(count_candidates(raw, "---"), 2);
    }
}
