//! Conversion entry points.
//!
//! Three levels of API, from pure to batch:
//!
//! * [`convert`] — the core. Text in, [`ConversionOutput`] out. Synchronous,
//!   deterministic, and total: no input document fails, degenerate slides are
//!   absorbed, and a panic while assembling one slide is contained to that
//!   slide.
//! * [`convert_path`] / [`convert_file`] — one extracted deck on disk, with
//!   the encoding-fallback read and an atomic output write.
//! * [`convert_dir`] — a directory of extracted decks, converted
//!   concurrently with per-file failure isolation.

use crate::config::ConversionConfig;
use crate::error::{Md2SlidevError, SlideError};
use crate::output::{
    BatchSummary, ConversionOutput, ConversionStats, FileOutcome, SlideLayout, SlideResult,
};
use crate::pipeline::{assemble, document, input, segment};
use futures::stream::{self, StreamExt};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Convert one raw extracted-markdown document to a Slidev document.
///
/// This is the primary entry point for the library. It is a pure function of
/// its arguments: identical inputs always produce an identical document.
///
/// # Arguments
/// * `raw`               — extraction output to convert
/// * `title`             — document title placed on the cover slide
/// * `presentation_name` — name used in canonical image paths
/// * `config`            — conversion configuration
///
/// # Totality
/// Never fails. Worst case a slide panics during assembly; it is then
/// recorded with a [`SlideError`], logged as a warning, and skipped, while
/// every other slide is emitted normally. An empty input yields a document
/// containing only the frontmatter and title.
pub fn convert(
    raw: &str,
    title: &str,
    presentation_name: &str,
    config: &ConversionConfig,
) -> ConversionOutput {
    let start = Instant::now();
    info!("Starting conversion: '{}'", title);

    // ── Step 1: Segment into slide blocks ────────────────────────────────
    let total_blocks = segment::count_candidates(raw, &config.split_marker);
    let blocks = segment::split_blocks(raw, &config.split_marker, config.min_block_chars);
    let skipped_blocks = total_blocks.saturating_sub(blocks.len());
    debug!(
        "Segmented {} blocks ({} dropped as noise)",
        blocks.len(),
        skipped_blocks
    );

    // ── Step 2: Assemble each slide, isolating per-slide failures ────────
    let slides: Vec<SlideResult> = blocks
        .iter()
        .map(|block| process_block(block, presentation_name, config))
        .collect();

    // ── Step 3: Build the document ───────────────────────────────────────
    let markdown = document::build_document(&slides, title, config);

    // ── Step 4: Compute stats ────────────────────────────────────────────
    let processed_slides = slides
        .iter()
        .filter(|s| s.error.is_none() && !s.markdown.trim().is_empty())
        .count();
    let empty_slides = slides
        .iter()
        .filter(|s| s.error.is_none() && s.markdown.trim().is_empty())
        .count();
    let failed_slides = slides.iter().filter(|s| s.error.is_some()).count();
    let total_images = slides.iter().map(|s| s.images.len()).sum();

    let stats = ConversionStats {
        total_blocks,
        processed_slides,
        skipped_blocks,
        empty_slides,
        failed_slides,
        total_images,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {}/{} slides, {} images, {}ms",
        processed_slides, total_blocks, total_images, stats.duration_ms
    );

    ConversionOutput {
        markdown,
        slides,
        stats,
    }
}

/// Convert one extracted deck file and return the full output.
///
/// Reads the file with the UTF-8 → Windows-1252 fallback and derives the
/// title and presentation name from the file stem unless the config
/// overrides them.
pub async fn convert_path(
    input_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionOutput, Md2SlidevError> {
    let input_path = input_path.as_ref();
    let raw = input::read_markdown(input_path).await?;
    let (title, name) = deck_identity(input_path, config);
    Ok(convert(&raw, &title, &name, config))
}

/// Convert one extracted deck file and write the Slidev document to
/// `output_path`.
///
/// Uses atomic write (temp file + rename) to prevent partial files.
pub async fn convert_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Md2SlidevError> {
    let output = convert_path(input_path, config).await?;
    let path = output_path.as_ref();
    write_atomic(path, &output.markdown).await?;
    info!("Wrote '{}'", path.display());
    Ok(output.stats)
}

/// Convert every `*.md` file in `input_dir` into `output_dir`, concurrently.
///
/// A file that fails to convert is logged, reported through the progress
/// callback, and recorded in the summary; it never aborts the batch. Titles
/// and presentation names are derived per file — the config overrides are
/// ignored here, since one title cannot fit every deck.
///
/// # Errors
/// Fatal only when the input directory is missing, contains no markdown
/// files, or the output directory cannot be created.
pub async fn convert_dir(
    input_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<BatchSummary, Md2SlidevError> {
    let input_dir = input_dir.as_ref();
    let output_dir = output_dir.as_ref();

    if !input_dir.is_dir() {
        return Err(Md2SlidevError::InputDirNotFound {
            path: input_dir.to_path_buf(),
        });
    }

    // ── Discover input files ─────────────────────────────────────────────
    let mut files: Vec<std::path::PathBuf> = Vec::new();
    let mut entries = tokio::fs::read_dir(input_dir)
        .await
        .map_err(|e| Md2SlidevError::Internal(format!("read_dir failed: {e}")))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Md2SlidevError::Internal(format!("read_dir failed: {e}")))?
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("md") {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(Md2SlidevError::NoInputFiles {
            path: input_dir.to_path_buf(),
        });
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| Md2SlidevError::OutputWriteFailed {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

    let total = files.len();
    info!("Batch conversion: {} files from '{}'", total, input_dir.display());
    if let Some(cb) = &config.progress_callback {
        cb.on_batch_start(total);
    }

    // ── Convert files concurrently ───────────────────────────────────────
    let mut outcomes: Vec<FileOutcome> = stream::iter(files.into_iter().map(|input_path| {
        let mut file_config = config.clone();
        // Batch mode always derives per-file identity from the stem.
        file_config.title = None;
        file_config.presentation_name = None;
        let output_dir = output_dir.to_path_buf();

        async move {
            let name = input_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("(unnamed)")
                .to_string();
            if let Some(cb) = &file_config.progress_callback {
                cb.on_file_start(&name);
            }

            let output_path = output_dir.join(&name);
            match convert_file(&input_path, &output_path, &file_config).await {
                Ok(stats) => {
                    if let Some(cb) = &file_config.progress_callback {
                        cb.on_file_complete(&name, stats.processed_slides);
                    }
                    FileOutcome {
                        input: input_path,
                        output: Some(output_path),
                        stats: Some(stats),
                        error: None,
                    }
                }
                Err(e) => {
                    warn!("Failed to convert '{}': {}", name, e);
                    if let Some(cb) = &file_config.progress_callback {
                        cb.on_file_error(&name, &e.to_string());
                    }
                    FileOutcome {
                        input: input_path,
                        output: None,
                        stats: None,
                        error: Some(e.to_string()),
                    }
                }
            }
        }
    }))
    .buffer_unordered(config.concurrency)
    .collect()
    .await;

    // buffer_unordered yields in completion order; report in discovery order.
    outcomes.sort_by(|a, b| a.input.cmp(&b.input));

    let converted = outcomes.iter().filter(|o| o.error.is_none()).count();
    let failed = outcomes.len() - converted;

    if let Some(cb) = &config.progress_callback {
        cb.on_batch_complete(total, converted);
    }
    info!("Batch complete: {}/{} files converted", converted, total);

    Ok(BatchSummary {
        converted,
        failed,
        files: outcomes,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Assemble one block into a [`SlideResult`], containing any panic to this
/// slide so the rest of the deck survives.
fn process_block(
    block: &segment::SlideBlock,
    presentation_name: &str,
    config: &ConversionConfig,
) -> SlideResult {
    let assembled = panic::catch_unwind(AssertUnwindSafe(|| {
        let processed = assemble::assemble_slide(block, presentation_name, config);
        let markdown = document::render_slide(&processed);
        (markdown, processed)
    }));

    match assembled {
        Ok((markdown, processed)) => SlideResult {
            slide_num: block.index,
            markdown,
            layout: processed.layout,
            images: processed.images,
            error: None,
        },
        Err(payload) => {
            let detail = panic_message(payload);
            warn!("Skipping slide {}: {}", block.index, detail);
            SlideResult {
                slide_num: block.index,
                markdown: String::new(),
                layout: SlideLayout::Default,
                images: Vec::new(),
                error: Some(SlideError::AssemblyFailed {
                    slide: block.index,
                    detail,
                }),
            }
        }
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Resolve the title and presentation name for one input file: config
/// overrides win, otherwise both derive from the file stem.
fn deck_identity(input_path: &Path, config: &ConversionConfig) -> (String, String) {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("presentation");
    let title = config
        .title
        .clone()
        .unwrap_or_else(|| input::derive_title(stem));
    let name = config
        .presentation_name
        .clone()
        .unwrap_or_else(|| stem.to_string());
    (title, name)
}

/// Atomic write: write to a temp file in the same directory, then rename.
async fn write_atomic(path: &Path, contents: &str) -> Result<(), Md2SlidevError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Md2SlidevError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            })?;
        }
    }

    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, contents)
        .await
        .map_err(|e| Md2SlidevError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|e| Md2SlidevError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })
}
