//! # md2slidev
//!
//! Convert extracted slide-deck Markdown into Slidev presentations.
//!
//! ## Why this crate?
//!
//! pptx extractors get the *text* out of a deck but leave the *markdown* in a
//! sorry state — smart quotes double-encoded into mojibake, bold and italic
//! runs nested into `__ ** garbage ** __`, image links pointing at
//! percent-encoded Windows paths, and headings indistinguishable from body
//! text. This crate repairs all of that deterministically and reassembles
//! each deck as a [Slidev](https://sli.dev) document with sensible layouts:
//! two columns when a slide has images, a cover slide, a closing slide.
//!
//! ## Pipeline Overview
//!
//! ```text
//! extracted .md
//!  │
//!  ├─ 1. Input     read file, UTF-8 with Windows-1252 fallback
//!  ├─ 2. Segment   split on slide delimiters, drop noise blocks
//!  ├─ 3. Classify  header / bullet / paragraph / image, per line
//!  ├─ 4. Normalize repair mojibake and emphasis markup (idempotent)
//!  ├─ 5. Images    rewrite refs onto ./img/<presentation>/…
//!  ├─ 6. Assemble  compact body, pick layout per slide
//!  └─ 7. Document  frontmatter + separators + layout: end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use md2slidev::{convert, ConversionConfig};
//!
//! let raw = "**DATABASE SYSTEMS**\n\n* Intro to course";
//! let config = ConversionConfig::default();
//! let output = convert(raw, "Database Systems", "db-systems", &config);
//! assert!(output.markdown.contains("# DATABASE SYSTEMS"));
//! assert_eq!(output.stats.processed_slides, 1);
//! ```
//!
//! Converting files or whole directories of extraction output is async:
//!
//! ```rust,no_run
//! use md2slidev::{convert_dir, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::default();
//!     let summary = convert_dir("extracted", "presentation-conversion", &config).await?;
//!     eprintln!("{}/{} decks converted", summary.converted, summary.files.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2slidev` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! md2slidev = { version = "0.3", default-features = false }
//! ```
//!
//! ## Guarantees
//!
//! * **Deterministic** — identical input text, title, and presentation name
//!   always yield an identical document.
//! * **Total** — no input line, slide block, or document is rejected; worst
//!   case a line is misclassified or a broken slide is skipped with a
//!   warning.
//! * **Idempotent normalization** — running the formatting repair twice
//!   yields the same text as running it once.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_dir, convert_file, convert_path};
pub use error::{Md2SlidevError, SlideError};
pub use output::{
    BatchSummary, ConversionOutput, ConversionStats, FileOutcome, ImageReference, SlideLayout,
    SlideResult,
};
pub use progress::{BatchProgress, BatchProgressCallback, NoopBatchCallback};
