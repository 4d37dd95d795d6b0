//! Error types for the md2slidev library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Md2SlidevError`] — **Fatal**: the conversion cannot proceed at all
//!   (missing input file, unwritable output, invalid configuration). Returned
//!   as `Err(Md2SlidevError)` from the file-level `convert_*` functions.
//!
//! * [`SlideError`] — **Non-fatal**: a single slide failed to assemble but the
//!   rest of the deck is fine. Stored inside [`crate::output::SlideResult`]
//!   so callers can inspect partial success rather than losing the whole
//!   document to one bad slide.
//!
//! The core text pipeline itself is total: no input line or slide block is
//! rejected. `SlideError` exists as a containment boundary around the
//! per-slide assembly, not as part of the classification contract.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2slidev library.
///
/// Slide-level failures use [`SlideError`] and are stored in
/// [`crate::output::SlideResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Md2SlidevError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The batch input directory does not exist.
    #[error("Input directory not found: '{path}'")]
    InputDirNotFound { path: PathBuf },

    /// The batch input directory contains no markdown files.
    #[error("No .md files found in '{path}'\nRun the pptx extraction step first.")]
    NoInputFiles { path: PathBuf },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output Slidev file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single slide.
///
/// Stored alongside [`crate::output::SlideResult`] when a slide fails.
/// The overall conversion continues; the document builder skips the slide.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum SlideError {
    /// Slide assembly panicked or otherwise failed; the slide was skipped.
    #[error("Slide {slide}: assembly failed: {detail}")]
    AssemblyFailed { slide: usize, detail: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = Md2SlidevError::FileNotFound {
            path: PathBuf::from("/tmp/deck.md"),
        };
        let msg = e.to_string();
        assert!(msg.contains("/tmp/deck.md"), "got: {msg}");
    }

    #[test]
    fn no_input_files_display() {
        let e = Md2SlidevError::NoInputFiles {
            path: PathBuf::from("presentations"),
        };
        assert!(e.to_string().contains("presentations"));
        assert!(e.to_string().contains(".md"));
    }

    #[test]
    fn invalid_config_display() {
        let e = Md2SlidevError::InvalidConfig("split marker must not be empty".into());
        assert!(e.to_string().contains("split marker"));
    }

    #[test]
    fn slide_error_display() {
        let e = SlideError::AssemblyFailed {
            slide: 7,
            detail: "boom".into(),
        };
        assert!(e.to_string().contains("Slide 7"));
        assert!(e.to_string().contains("boom"));
    }

    #[test]
    fn slide_error_round_trips_through_json() {
        let e = SlideError::AssemblyFailed {
            slide: 2,
            detail: "bad line".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: SlideError = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_string(), e.to_string());
    }
}
