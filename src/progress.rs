//! Progress-callback trait for batch conversion events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! real-time events as the batch layer converts each file.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a log sink, or a terminal progress bar without
//! the library knowing anything about how the host application communicates.
//! The trait is `Send + Sync` so it works correctly when files are converted
//! concurrently.

use std::sync::Arc;

/// Called by the batch layer as it converts each file.
///
/// Implementations must be `Send + Sync` (files are converted concurrently
/// via `buffer_unordered`). All methods have default no-op implementations so
/// callers only override what they care about.
///
/// # Thread safety
///
/// `on_file_start`, `on_file_complete`, and `on_file_error` may be called
/// concurrently from different tasks. Implementations must protect shared
/// mutable state with appropriate synchronisation primitives.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once before any file is converted.
    ///
    /// # Arguments
    /// * `total_files` — number of files that will be processed
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called just before a file's conversion begins.
    ///
    /// # Arguments
    /// * `name` — file name (without directory)
    fn on_file_start(&self, name: &str) {
        let _ = name;
    }

    /// Called when a file is successfully converted.
    ///
    /// # Arguments
    /// * `name`   — file name
    /// * `slides` — number of slides emitted for this deck
    fn on_file_complete(&self, name: &str, slides: usize) {
        let _ = (name, slides);
    }

    /// Called when a file fails to convert.
    ///
    /// # Arguments
    /// * `name`  — file name
    /// * `error` — human-readable error description
    fn on_file_error(&self, name: &str, error: &str) {
        let _ = (name, error);
    }

    /// Called once after all files have been attempted.
    ///
    /// # Arguments
    /// * `total_files`   — files in the batch
    /// * `success_count` — files that converted without error
    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let _ = (total_files, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopBatchCallback;

impl BatchProgressCallback for NoopBatchCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type BatchProgress = Arc<dyn BatchProgressCallback>;
