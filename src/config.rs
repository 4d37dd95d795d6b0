//! Configuration types for slide-markdown conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across threads, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor is unreadable and breaks on every new field.
//! The builder pattern lets callers set only what they care about and rely on
//! well-documented defaults for the rest.

use crate::error::Md2SlidevError;
use crate::progress::BatchProgress;
use std::fmt;

/// Configuration for a slide-markdown conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use md2slidev::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .min_block_chars(10)
///     .sans_font("Inter")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// Delimiter the extraction format uses between slides. Default: `---`.
    ///
    /// pptx extractors emit a horizontal rule between slides; anything else
    /// here is for extractors with non-standard output.
    pub split_marker: String,

    /// Minimum trimmed length for a block to count as a slide. Default: 10.
    ///
    /// Shorter candidates are extractor noise (stray metadata, lone rules)
    /// and are silently dropped, not treated as errors.
    pub min_block_chars: usize,

    /// Document title. If `None`, derived from the input file stem
    /// (underscores and hyphens become spaces, words are title-cased).
    pub title: Option<String>,

    /// Presentation name used in canonical image paths
    /// (`./img/<name>/...`). If `None`, the raw input file stem is used.
    pub presentation_name: Option<String>,

    /// Monospace font named in the document frontmatter. Default: "Cascadia Mono".
    pub mono_font: String,

    /// Sans-serif font named in the document frontmatter. Default: "Atkinson Hyperlegible".
    pub sans_font: String,

    /// Body-length threshold (in characters) above which a text-only slide
    /// gets a `layout: full` directive. Default: `None` (disabled).
    ///
    /// Slides with images always use the two-column layout regardless of
    /// this setting.
    pub full_layout_threshold: Option<usize>,

    /// Number of files converted concurrently in batch mode. Default: 4.
    ///
    /// Conversion is CPU-light; the win here is overlapping file reads and
    /// writes. There is no benefit in raising this far beyond the number of
    /// decks being converted.
    pub concurrency: usize,

    /// Optional progress callback for batch conversion events.
    pub progress_callback: Option<BatchProgress>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            split_marker: "---".to_string(),
            min_block_chars: 10,
            title: None,
            presentation_name: None,
            mono_font: "Cascadia Mono".to_string(),
            sans_font: "Atkinson Hyperlegible".to_string(),
            full_layout_threshold: None,
            concurrency: 4,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("split_marker", &self.split_marker)
            .field("min_block_chars", &self.min_block_chars)
            .field("title", &self.title)
            .field("presentation_name", &self.presentation_name)
            .field("mono_font", &self.mono_font)
            .field("sans_font", &self.sans_font)
            .field("full_layout_threshold", &self.full_layout_threshold)
            .field("concurrency", &self.concurrency)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn BatchProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn split_marker(mut self, marker: impl Into<String>) -> Self {
        self.config.split_marker = marker.into();
        self
    }

    pub fn min_block_chars(mut self, n: usize) -> Self {
        self.config.min_block_chars = n;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn presentation_name(mut self, name: impl Into<String>) -> Self {
        self.config.presentation_name = Some(name.into());
        self
    }

    pub fn mono_font(mut self, font: impl Into<String>) -> Self {
        self.config.mono_font = font.into();
        self
    }

    pub fn sans_font(mut self, font: impl Into<String>) -> Self {
        self.config.sans_font = font.into();
        self
    }

    pub fn full_layout_threshold(mut self, chars: usize) -> Self {
        self.config.full_layout_threshold = Some(chars);
        self
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.config.concurrency = n.max(1);
        self
    }

    pub fn progress_callback(mut self, cb: BatchProgress) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Md2SlidevError> {
        let c = &self.config;
        if c.split_marker.trim().is_empty() {
            return Err(Md2SlidevError::InvalidConfig(
                "Split marker must not be empty".into(),
            ));
        }
        if c.concurrency == 0 {
            return Err(Md2SlidevError::InvalidConfig(
                "Concurrency must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
