//! CLI binary for md2slidev.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2slidev::{
    convert_dir, convert_file, convert_path, BatchProgressCallback, ConversionConfig,
};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: renders a live progress bar and per-file log
/// lines using [indicatif]. Designed to work correctly when files complete
/// out-of-order (concurrent batch mode).
struct CliBatchCallback {
    /// The single progress bar anchored at the bottom of the terminal.
    bar: ProgressBar,
    /// Per-file wall-clock start times for elapsed reporting.
    start_times: Mutex<HashMap<String, Instant>>,
}

impl CliBatchCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Scanning input directory…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }

    fn elapsed_secs(&self, name: &str) -> f64 {
        self.start_times
            .lock()
            .unwrap()
            .remove(name)
            .map(|t| t.elapsed().as_millis() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl BatchProgressCallback for CliBatchCallback {
    fn on_batch_start(&self, total_files: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} decks  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_files as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Converting {total_files} decks…"))
        ));
    }

    fn on_file_start(&self, name: &str) {
        self.start_times
            .lock()
            .unwrap()
            .insert(name.to_string(), Instant::now());
        self.bar.set_message(name.to_string());
    }

    fn on_file_complete(&self, name: &str, slides: usize) {
        let elapsed = self.elapsed_secs(name);
        self.bar.println(format!(
            "  {} {:<40}  {:<10}  {}",
            green("✓"),
            name,
            dim(&format!("{slides:>3} slides")),
            dim(&format!("{elapsed:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_file_error(&self, name: &str, error: &str) {
        let elapsed = self.elapsed_secs(name);

        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.chars().count() > 80 {
            let cut: String = error.chars().take(79).collect();
            format!("{cut}\u{2026}")
        } else {
            error.to_string()
        };

        self.bar.println(format!(
            "  {} {:<40}  {}  {}",
            red("✗"),
            name,
            red(&msg),
            dim(&format!("{elapsed:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, success_count: usize) {
        let failed = total_files.saturating_sub(success_count);
        self.bar.finish_and_clear();

        if failed == 0 {
            eprintln!(
                "{} {} decks converted successfully",
                green("✔"),
                bold(&success_count.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} decks converted  ({} failed)",
                if failed == total_files {
                    red("✘")
                } else {
                    cyan("⚠")
                },
                bold(&success_count.to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert one extracted deck (stdout)
  md2slidev lecture_01.md

  # Convert to a file
  md2slidev lecture_01.md -o slides.md

  # Convert a whole extraction directory
  md2slidev extracted/ -o presentation-conversion/

  # Explicit title and asset directory name
  md2slidev raw.md --title "Database Systems" --name "CS 101" -o slides.md

  # Enable the full-width layout for long text-only slides
  md2slidev raw.md --full-threshold 600 -o slides.md

  # JSON report instead of markdown
  md2slidev lecture_01.md --json > report.json

PIPELINE:
  md2slidev expects the markdown produced by a pptx extraction step
  (e.g. pptx2md), one file per deck, slides separated by `---`.
  It repairs mojibake and emphasis markup, promotes detected titles to
  headings, rewrites image links to ./img/<name>/<file>, and wraps the
  result in Slidev frontmatter with a two-column default layout.

ENVIRONMENT VARIABLES:
  MD2SLIDEV_OUTPUT         Default for --output
  MD2SLIDEV_MARKER         Default for --split-marker
  MD2SLIDEV_CONCURRENCY    Default for --concurrency
  MD2SLIDEV_FULL_THRESHOLD Default for --full-threshold
"#;

/// Convert extracted slide-deck Markdown to Slidev presentations.
#[derive(Parser, Debug)]
#[command(
    name = "md2slidev",
    version,
    about = "Convert extracted slide-deck Markdown to Slidev presentations",
    long_about = "Convert the Markdown produced by a pptx extraction step into clean, \
well-structured Slidev documents: repaired formatting, detected headings, canonical \
image paths, and per-slide layouts.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Extracted markdown file, or a directory of them.
    input: PathBuf,

    /// Output file (single-deck mode) or directory (batch mode).
    /// Batch mode defaults to ./presentation-conversion.
    #[arg(short, long, env = "MD2SLIDEV_OUTPUT")]
    output: Option<PathBuf>,

    /// Document title. Default: derived from the input file stem.
    /// Single-deck mode only; batch mode always derives per file.
    #[arg(long)]
    title: Option<String>,

    /// Presentation name used in image paths (./img/<name>/…).
    /// Default: the input file stem. Single-deck mode only.
    #[arg(long)]
    name: Option<String>,

    /// Slide delimiter in the extraction output.
    #[arg(long, env = "MD2SLIDEV_MARKER", default_value = "---")]
    split_marker: String,

    /// Minimum characters for a block to count as a slide.
    #[arg(long, default_value_t = 10)]
    min_slide_chars: usize,

    /// Body length (chars) above which text-only slides get `layout: full`.
    /// Disabled unless set.
    #[arg(long, env = "MD2SLIDEV_FULL_THRESHOLD")]
    full_threshold: Option<usize>,

    /// Monospace font named in the frontmatter.
    #[arg(long, default_value = "Cascadia Mono")]
    mono_font: String,

    /// Sans-serif font named in the frontmatter.
    #[arg(long, default_value = "Atkinson Hyperlegible")]
    sans_font: String,

    /// Number of decks converted concurrently in batch mode.
    #[arg(short, long, env = "MD2SLIDEV_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// Output a structured JSON report instead of Markdown.
    #[arg(long)]
    json: bool,

    /// Disable the progress bar in batch mode.
    #[arg(long, env = "MD2SLIDEV_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2SLIDEV_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2SLIDEV_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let batch_mode = cli.input.is_dir();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = batch_mode && !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let mut builder = ConversionConfig::builder()
        .split_marker(cli.split_marker.clone())
        .min_block_chars(cli.min_slide_chars)
        .mono_font(cli.mono_font.clone())
        .sans_font(cli.sans_font.clone())
        .concurrency(cli.concurrency);

    if let Some(threshold) = cli.full_threshold {
        builder = builder.full_layout_threshold(threshold);
    }
    if let Some(ref title) = cli.title {
        builder = builder.title(title.clone());
    }
    if let Some(ref name) = cli.name {
        builder = builder.presentation_name(name.clone());
    }
    if show_progress {
        builder = builder.progress_callback(CliBatchCallback::new());
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    if batch_mode {
        run_batch(&cli, &config).await
    } else {
        run_single(&cli, &config).await
    }
}

/// Convert a directory of extracted decks.
async fn run_batch(cli: &Cli, config: &ConversionConfig) -> Result<()> {
    let output_dir = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("presentation-conversion"));

    let summary = convert_dir(&cli.input, &output_dir, config)
        .await
        .context("Batch conversion failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet && config.progress_callback.is_none() {
        eprintln!(
            "Converted {}/{} decks into {}",
            summary.converted,
            summary.files.len(),
            bold(&output_dir.display().to_string()),
        );
        for file in summary.files.iter().filter(|f| f.error.is_some()) {
            eprintln!(
                "  {} {}: {}",
                red("✗"),
                file.input.display(),
                file.error.as_deref().unwrap_or("unknown error"),
            );
        }
    }

    if summary.converted == 0 {
        anyhow::bail!("All {} decks failed to convert", summary.files.len());
    }
    Ok(())
}

/// Convert one extracted deck.
async fn run_single(cli: &Cli, config: &ConversionConfig) -> Result<()> {
    if let Some(ref output_path) = cli.output {
        let stats = convert_file(&cli.input, output_path, config)
            .await
            .context("Conversion failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} slides  {} images  {}ms  →  {}",
                if stats.failed_slides == 0 {
                    green("✔")
                } else {
                    cyan("⚠")
                },
                stats.processed_slides,
                stats.total_images,
                stats.duration_ms,
                bold(&output_path.display().to_string()),
            );
            if stats.failed_slides > 0 {
                eprintln!("   {} slides failed and were skipped", red(&stats.failed_slides.to_string()));
            }
        }
        return Ok(());
    }

    let output = convert_path(&cli.input, config)
        .await
        .context("Conversion failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(output.markdown.as_bytes())
            .context("Failed to write to stdout")?;
        // Ensure a trailing newline on stdout.
        if !output.markdown.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    if !cli.quiet && !cli.json {
        eprintln!(
            "   {} slides  /  {} images  —  {}ms total",
            dim(&output.stats.processed_slides.to_string()),
            dim(&output.stats.total_images.to_string()),
            output.stats.duration_ms,
        );
    }

    Ok(())
}
