//! Command-line interface for reordering a collection document in place

use crate::io::collection::CollectionDocument;
use crate::io::configuration::{
    DEFAULT_COLLECTION_KEY, DEFAULT_COLUMNS, DEFAULT_CONVERGENCE_THRESHOLD,
    DEFAULT_DOWNSAMPLE_SIZE, DEFAULT_MAX_ITERATIONS, DEFAULT_PALETTE_SIZE,
    DEFAULT_REQUEST_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS, LayoutConfig,
};
use crate::io::error::Result;
use crate::io::progress::ProgressManager;
use crate::io::source::LocatorSource;
use crate::pipeline::orchestrator::{BatchReport, Orchestrator};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "chromagrid")]
#[command(
    author,
    version,
    about = "Reorder a cover-art collection into a smooth color gradient for grid display"
)]
/// Command-line arguments for the layout tool
pub struct Cli {
    /// JSON collection to reorder (bare array or object holding the item array)
    #[arg(value_name = "COLLECTION")]
    pub collection: PathBuf,

    /// Write the result here instead of overwriting the collection
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Colors extracted per cover
    #[arg(short = 'k', long = "colors", default_value_t = DEFAULT_PALETTE_SIZE)]
    pub palette_size: usize,

    /// Columns of the display grid
    #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Edge length images are downsampled to before clustering
    #[arg(long, default_value_t = DEFAULT_DOWNSAMPLE_SIZE)]
    pub size: u32,

    /// Maximum k-means iterations
    #[arg(short, long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub iterations: usize,

    /// Centroid movement below which k-means stops early
    #[arg(long, default_value_t = DEFAULT_CONVERGENCE_THRESHOLD)]
    pub convergence: f64,

    /// Random seed for reproducible palettes
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Object key holding the item array
    #[arg(long, default_value = DEFAULT_COLLECTION_KEY)]
    pub key: String,

    /// Extraction threads (0 uses every core)
    #[arg(short, long, default_value_t = 0)]
    pub threads: usize,

    /// Pause after each network fetch, in milliseconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
    pub delay_ms: u64,

    /// Network request timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log a text preview of the resulting grid
    #[arg(short, long)]
    pub preview: bool,

    /// Suppress the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Layout configuration described by the arguments
    pub const fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            palette_size: self.palette_size,
            columns: self.columns,
            downsample: (self.size, self.size),
            max_iterations: self.iterations,
            convergence_threshold: self.convergence,
            seed: self.seed,
            threads: self.threads,
            request_delay: Duration::from_millis(self.delay_ms),
            request_timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Path the reordered collection is written to
    pub fn output_path(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.collection)
    }
}

/// Install the log subscriber; `RUST_LOG` overrides the default filter
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "chromagrid=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Loads, reorders and saves one collection document
pub struct BatchRunner {
    cli: Cli,
}

impl BatchRunner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the batch
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid or the collection cannot
    /// be read or written. Unreadable images are not errors.
    pub fn run(&self) -> Result<BatchReport> {
        let start_time = Instant::now();
        let config = self.cli.layout_config();
        config.validate()?;

        let mut document = CollectionDocument::load(&self.cli.collection, &self.cli.key)?;
        tracing::info!(
            path = %self.cli.collection.display(),
            items = document.items.len(),
            "Loaded collection"
        );

        let mut source = LocatorSource::from_config(&config)?;
        if let Some(parent) = self.cli.collection.parent() {
            source = source.with_base_dir(parent);
        }

        let progress = if self.cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        let mut orchestrator = Orchestrator::new(config, source)?
            .with_progress(progress)
            .with_preview(self.cli.preview);

        let items = std::mem::take(&mut document.items);
        let report = orchestrator.reorder(items)?;
        document.items.clone_from(&report.items);

        let output = self.cli.output_path();
        document.save(output)?;
        tracing::info!(
            path = %output.display(),
            elapsed_ms = start_time.elapsed().as_millis(),
            "Saved reordered collection"
        );

        Ok(report)
    }
}
