//! Layout constants and runtime configuration defaults

use crate::io::error::{Result, invalid_parameter};
use std::time::Duration;

// Palette extraction
/// Number of dominant colors extracted per image
pub const DEFAULT_PALETTE_SIZE: usize = 4;
/// Side length images are downsampled to before clustering
pub const DEFAULT_DOWNSAMPLE_SIZE: u32 = 50;
/// Maximum number of Lloyd iterations per image
pub const DEFAULT_MAX_ITERATIONS: usize = 20;
/// Largest centroid movement (RGB units) still considered converged
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 1.0;
/// Channel value of the gray used when an image cannot be read
pub const FALLBACK_GRAY: u8 = 128;

// Grid sequencing
/// Number of columns in the rendered grid
pub const DEFAULT_COLUMNS: usize = 5;
/// Weight of the distance to the cell on the left
pub const LEFT_NEIGHBOR_WEIGHT: f64 = 1.2;
/// Weight of the distance to the cell above
pub const TOP_NEIGHBOR_WEIGHT: f64 = 1.0;
/// Weight of the distance to the last cell of the previous row
pub const WRAP_NEIGHBOR_WEIGHT: f64 = 0.5;
/// Share of a full neighbor the wrap reference counts for when averaging
pub const WRAP_NEIGHBOR_SHARE: f64 = 0.5;

// Color metric
/// Weight of the squared RGB distance
pub const RGB_DISTANCE_WEIGHT: f64 = 0.3;
/// Weight of the (scaled) squared circular hue distance
pub const HUE_DISTANCE_WEIGHT: f64 = 0.4;
/// Multiplier applied to the squared hue difference before weighting
pub const HUE_DISTANCE_SCALE: f64 = 4.0;
/// Weight of the squared saturation difference
pub const SATURATION_DISTANCE_WEIGHT: f64 = 0.15;
/// Weight of the squared lightness difference
pub const LIGHTNESS_DISTANCE_WEIGHT: f64 = 0.15;

// Image retrieval
/// Pause after each network fetch
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 100;
/// Timeout for a single image request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Collection documents
/// Key of the item array inside an object-shaped collection
pub const DEFAULT_COLLECTION_KEY: &str = "releases";

// Output settings
/// Width of the progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Characters of each label shown in the grid preview
pub const PREVIEW_LABEL_WIDTH: usize = 20;

/// Runtime parameters for a layout run
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Number of colors per palette
    pub palette_size: usize,
    /// Number of grid columns
    pub columns: usize,
    /// Width and height images are downsampled to
    pub downsample: (u32, u32),
    /// Iteration cap for Lloyd refinement
    pub max_iterations: usize,
    /// Centroid movement threshold for early convergence
    pub convergence_threshold: f64,
    /// Seed for k-means++ seeding (fresh seed per run when `None`)
    pub seed: Option<u64>,
    /// Worker threads for extraction (0 uses all available cores)
    pub threads: usize,
    /// Pause after each network fetch
    pub request_delay: Duration,
    /// Timeout for a single image request
    pub request_timeout: Duration,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            palette_size: DEFAULT_PALETTE_SIZE,
            columns: DEFAULT_COLUMNS,
            downsample: (DEFAULT_DOWNSAMPLE_SIZE, DEFAULT_DOWNSAMPLE_SIZE),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            seed: None,
            threads: 0,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl LayoutConfig {
    /// Default configuration with the given palette size and column count
    pub fn with_grid(palette_size: usize, columns: usize) -> Self {
        Self {
            palette_size,
            columns,
            ..Self::default()
        }
    }

    /// Reject configurations that indicate a programming or setup error
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `palette_size` or `columns` is zero
    /// - either downsample dimension is zero
    /// - `max_iterations` is zero
    /// - `convergence_threshold` is negative or not finite
    /// - `request_timeout` is zero
    pub fn validate(&self) -> Result<()> {
        if self.palette_size == 0 {
            return Err(invalid_parameter(
                "palette_size",
                &self.palette_size,
                &"must be at least 1",
            ));
        }
        if self.columns == 0 {
            return Err(invalid_parameter(
                "columns",
                &self.columns,
                &"must be at least 1",
            ));
        }
        if self.downsample.0 == 0 || self.downsample.1 == 0 {
            return Err(invalid_parameter(
                "downsample",
                &format!("{}x{}", self.downsample.0, self.downsample.1),
                &"both dimensions must be at least 1",
            ));
        }
        if self.max_iterations == 0 {
            return Err(invalid_parameter(
                "max_iterations",
                &self.max_iterations,
                &"must be at least 1",
            ));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(invalid_parameter(
                "convergence_threshold",
                &self.convergence_threshold,
                &"must be a finite, non-negative number",
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(invalid_parameter(
                "request_timeout",
                &format!("{:?}", self.request_timeout),
                &"must be greater than zero",
            ));
        }
        Ok(())
    }
}
