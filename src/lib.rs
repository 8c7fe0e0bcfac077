//! Color-gradient layout for cover-art collections shown in fixed-column grids
//!
//! Every item's cover image is reduced to a small palette of dominant colors by
//! k-means clustering. Items are then placed one grid cell at a time, each cell
//! taking the remaining item whose palette is closest to its left, top and
//! row-wrap neighbors, so colors flow smoothly across rows and columns.

#![forbid(unsafe_code)]

/// Color representation, color distance and palettes
pub mod color;
/// Palette extraction from cover images
pub mod extraction;
/// Collections, configuration, image sources, errors and the CLI
pub mod io;
/// Batch orchestration
pub mod pipeline;
/// Grid-aware ordering of palettes
pub mod sequencing;

pub use io::error::{LayoutError, Result};
pub use pipeline::orchestrator::reorder_by_color;
