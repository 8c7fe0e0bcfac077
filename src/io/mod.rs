/// Command-line interface and batch runner
pub mod cli;
/// JSON collection documents and their items
pub mod collection;
/// Default constants and layout configuration
pub mod configuration;
/// Error types
pub mod error;
/// Text preview of a sequenced grid
pub mod preview;
/// Extraction progress display
pub mod progress;
/// Image retrieval from URLs and paths
pub mod source;
