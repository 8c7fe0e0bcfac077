//! Error types for palette extraction, sequencing and collection I/O

use std::fmt;
use std::path::PathBuf;

/// Main error type for all layout operations
#[derive(Debug)]
pub enum LayoutError {
    /// Configuration value failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A palette was constructed without any colors
    EmptyPalette,

    /// Failed to decode a source image
    ImageLoad {
        /// Locator (path or URL) of the image
        locator: String,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to retrieve a remote image
    ImageFetch {
        /// URL of the image
        locator: String,
        /// Underlying HTTP client error
        source: reqwest::Error,
    },

    /// Collection file is not valid JSON or items have the wrong shape
    CollectionParse {
        /// Path to the collection file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Collection JSON parsed but does not contain an item array
    CollectionFormat {
        /// Path to the collection file
        path: PathBuf,
        /// Description of what's wrong with the document
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Worker pool for parallel extraction could not be built
    ThreadPool {
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyPalette => write!(f, "A palette must contain at least one color"),
            Self::ImageLoad { locator, source } => {
                write!(f, "Failed to load image '{locator}': {source}")
            }
            Self::ImageFetch { locator, source } => {
                write!(f, "Failed to fetch image '{locator}': {source}")
            }
            Self::CollectionParse { path, source } => {
                write!(
                    f,
                    "Failed to parse collection '{}': {source}",
                    path.display()
                )
            }
            Self::CollectionFormat { path, reason } => {
                write!(f, "Invalid collection '{}': {reason}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ThreadPool { reason } => {
                write!(f, "Failed to build extraction thread pool: {reason}")
            }
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::ImageFetch { source, .. } => Some(source),
            Self::CollectionParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for layout results
pub type Result<T> = std::result::Result<T, LayoutError>;

impl From<image::ImageError> for LayoutError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            locator: "<unknown>".to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for LayoutError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::CollectionParse {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LayoutError {
    LayoutError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
