//! Image retrieval from URLs and filesystem paths

use crate::io::configuration::LayoutConfig;
use crate::io::error::{LayoutError, Result};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolves an image locator into a decoded image
///
/// Implementations must be shareable across extraction threads.
pub trait ImageSource: Sync {
    /// Load and decode the image behind `locator`
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be retrieved or decoded
    fn load(&self, locator: &str) -> Result<DynamicImage>;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn load(&self, locator: &str) -> Result<DynamicImage> {
        (**self).load(locator)
    }
}

/// Check whether a locator should be fetched over HTTP
pub fn is_remote(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Default image source: HTTP(S) URLs through a blocking client, anything else
/// as a filesystem path
pub struct LocatorSource {
    client: reqwest::blocking::Client,
    base_dir: Option<PathBuf>,
    request_delay: Duration,
}

impl LocatorSource {
    /// Create a source with the given request timeout and post-fetch delay
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the HTTP client cannot be built
    pub fn new(request_timeout: Duration, request_delay: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LayoutError::InvalidParameter {
                parameter: "request_timeout",
                value: format!("{request_timeout:?}"),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_dir: None,
            request_delay,
        })
    }

    /// Create a source from the retrieval settings of a layout configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the HTTP client cannot be built
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        Self::new(config.request_timeout, config.request_delay)
    }

    /// Resolve relative paths against `base_dir`
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Filesystem path a non-remote locator refers to
    pub fn resolve_path(&self, locator: &str) -> PathBuf {
        let path = Path::new(locator);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn fetch(&self, url: &str) -> Result<DynamicImage> {
        tracing::debug!(url = %url, "Fetching image");

        let to_error = |source: reqwest::Error| LayoutError::ImageFetch {
            locator: url.to_string(),
            source,
        };

        let bytes = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::bytes)
            .map_err(to_error)?;

        // Delay is per fetch on the calling worker thread
        if !self.request_delay.is_zero() {
            std::thread::sleep(self.request_delay);
        }

        image::load_from_memory(&bytes).map_err(|e| LayoutError::ImageLoad {
            locator: url.to_string(),
            source: e,
        })
    }
}

impl ImageSource for LocatorSource {
    fn load(&self, locator: &str) -> Result<DynamicImage> {
        if is_remote(locator) {
            self.fetch(locator)
        } else {
            let path = self.resolve_path(locator);
            image::open(&path).map_err(|e| LayoutError::ImageLoad {
                locator: locator.to_string(),
                source: e,
            })
        }
    }
}
