//! Palette extraction from decoded images with per-image fallback

use crate::color::model::Color;
use crate::color::palette::Palette;
use crate::extraction::kmeans::{self, KmeansParams, Rgb};
use crate::io::configuration::LayoutConfig;
use crate::io::error::LayoutError;
use crate::io::source::ImageSource;
use image::DynamicImage;
use image::imageops::FilterType;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Palette produced for one image, with the error that forced a fallback if any
#[derive(Debug)]
pub struct Extraction {
    /// Extracted palette, or the gray fallback
    pub palette: Palette,
    /// Retrieval or decoding failure that was recovered from
    pub error: Option<LayoutError>,
}

impl Extraction {
    /// Whether the palette is the fallback for an unreadable image
    pub const fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Downsamples images and clusters their pixels into dominance-ordered palettes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteExtractor {
    params: KmeansParams,
    downsample: (u32, u32),
}

impl PaletteExtractor {
    /// Create an extractor with explicit parameters
    pub const fn new(params: KmeansParams, downsample: (u32, u32)) -> Self {
        Self { params, downsample }
    }

    /// Create an extractor from a layout configuration
    pub const fn from_config(config: &LayoutConfig) -> Self {
        Self::new(
            KmeansParams {
                k: config.palette_size,
                max_iterations: config.max_iterations,
                convergence_threshold: config.convergence_threshold,
            },
            config.downsample,
        )
    }

    /// Clustering parameters
    pub const fn params(&self) -> &KmeansParams {
        &self.params
    }

    /// Downsample the image (scale to cover, center crop) and drop alpha
    pub fn pixels_from_image(&self, image: &DynamicImage) -> Vec<Rgb> {
        if image.width() == 0 || image.height() == 0 {
            return Vec::new();
        }

        let (width, height) = self.downsample;
        image
            .resize_to_fill(width, height, FilterType::Lanczos3)
            .to_rgb8()
            .pixels()
            .map(|pixel| pixel.0)
            .collect()
    }

    /// Cluster raw RGB pixels into a palette
    ///
    /// An empty pixel slice yields the single gray fallback color.
    pub fn palette_from_pixels(&self, pixels: &[Rgb], seed: u64) -> Palette {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = kmeans::run(pixels, &self.params, &mut rng);
        let colors = result
            .clusters
            .iter()
            .map(|cluster| Color::from_channels(cluster.centroid))
            .collect();
        Palette::new(colors).unwrap_or_else(|_| Palette::fallback())
    }

    /// Extract the palette of a decoded image
    pub fn palette_from_image(&self, image: &DynamicImage, seed: u64) -> Palette {
        self.palette_from_pixels(&self.pixels_from_image(image), seed)
    }

    /// Load an image through `source` and extract its palette
    ///
    /// Retrieval and decoding errors never propagate: they are converted into
    /// the gray fallback palette and returned alongside it.
    pub fn extract(&self, source: &dyn ImageSource, locator: &str, seed: u64) -> Extraction {
        match source.load(locator) {
            Ok(image) => Extraction {
                palette: self.palette_from_image(&image, seed),
                error: None,
            },
            Err(error) => Extraction {
                palette: Palette::fallback(),
                error: Some(error),
            },
        }
    }
}
