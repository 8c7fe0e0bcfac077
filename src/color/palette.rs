//! Dominance-ordered palettes and the soft Hausdorff distance between them

use crate::color::model::{Color, color_distance};
use crate::io::configuration::FALLBACK_GRAY;
use crate::io::error::{LayoutError, Result};

/// Non-empty list of colors, most dominant first
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Create a palette from colors already ordered by dominance
    ///
    /// # Errors
    ///
    /// Returns `EmptyPalette` if `colors` is empty
    pub fn new(colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(LayoutError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Single mid-gray palette used when an image cannot be read
    pub fn fallback() -> Self {
        Self {
            colors: vec![Color::from_rgb(FALLBACK_GRAY, FALLBACK_GRAY, FALLBACK_GRAY)],
        }
    }

    /// Colors in dominance order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of colors
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false, palettes hold at least one color
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Most dominant color
    pub fn dominant(&self) -> Option<&Color> {
        self.colors.first()
    }

    /// Mean saturation over all colors
    pub fn average_saturation(&self) -> f64 {
        self.colors.iter().map(Color::saturation).sum::<f64>() / self.colors.len() as f64
    }

    /// Mean lightness over all colors
    pub fn average_lightness(&self) -> f64 {
        self.colors.iter().map(Color::lightness).sum::<f64>() / self.colors.len() as f64
    }
}

// Mean over `from` of the distance to the nearest color in `to`
fn mean_nearest_distance(from: &[Color], to: &[Color]) -> f64 {
    let total: f64 = from
        .iter()
        .map(|c1| {
            to.iter()
                .map(|c2| color_distance(c1, c2))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / from.len() as f64
}

/// Symmetric distance between two palettes
///
/// Averages, in both directions, each color's distance to its nearest
/// counterpart in the other palette. Unlike the classic Hausdorff distance this
/// takes the mean rather than the max, so palettes sharing several similar
/// colors stay close even when one color differs.
pub fn palette_distance(p1: &Palette, p2: &Palette) -> f64 {
    let forward = mean_nearest_distance(&p1.colors, &p2.colors);
    let backward = mean_nearest_distance(&p2.colors, &p1.colors);
    f64::midpoint(forward, backward)
}
