//! Pairwise palette distances computed once per sequencing run

use crate::color::palette::{Palette, palette_distance};
use ndarray::Array2;

/// Symmetric matrix of palette distances indexed by input position
#[derive(Clone, Debug)]
pub struct DistanceMatrix {
    distances: Array2<f64>,
}

impl DistanceMatrix {
    /// Compute distances between every pair of palettes
    ///
    /// Each unordered pair is evaluated once and mirrored; the diagonal is zero.
    pub fn from_palettes<'a, I>(palettes: I) -> Self
    where
        I: IntoIterator<Item = &'a Palette>,
    {
        let palettes: Vec<&Palette> = palettes.into_iter().collect();
        let n = palettes.len();
        let mut distances = Array2::zeros((n, n));

        for (i, &a) in palettes.iter().enumerate() {
            for (j, &b) in palettes.iter().enumerate().skip(i + 1) {
                let d = palette_distance(a, b);
                if let Some(cell) = distances.get_mut((i, j)) {
                    *cell = d;
                }
                if let Some(cell) = distances.get_mut((j, i)) {
                    *cell = d;
                }
            }
        }

        Self { distances }
    }

    /// Distance between palettes `i` and `j`
    ///
    /// Out-of-range indices are infinitely far apart.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.distances.get((i, j)).copied().unwrap_or(f64::INFINITY)
    }

    /// Number of palettes
    pub fn len(&self) -> usize {
        self.distances.nrows()
    }

    /// Test if the matrix covers no palettes
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}
