//! Greedy grid-aware ordering of palettes
//!
//! The first cell is the most vivid, mid-lightness palette. Every following cell
//! takes the remaining palette closest to its already-placed left, top and
//! row-wrap neighbors. The result is a heuristic, not a globally optimal layout,
//! and each placement depends on the previous ones, so the pass is sequential.

use crate::color::palette::Palette;
use crate::io::configuration::{
    LEFT_NEIGHBOR_WEIGHT, TOP_NEIGHBOR_WEIGHT, WRAP_NEIGHBOR_SHARE, WRAP_NEIGHBOR_WEIGHT,
};
use crate::io::error::{Result, invalid_parameter};
use crate::sequencing::distances::DistanceMatrix;
use crate::sequencing::grid::Neighbors;
use crate::sequencing::pool::CandidatePool;

/// Weights applied to the distance to each kind of neighbor
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NeighborWeights {
    /// Multiplier for the left neighbor distance
    pub left: f64,
    /// Multiplier for the top neighbor distance
    pub top: f64,
    /// Multiplier for the row-wrap reference distance
    pub wrap: f64,
    /// How much the row-wrap reference counts towards the averaging denominator
    pub wrap_share: f64,
}

impl Default for NeighborWeights {
    fn default() -> Self {
        Self {
            left: LEFT_NEIGHBOR_WEIGHT,
            top: TOP_NEIGHBOR_WEIGHT,
            wrap: WRAP_NEIGHBOR_WEIGHT,
            wrap_share: WRAP_NEIGHBOR_SHARE,
        }
    }
}

/// Start-cell preference: high average saturation at mid lightness
pub fn start_score(palette: &Palette) -> f64 {
    palette.average_saturation() * (100.0 - (palette.average_lightness() - 50.0).abs())
}

/// Index of the highest scoring palette, the first one on ties
pub fn select_start<'a, I>(palettes: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Palette>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, palette) in palettes.into_iter().enumerate() {
        let score = start_score(palette);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

/// Orders palettes for a grid with a fixed number of columns
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSequencer {
    columns: usize,
    weights: NeighborWeights,
}

impl GridSequencer {
    /// Create a sequencer for `columns` columns with default weights
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `columns` is zero
    pub fn new(columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(invalid_parameter(
                "columns",
                &columns,
                &"must be at least 1",
            ));
        }
        Ok(Self {
            columns,
            weights: NeighborWeights::default(),
        })
    }

    /// Replace the neighbor weights
    #[must_use]
    pub const fn with_weights(mut self, weights: NeighborWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Number of grid columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Neighbor weights in use
    pub const fn weights(&self) -> &NeighborWeights {
        &self.weights
    }

    /// Weighted average distance from `candidate` to the placed neighbors
    ///
    /// `placed` maps sequence positions to input indices.
    pub fn candidate_score(
        &self,
        distances: &DistanceMatrix,
        candidate: usize,
        neighbors: &Neighbors,
        placed: &[usize],
    ) -> f64 {
        let references = [
            (neighbors.left, self.weights.left, 1.0),
            (neighbors.top, self.weights.top, 1.0),
            (neighbors.wrap, self.weights.wrap, self.weights.wrap_share),
        ];

        let mut total = 0.0;
        let mut share = 0.0;
        for (position, weight, count) in references {
            let Some(&neighbor) = position.and_then(|p| placed.get(p)) else {
                continue;
            };
            total += distances.get(candidate, neighbor) * weight;
            share += count;
        }

        if share > 0.0 { total / share } else { total }
    }

    /// Placement order as input indices, starting from the best start palette
    pub fn order(&self, palettes: &[Palette]) -> Vec<usize> {
        match select_start(palettes) {
            Some(start) => self.fill_from(palettes, start),
            None => Vec::new(),
        }
    }

    /// Placement order as input indices, starting from a fixed palette
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `start` is not an index into `palettes`
    pub fn order_from(&self, palettes: &[Palette], start: usize) -> Result<Vec<usize>> {
        if start >= palettes.len() {
            return Err(invalid_parameter(
                "start",
                &start,
                &format!("must be below the number of palettes ({})", palettes.len()),
            ));
        }
        Ok(self.fill_from(palettes, start))
    }

    fn fill_from(&self, palettes: &[Palette], start: usize) -> Vec<usize> {
        let distances = DistanceMatrix::from_palettes(palettes);
        let mut pool = CandidatePool::new(palettes.len());
        let mut placed = Vec::with_capacity(palettes.len());

        pool.take(start);
        placed.push(start);

        while !pool.is_empty() {
            let neighbors = Neighbors::of(placed.len(), self.columns);

            let mut best: Option<(usize, f64)> = None;
            for candidate in pool.iter() {
                let score = self.candidate_score(&distances, candidate, &neighbors, &placed);
                match best {
                    Some((_, best_score)) if score >= best_score => {}
                    _ => best = Some((candidate, score)),
                }
            }

            let Some((chosen, _)) = best else {
                break;
            };
            pool.take(chosen);
            placed.push(chosen);
        }

        placed
    }

    /// Reorder `(item, palette)` pairs for the grid
    ///
    /// Collections with at most one entry are returned unchanged. Ties go to
    /// the entry that comes first in the input, so the result depends on input
    /// order but is otherwise deterministic.
    pub fn sequence<T>(&self, entries: Vec<(T, Palette)>) -> Vec<(T, Palette)> {
        if entries.len() <= 1 {
            return entries;
        }
        let palettes: Vec<Palette> = entries.iter().map(|(_, p)| p.clone()).collect();
        let order = self.order(&palettes);
        apply_order(entries, &order)
    }

    /// Reorder `(item, palette)` pairs with the entry at `start` placed first
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `start` is not an index into `entries`
    pub fn sequence_from<T>(
        &self,
        entries: Vec<(T, Palette)>,
        start: usize,
    ) -> Result<Vec<(T, Palette)>> {
        let palettes: Vec<Palette> = entries.iter().map(|(_, p)| p.clone()).collect();
        let order = self.order_from(&palettes, start)?;
        Ok(apply_order(entries, &order))
    }
}

// Move entries into the given order; `order` is a permutation of their indices
fn apply_order<T>(entries: Vec<(T, Palette)>, order: &[usize]) -> Vec<(T, Palette)> {
    let mut slots: Vec<Option<(T, Palette)>> = entries.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}
