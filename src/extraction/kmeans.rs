//! k-means clustering over RGB pixels with k-means++ seeding
//!
//! Distances here are plain RGB Euclidean distances. The perceptual metric is
//! only used when comparing finished palettes.

use rand::Rng;
use std::collections::HashMap;

/// Pixel or centroid as an `[r, g, b]` triple
pub type Rgb = [u8; 3];

/// Clustering parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KmeansParams {
    /// Maximum number of clusters
    pub k: usize,
    /// Cap on Lloyd iterations
    pub max_iterations: usize,
    /// Iteration stops once no centroid moves further than this
    pub convergence_threshold: f64,
}

/// One final cluster
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cluster {
    /// Rounded mean color of the cluster
    pub centroid: Rgb,
    /// Number of pixels assigned to the centroid
    pub count: usize,
}

/// Result of a clustering run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KmeansResult {
    /// Clusters sorted by descending pixel count
    pub clusters: Vec<Cluster>,
    /// Number of Lloyd iterations performed
    pub iterations: usize,
}

impl KmeansResult {
    /// Centroids in dominance order
    pub fn centroids(&self) -> Vec<Rgb> {
        self.clusters.iter().map(|cluster| cluster.centroid).collect()
    }
}

/// Squared Euclidean distance between two RGB triples
pub fn squared_distance(a: Rgb, b: Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = i32::from(x) - i32::from(y);
            d.unsigned_abs() * d.unsigned_abs()
        })
        .sum()
}

/// Euclidean distance between two RGB triples
pub fn distance(a: Rgb, b: Rgb) -> f64 {
    f64::from(squared_distance(a, b)).sqrt()
}

/// Index of the closest centroid, first one wins on ties
pub fn nearest_centroid(pixel: Rgb, centroids: &[Rgb]) -> usize {
    let mut best = 0;
    let mut best_distance = u32::MAX;
    for (index, &centroid) in centroids.iter().enumerate() {
        let d = squared_distance(pixel, centroid);
        if d < best_distance {
            best_distance = d;
            best = index;
        }
    }
    best
}

/// Weighted random index using cumulative subtraction
///
/// Zero weights are never selected. Returns `None` if every weight is zero.
fn weighted_choice(weights: &[f64], rng: &mut impl Rng) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut rand_val = rng.random::<f64>() * total;
    let mut last_positive = None;
    for (i, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        last_positive = Some(i);
        rand_val -= weight;
        if rand_val <= 0.0 {
            return Some(i);
        }
    }
    // Rounding can leave a sliver of the total unconsumed
    last_positive
}

/// Choose up to `k` starting centroids with k-means++
///
/// The first centroid is a uniformly random pixel, each further one is drawn
/// with probability proportional to the squared distance to its nearest
/// chosen centroid. Stops early once every pixel coincides with a centroid.
pub fn kmeans_plus_plus(pixels: &[Rgb], k: usize, rng: &mut impl Rng) -> Vec<Rgb> {
    let mut centroids = Vec::with_capacity(k);
    if pixels.is_empty() || k == 0 {
        return centroids;
    }

    let Some(&first) = pixels.get(rng.random_range(0..pixels.len())) else {
        return centroids;
    };
    centroids.push(first);

    let mut weights = vec![f64::INFINITY; pixels.len()];
    let mut latest = first;
    while centroids.len() < k {
        for (weight, &pixel) in weights.iter_mut().zip(pixels) {
            *weight = weight.min(f64::from(squared_distance(pixel, latest)));
        }

        let Some(next) = weighted_choice(&weights, rng).and_then(|i| pixels.get(i)) else {
            break;
        };
        latest = *next;
        centroids.push(latest);
    }

    centroids
}

/// Assign every pixel to its nearest centroid
pub fn assign(pixels: &[Rgb], centroids: &[Rgb], assignment: &mut [usize]) {
    for (slot, &pixel) in assignment.iter_mut().zip(pixels) {
        *slot = nearest_centroid(pixel, centroids);
    }
}

/// Move each centroid to the rounded mean of its pixels
///
/// Centroids without pixels keep their previous position. Returns the largest
/// distance any centroid moved.
pub fn update_centroids(pixels: &[Rgb], assignment: &[usize], centroids: &mut [Rgb]) -> f64 {
    let mut sums = vec![[0_u64; 3]; centroids.len()];
    let mut counts = vec![0_u64; centroids.len()];

    for (&pixel, &cluster) in pixels.iter().zip(assignment) {
        if let (Some(sum), Some(count)) = (sums.get_mut(cluster), counts.get_mut(cluster)) {
            for (acc, &channel) in sum.iter_mut().zip(pixel.iter()) {
                *acc += u64::from(channel);
            }
            *count += 1;
        }
    }

    let mut max_shift: f64 = 0.0;
    for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
        if count == 0 {
            continue;
        }
        let n = count as f64;
        let updated = sum.map(|channel| (channel as f64 / n).round() as u8);
        max_shift = max_shift.max(distance(*centroid, updated));
        *centroid = updated;
    }

    max_shift
}

// Distinct pixels in first-seen order with their occurrence counts
fn distinct_clusters(pixels: &[Rgb]) -> Vec<Cluster> {
    let mut index: HashMap<Rgb, usize> = HashMap::new();
    let mut clusters: Vec<Cluster> = Vec::new();
    for &pixel in pixels {
        let slot = *index.entry(pixel).or_insert_with(|| {
            clusters.push(Cluster {
                centroid: pixel,
                count: 0,
            });
            clusters.len() - 1
        });
        if let Some(cluster) = clusters.get_mut(slot) {
            cluster.count += 1;
        }
    }
    clusters
}

// Stable, so equal counts keep seeding order
fn sort_by_count(clusters: &mut [Cluster]) {
    clusters.sort_by(|a, b| b.count.cmp(&a.count));
}

/// Cluster pixels into at most `params.k` dominant colors
///
/// With no pixels the result is empty. With at most `k` pixels each distinct
/// pixel becomes its own cluster without iterating.
pub fn run(pixels: &[Rgb], params: &KmeansParams, rng: &mut impl Rng) -> KmeansResult {
    if pixels.is_empty() || params.k == 0 {
        return KmeansResult::default();
    }

    if pixels.len() <= params.k {
        let mut clusters = distinct_clusters(pixels);
        sort_by_count(&mut clusters);
        return KmeansResult {
            clusters,
            iterations: 0,
        };
    }

    let mut centroids = kmeans_plus_plus(pixels, params.k, rng);
    let mut assignment = vec![0; pixels.len()];

    let mut iterations = 0;
    while iterations < params.max_iterations {
        assign(pixels, &centroids, &mut assignment);
        let shift = update_centroids(pixels, &assignment, &mut centroids);
        iterations += 1;
        if shift <= params.convergence_threshold {
            break;
        }
    }

    // Counts reflect the final centroid positions
    assign(pixels, &centroids, &mut assignment);
    let mut counts = vec![0; centroids.len()];
    for &cluster in &assignment {
        if let Some(count) = counts.get_mut(cluster) {
            *count += 1;
        }
    }

    let mut clusters: Vec<Cluster> = centroids
        .into_iter()
        .zip(counts)
        .map(|(centroid, count)| Cluster { centroid, count })
        .collect();
    sort_by_count(&mut clusters);

    KmeansResult {
        clusters,
        iterations,
    }
}
