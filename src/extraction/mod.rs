/// Locator-keyed memoization of extracted palettes
pub mod cache;
/// Image downsampling and palette extraction with gray fallback
pub mod extractor;
/// K-means clustering of RGB pixels with k-means++ seeding
pub mod kmeans;
