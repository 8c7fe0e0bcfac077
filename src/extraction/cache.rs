use crate::color::palette::Palette;
use std::collections::HashMap;

/// Memoization cache for extracted palettes keyed by image locator
///
/// Owned by whoever drives extraction and passed in explicitly, so repeated
/// locators within or across batches are only fetched and clustered once.
#[derive(Default, Debug)]
pub struct PaletteCache {
    /// Locator to palette mapping
    palettes: HashMap<String, Palette>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
}

impl PaletteCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a palette, recording a hit or miss
    pub fn lookup(&mut self, locator: &str) -> Option<Palette> {
        if let Some(palette) = self.palettes.get(locator) {
            self.stats.hits += 1;
            Some(palette.clone())
        } else {
            self.stats.misses += 1;
            None
        }
    }

    /// Store a palette for a locator, replacing any previous entry
    pub fn insert(&mut self, locator: impl Into<String>, palette: Palette) {
        self.palettes.insert(locator.into(), palette);
    }

    /// Number of cached palettes
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Test if nothing is cached
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}
