//! Batch orchestration: palette per item, grid sequencing, palette removal

use crate::color::palette::Palette;
use crate::extraction::cache::PaletteCache;
use crate::extraction::extractor::{Extraction, PaletteExtractor};
use crate::io::collection::{Item, ItemId};
use crate::io::configuration::LayoutConfig;
use crate::io::error::{LayoutError, Result};
use crate::io::preview::render_preview;
use crate::io::progress::ProgressManager;
use crate::io::source::{ImageSource, LocatorSource};
use crate::sequencing::sequencer::GridSequencer;
use rayon::prelude::*;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Item paired with its palette for the duration of a run
pub type PaletteItem = (Item, Palette);

/// Outcome of a batch run
#[derive(Debug)]
pub struct BatchReport {
    /// Items in grid order, without palette data
    pub items: Vec<Item>,
    /// Ids of items whose image could not be read
    pub fallbacks: Vec<ItemId>,
    /// Items whose palette came from the cache
    pub cache_hits: usize,
    /// Seed used for k-means++ seeding
    pub seed: u64,
}

/// Seed for the item at `index`, independent of extraction order
pub const fn item_seed(run_seed: u64, index: usize) -> u64 {
    run_seed ^ index as u64
}

/// Drives palette extraction and grid sequencing for a batch of items
pub struct Orchestrator<S: ImageSource> {
    config: LayoutConfig,
    extractor: PaletteExtractor,
    sequencer: GridSequencer,
    source: S,
    cache: PaletteCache,
    progress: ProgressManager,
    preview: bool,
}

impl<S: ImageSource> Orchestrator<S> {
    /// Create an orchestrator reading images through `source`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration fails validation
    pub fn new(config: LayoutConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            extractor: PaletteExtractor::from_config(&config),
            sequencer: GridSequencer::new(config.columns)?,
            config,
            source,
            cache: PaletteCache::new(),
            progress: ProgressManager::hidden(),
            preview: false,
        })
    }

    /// Use an existing palette cache
    #[must_use]
    pub fn with_cache(mut self, cache: PaletteCache) -> Self {
        self.cache = cache;
        self
    }

    /// Report extraction progress through `progress`
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    /// Log a text preview of the grid after sequencing
    #[must_use]
    pub const fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    /// Configuration in use
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Palette cache, including hit/miss statistics
    pub const fn cache(&self) -> &PaletteCache {
        &self.cache
    }

    /// Give back the palette cache for reuse in a later run
    pub fn into_cache(self) -> PaletteCache {
        self.cache
    }

    fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()
            .map_err(|e| LayoutError::ThreadPool {
                reason: e.to_string(),
            })
    }

    /// Pair every item with a palette
    ///
    /// Cached locators are reused; every other distinct locator is extracted
    /// once, in parallel. Unreadable images get the gray fallback palette and
    /// their ids are returned as the second element. Output keeps input order.
    ///
    /// # Errors
    ///
    /// Returns `ThreadPool` if the extraction workers cannot be started
    pub fn extract_palettes(
        &mut self,
        items: Vec<Item>,
        seed: u64,
    ) -> Result<(Vec<PaletteItem>, Vec<ItemId>)> {
        let total = items.len();
        self.progress.initialize(total);

        let mut palettes: Vec<Option<Palette>> = Vec::with_capacity(total);
        // First index of every distinct uncached locator
        let mut pending: Vec<usize> = Vec::new();
        let mut first_index: HashMap<String, usize> = HashMap::new();

        for (index, item) in items.iter().enumerate() {
            let cached = self.cache.lookup(item.cover_image());
            if cached.is_some() {
                tracing::info!("({}/{total}) Cached: {}", index + 1, item.label());
                self.progress.complete_item(false);
            } else if let Entry::Vacant(slot) = first_index.entry(item.cover_image().to_string()) {
                slot.insert(index);
                pending.push(index);
            }
            palettes.push(cached);
        }

        let extractor = self.extractor;
        let source = &self.source;
        let progress = &self.progress;
        let extractions: Vec<(usize, Extraction)> = self.thread_pool()?.install(|| {
            pending
                .par_iter()
                .filter_map(|&index| items.get(index).map(|item| (index, item)))
                .map(|(index, item)| {
                    tracing::info!("({}/{total}) Processing: {}", index + 1, item.label());
                    let extraction =
                        extractor.extract(source, item.cover_image(), item_seed(seed, index));
                    progress.complete_item(extraction.is_fallback());
                    (index, extraction)
                })
                .collect()
        });

        let mut resolved: HashMap<String, (Palette, bool)> = HashMap::new();
        for (index, extraction) in extractions {
            let Some(item) = items.get(index) else {
                continue;
            };
            let fallback = extraction.is_fallback();
            if let Some(error) = &extraction.error {
                tracing::warn!(
                    id = %item.id(),
                    locator = %item.cover_image(),
                    error = %error,
                    "Image unreadable, using fallback palette"
                );
            } else {
                // Fallbacks stay out of the cache so a later run retries them
                self.cache
                    .insert(item.cover_image(), extraction.palette.clone());
            }
            resolved.insert(item.cover_image().to_string(), (extraction.palette, fallback));
        }

        // Items sharing a locator with an extracted one were counted as pending work
        // only once, so settle their progress here
        let mut fallbacks = Vec::new();
        let mut paired = Vec::with_capacity(total);
        for (index, (item, cached)) in items.into_iter().zip(palettes).enumerate() {
            if let Some(palette) = cached {
                paired.push((item, palette));
                continue;
            }

            let (palette, fallback) = resolved
                .get(item.cover_image())
                .cloned()
                .unwrap_or_else(|| (Palette::fallback(), true));
            if first_index.get(item.cover_image()) != Some(&index) {
                self.progress.complete_item(fallback);
            }
            if fallback {
                fallbacks.push(item.id().clone());
            }
            paired.push((item, palette));
        }

        self.progress.finish();
        Ok((paired, fallbacks))
    }

    /// Reorder items so neighboring grid cells have similar palettes
    ///
    /// An empty collection is returned as is without extracting or sequencing.
    ///
    /// # Errors
    ///
    /// Returns `ThreadPool` if the extraction workers cannot be started
    pub fn reorder(&mut self, items: Vec<Item>) -> Result<BatchReport> {
        let seed = self.config.seed.unwrap_or_else(rand::random);
        if items.is_empty() {
            return Ok(BatchReport {
                items,
                fallbacks: Vec::new(),
                cache_hits: 0,
                seed,
            });
        }

        let hits_before = self.cache.stats.hits;
        tracing::info!(
            items = items.len(),
            palette_size = self.config.palette_size,
            columns = self.config.columns,
            seed,
            "Extracting color palettes"
        );

        let (paired, fallbacks) = self.extract_palettes(items, seed)?;
        let cache_hits = self.cache.stats.hits - hits_before;

        tracing::info!("Sorting by color gradient with grid optimization");
        let sequenced = self.sequencer.sequence(paired);

        if self.preview {
            for line in render_preview(&sequenced, self.sequencer.columns()) {
                tracing::info!("{line}");
            }
        }

        let items: Vec<Item> = sequenced.into_iter().map(|(item, _)| item).collect();

        tracing::info!(
            processed = items.len(),
            failed = fallbacks.len(),
            cache_hits,
            seed,
            "Reordered collection"
        );

        Ok(BatchReport {
            items,
            fallbacks,
            cache_hits,
            seed,
        })
    }
}

/// Reorder items by cover-art color for a grid of `columns` columns
///
/// Uses `k` colors per palette, default extraction settings, a fresh random
/// seed and the default image source (HTTP for URLs, filesystem otherwise).
/// Unreadable images fall back to a gray palette and never fail the call.
///
/// # Errors
///
/// Returns `InvalidParameter` if `k` or `columns` is zero or the HTTP client
/// cannot be built, and `ThreadPool` if the extraction workers cannot start
pub fn reorder_by_color(items: Vec<Item>, k: usize, columns: usize) -> Result<Vec<Item>> {
    let config = LayoutConfig::with_grid(k, columns);
    config.validate()?;
    if items.is_empty() {
        return Ok(items);
    }
    let source = LocatorSource::from_config(&config)?;
    let mut orchestrator = Orchestrator::new(config, source)?;
    Ok(orchestrator.reorder(items)?.items)
}
