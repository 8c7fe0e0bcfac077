//! Progress display for palette extraction over a batch of items

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Palettes: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks extraction progress across items
///
/// The bar can be shared by extraction workers; a hidden manager draws nothing.
pub struct ProgressManager {
    bar: ProgressBar,
    failures: std::sync::atomic::AtomicUsize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::hidden()
    }
}

impl ProgressManager {
    /// Create a visible progress manager
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
            failures: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a manager that never draws
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            failures: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Initialize the bar for the given number of items
    ///
    /// Clears the failure count and message left by a previous batch.
    pub fn initialize(&self, item_count: usize) {
        self.failures.store(0, std::sync::atomic::Ordering::Relaxed);
        self.bar.set_message("");
        self.bar.set_length(item_count as u64);
        self.bar.set_position(0);
        self.bar.set_style(BATCH_STYLE.clone());
    }

    /// Mark one item as done
    pub fn complete_item(&self, fallback: bool) {
        if fallback {
            let failed = self
                .failures
                .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
                + 1;
            self.bar.set_message(format!("({failed} unreadable)"));
        }
        self.bar.inc(1);
    }

    /// Number of items completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Number of items that fell back to the gray palette
    pub fn failures(&self) -> usize {
        self.failures.load(std::sync::atomic::Ordering::Relaxed)
    }

    /// Clean up the progress display
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
