//! Translation metrics and observability module.
//!
//! Tracks how translation groups are served: group cache hits and misses,
//! reads answered by the fallback locale, and reads that found no value at all.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global translation metrics singleton.
pub struct TranslationMetrics {
    /// Number of times a group was already in an entity's cache
    cache_hits: AtomicUsize,

    /// Number of times a group had to be constructed or loaded
    cache_misses: AtomicUsize,

    /// Number of reads answered by the fallback locale
    fallback_reads: AtomicUsize,

    /// Number of reads with no value in either locale
    missing_reads: AtomicUsize,
}

static METRICS: OnceLock<TranslationMetrics> = OnceLock::new();

impl TranslationMetrics {
    /// A fresh, zeroed set of counters.
    pub fn new() -> Self {
        Self {
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
            fallback_reads: AtomicUsize::new(0),
            missing_reads: AtomicUsize::new(0),
        }
    }

    /// Get the global translation metrics instance.
    pub fn global() -> &'static TranslationMetrics {
        METRICS.get_or_init(TranslationMetrics::new)
    }

    /// Record a cache hit (group already opened by the entity).
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache miss (group had to be constructed or loaded).
    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read answered by the fallback locale.
    pub fn record_fallback_read(&self) {
        self.fallback_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read with no value in either locale.
    pub fn record_missing_read(&self) {
        self.missing_reads.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current cache hit count.
    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    /// Get the current cache miss count.
    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// Get the current fallback read count.
    pub fn fallback_reads(&self) -> usize {
        self.fallback_reads.load(Ordering::Relaxed)
    }

    /// Get the current missing read count.
    pub fn missing_reads(&self) -> usize {
        self.missing_reads.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total = hits + misses;
        let cache_hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            fallback_reads: self.fallback_reads(),
            missing_reads: self.missing_reads(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.fallback_reads.store(0, Ordering::Relaxed);
        self.missing_reads.store(0, Ordering::Relaxed);
    }
}

impl Default for TranslationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of the translation counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,

    pub fallback_reads: usize,
    pub missing_reads: usize,
}
