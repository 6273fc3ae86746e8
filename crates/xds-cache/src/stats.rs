//! Cache statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Statistics for snapshot publication and lookup.
///
/// All counters are atomic and can be safely accessed from multiple threads.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Snapshots accepted by `set_snapshot`.
    snapshots_set: AtomicU64,
    /// Snapshots rejected as inconsistent.
    snapshots_rejected: AtomicU64,
    /// Lookups that found a snapshot.
    snapshot_hits: AtomicU64,
    /// Lookups that found nothing.
    snapshot_misses: AtomicU64,
    /// Snapshots cleared.
    snapshots_cleared: AtomicU64,
}

impl CacheStats {
    /// Create new cache statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted snapshot.
    #[inline]
    pub fn record_set(&self) {
        self.snapshots_set.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected snapshot.
    #[inline]
    pub fn record_rejected(&self) {
        self.snapshots_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a snapshot hit.
    #[inline]
    pub fn record_hit(&self) {
        self.snapshot_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a snapshot miss.
    #[inline]
    pub fn record_miss(&self) {
        self.snapshot_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a snapshot clear.
    #[inline]
    pub fn record_clear(&self) {
        self.snapshots_cleared.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total snapshots accepted.
    #[inline]
    pub fn snapshots_set(&self) -> u64 {
        self.snapshots_set.load(Ordering::Relaxed)
    }

    /// Get total snapshots rejected.
    #[inline]
    pub fn snapshots_rejected(&self) -> u64 {
        self.snapshots_rejected.load(Ordering::Relaxed)
    }

    /// Get total snapshot hits.
    #[inline]
    pub fn snapshot_hits(&self) -> u64 {
        self.snapshot_hits.load(Ordering::Relaxed)
    }

    /// Get total snapshot misses.
    #[inline]
    pub fn snapshot_misses(&self) -> u64 {
        self.snapshot_misses.load(Ordering::Relaxed)
    }

    /// Get total snapshots cleared.
    #[inline]
    pub fn snapshots_cleared(&self) -> u64 {
        self.snapshots_cleared.load(Ordering::Relaxed)
    }

    /// Fraction of publications that were rejected (0.0 to 1.0).
    pub fn rejection_rate(&self) -> f64 {
        let rejected = self.snapshots_rejected() as f64;
        let total = rejected + self.snapshots_set() as f64;
        if total == 0.0 {
            0.0
        } else {
            rejected / total
        }
    }
}
