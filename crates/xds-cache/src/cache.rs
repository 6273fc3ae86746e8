//! Cache trait and the consistency-gated SnapshotCache.
//!
//! The cache stores one snapshot per node id. A snapshot is only published
//! after it passes [`Snapshot::consistent`]; an inconsistent candidate is
//! rejected and the node keeps its last good snapshot.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, trace, warn};
use xds_core::{ResourceType, Result};

use crate::snapshot::Snapshot;
use crate::stats::CacheStats;

/// Trait for snapshot caches.
pub trait Cache: Send + Sync {
    /// Get the published snapshot for a node.
    fn get_snapshot(&self, node: &str) -> Option<Arc<Snapshot>>;

    /// Publish a snapshot for a node.
    ///
    /// Fails without replacing anything if the snapshot is inconsistent.
    fn set_snapshot(&self, node: &str, snapshot: Snapshot) -> Result<()>;

    /// Clear the snapshot for a node.
    fn clear_snapshot(&self, node: &str);

    /// Get the number of cached snapshots.
    fn snapshot_count(&self) -> usize;
}

/// A concurrent snapshot cache using DashMap.
///
/// Published snapshots are shared as `Arc<Snapshot>`; readers that need a
/// copy they can take apart use [`SnapshotCache::isolated_snapshot`].
#[derive(Debug)]
pub struct SnapshotCache {
    /// Snapshots keyed by node id.
    snapshots: DashMap<String, Arc<Snapshot>>,
    /// Statistics.
    stats: CacheStats,
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotCache {
    /// Create a new cache with default settings.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create a new cache with a specific initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: DashMap::with_capacity(capacity),
            stats: CacheStats::new(),
        }
    }

    /// Get cache statistics.
    #[inline]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get a deep copy of a node's snapshot, independent of the cached one.
    pub fn isolated_snapshot(&self, node: &str) -> Option<Snapshot> {
        self.get_snapshot(node).map(|shared| Snapshot::clone(&shared))
    }

    /// Get all node ids in the cache.
    pub fn nodes(&self) -> Vec<String> {
        self.snapshots.iter().map(|r| r.key().clone()).collect()
    }

    /// Check if a snapshot exists for a node.
    pub fn has_snapshot(&self, node: &str) -> bool {
        self.snapshots.contains_key(node)
    }
}

impl Cache for SnapshotCache {
    fn get_snapshot(&self, node: &str) -> Option<Arc<Snapshot>> {
        // Clone the Arc and drop the shard guard immediately.
        let result = self.snapshots.get(node).map(|r| Arc::clone(&*r));

        if result.is_some() {
            self.stats.record_hit();
            trace!(node = %node, "cache hit");
        } else {
            self.stats.record_miss();
            trace!(node = %node, "cache miss");
        }

        result
    }

    fn set_snapshot(&self, node: &str, snapshot: Snapshot) -> Result<()> {
        if let Err(err) = snapshot.consistent() {
            self.stats.record_rejected();
            warn!(node = %node, error = %err, "rejected inconsistent snapshot");
            return Err(err);
        }

        let snapshot = Arc::new(snapshot);
        self.snapshots.insert(node.to_string(), Arc::clone(&snapshot));
        self.stats.record_set();

        debug!(
            node = %node,
            clusters_version = %snapshot.version(ResourceType::CLUSTER),
            resources = snapshot.total_resources(),
            "set snapshot"
        );

        Ok(())
    }

    fn clear_snapshot(&self, node: &str) {
        if self.snapshots.remove(node).is_some() {
            self.stats.record_clear();
            debug!(node = %node, "cleared snapshot");
        }
    }

    fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}
