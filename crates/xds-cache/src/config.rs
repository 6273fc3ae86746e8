//! Snapshot construction settings.

/// What to do when two resources in one set share a name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail construction with [`xds_core::XdsError::DuplicateResourceName`].
    #[default]
    Reject,
    /// Keep the resource that appears last in the input.
    LastWriteWins,
}

/// Configuration for building snapshots.
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Handling of duplicate names within a resource set.
    pub duplicate_policy: DuplicatePolicy,
    /// Derive the legacy-generation sets. When disabled the legacy sets are
    /// empty but still carry the snapshot version.
    pub derive_legacy: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Reject,
            derive_legacy: true,
        }
    }
}

impl SnapshotConfig {
    /// Configuration that tolerates duplicate names, last one wins.
    pub fn last_write_wins() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::LastWriteWins,
            ..Self::default()
        }
    }

    /// Disable legacy derivation.
    pub fn without_legacy(mut self) -> Self {
        self.derive_legacy = false;
        self
    }
}
