//! Snapshot: an internally consistent set of discovery resources.
//!
//! A snapshot holds one [`ResourceSet`] per (kind, generation) slot:
//! endpoints, clusters, routes and listeners, each in the current and the
//! legacy schema. Snapshots are:
//!
//! - **Immutable**: Once built, a snapshot is never modified; a change is a
//!   new snapshot
//! - **Self-contained**: Every resource body is owned by exactly one snapshot,
//!   and [`Clone`] copies every body
//! - **Dual-generation**: Legacy sets are derived from the current sets at
//!   construction time

use tracing::debug;
use xds_core::{ApiGeneration, ResourceKind, ResourceType, ResourceVersion, Result};

use crate::config::{DuplicatePolicy, SnapshotConfig};
use crate::consistency;
use crate::downgrade::downgrade_set;
use crate::resource::Resource;
use crate::resources::{empty_set, ResourceSet};

/// An immutable snapshot of discovery resources.
///
/// Cloning a snapshot yields a deep, fully independent copy: the clone
/// compares equal to the original but shares no resource body with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    endpoints: ResourceSet,
    clusters: ResourceSet,
    routes: ResourceSet,
    listeners: ResourceSet,
    legacy_endpoints: ResourceSet,
    legacy_clusters: ResourceSet,
    legacy_routes: ResourceSet,
    legacy_listeners: ResourceSet,
}

impl Snapshot {
    /// Create a new snapshot builder.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Build a snapshot from four resource lists sharing one version, with
    /// the default configuration.
    pub fn new(
        version: impl Into<ResourceVersion>,
        endpoints: impl IntoIterator<Item = Resource>,
        clusters: impl IntoIterator<Item = Resource>,
        routes: impl IntoIterator<Item = Resource>,
        listeners: impl IntoIterator<Item = Resource>,
    ) -> Result<Self> {
        Self::builder()
            .version(version)
            .endpoints(endpoints)
            .clusters(clusters)
            .routes(routes)
            .listeners(listeners)
            .build()
    }

    /// Build a snapshot from pre-built current-generation sets.
    ///
    /// The sets are used as-is, versions included. Each legacy set is
    /// derived from its current counterpart. Fails if a set holds a body of
    /// another kind or generation.
    pub fn from_resource_sets(
        endpoints: ResourceSet,
        clusters: ResourceSet,
        routes: ResourceSet,
        listeners: ResourceSet,
    ) -> Result<Self> {
        endpoints.ensure_type(ResourceType::ENDPOINT)?;
        clusters.ensure_type(ResourceType::CLUSTER)?;
        routes.ensure_type(ResourceType::ROUTE)?;
        listeners.ensure_type(ResourceType::LISTENER)?;
        Ok(Self::assemble(endpoints, clusters, routes, listeners, true))
    }

    fn assemble(
        endpoints: ResourceSet,
        clusters: ResourceSet,
        routes: ResourceSet,
        listeners: ResourceSet,
        derive_legacy: bool,
    ) -> Self {
        let legacy = |set: &ResourceSet| {
            if derive_legacy {
                downgrade_set(set)
            } else {
                ResourceSet::empty(set.version().clone())
            }
        };

        Self {
            legacy_endpoints: legacy(&endpoints),
            legacy_clusters: legacy(&clusters),
            legacy_routes: legacy(&routes),
            legacy_listeners: legacy(&listeners),
            endpoints,
            clusters,
            routes,
            listeners,
        }
    }

    /// Get the resource set for one slot.
    #[inline]
    pub fn resources(&self, ty: ResourceType) -> &ResourceSet {
        match (ty.kind(), ty.generation()) {
            (ResourceKind::Endpoint, ApiGeneration::Current) => &self.endpoints,
            (ResourceKind::Cluster, ApiGeneration::Current) => &self.clusters,
            (ResourceKind::Route, ApiGeneration::Current) => &self.routes,
            (ResourceKind::Listener, ApiGeneration::Current) => &self.listeners,
            (ResourceKind::Endpoint, ApiGeneration::Legacy) => &self.legacy_endpoints,
            (ResourceKind::Cluster, ApiGeneration::Legacy) => &self.legacy_clusters,
            (ResourceKind::Route, ApiGeneration::Legacy) => &self.legacy_routes,
            (ResourceKind::Listener, ApiGeneration::Legacy) => &self.legacy_listeners,
        }
    }

    /// Get resources by type URL.
    ///
    /// A type URL that names none of the eight slots yields an empty set.
    pub fn get_resources(&self, type_url: impl AsRef<str>) -> &ResourceSet {
        match ResourceType::from_type_url(type_url.as_ref()) {
            Some(ty) => self.resources(ty),
            None => empty_set(),
        }
    }

    /// Get the version of one slot.
    #[inline]
    pub fn version(&self, ty: ResourceType) -> &ResourceVersion {
        self.resources(ty).version()
    }

    /// Check that endpoints and routes are exactly the names referenced by
    /// clusters and listeners. Legacy sets are not checked.
    pub fn consistent(&self) -> Result<()> {
        consistency::check(Some(self))
    }

    /// Total number of current-generation resources.
    pub fn total_resources(&self) -> usize {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| self.resources(ResourceType::current(kind)).len())
            .sum()
    }

    /// Check if the snapshot holds no current-generation resources.
    pub fn is_empty(&self) -> bool {
        self.total_resources() == 0
    }

    /// Consume the snapshot and take ownership of one slot.
    pub fn into_resources(self, ty: ResourceType) -> ResourceSet {
        match (ty.kind(), ty.generation()) {
            (ResourceKind::Endpoint, ApiGeneration::Current) => self.endpoints,
            (ResourceKind::Cluster, ApiGeneration::Current) => self.clusters,
            (ResourceKind::Route, ApiGeneration::Current) => self.routes,
            (ResourceKind::Listener, ApiGeneration::Current) => self.listeners,
            (ResourceKind::Endpoint, ApiGeneration::Legacy) => self.legacy_endpoints,
            (ResourceKind::Cluster, ApiGeneration::Legacy) => self.legacy_clusters,
            (ResourceKind::Route, ApiGeneration::Legacy) => self.legacy_routes,
            (ResourceKind::Listener, ApiGeneration::Legacy) => self.legacy_listeners,
        }
    }
}

/// Get resources by type URL from a possibly absent snapshot.
///
/// An absent snapshot or an unknown type URL yields an empty set, so blind
/// dispatch on a type URL never needs a separate absence check.
pub fn get_resources<'a>(snapshot: Option<&'a Snapshot>, type_url: &str) -> &'a ResourceSet {
    match snapshot {
        Some(snapshot) => snapshot.get_resources(type_url),
        None => empty_set(),
    }
}

/// Builder for creating snapshots from resource lists.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    version: ResourceVersion,
    config: SnapshotConfig,
    endpoints: Vec<Resource>,
    clusters: Vec<Resource>,
    routes: Vec<Resource>,
    listeners: Vec<Resource>,
}

impl SnapshotBuilder {
    /// Create a new snapshot builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version shared by every resource set.
    pub fn version(mut self, version: impl Into<ResourceVersion>) -> Self {
        self.version = version.into();
        self
    }

    /// Replace the build configuration.
    pub fn config(mut self, config: SnapshotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the duplicate-name policy.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    /// Add resources of one kind.
    pub fn resources(
        mut self,
        kind: ResourceKind,
        resources: impl IntoIterator<Item = Resource>,
    ) -> Self {
        let list = match kind {
            ResourceKind::Endpoint => &mut self.endpoints,
            ResourceKind::Cluster => &mut self.clusters,
            ResourceKind::Route => &mut self.routes,
            ResourceKind::Listener => &mut self.listeners,
        };
        list.extend(resources);
        self
    }

    /// Add a single resource of one kind.
    pub fn resource(self, kind: ResourceKind, resource: Resource) -> Self {
        self.resources(kind, std::iter::once(resource))
    }

    /// Add endpoint assignments.
    pub fn endpoints(self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.resources(ResourceKind::Endpoint, resources)
    }

    /// Add clusters.
    pub fn clusters(self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.resources(ResourceKind::Cluster, resources)
    }

    /// Add route configurations.
    pub fn routes(self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.resources(ResourceKind::Route, resources)
    }

    /// Add listeners.
    pub fn listeners(self, resources: impl IntoIterator<Item = Resource>) -> Self {
        self.resources(ResourceKind::Listener, resources)
    }

    /// Build the snapshot.
    ///
    /// Fails if a set holds duplicate names and the configured policy is
    /// [`DuplicatePolicy::Reject`], or if a resource was added under a kind
    /// its body does not have.
    pub fn build(self) -> Result<Snapshot> {
        let policy = self.config.duplicate_policy;
        let version = self.version;
        let set = |ty: ResourceType, resources: Vec<Resource>| {
            ResourceSet::for_type(ty, version.clone(), resources, policy)
        };

        let snapshot = Snapshot::assemble(
            set(ResourceType::ENDPOINT, self.endpoints)?,
            set(ResourceType::CLUSTER, self.clusters)?,
            set(ResourceType::ROUTE, self.routes)?,
            set(ResourceType::LISTENER, self.listeners)?,
            self.config.derive_legacy,
        );

        debug!(
            version = %version,
            endpoints = snapshot.endpoints.len(),
            clusters = snapshot.clusters.len(),
            routes = snapshot.routes.len(),
            listeners = snapshot.listeners.len(),
            legacy = self.config.derive_legacy,
            "built snapshot"
        );

        Ok(snapshot)
    }
}
