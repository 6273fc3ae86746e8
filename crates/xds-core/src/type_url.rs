//! Type URL handling for snapshot resources.
//!
//! Each resource set in a snapshot is addressed by one of eight type URLs:
//! the four discovery kinds (endpoints, clusters, routes, listeners) in the
//! current (v3) and legacy (v2) protocol generations. [`ResourceType`] is the
//! typed form of that identifier; [`TypeUrl`] holds the string constants.

use std::fmt;

/// Type URL wrapper and constants.
///
/// # Example
///
/// ```rust
/// use xds_core::{ApiGeneration, ResourceKind, TypeUrl};
///
/// let url = TypeUrl::new(TypeUrl::CLUSTER_V2);
/// assert_eq!(url.short_name(), "Cluster");
///
/// let ty = url.resource_type().unwrap();
/// assert_eq!(ty.kind(), ResourceKind::Cluster);
/// assert_eq!(ty.generation(), ApiGeneration::Legacy);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeUrl(String);

impl TypeUrl {
    /// Type URL for ClusterLoadAssignment (EDS v3).
    pub const ENDPOINT: &'static str =
        "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment";

    /// Type URL for Cluster (CDS v3).
    pub const CLUSTER: &'static str = "type.googleapis.com/envoy.config.cluster.v3.Cluster";

    /// Type URL for RouteConfiguration (RDS v3).
    pub const ROUTE: &'static str =
        "type.googleapis.com/envoy.config.route.v3.RouteConfiguration";

    /// Type URL for Listener (LDS v3).
    pub const LISTENER: &'static str = "type.googleapis.com/envoy.config.listener.v3.Listener";

    /// Type URL for ClusterLoadAssignment (EDS v2).
    pub const ENDPOINT_V2: &'static str = "type.googleapis.com/envoy.api.v2.ClusterLoadAssignment";

    /// Type URL for Cluster (CDS v2).
    pub const CLUSTER_V2: &'static str = "type.googleapis.com/envoy.api.v2.Cluster";

    /// Type URL for RouteConfiguration (RDS v2).
    pub const ROUTE_V2: &'static str = "type.googleapis.com/envoy.api.v2.RouteConfiguration";

    /// Type URL for Listener (LDS v2).
    pub const LISTENER_V2: &'static str = "type.googleapis.com/envoy.api.v2.Listener";

    /// Type URL for the v3 HTTP connection manager network filter config.
    pub const HTTP_CONNECTION_MANAGER: &'static str = "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager";

    /// Type URL for the v2 HTTP connection manager network filter config.
    pub const HTTP_CONNECTION_MANAGER_V2: &'static str =
        "type.googleapis.com/envoy.config.filter.network.http_connection_manager.v2.HttpConnectionManager";

    /// Create a new type URL from a string.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Get the type URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the short message name, e.g. `Cluster`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0
            .rsplit('/')
            .next()
            .and_then(|s| s.rsplit('.').next())
            .unwrap_or(&self.0)
    }

    /// The snapshot slot this type URL addresses, if any.
    #[must_use]
    pub fn resource_type(&self) -> Option<ResourceType> {
        ResourceType::from_type_url(&self.0)
    }
}

impl fmt::Display for TypeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeUrl {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<ResourceType> for TypeUrl {
    fn from(ty: ResourceType) -> Self {
        Self(ty.type_url().to_string())
    }
}

impl AsRef<str> for TypeUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The four discovery resource kinds held by a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// ClusterLoadAssignment (EDS).
    Endpoint,
    /// Cluster (CDS).
    Cluster,
    /// RouteConfiguration (RDS).
    Route,
    /// Listener (LDS).
    Listener,
}

impl ResourceKind {
    /// All kinds.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Endpoint,
        ResourceKind::Cluster,
        ResourceKind::Route,
        ResourceKind::Listener,
    ];

    /// The kind whose resources this kind names as dependencies.
    ///
    /// Clusters reference endpoint assignments and listeners reference route
    /// configurations. Endpoints and routes are leaves.
    #[must_use]
    pub const fn references(self) -> Option<ResourceKind> {
        match self {
            ResourceKind::Cluster => Some(ResourceKind::Endpoint),
            ResourceKind::Listener => Some(ResourceKind::Route),
            ResourceKind::Endpoint | ResourceKind::Route => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Endpoint => "endpoints",
            ResourceKind::Cluster => "clusters",
            ResourceKind::Route => "routes",
            ResourceKind::Listener => "listeners",
        };
        f.write_str(s)
    }
}

/// Protocol generation a resource set is served to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiGeneration {
    /// The v3 schema.
    Current,
    /// The v2 schema, kept for older proxies.
    Legacy,
}

/// One of the eight (kind, generation) slots of a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceType {
    kind: ResourceKind,
    generation: ApiGeneration,
}

impl ResourceType {
    /// Current-generation endpoints.
    pub const ENDPOINT: ResourceType = ResourceType::current(ResourceKind::Endpoint);
    /// Current-generation clusters.
    pub const CLUSTER: ResourceType = ResourceType::current(ResourceKind::Cluster);
    /// Current-generation routes.
    pub const ROUTE: ResourceType = ResourceType::current(ResourceKind::Route);
    /// Current-generation listeners.
    pub const LISTENER: ResourceType = ResourceType::current(ResourceKind::Listener);
    /// Legacy endpoints.
    pub const ENDPOINT_V2: ResourceType = ResourceType::legacy(ResourceKind::Endpoint);
    /// Legacy clusters.
    pub const CLUSTER_V2: ResourceType = ResourceType::legacy(ResourceKind::Cluster);
    /// Legacy routes.
    pub const ROUTE_V2: ResourceType = ResourceType::legacy(ResourceKind::Route);
    /// Legacy listeners.
    pub const LISTENER_V2: ResourceType = ResourceType::legacy(ResourceKind::Listener);

    /// All eight slots, current generation first.
    pub const ALL: [ResourceType; 8] = [
        Self::ENDPOINT,
        Self::CLUSTER,
        Self::ROUTE,
        Self::LISTENER,
        Self::ENDPOINT_V2,
        Self::CLUSTER_V2,
        Self::ROUTE_V2,
        Self::LISTENER_V2,
    ];

    /// Create a slot identifier.
    #[must_use]
    pub const fn new(kind: ResourceKind, generation: ApiGeneration) -> Self {
        Self { kind, generation }
    }

    /// Current-generation slot for a kind.
    #[must_use]
    pub const fn current(kind: ResourceKind) -> Self {
        Self::new(kind, ApiGeneration::Current)
    }

    /// Legacy slot for a kind.
    #[must_use]
    pub const fn legacy(kind: ResourceKind) -> Self {
        Self::new(kind, ApiGeneration::Legacy)
    }

    /// The resource kind.
    #[must_use]
    pub const fn kind(self) -> ResourceKind {
        self.kind
    }

    /// The protocol generation.
    #[must_use]
    pub const fn generation(self) -> ApiGeneration {
        self.generation
    }

    /// The type URL served for this slot.
    #[must_use]
    pub const fn type_url(self) -> &'static str {
        match (self.kind, self.generation) {
            (ResourceKind::Endpoint, ApiGeneration::Current) => TypeUrl::ENDPOINT,
            (ResourceKind::Cluster, ApiGeneration::Current) => TypeUrl::CLUSTER,
            (ResourceKind::Route, ApiGeneration::Current) => TypeUrl::ROUTE,
            (ResourceKind::Listener, ApiGeneration::Current) => TypeUrl::LISTENER,
            (ResourceKind::Endpoint, ApiGeneration::Legacy) => TypeUrl::ENDPOINT_V2,
            (ResourceKind::Cluster, ApiGeneration::Legacy) => TypeUrl::CLUSTER_V2,
            (ResourceKind::Route, ApiGeneration::Legacy) => TypeUrl::ROUTE_V2,
            (ResourceKind::Listener, ApiGeneration::Legacy) => TypeUrl::LISTENER_V2,
        }
    }

    /// Parse a type URL. Returns `None` for anything that is not one of the
    /// eight snapshot slots.
    #[must_use]
    pub fn from_type_url(type_url: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.type_url() == type_url)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_url())
    }
}
