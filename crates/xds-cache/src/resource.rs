//! Resources and their typed bodies.
//!
//! A [`Resource`] is a name plus exactly one [`ResourceBody`]. The body is a
//! closed enum over the message types the snapshot core understands, so every
//! per-kind dispatch (naming, reference extraction, downgrade, encoding) is an
//! exhaustive `match` and adding a kind fails to build until each site
//! handles it.

use prost::Message;
use tracing::debug;
use xds_core::{ResourceKind, ResourceType, Result, TypeUrl, XdsError};
use xds_types::envoy::api::v2;
use xds_types::envoy::config::cluster::v3::{cluster, Cluster};
use xds_types::envoy::config::endpoint::v3::ClusterLoadAssignment;
use xds_types::envoy::config::filter::network::http_connection_manager::v2 as hcm_v2;
use xds_types::envoy::config::listener::v3::{filter, Listener};
use xds_types::envoy::config::route::v3::RouteConfiguration;
use xds_types::envoy::extensions::filters::network::http_connection_manager::v3 as hcm;

/// Decoded payload of a resource.
#[derive(Clone, Debug, PartialEq)]
pub enum ResourceBody {
    /// Current-generation endpoint assignment (EDS).
    Endpoint(ClusterLoadAssignment),
    /// Current-generation cluster (CDS).
    Cluster(Cluster),
    /// Current-generation route configuration (RDS).
    Route(RouteConfiguration),
    /// Current-generation listener (LDS).
    Listener(Listener),
    /// Legacy endpoint assignment. The message is shared with the current
    /// generation; only the type URL differs.
    LegacyEndpoint(ClusterLoadAssignment),
    /// Legacy route configuration. The message is shared with the current
    /// generation; only the type URL differs.
    LegacyRoute(RouteConfiguration),
    /// Legacy cluster, produced by downgrading a [`ResourceBody::Cluster`].
    LegacyCluster(v2::Cluster),
    /// Legacy listener, produced by downgrading a [`ResourceBody::Listener`].
    LegacyListener(v2::Listener),
    /// A message of a type this crate does not decode.
    Opaque(prost_types::Any),
}

impl ResourceBody {
    /// Type URL of the body's message.
    pub fn type_url(&self) -> &str {
        match self {
            ResourceBody::Endpoint(_) => TypeUrl::ENDPOINT,
            ResourceBody::Cluster(_) => TypeUrl::CLUSTER,
            ResourceBody::Route(_) => TypeUrl::ROUTE,
            ResourceBody::Listener(_) => TypeUrl::LISTENER,
            ResourceBody::LegacyEndpoint(_) => TypeUrl::ENDPOINT_V2,
            ResourceBody::LegacyCluster(_) => TypeUrl::CLUSTER_V2,
            ResourceBody::LegacyRoute(_) => TypeUrl::ROUTE_V2,
            ResourceBody::LegacyListener(_) => TypeUrl::LISTENER_V2,
            ResourceBody::Opaque(any) => any.type_url.as_str(),
        }
    }

    /// The snapshot slot this body belongs in, `None` for opaque bodies.
    pub fn resource_type(&self) -> Option<ResourceType> {
        match self {
            ResourceBody::Endpoint(_) => Some(ResourceType::ENDPOINT),
            ResourceBody::Cluster(_) => Some(ResourceType::CLUSTER),
            ResourceBody::Route(_) => Some(ResourceType::ROUTE),
            ResourceBody::Listener(_) => Some(ResourceType::LISTENER),
            ResourceBody::LegacyEndpoint(_) => Some(ResourceType::ENDPOINT_V2),
            ResourceBody::LegacyCluster(_) => Some(ResourceType::CLUSTER_V2),
            ResourceBody::LegacyRoute(_) => Some(ResourceType::ROUTE_V2),
            ResourceBody::LegacyListener(_) => Some(ResourceType::LISTENER_V2),
            ResourceBody::Opaque(_) => None,
        }
    }

    /// The discovery kind of the body, `None` for opaque bodies.
    pub fn kind(&self) -> Option<ResourceKind> {
        self.resource_type().map(ResourceType::kind)
    }

    /// Whether the body may be stored in the `ty` slot.
    ///
    /// Opaque bodies fit every slot.
    pub fn fits(&self, ty: ResourceType) -> bool {
        self.resource_type().map_or(true, |own| own == ty)
    }

    /// The name the message carries for itself.
    ///
    /// Endpoint assignments are named after their cluster. Opaque bodies
    /// have no decodable name.
    pub fn name(&self) -> Option<&str> {
        match self {
            ResourceBody::Endpoint(cla) | ResourceBody::LegacyEndpoint(cla) => {
                Some(cla.cluster_name.as_str())
            }
            ResourceBody::Cluster(c) => Some(c.name.as_str()),
            ResourceBody::Route(r) | ResourceBody::LegacyRoute(r) => Some(r.name.as_str()),
            ResourceBody::Listener(l) => Some(l.name.as_str()),
            ResourceBody::LegacyCluster(c) => Some(c.name.as_str()),
            ResourceBody::LegacyListener(l) => Some(l.name.as_str()),
            ResourceBody::Opaque(_) => None,
        }
    }

    /// Names of the resources this body depends on.
    ///
    /// An EDS cluster references its endpoint assignment, named by
    /// `eds_cluster_config.service_name` or, when that is empty, by the
    /// cluster itself. A listener references every route configuration an
    /// HTTP connection manager in its filter chains loads over RDS. Clusters
    /// with inline endpoints, inline route tables, endpoints and routes
    /// reference nothing.
    pub fn references(&self) -> Vec<String> {
        match self {
            ResourceBody::Cluster(c) => {
                let discovery = match &c.cluster_discovery_type {
                    Some(cluster::ClusterDiscoveryType::Type(t)) => *t,
                    None => cluster::DiscoveryType::Static as i32,
                };
                let service_name = c.eds_cluster_config.as_ref().map(|e| e.service_name.as_str());
                eds_reference(&c.name, discovery, service_name)
                    .into_iter()
                    .collect()
            }
            ResourceBody::LegacyCluster(c) => {
                let discovery = match &c.cluster_discovery_type {
                    Some(v2::cluster::ClusterDiscoveryType::Type(t)) => *t,
                    None => cluster::DiscoveryType::Static as i32,
                };
                let service_name = c.eds_cluster_config.as_ref().map(|e| e.service_name.as_str());
                eds_reference(&c.name, discovery, service_name)
                    .into_iter()
                    .collect()
            }
            ResourceBody::Listener(l) => l
                .filter_chains
                .iter()
                .flat_map(|chain| &chain.filters)
                .filter_map(|f| match &f.config_type {
                    Some(filter::ConfigType::TypedConfig(any)) => rds_route_config_name(any),
                    None => None,
                })
                .collect(),
            ResourceBody::LegacyListener(l) => l
                .filter_chains
                .iter()
                .flat_map(|chain| &chain.filters)
                .filter_map(|f| match &f.config_type {
                    Some(v2::listener::filter::ConfigType::TypedConfig(any)) => {
                        rds_route_config_name(any)
                    }
                    Some(v2::listener::filter::ConfigType::Config(_)) | None => None,
                })
                .collect(),
            ResourceBody::Endpoint(_)
            | ResourceBody::Route(_)
            | ResourceBody::LegacyEndpoint(_)
            | ResourceBody::LegacyRoute(_)
            | ResourceBody::Opaque(_) => Vec::new(),
        }
    }

    /// Encode the body as a protobuf `Any`.
    pub fn encode(&self) -> prost_types::Any {
        let value = match self {
            ResourceBody::Endpoint(m) | ResourceBody::LegacyEndpoint(m) => m.encode_to_vec(),
            ResourceBody::Cluster(m) => m.encode_to_vec(),
            ResourceBody::Route(m) | ResourceBody::LegacyRoute(m) => m.encode_to_vec(),
            ResourceBody::Listener(m) => m.encode_to_vec(),
            ResourceBody::LegacyCluster(m) => m.encode_to_vec(),
            ResourceBody::LegacyListener(m) => m.encode_to_vec(),
            ResourceBody::Opaque(any) => return any.clone(),
        };
        prost_types::Any {
            type_url: self.type_url().to_string(),
            value,
        }
    }

    /// Decode a protobuf `Any` into a typed body.
    ///
    /// The type URL selects the generation, so decoding then encoding keeps
    /// the URL. Type URLs this crate does not know are kept as [`ResourceBody::Opaque`].
    pub fn decode(any: &prost_types::Any) -> Result<Self> {
        let body = match any.type_url.as_str() {
            TypeUrl::ENDPOINT => ResourceBody::Endpoint(decode_as(any)?),
            TypeUrl::CLUSTER => ResourceBody::Cluster(decode_as(any)?),
            TypeUrl::ROUTE => ResourceBody::Route(decode_as(any)?),
            TypeUrl::LISTENER => ResourceBody::Listener(decode_as(any)?),
            TypeUrl::ENDPOINT_V2 => ResourceBody::LegacyEndpoint(decode_as(any)?),
            TypeUrl::ROUTE_V2 => ResourceBody::LegacyRoute(decode_as(any)?),
            TypeUrl::CLUSTER_V2 => ResourceBody::LegacyCluster(decode_as(any)?),
            TypeUrl::LISTENER_V2 => ResourceBody::LegacyListener(decode_as(any)?),
            _ => ResourceBody::Opaque(any.clone()),
        };
        Ok(body)
    }
}

fn decode_as<M: Message + Default>(any: &prost_types::Any) -> Result<M> {
    M::decode(any.value.as_slice()).map_err(|err| XdsError::decoding(any.type_url.as_str(), err))
}

fn eds_reference(cluster_name: &str, discovery: i32, service_name: Option<&str>) -> Option<String> {
    if discovery != cluster::DiscoveryType::Eds as i32 {
        return None;
    }
    match service_name {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => Some(cluster_name.to_string()),
    }
}

/// The RDS route configuration name inside an HTTP connection manager config.
///
/// Configs of any other type, inline route tables and configs that fail to
/// decode yield `None`.
pub(crate) fn rds_route_config_name(any: &prost_types::Any) -> Option<String> {
    match any.type_url.as_str() {
        TypeUrl::HTTP_CONNECTION_MANAGER => {
            match hcm::HttpConnectionManager::decode(any.value.as_slice()) {
                Ok(manager) => match manager.route_specifier {
                    Some(hcm::http_connection_manager::RouteSpecifier::Rds(rds)) => {
                        Some(rds.route_config_name)
                    }
                    Some(hcm::http_connection_manager::RouteSpecifier::RouteConfig(_)) | None => {
                        None
                    }
                },
                Err(err) => {
                    debug!(type_url = %any.type_url, error = %err, "skipping undecodable filter config");
                    None
                }
            }
        }
        TypeUrl::HTTP_CONNECTION_MANAGER_V2 => {
            match hcm_v2::HttpConnectionManager::decode(any.value.as_slice()) {
                Ok(manager) => match manager.route_specifier {
                    Some(hcm_v2::http_connection_manager::RouteSpecifier::Rds(rds)) => {
                        Some(rds.route_config_name)
                    }
                    Some(hcm_v2::http_connection_manager::RouteSpecifier::RouteConfig(_))
                    | None => None,
                },
                Err(err) => {
                    debug!(type_url = %any.type_url, error = %err, "skipping undecodable filter config");
                    None
                }
            }
        }
        _ => None,
    }
}

/// A named unit of configuration.
///
/// A resource exclusively owns its body. Cloning a resource copies the whole
/// message tree, so no two resources ever share a body.
#[derive(Clone, Debug, PartialEq)]
pub struct Resource {
    name: String,
    body: ResourceBody,
}

impl Resource {
    /// Create a resource with an explicit name.
    pub fn new(name: impl Into<String>, body: ResourceBody) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }

    /// Create a resource named after its body.
    ///
    /// Fails for opaque bodies, which carry no decodable name.
    pub fn from_body(body: ResourceBody) -> Result<Self> {
        match body.name() {
            Some(name) => Ok(Self::new(name.to_string(), body)),
            None => Err(XdsError::InvalidResource {
                type_url: body.type_url().to_string(),
                name: String::new(),
                reason: "opaque resource body needs an explicit name".to_string(),
            }),
        }
    }

    /// Decode a wire `Any` into a resource named after its body.
    pub fn from_any(any: &prost_types::Any) -> Result<Self> {
        Self::from_body(ResourceBody::decode(any)?)
    }

    /// The resource name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resource body.
    #[inline]
    pub fn body(&self) -> &ResourceBody {
        &self.body
    }

    /// Mutable access to the body of a resource the caller owns.
    #[inline]
    pub fn body_mut(&mut self) -> &mut ResourceBody {
        &mut self.body
    }

    /// Consume the resource and return its body.
    pub fn into_body(self) -> ResourceBody {
        self.body
    }

    /// Type URL of the body.
    #[inline]
    pub fn type_url(&self) -> &str {
        self.body.type_url()
    }

    /// Names this resource depends on. See [`ResourceBody::references`].
    pub fn references(&self) -> Vec<String> {
        self.body.references()
    }

    /// Encode the body as a protobuf `Any`.
    pub fn encode(&self) -> prost_types::Any {
        self.body.encode()
    }
}

macro_rules! impl_from_message {
    ($($message:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$message> for ResourceBody {
                fn from(message: $message) -> Self {
                    ResourceBody::$variant(message)
                }
            }

            impl From<$message> for Resource {
                fn from(message: $message) -> Self {
                    let body = ResourceBody::$variant(message);
                    let name = body.name().unwrap_or_default().to_string();
                    Resource::new(name, body)
                }
            }
        )*
    };
}

impl_from_message! {
    ClusterLoadAssignment => Endpoint,
    Cluster => Cluster,
    RouteConfiguration => Route,
    Listener => Listener,
    v2::Cluster => LegacyCluster,
    v2::Listener => LegacyListener,
}
