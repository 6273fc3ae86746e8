//! Conversion of current-generation resources into the legacy schema.
//!
//! Endpoint assignments and route configurations have the same schema in
//! both generations and are copied unchanged. Clusters and listeners are
//! rebuilt field by field into their legacy messages. Anything else has no
//! legacy form and is dropped.

use std::collections::HashMap;

use prost::Message;
use tracing::debug;
use xds_core::TypeUrl;
use xds_types::envoy::api::v2;
use xds_types::envoy::config::cluster::v3::{cluster, Cluster};
use xds_types::envoy::config::core::v3::{config_source, ConfigSource, TransportSocket};
use xds_types::envoy::config::filter::network::http_connection_manager::v2 as hcm_v2;
use xds_types::envoy::config::listener::v3::{filter, Filter, FilterChain, Listener};
use xds_types::envoy::extensions::filters::network::http_connection_manager::v3 as hcm;

use crate::resource::{Resource, ResourceBody};
use crate::resources::ResourceSet;

/// Downgrade one resource, keeping its name.
///
/// Returns `None` when the body has no legacy form.
pub fn downgrade(resource: &Resource) -> Option<Resource> {
    downgrade_body(resource.body()).map(|body| Resource::new(resource.name(), body))
}

/// Downgrade a body to the legacy schema.
pub fn downgrade_body(body: &ResourceBody) -> Option<ResourceBody> {
    match body {
        ResourceBody::Endpoint(cla) => Some(ResourceBody::LegacyEndpoint(cla.clone())),
        ResourceBody::Route(r) => Some(ResourceBody::LegacyRoute(r.clone())),
        ResourceBody::Cluster(c) => Some(ResourceBody::LegacyCluster(downgrade_cluster(c))),
        ResourceBody::Listener(l) => Some(ResourceBody::LegacyListener(downgrade_listener(l))),
        ResourceBody::LegacyEndpoint(_)
        | ResourceBody::LegacyCluster(_)
        | ResourceBody::LegacyRoute(_)
        | ResourceBody::LegacyListener(_)
        | ResourceBody::Opaque(_) => None,
    }
}

/// Downgrade every resource of a set, keeping the set's version.
///
/// Resources without a legacy form are left out of the result.
pub fn downgrade_set(set: &ResourceSet) -> ResourceSet {
    let items: HashMap<String, Resource> = set
        .iter()
        .filter_map(|resource| match downgrade(resource) {
            Some(legacy) => Some((legacy.name().to_string(), legacy)),
            None => {
                debug!(
                    name = %resource.name(),
                    type_url = %resource.type_url(),
                    "dropping resource with no legacy form"
                );
                None
            }
        })
        .collect();

    ResourceSet::from_unique(set.version().clone(), items)
}

/// Rebuild a cluster in the legacy schema.
pub fn downgrade_cluster(c: &Cluster) -> v2::Cluster {
    v2::Cluster {
        name: c.name.clone(),
        cluster_discovery_type: c.cluster_discovery_type.as_ref().map(|t| match t {
            cluster::ClusterDiscoveryType::Type(t) => v2::cluster::ClusterDiscoveryType::Type(*t),
        }),
        eds_cluster_config: c
            .eds_cluster_config
            .as_ref()
            .map(|eds| v2::cluster::EdsClusterConfig {
                eds_config: eds.eds_config.as_ref().map(downgrade_config_source),
                service_name: eds.service_name.clone(),
            }),
        connect_timeout: c.connect_timeout.clone(),
        lb_policy: c.lb_policy,
        transport_socket: c.transport_socket.as_ref().map(downgrade_transport_socket),
        metadata: c.metadata.clone(),
        alt_stat_name: c.alt_stat_name.clone(),
        load_assignment: c.load_assignment.clone(),
    }
}

/// Rebuild a listener in the legacy schema.
///
/// `traffic_direction` and filter chain names do not exist in the legacy
/// schema and are dropped.
pub fn downgrade_listener(l: &Listener) -> v2::Listener {
    v2::Listener {
        name: l.name.clone(),
        address: l.address.clone(),
        filter_chains: l.filter_chains.iter().map(downgrade_filter_chain).collect(),
    }
}

fn downgrade_filter_chain(chain: &FilterChain) -> v2::listener::FilterChain {
    v2::listener::FilterChain {
        filters: chain.filters.iter().map(downgrade_filter).collect(),
        transport_socket: chain.transport_socket.as_ref().map(downgrade_transport_socket),
    }
}

fn downgrade_filter(f: &Filter) -> v2::listener::Filter {
    v2::listener::Filter {
        name: f.name.clone(),
        config_type: f.config_type.as_ref().map(|config| match config {
            filter::ConfigType::TypedConfig(any) => {
                v2::listener::filter::ConfigType::TypedConfig(downgrade_typed_config(any))
            }
        }),
    }
}

/// HTTP connection manager configs are re-encoded under the legacy type URL.
/// Other filter configs pass through untouched.
fn downgrade_typed_config(any: &prost_types::Any) -> prost_types::Any {
    if any.type_url != TypeUrl::HTTP_CONNECTION_MANAGER {
        return any.clone();
    }
    match hcm::HttpConnectionManager::decode(any.value.as_slice()) {
        Ok(manager) => prost_types::Any {
            type_url: TypeUrl::HTTP_CONNECTION_MANAGER_V2.to_string(),
            value: downgrade_http_connection_manager(&manager).encode_to_vec(),
        },
        Err(err) => {
            debug!(error = %err, "leaving undecodable http connection manager config as is");
            any.clone()
        }
    }
}

fn downgrade_http_connection_manager(
    manager: &hcm::HttpConnectionManager,
) -> hcm_v2::HttpConnectionManager {
    use hcm::http_connection_manager::RouteSpecifier;
    use hcm_v2::http_connection_manager::RouteSpecifier as LegacyRouteSpecifier;

    hcm_v2::HttpConnectionManager {
        stat_prefix: manager.stat_prefix.clone(),
        route_specifier: manager.route_specifier.as_ref().map(|spec| match spec {
            RouteSpecifier::Rds(rds) => LegacyRouteSpecifier::Rds(hcm_v2::Rds {
                config_source: rds.config_source.as_ref().map(downgrade_config_source),
                route_config_name: rds.route_config_name.clone(),
            }),
            RouteSpecifier::RouteConfig(routes) => LegacyRouteSpecifier::RouteConfig(routes.clone()),
        }),
    }
}

/// `resource_api_version` has no legacy counterpart and is dropped.
fn downgrade_config_source(source: &ConfigSource) -> v2::core::ConfigSource {
    v2::core::ConfigSource {
        config_source_specifier: source.config_source_specifier.as_ref().map(|spec| match spec {
            config_source::ConfigSourceSpecifier::Path(path) => {
                v2::core::config_source::ConfigSourceSpecifier::Path(path.clone())
            }
            config_source::ConfigSourceSpecifier::Ads(ads) => {
                v2::core::config_source::ConfigSourceSpecifier::Ads(*ads)
            }
        }),
        initial_fetch_timeout: source.initial_fetch_timeout.clone(),
    }
}

fn downgrade_transport_socket(socket: &TransportSocket) -> v2::core::TransportSocket {
    v2::core::TransportSocket {
        name: socket.name.clone(),
        typed_config: socket.typed_config.clone(),
    }
}
