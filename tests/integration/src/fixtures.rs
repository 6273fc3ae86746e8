//! Resource builders shared by the integration tests.

use envoy_snapshot::prelude::*;
use envoy_snapshot::types::envoy::config::cluster::v3::{cluster, Cluster};
use envoy_snapshot::types::envoy::config::core::v3::{
    address, config_source, Address, AggregatedConfigSource, ConfigSource, SocketAddress,
};
use envoy_snapshot::types::envoy::config::endpoint::v3::{
    ClusterLoadAssignment, Endpoint, LbEndpoint, LocalityLbEndpoints,
};
use envoy_snapshot::types::envoy::config::listener::v3::{filter, Filter, FilterChain, Listener};
use envoy_snapshot::types::envoy::config::route::v3::{
    Route, RouteAction, RouteConfiguration, RouteMatch, VirtualHost,
};
use envoy_snapshot::types::envoy::extensions::filters::network::http_connection_manager::v3 as hcm;
use prost::Message;

/// Route tests through the tracing test writer so `RUST_LOG` works under
/// `cargo test`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn ads() -> ConfigSource {
    ConfigSource {
        config_source_specifier: Some(config_source::ConfigSourceSpecifier::Ads(
            AggregatedConfigSource {},
        )),
        ..Default::default()
    }
}

pub fn endpoint(name: &str, port: u32) -> Resource {
    ClusterLoadAssignment {
        cluster_name: name.to_string(),
        endpoints: vec![LocalityLbEndpoints {
            lb_endpoints: vec![LbEndpoint {
                endpoint: Some(Endpoint {
                    address: Some(Address {
                        address: Some(address::Address::SocketAddress(SocketAddress {
                            address: "127.0.0.1".to_string(),
                            port_value: port,
                        })),
                    }),
                }),
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
    .into()
}

pub fn eds_cluster(name: &str, service_name: &str) -> Resource {
    Cluster {
        name: name.to_string(),
        cluster_discovery_type: Some(cluster::ClusterDiscoveryType::Type(
            cluster::DiscoveryType::Eds as i32,
        )),
        eds_cluster_config: Some(cluster::EdsClusterConfig {
            eds_config: Some(ads()),
            service_name: service_name.to_string(),
        }),
        ..Default::default()
    }
    .into()
}

pub fn route(name: &str, cluster: &str) -> Resource {
    RouteConfiguration {
        name: name.to_string(),
        virtual_hosts: vec![VirtualHost {
            name: format!("{cluster}-host"),
            domains: vec!["*".to_string()],
            routes: vec![Route {
                r#match: Some(RouteMatch {
                    prefix: "/".to_string(),
                }),
                route: Some(RouteAction {
                    cluster: cluster.to_string(),
                }),
                ..Default::default()
            }],
        }],
    }
    .into()
}

pub fn http_listener(name: &str, route_name: &str) -> Resource {
    let manager = hcm::HttpConnectionManager {
        stat_prefix: "http".to_string(),
        route_specifier: Some(hcm::http_connection_manager::RouteSpecifier::Rds(hcm::Rds {
            config_source: Some(ads()),
            route_config_name: route_name.to_string(),
        })),
    };

    Listener {
        name: name.to_string(),
        filter_chains: vec![FilterChain {
            filters: vec![Filter {
                name: "envoy.filters.network.http_connection_manager".to_string(),
                config_type: Some(filter::ConfigType::TypedConfig(prost_types::Any {
                    type_url: TypeUrl::HTTP_CONNECTION_MANAGER.to_string(),
                    value: manager.encode_to_vec(),
                })),
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
    .into()
}
