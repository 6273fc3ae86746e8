//! # xds-types
//!
//! Protobuf message types for the subset of the Envoy xDS schemas the
//! snapshot core reads and writes.
//!
//! Two protocol generations are covered:
//!
//! - `envoy::config::*::v3` and `envoy::extensions::*::v3` - the current schema
//! - `envoy::api::v2` and `envoy::config::filter::*::v2` - the legacy schema
//!
//! Messages whose wire format did not change between generations
//! (`ClusterLoadAssignment`, `RouteConfiguration`, `Address`) exist only once
//! and are shared by both.
//!
//! Field tags match the upstream `.proto` definitions so that bodies encoded
//! here decode with the full generated types and vice versa; fields the core
//! never touches are left out and skipped as unknown fields on decode.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)] // Mirrors generated code

pub use prost::Message;
pub use prost_types::{Any, Duration, Struct};

pub mod envoy {
    pub mod config {
        pub mod core {
            pub mod v3 {
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Address {
                    #[prost(oneof = "address::Address", tags = "1")]
                    pub address: ::core::option::Option<address::Address>,
                }

                pub mod address {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum Address {
                        #[prost(message, tag = "1")]
                        SocketAddress(super::SocketAddress),
                    }
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct SocketAddress {
                    #[prost(string, tag = "2")]
                    pub address: ::prost::alloc::string::String,
                    #[prost(uint32, tag = "3")]
                    pub port_value: u32,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Locality {
                    #[prost(string, tag = "1")]
                    pub region: ::prost::alloc::string::String,
                    #[prost(string, tag = "2")]
                    pub zone: ::prost::alloc::string::String,
                    #[prost(string, tag = "3")]
                    pub sub_zone: ::prost::alloc::string::String,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct ConfigSource {
                    #[prost(oneof = "config_source::ConfigSourceSpecifier", tags = "1, 3")]
                    pub config_source_specifier:
                        ::core::option::Option<config_source::ConfigSourceSpecifier>,
                    #[prost(message, optional, tag = "4")]
                    pub initial_fetch_timeout: ::core::option::Option<::prost_types::Duration>,
                    #[prost(enumeration = "ApiVersion", tag = "6")]
                    pub resource_api_version: i32,
                }

                pub mod config_source {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum ConfigSourceSpecifier {
                        #[prost(string, tag = "1")]
                        Path(::prost::alloc::string::String),
                        #[prost(message, tag = "3")]
                        Ads(super::AggregatedConfigSource),
                    }
                }

                #[derive(Clone, Copy, PartialEq, ::prost::Message)]
                pub struct AggregatedConfigSource {}

                #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
                #[repr(i32)]
                pub enum ApiVersion {
                    Auto = 0,
                    V2 = 1,
                    V3 = 2,
                }

                #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
                #[repr(i32)]
                pub enum TrafficDirection {
                    Unspecified = 0,
                    Inbound = 1,
                    Outbound = 2,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct TransportSocket {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(message, optional, tag = "3")]
                    pub typed_config: ::core::option::Option<::prost_types::Any>,
                }
            }
        }

        pub mod endpoint {
            pub mod v3 {
                /// Endpoint assignment for one cluster. Identical on the wire in v2.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct ClusterLoadAssignment {
                    #[prost(string, tag = "1")]
                    pub cluster_name: ::prost::alloc::string::String,
                    #[prost(message, repeated, tag = "2")]
                    pub endpoints: ::prost::alloc::vec::Vec<LocalityLbEndpoints>,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct LocalityLbEndpoints {
                    #[prost(message, optional, tag = "1")]
                    pub locality: ::core::option::Option<super::super::core::v3::Locality>,
                    #[prost(message, repeated, tag = "2")]
                    pub lb_endpoints: ::prost::alloc::vec::Vec<LbEndpoint>,
                    #[prost(uint32, tag = "5")]
                    pub priority: u32,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct LbEndpoint {
                    #[prost(message, optional, tag = "1")]
                    pub endpoint: ::core::option::Option<Endpoint>,
                    #[prost(int32, tag = "2")]
                    pub health_status: i32,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Endpoint {
                    #[prost(message, optional, tag = "1")]
                    pub address: ::core::option::Option<super::super::core::v3::Address>,
                }
            }
        }

        pub mod cluster {
            pub mod v3 {
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Cluster {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(oneof = "cluster::ClusterDiscoveryType", tags = "2")]
                    pub cluster_discovery_type:
                        ::core::option::Option<cluster::ClusterDiscoveryType>,
                    #[prost(message, optional, tag = "3")]
                    pub eds_cluster_config: ::core::option::Option<cluster::EdsClusterConfig>,
                    #[prost(message, optional, tag = "4")]
                    pub connect_timeout: ::core::option::Option<::prost_types::Duration>,
                    #[prost(enumeration = "cluster::LbPolicy", tag = "6")]
                    pub lb_policy: i32,
                    #[prost(message, optional, tag = "24")]
                    pub transport_socket:
                        ::core::option::Option<super::super::core::v3::TransportSocket>,
                    #[prost(message, optional, tag = "25")]
                    pub metadata: ::core::option::Option<::prost_types::Struct>,
                    #[prost(string, tag = "28")]
                    pub alt_stat_name: ::prost::alloc::string::String,
                    #[prost(message, optional, tag = "33")]
                    pub load_assignment: ::core::option::Option<
                        super::super::endpoint::v3::ClusterLoadAssignment,
                    >,
                }

                pub mod cluster {
                    #[derive(Clone, PartialEq, ::prost::Message)]
                    pub struct EdsClusterConfig {
                        #[prost(message, optional, tag = "1")]
                        pub eds_config: ::core::option::Option<
                            super::super::super::core::v3::ConfigSource,
                        >,
                        #[prost(string, tag = "2")]
                        pub service_name: ::prost::alloc::string::String,
                    }

                    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
                    #[repr(i32)]
                    pub enum DiscoveryType {
                        Static = 0,
                        StrictDns = 1,
                        LogicalDns = 2,
                        Eds = 3,
                        OriginalDst = 4,
                    }

                    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
                    #[repr(i32)]
                    pub enum LbPolicy {
                        RoundRobin = 0,
                        LeastRequest = 1,
                        RingHash = 2,
                        Random = 3,
                        Maglev = 5,
                        ClusterProvided = 6,
                    }

                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum ClusterDiscoveryType {
                        #[prost(enumeration = "DiscoveryType", tag = "2")]
                        Type(i32),
                    }
                }
            }
        }

        pub mod route {
            pub mod v3 {
                /// Route table. Identical on the wire in v2.
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct RouteConfiguration {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(message, repeated, tag = "2")]
                    pub virtual_hosts: ::prost::alloc::vec::Vec<VirtualHost>,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct VirtualHost {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(string, repeated, tag = "2")]
                    pub domains: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
                    #[prost(message, repeated, tag = "3")]
                    pub routes: ::prost::alloc::vec::Vec<Route>,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Route {
                    #[prost(message, optional, tag = "1")]
                    pub r#match: ::core::option::Option<RouteMatch>,
                    #[prost(message, optional, tag = "2")]
                    pub route: ::core::option::Option<RouteAction>,
                    #[prost(string, tag = "14")]
                    pub name: ::prost::alloc::string::String,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct RouteMatch {
                    #[prost(string, tag = "1")]
                    pub prefix: ::prost::alloc::string::String,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct RouteAction {
                    #[prost(string, tag = "1")]
                    pub cluster: ::prost::alloc::string::String,
                }
            }
        }

        pub mod listener {
            pub mod v3 {
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Listener {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(message, optional, tag = "2")]
                    pub address: ::core::option::Option<super::super::core::v3::Address>,
                    #[prost(message, repeated, tag = "3")]
                    pub filter_chains: ::prost::alloc::vec::Vec<FilterChain>,
                    #[prost(enumeration = "super::super::core::v3::TrafficDirection", tag = "16")]
                    pub traffic_direction: i32,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct FilterChain {
                    #[prost(message, repeated, tag = "3")]
                    pub filters: ::prost::alloc::vec::Vec<Filter>,
                    #[prost(message, optional, tag = "6")]
                    pub transport_socket:
                        ::core::option::Option<super::super::core::v3::TransportSocket>,
                    #[prost(string, tag = "7")]
                    pub name: ::prost::alloc::string::String,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Filter {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(oneof = "filter::ConfigType", tags = "4")]
                    pub config_type: ::core::option::Option<filter::ConfigType>,
                }

                pub mod filter {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum ConfigType {
                        #[prost(message, tag = "4")]
                        TypedConfig(::prost_types::Any),
                    }
                }
            }
        }

        pub mod filter {
            pub mod network {
                pub mod http_connection_manager {
                    pub mod v2 {
                        #[derive(Clone, PartialEq, ::prost::Message)]
                        pub struct HttpConnectionManager {
                            #[prost(string, tag = "2")]
                            pub stat_prefix: ::prost::alloc::string::String,
                            #[prost(oneof = "http_connection_manager::RouteSpecifier", tags = "3, 4")]
                            pub route_specifier: ::core::option::Option<
                                http_connection_manager::RouteSpecifier,
                            >,
                        }

                        pub mod http_connection_manager {
                            #[derive(Clone, PartialEq, ::prost::Oneof)]
                            pub enum RouteSpecifier {
                                #[prost(message, tag = "3")]
                                Rds(super::Rds),
                                #[prost(message, tag = "4")]
                                RouteConfig(
                                    crate::envoy::config::route::v3::RouteConfiguration,
                                ),
                            }
                        }

                        #[derive(Clone, PartialEq, ::prost::Message)]
                        pub struct Rds {
                            #[prost(message, optional, tag = "1")]
                            pub config_source: ::core::option::Option<
                                crate::envoy::api::v2::core::ConfigSource,
                            >,
                            #[prost(string, tag = "2")]
                            pub route_config_name: ::prost::alloc::string::String,
                        }
                    }
                }
            }
        }
    }

    pub mod extensions {
        pub mod filters {
            pub mod network {
                pub mod http_connection_manager {
                    pub mod v3 {
                        #[derive(Clone, PartialEq, ::prost::Message)]
                        pub struct HttpConnectionManager {
                            #[prost(string, tag = "2")]
                            pub stat_prefix: ::prost::alloc::string::String,
                            #[prost(oneof = "http_connection_manager::RouteSpecifier", tags = "3, 4")]
                            pub route_specifier: ::core::option::Option<
                                http_connection_manager::RouteSpecifier,
                            >,
                        }

                        pub mod http_connection_manager {
                            #[derive(Clone, PartialEq, ::prost::Oneof)]
                            pub enum RouteSpecifier {
                                #[prost(message, tag = "3")]
                                Rds(super::Rds),
                                #[prost(message, tag = "4")]
                                RouteConfig(
                                    crate::envoy::config::route::v3::RouteConfiguration,
                                ),
                            }
                        }

                        #[derive(Clone, PartialEq, ::prost::Message)]
                        pub struct Rds {
                            #[prost(message, optional, tag = "1")]
                            pub config_source: ::core::option::Option<
                                crate::envoy::config::core::v3::ConfigSource,
                            >,
                            #[prost(string, tag = "2")]
                            pub route_config_name: ::prost::alloc::string::String,
                        }
                    }
                }
            }
        }
    }

    /// Legacy (v2) schema.
    pub mod api {
        pub mod v2 {
            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Cluster {
                #[prost(string, tag = "1")]
                pub name: ::prost::alloc::string::String,
                #[prost(oneof = "cluster::ClusterDiscoveryType", tags = "2")]
                pub cluster_discovery_type: ::core::option::Option<cluster::ClusterDiscoveryType>,
                #[prost(message, optional, tag = "3")]
                pub eds_cluster_config: ::core::option::Option<cluster::EdsClusterConfig>,
                #[prost(message, optional, tag = "4")]
                pub connect_timeout: ::core::option::Option<::prost_types::Duration>,
                #[prost(enumeration = "cluster::LbPolicy", tag = "6")]
                pub lb_policy: i32,
                #[prost(message, optional, tag = "24")]
                pub transport_socket: ::core::option::Option<core::TransportSocket>,
                #[prost(message, optional, tag = "25")]
                pub metadata: ::core::option::Option<::prost_types::Struct>,
                #[prost(string, tag = "28")]
                pub alt_stat_name: ::prost::alloc::string::String,
                #[prost(message, optional, tag = "33")]
                pub load_assignment: ::core::option::Option<
                    crate::envoy::config::endpoint::v3::ClusterLoadAssignment,
                >,
            }

            pub mod cluster {
                pub use crate::envoy::config::cluster::v3::cluster::{DiscoveryType, LbPolicy};

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct EdsClusterConfig {
                    #[prost(message, optional, tag = "1")]
                    pub eds_config: ::core::option::Option<super::core::ConfigSource>,
                    #[prost(string, tag = "2")]
                    pub service_name: ::prost::alloc::string::String,
                }

                #[derive(Clone, PartialEq, ::prost::Oneof)]
                pub enum ClusterDiscoveryType {
                    #[prost(enumeration = "DiscoveryType", tag = "2")]
                    Type(i32),
                }
            }

            #[derive(Clone, PartialEq, ::prost::Message)]
            pub struct Listener {
                #[prost(string, tag = "1")]
                pub name: ::prost::alloc::string::String,
                #[prost(message, optional, tag = "2")]
                pub address: ::core::option::Option<crate::envoy::config::core::v3::Address>,
                #[prost(message, repeated, tag = "3")]
                pub filter_chains: ::prost::alloc::vec::Vec<listener::FilterChain>,
            }

            pub mod listener {
                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct FilterChain {
                    #[prost(message, repeated, tag = "3")]
                    pub filters: ::prost::alloc::vec::Vec<Filter>,
                    #[prost(message, optional, tag = "6")]
                    pub transport_socket: ::core::option::Option<super::core::TransportSocket>,
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct Filter {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(oneof = "filter::ConfigType", tags = "2, 4")]
                    pub config_type: ::core::option::Option<filter::ConfigType>,
                }

                pub mod filter {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum ConfigType {
                        #[prost(message, tag = "2")]
                        Config(::prost_types::Struct),
                        #[prost(message, tag = "4")]
                        TypedConfig(::prost_types::Any),
                    }
                }
            }

            pub mod core {
                pub use crate::envoy::config::core::v3::AggregatedConfigSource;

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct ConfigSource {
                    #[prost(oneof = "config_source::ConfigSourceSpecifier", tags = "1, 3")]
                    pub config_source_specifier:
                        ::core::option::Option<config_source::ConfigSourceSpecifier>,
                    #[prost(message, optional, tag = "4")]
                    pub initial_fetch_timeout: ::core::option::Option<::prost_types::Duration>,
                }

                pub mod config_source {
                    #[derive(Clone, PartialEq, ::prost::Oneof)]
                    pub enum ConfigSourceSpecifier {
                        #[prost(string, tag = "1")]
                        Path(::prost::alloc::string::String),
                        #[prost(message, tag = "3")]
                        Ads(super::AggregatedConfigSource),
                    }
                }

                #[derive(Clone, PartialEq, ::prost::Message)]
                pub struct TransportSocket {
                    #[prost(string, tag = "1")]
                    pub name: ::prost::alloc::string::String,
                    #[prost(message, optional, tag = "3")]
                    pub typed_config: ::core::option::Option<::prost_types::Any>,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::envoy::api::v2;
    use super::envoy::config::cluster::v3::{cluster, Cluster};
    use super::Message;

    #[test]
    fn cluster_decodes_as_legacy_cluster() {
        let cluster = Cluster {
            name: "backend".to_string(),
            cluster_discovery_type: Some(cluster::ClusterDiscoveryType::Type(
                cluster::DiscoveryType::Eds as i32,
            )),
            lb_policy: cluster::LbPolicy::RingHash as i32,
            ..Default::default()
        };

        let bytes = cluster.encode_to_vec();
        let legacy = v2::Cluster::decode(bytes.as_slice()).unwrap();
        assert_eq!(legacy.name, "backend");
        assert_eq!(legacy.lb_policy(), cluster::LbPolicy::RingHash);
    }

    #[test]
    fn enumeration_accessor_defaults_unknown_values() {
        let cluster = Cluster {
            lb_policy: 42,
            ..Default::default()
        };
        assert_eq!(cluster.lb_policy(), cluster::LbPolicy::RoundRobin);
    }
}
