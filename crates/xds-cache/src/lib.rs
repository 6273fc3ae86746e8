//! # xds-cache
//!
//! Versioned, internally consistent snapshots of discovery resources.
//!
//! - [`Resource`] / [`ResourceBody`] - A named, typed configuration message
//! - [`ResourceSet`] - Immutable name-indexed resources with a version token
//! - [`downgrade`] - Per-kind conversion into the legacy schema
//! - [`consistency`] - Cross-type reference checking
//! - [`Snapshot`] - Current and legacy sets for every kind
//! - [`SnapshotCache`] - Per-node publication gated on consistency
//!
//! ## Key Design Decisions
//!
//! - Resource bodies are a closed enum; every per-kind dispatch is an
//!   exhaustive `match`
//! - Resources own their bodies, so cloning a snapshot never aliases a body
//! - Legacy sets are derived from their own current-generation counterpart
//! - Duplicate names are a build error unless last-write-wins is opted into
//!
//! ## Example
//!
//! ```rust
//! use xds_cache::{Cache, Snapshot, SnapshotCache};
//! use xds_types::envoy::config::route::v3::RouteConfiguration;
//!
//! let orphan = RouteConfiguration { name: "r1".into(), ..Default::default() };
//! let snapshot = Snapshot::builder()
//!     .version("v1")
//!     .routes(vec![orphan.into()])
//!     .build()?;
//!
//! // No listener references "r1", so the snapshot is not published.
//! let cache = SnapshotCache::new();
//! assert!(cache.set_snapshot("node-1", snapshot).is_err());
//! # Ok::<(), xds_core::XdsError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod cache;
mod config;
pub mod consistency;
pub mod downgrade;
mod resource;
mod resources;
mod snapshot;
mod stats;

pub use cache::{Cache, SnapshotCache};
pub use config::{DuplicatePolicy, SnapshotConfig};
pub use resource::{Resource, ResourceBody};
pub use resources::ResourceSet;
pub use snapshot::{get_resources, Snapshot, SnapshotBuilder};
pub use stats::CacheStats;
