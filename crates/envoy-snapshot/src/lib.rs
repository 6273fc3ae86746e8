//! # envoy-snapshot
//!
//! Versioned, internally consistent snapshots of Envoy discovery resources,
//! served in both the current (v3) and the legacy (v2) API schema.
//!
//! A snapshot holds endpoints, clusters, routes and listeners. Legacy copies
//! of every kind are derived automatically when the snapshot is built, and a
//! snapshot can be checked for dangling or unreferenced resources before it
//! is published.
//!
//! ## Quick Start
//!
//! ```rust
//! use envoy_snapshot::prelude::*;
//! use envoy_snapshot::types::envoy::config::route::v3::RouteConfiguration;
//!
//! let snapshot = Snapshot::builder()
//!     .version("v1")
//!     .routes(vec![RouteConfiguration { name: "r1".into(), ..Default::default() }.into()])
//!     .build()?;
//!
//! // Routes are served in both generations.
//! assert_eq!(snapshot.get_resources(TypeUrl::ROUTE).len(), 1);
//! assert_eq!(snapshot.get_resources(TypeUrl::ROUTE_V2).len(), 1);
//!
//! // Nothing references "r1", so the snapshot is not consistent.
//! assert!(matches!(
//!     snapshot.consistent(),
//!     Err(XdsError::LengthMismatch { .. })
//! ));
//! # Ok::<(), XdsError>(())
//! ```
//!
//! ## Architecture
//!
//! - `xds-core` - Type URLs, versions and error handling
//! - `xds-types` - Envoy v3 and v2 protobuf messages
//! - `xds-cache` - Resource sets, legacy conversion, consistency and snapshots
//!
//! This crate re-exports all public APIs for convenience.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use xds_cache as cache;
pub use xds_core as core;
pub use xds_types as types;

/// Prelude module for convenient imports.
///
/// ```rust
/// use envoy_snapshot::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use xds_core::{
        ApiGeneration, ResourceKind, ResourceType, ResourceVersion, Result, TypeUrl, XdsError,
    };

    // Snapshot types
    pub use xds_cache::{
        get_resources, Cache, CacheStats, DuplicatePolicy, Resource, ResourceBody, ResourceSet,
        Snapshot, SnapshotBuilder, SnapshotCache, SnapshotConfig,
    };
}

/// Version information for this crate.
pub mod version {
    /// Crate version.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Minimum supported Rust version.
    pub const MSRV: &str = "1.75";

    /// Get version info as a string.
    pub fn version_string() -> String {
        format!("envoy-snapshot {} (MSRV {})", VERSION, MSRV)
    }
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn prelude_imports_work() {
        let cache = SnapshotCache::new();
        let snapshot = Snapshot::builder().version("v1").build().unwrap();

        cache.set_snapshot("test-node", snapshot).unwrap();

        let retrieved = cache.get_snapshot("test-node").unwrap();
        assert_eq!(retrieved.version(ResourceType::LISTENER), "v1");
        assert_eq!(retrieved.version(ResourceType::LISTENER_V2), "v1");
    }

    #[test]
    fn absent_snapshot_lookups() {
        assert!(get_resources(None, TypeUrl::CLUSTER).is_empty());
        assert_eq!(
            xds_cache::consistency::check(None),
            Err(XdsError::NoSnapshot)
        );
    }

    #[test]
    fn version_info() {
        let version = super::version::version_string();
        assert!(version.contains("envoy-snapshot"));
    }
}
