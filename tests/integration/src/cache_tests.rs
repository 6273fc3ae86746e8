//! Cache integration tests.

use std::sync::Arc;
use std::thread;

use envoy_snapshot::prelude::*;

use crate::fixtures::{eds_cluster, endpoint, http_listener, init_tracing, route};

fn snapshot(version: &str, endpoint_name: &str) -> Snapshot {
    Snapshot::new(
        version,
        vec![endpoint(endpoint_name, 8080)],
        vec![eds_cluster("c1", endpoint_name)],
        vec![route("r1", "c1")],
        vec![http_listener("l1", "r1")],
    )
    .expect("unique names")
}

#[test]
fn cache_publishes_consistent_snapshot() {
    init_tracing();
    let cache = SnapshotCache::new();

    cache.set_snapshot("node-1", snapshot("v1", "e1")).unwrap();

    let served = cache.get_snapshot("node-1").expect("snapshot should exist");
    assert_eq!(served.version(ResourceType::CLUSTER), "v1");
    assert_eq!(served.get_resources(TypeUrl::ENDPOINT_V2).len(), 1);
}

#[test]
fn cache_multiple_nodes() {
    let cache = SnapshotCache::new();

    for i in 0..10 {
        cache
            .set_snapshot(&format!("node-{i}"), snapshot(&format!("v{i}"), "e1"))
            .unwrap();
    }

    assert_eq!(cache.snapshot_count(), 10);
    let mut nodes = cache.nodes();
    nodes.sort();
    assert_eq!(nodes.first().map(String::as_str), Some("node-0"));

    for i in 0..10 {
        let served = cache.get_snapshot(&format!("node-{i}")).unwrap();
        assert_eq!(served.version(ResourceType::LISTENER), format!("v{i}").as_str());
    }
}

#[test]
fn cache_rejects_dangling_reference() {
    init_tracing();
    let cache = SnapshotCache::new();
    cache.set_snapshot("node", snapshot("v1", "e1")).unwrap();

    let broken = Snapshot::new(
        "v2",
        vec![],
        vec![eds_cluster("c1", "e1")],
        vec![route("r1", "c1")],
        vec![http_listener("l1", "r1")],
    )
    .unwrap();

    let err = cache.set_snapshot("node", broken).unwrap_err();
    assert!(matches!(err, XdsError::MissingReference { .. }));

    let served = cache.get_snapshot("node").unwrap();
    assert_eq!(served.version(ResourceType::ENDPOINT), "v1");
    assert!((cache.stats().rejection_rate() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn cache_update_replaces_snapshot() {
    let cache = SnapshotCache::new();

    cache.set_snapshot("node", snapshot("v1", "e1")).unwrap();
    cache.set_snapshot("node", snapshot("v2", "e2")).unwrap();

    let served = cache.get_snapshot("node").unwrap();
    assert_eq!(served.version(ResourceType::ENDPOINT), "v2");
    assert!(served.get_resources(TypeUrl::ENDPOINT).contains("e2"));
    assert!(!served.get_resources(TypeUrl::ENDPOINT).contains("e1"));
    assert_eq!(cache.stats().snapshots_set(), 2);
}

#[test]
fn cache_clear_snapshot() {
    let cache = SnapshotCache::new();
    cache.set_snapshot("node", snapshot("v1", "e1")).unwrap();

    cache.clear_snapshot("node");
    cache.clear_snapshot("node");

    assert!(cache.get_snapshot("node").is_none());
    assert_eq!(cache.stats().snapshots_cleared(), 1);
    assert_eq!(cache.stats().snapshot_misses(), 1);
}

#[test]
fn isolated_snapshot_survives_cache_updates() {
    let cache = SnapshotCache::new();
    cache.set_snapshot("node", snapshot("v1", "e1")).unwrap();

    let isolated = cache.isolated_snapshot("node").unwrap();
    cache.set_snapshot("node", snapshot("v2", "e2")).unwrap();
    cache.clear_snapshot("node");

    assert_eq!(isolated, snapshot("v1", "e1"));
    assert!(isolated.consistent().is_ok());
}

#[test]
fn cache_concurrent_readers() {
    let cache = Arc::new(SnapshotCache::new());
    cache.set_snapshot("node", snapshot("v1", "e1")).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..100 {
                    let served = cache.get_snapshot("node").unwrap();
                    assert!(served.consistent().is_ok());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("reader panicked");
    }

    assert_eq!(cache.stats().snapshot_hits(), 800);
}
