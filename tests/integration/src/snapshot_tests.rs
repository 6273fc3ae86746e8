//! Snapshot integration tests.

use envoy_snapshot::prelude::*;
use envoy_snapshot::types::envoy::api::v2::listener::filter as legacy_filter;

use crate::fixtures::{eds_cluster, endpoint, http_listener, init_tracing, route};

fn consistent_snapshot(version: &str) -> Snapshot {
    Snapshot::new(
        version,
        vec![endpoint("e1", 8080)],
        vec![eds_cluster("c1", "e1")],
        vec![route("r1", "c1")],
        vec![http_listener("l1", "r1")],
    )
    .expect("unique names")
}

#[test]
fn referenced_resources_are_consistent() {
    init_tracing();
    let snapshot = consistent_snapshot("v1");

    assert!(snapshot.consistent().is_ok());
    assert_eq!(snapshot.total_resources(), 4);
}

#[test]
fn removing_referenced_endpoint_is_missing_reference() {
    init_tracing();
    let snapshot = Snapshot::new(
        "v2",
        vec![],
        vec![eds_cluster("c1", "e1")],
        vec![route("r1", "c1")],
        vec![http_listener("l1", "r1")],
    )
    .unwrap();

    match snapshot.consistent() {
        Err(XdsError::MissingReference { type_url, names }) => {
            assert_eq!(type_url, TypeUrl::ENDPOINT);
            assert_eq!(names, vec!["e1".to_string()]);
        }
        other => panic!("expected missing reference, got {other:?}"),
    }
}

#[test]
fn unreferenced_endpoint_is_length_mismatch() {
    let snapshot = Snapshot::new(
        "v1",
        vec![endpoint("e1", 8080), endpoint("e2", 8081)],
        vec![eds_cluster("c1", "e1")],
        vec![route("r1", "c1")],
        vec![http_listener("l1", "r1")],
    )
    .unwrap();

    let err = snapshot.consistent().unwrap_err();
    assert!(err.is_inconsistency());
    assert_eq!(
        err,
        XdsError::LengthMismatch {
            type_url: TypeUrl::ENDPOINT.to_string(),
            references: vec!["e1".to_string()],
            resources: vec!["e1".to_string(), "e2".to_string()],
        }
    );
}

#[test]
fn missing_route_is_reported() {
    let snapshot = Snapshot::new(
        "v1",
        vec![endpoint("e1", 8080)],
        vec![eds_cluster("c1", "e1")],
        vec![],
        vec![http_listener("l1", "r1")],
    )
    .unwrap();

    assert_eq!(
        snapshot.consistent(),
        Err(XdsError::MissingReference {
            type_url: TypeUrl::ROUTE.to_string(),
            names: vec!["r1".to_string()],
        })
    );
}

#[test]
fn legacy_sets_mirror_current_sets() {
    let snapshot = consistent_snapshot("v1");

    for kind in ResourceKind::ALL {
        let current = snapshot.resources(ResourceType::current(kind));
        let legacy = snapshot.resources(ResourceType::legacy(kind));
        assert_eq!(current.sorted_names(), legacy.sorted_names(), "{kind}");
        assert_eq!(legacy.version(), "v1");
    }

    let legacy_cluster = snapshot.get_resources(TypeUrl::CLUSTER_V2).get("c1").unwrap();
    assert_eq!(legacy_cluster.type_url(), TypeUrl::CLUSTER_V2);
    assert_eq!(legacy_cluster.references(), vec!["e1".to_string()]);
}

#[test]
fn legacy_listener_carries_legacy_connection_manager() {
    let snapshot = consistent_snapshot("v1");
    let legacy = snapshot.get_resources(TypeUrl::LISTENER_V2).get("l1").unwrap();

    let ResourceBody::LegacyListener(listener) = legacy.body() else {
        panic!("expected a legacy listener, got {:?}", legacy.body());
    };
    let filter = &listener.filter_chains[0].filters[0];
    match &filter.config_type {
        Some(legacy_filter::ConfigType::TypedConfig(any)) => {
            assert_eq!(any.type_url, TypeUrl::HTTP_CONNECTION_MANAGER_V2);
        }
        other => panic!("unexpected filter config {other:?}"),
    }
    assert_eq!(legacy.references(), vec!["r1".to_string()]);
}

#[test]
fn opaque_resources_have_no_legacy_form() {
    let opaque = Resource::new(
        "custom",
        ResourceBody::Opaque(prost_types::Any {
            type_url: "type.googleapis.com/example.Custom".to_string(),
            value: vec![],
        }),
    );
    let snapshot = Snapshot::builder()
        .version("v1")
        .resource(ResourceKind::Listener, opaque)
        .build()
        .unwrap();

    assert_eq!(snapshot.get_resources(TypeUrl::LISTENER).len(), 1);
    assert!(snapshot.get_resources(TypeUrl::LISTENER_V2).is_empty());
}

#[test]
fn clone_is_equal_and_independent() {
    let original = consistent_snapshot("v1");
    let cloned = original.clone();
    assert_eq!(original, cloned);

    // Taking the clone apart leaves the original untouched.
    let mut endpoints = cloned.into_resources(ResourceType::ENDPOINT).into_iter();
    let mut e1 = endpoints.next().unwrap();
    if let ResourceBody::Endpoint(assignment) = e1.body_mut() {
        assignment.endpoints.clear();
    }
    assert_ne!(original.get_resources(TypeUrl::ENDPOINT).get("e1"), Some(&e1));
    assert_eq!(original, consistent_snapshot("v1"));
}

#[test]
fn unknown_type_url_yields_empty_set() {
    let snapshot = consistent_snapshot("v1");

    let resources = snapshot.get_resources("type.googleapis.com/envoy.unknown.v3.Thing");
    assert!(resources.is_empty());
    assert!(get_resources(Some(&snapshot), "").is_empty());
}

#[test]
fn absent_snapshot_yields_empty_set() {
    for ty in ResourceType::ALL {
        assert!(get_resources(None, ty.type_url()).is_empty());
    }
}

#[test]
fn duplicate_names_are_rejected_by_default() {
    let err = Snapshot::new(
        "v1",
        vec![endpoint("e1", 8080), endpoint("e1", 9090)],
        vec![],
        vec![],
        vec![],
    )
    .unwrap_err();

    assert!(matches!(err, XdsError::DuplicateResourceName { .. }));
}

#[test]
fn last_write_wins_keeps_final_duplicate() {
    let snapshot = Snapshot::builder()
        .version("v1")
        .duplicate_policy(DuplicatePolicy::LastWriteWins)
        .endpoints(vec![endpoint("e1", 8080), endpoint("e1", 9090)])
        .clusters(vec![eds_cluster("c1", "e1")])
        .build()
        .unwrap();

    let kept = snapshot.get_resources(TypeUrl::ENDPOINT).get("e1").unwrap();
    assert_eq!(kept, &endpoint("e1", 9090));
    assert!(snapshot.consistent().is_ok());
}

#[test]
fn resource_sets_assemble_into_snapshot() {
    let snapshot = Snapshot::from_resource_sets(
        ResourceSet::new("ev1", vec![endpoint("e1", 8080)]).unwrap(),
        ResourceSet::new("cv1", vec![eds_cluster("c1", "e1")]).unwrap(),
        ResourceSet::new("rv1", vec![route("r1", "c1")]).unwrap(),
        ResourceSet::new("lv1", vec![http_listener("l1", "r1")]).unwrap(),
    )
    .unwrap();

    assert_eq!(snapshot.version(ResourceType::ENDPOINT), "ev1");
    assert_eq!(snapshot.version(ResourceType::CLUSTER_V2), "cv1");
    assert_eq!(snapshot.version(ResourceType::ROUTE_V2), "rv1");
    assert_eq!(snapshot.version(ResourceType::LISTENER), "lv1");
    assert!(snapshot.consistent().is_ok());
}

#[test]
fn config_can_skip_legacy_derivation() {
    let snapshot = Snapshot::builder()
        .version("v3-only")
        .config(SnapshotConfig::last_write_wins().without_legacy())
        .routes(vec![route("r1", "c1"), route("r1", "c2")])
        .listeners(vec![http_listener("l1", "r1")])
        .build()
        .unwrap();

    assert_eq!(snapshot.get_resources(TypeUrl::ROUTE).len(), 1);
    assert!(snapshot.get_resources(TypeUrl::ROUTE_V2).is_empty());
    assert_eq!(snapshot.version(ResourceType::LISTENER_V2), "v3-only");
    assert!(snapshot.consistent().is_ok());
}

#[test]
fn legacy_slots_encode_under_legacy_type_urls() {
    let snapshot = consistent_snapshot("v1");

    for kind in ResourceKind::ALL {
        let ty = ResourceType::legacy(kind);
        let resources = snapshot.resources(ty);
        assert_eq!(resources.len(), 1, "{ty}");
        for resource in resources.iter() {
            let any = resource.encode();
            assert_eq!(any.type_url, ty.type_url());
            assert_eq!(&Resource::from_any(&any).unwrap(), resource);
        }
    }
}

#[test]
fn listener_passed_as_cluster_is_rejected() {
    let err = Snapshot::new(
        "v1",
        vec![],
        vec![http_listener("l1", "r1")],
        vec![],
        vec![eds_cluster("c1", "e1")],
    )
    .unwrap_err();

    match err {
        XdsError::InvalidResource { type_url, name, .. } => {
            assert_eq!(type_url, TypeUrl::LISTENER);
            assert_eq!(name, "l1");
        }
        other => panic!("expected invalid resource, got {other:?}"),
    }
}

#[test]
fn misplaced_resource_set_is_rejected() {
    let err = Snapshot::from_resource_sets(
        ResourceSet::empty("v1"),
        ResourceSet::new("v1", vec![http_listener("l1", "r1")]).unwrap(),
        ResourceSet::empty("v1"),
        ResourceSet::empty("v1"),
    )
    .unwrap_err();

    assert!(matches!(err, XdsError::InvalidResource { .. }));
}
