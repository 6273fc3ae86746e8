//! Cross-type reference checking.
//!
//! A snapshot is consistent when the resources of each referenced kind are
//! exactly the set of names its parents point at:
//!
//! - every endpoint assignment is referenced by an EDS cluster, and every
//!   endpoint name a cluster references is present
//! - every route configuration is referenced by a listener, and every route
//!   name a listener references is present
//!
//! Clusters and listeners themselves are requested without name filtering,
//! so they are the unconstrained roots and are not checked against anything.
//! Only the current generation is checked; legacy sets are a derived
//! projection.

use std::collections::BTreeSet;

use xds_core::{ResourceKind, ResourceType, Result, XdsError};

use crate::resources::ResourceSet;
use crate::snapshot::Snapshot;

/// Check a possibly absent snapshot.
///
/// An absent snapshot fails with [`XdsError::NoSnapshot`] before anything
/// else is inspected.
pub fn check(snapshot: Option<&Snapshot>) -> Result<()> {
    let snapshot = snapshot.ok_or(XdsError::NoSnapshot)?;

    for parent in ResourceKind::ALL {
        if let Some(child) = parent.references() {
            check_references(
                snapshot.resources(ResourceType::current(parent)),
                snapshot.resources(ResourceType::current(child)),
                ResourceType::current(child).type_url(),
            )?;
        }
    }
    Ok(())
}

/// The set of names referenced by every resource in `parents`.
pub fn collect_references(parents: &ResourceSet) -> BTreeSet<String> {
    parents.iter().flat_map(|r| r.references()).collect()
}

/// Require `children` to hold exactly the names referenced by `parents`.
///
/// A dangling reference is reported first, as [`XdsError::MissingReference`]
/// naming every absent resource. With no dangling reference, a count
/// difference means `children` holds unreferenced resources and is reported
/// as [`XdsError::LengthMismatch`].
pub fn check_references(
    parents: &ResourceSet,
    children: &ResourceSet,
    child_type_url: &str,
) -> Result<()> {
    let references = collect_references(parents);

    let missing: Vec<String> = references
        .iter()
        .filter(|name| !children.contains(name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(XdsError::MissingReference {
            type_url: child_type_url.to_string(),
            names: missing,
        });
    }

    if references.len() != children.len() {
        return Err(XdsError::LengthMismatch {
            type_url: child_type_url.to_string(),
            references: references.into_iter().collect(),
            resources: children.sorted_names(),
        });
    }

    Ok(())
}
