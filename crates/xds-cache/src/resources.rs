//! Versioned, name-indexed resource sets.

use std::collections::hash_map::{Entry, HashMap, IntoValues};
use std::sync::OnceLock;

use tracing::trace;
use xds_core::{ResourceType, ResourceVersion, Result, XdsError};

use crate::config::DuplicatePolicy;
use crate::resource::Resource;

/// An immutable collection of resources of one kind, keyed by name and
/// tagged with an opaque version.
///
/// Every resource is stored under its own name. A set is never modified
/// after construction; a changed set is a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSet {
    /// Version token for this set.
    version: ResourceVersion,
    /// Resources keyed by name.
    items: HashMap<String, Resource>,
}

impl ResourceSet {
    /// Build a set from a list, rejecting duplicate names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use xds_cache::ResourceSet;
    /// use xds_types::envoy::config::route::v3::RouteConfiguration;
    ///
    /// let route = RouteConfiguration { name: "r1".into(), ..Default::default() };
    /// let set = ResourceSet::new("v1", vec![route.into()]).unwrap();
    /// assert!(set.get("r1").is_some());
    /// assert_eq!(set.version(), "v1");
    /// ```
    pub fn new(
        version: impl Into<ResourceVersion>,
        resources: impl IntoIterator<Item = Resource>,
    ) -> Result<Self> {
        Self::with_policy(version, resources, DuplicatePolicy::Reject)
    }

    /// Build a set from a list with an explicit duplicate-name policy.
    pub fn with_policy(
        version: impl Into<ResourceVersion>,
        resources: impl IntoIterator<Item = Resource>,
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        let version = version.into();
        let resources = resources.into_iter();
        let mut items = HashMap::with_capacity(resources.size_hint().0);

        for resource in resources {
            match items.entry(resource.name().to_string()) {
                Entry::Vacant(slot) => {
                    slot.insert(resource);
                }
                Entry::Occupied(mut slot) => match policy {
                    DuplicatePolicy::Reject => {
                        return Err(XdsError::DuplicateResourceName {
                            name: slot.key().clone(),
                            version: version.to_string(),
                        });
                    }
                    DuplicatePolicy::LastWriteWins => {
                        trace!(name = %slot.key(), version = %version, "replacing duplicate resource");
                        slot.insert(resource);
                    }
                },
            }
        }

        Ok(Self { version, items })
    }

    /// Build a set from an existing name-to-resource mapping.
    ///
    /// Fails if any key differs from the name of the resource stored under it.
    pub fn from_map(
        version: impl Into<ResourceVersion>,
        items: HashMap<String, Resource>,
    ) -> Result<Self> {
        if let Some((key, resource)) = items.iter().find(|(key, r)| key.as_str() != r.name()) {
            return Err(XdsError::InvalidResource {
                type_url: resource.type_url().to_string(),
                name: resource.name().to_string(),
                reason: format!("stored under mismatched key {key:?}"),
            });
        }
        Ok(Self {
            version: version.into(),
            items,
        })
    }

    /// An empty set with the given version.
    pub fn empty(version: impl Into<ResourceVersion>) -> Self {
        Self {
            version: version.into(),
            items: HashMap::new(),
        }
    }

    /// Build a set for one snapshot slot.
    ///
    /// Fails with [`XdsError::InvalidResource`] if a body belongs in another
    /// slot. Opaque bodies are accepted in any slot.
    pub fn for_type(
        ty: ResourceType,
        version: impl Into<ResourceVersion>,
        resources: impl IntoIterator<Item = Resource>,
        policy: DuplicatePolicy,
    ) -> Result<Self> {
        let set = Self::with_policy(version, resources, policy)?;
        set.ensure_type(ty)?;
        Ok(set)
    }

    /// Check that every resource may be stored in the `ty` slot.
    ///
    /// The first misplaced resource in name order is reported.
    pub fn ensure_type(&self, ty: ResourceType) -> Result<()> {
        let misplaced = self
            .items
            .values()
            .filter(|r| !r.body().fits(ty))
            .min_by(|a, b| a.name().cmp(b.name()));
        match misplaced {
            Some(resource) => Err(XdsError::InvalidResource {
                type_url: resource.type_url().to_string(),
                name: resource.name().to_string(),
                reason: format!("does not belong in a {} set", ty.type_url()),
            }),
            None => Ok(()),
        }
    }

    /// Internal constructor for maps already keyed by resource name.
    pub(crate) fn from_unique(version: ResourceVersion, items: HashMap<String, Resource>) -> Self {
        debug_assert!(items.iter().all(|(k, r)| k == r.name()));
        Self { version, items }
    }

    /// Get the version of this set.
    #[inline]
    pub fn version(&self) -> &ResourceVersion {
        &self.version
    }

    /// Get a resource by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Resource> {
        self.items.get(name)
    }

    /// Whether a resource with this name exists.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Iterate over all resources, in no particular order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.items.values()
    }

    /// Iterate over all resource names, in no particular order.
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Resource names in sorted order.
    pub fn sorted_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names().map(str::to_string).collect();
        names.sort_unstable();
        names
    }

    /// Get the number of resources.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are no resources.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResourceSet {
    type Item = Resource;
    type IntoIter = IntoValues<String, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_values()
    }
}

/// Shared empty set returned for unknown or absent lookups.
pub(crate) fn empty_set() -> &'static ResourceSet {
    static EMPTY: OnceLock<ResourceSet> = OnceLock::new();
    EMPTY.get_or_init(ResourceSet::default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xds_types::envoy::config::endpoint::v3::ClusterLoadAssignment;

    fn endpoint(name: &str, priority: u32) -> Resource {
        use xds_types::envoy::config::endpoint::v3::LocalityLbEndpoints;
        ClusterLoadAssignment {
            cluster_name: name.to_string(),
            endpoints: vec![LocalityLbEndpoints {
                priority,
                ..Default::default()
            }],
        }
        .into()
    }

    #[test]
    fn resource_set_indexes_by_name() {
        let set = ResourceSet::new("v1", vec![endpoint("a", 0), endpoint("b", 0)]).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.contains("a"));
        assert_eq!(set.get("b").map(Resource::name), Some("b"));
        assert!(set.get("c").is_none());
        assert_eq!(set.sorted_names(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn duplicate_names_rejected_by_default() {
        let err = ResourceSet::new("v1", vec![endpoint("a", 0), endpoint("a", 1)]).unwrap_err();
        assert_eq!(
            err,
            XdsError::DuplicateResourceName {
                name: "a".to_string(),
                version: "v1".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let set = ResourceSet::with_policy(
            "v1",
            vec![endpoint("a", 0), endpoint("a", 7)],
            DuplicatePolicy::LastWriteWins,
        )
        .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a"), Some(&endpoint("a", 7)));
    }

    #[test]
    fn from_map_requires_matching_keys() {
        let mut items = HashMap::new();
        items.insert("a".to_string(), endpoint("a", 0));
        assert!(ResourceSet::from_map("v1", items.clone()).is_ok());

        items.insert("wrong".to_string(), endpoint("b", 0));
        let err = ResourceSet::from_map("v1", items).unwrap_err();
        assert!(matches!(err, XdsError::InvalidResource { .. }));
    }

    #[test]
    fn names_lists_every_key() {
        let set = ResourceSet::new("v1", vec![endpoint("a", 0), endpoint("b", 1)]).unwrap();
        let mut names: Vec<&str> = set.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn for_type_rejects_other_kinds() {
        let err = ResourceSet::for_type(
            ResourceType::CLUSTER,
            "v1",
            vec![endpoint("a", 0)],
            DuplicatePolicy::Reject,
        )
        .unwrap_err();
        assert_eq!(
            err,
            XdsError::InvalidResource {
                type_url: xds_core::TypeUrl::ENDPOINT.to_string(),
                name: "a".to_string(),
                reason: format!("does not belong in a {} set", xds_core::TypeUrl::CLUSTER),
            }
        );

        let set = ResourceSet::for_type(
            ResourceType::ENDPOINT,
            "v1",
            vec![endpoint("a", 0)],
            DuplicatePolicy::Reject,
        )
        .unwrap();
        assert!(set.ensure_type(ResourceType::ENDPOINT_V2).is_err());
    }

    #[test]
    fn empty_set_keeps_version() {
        let set = ResourceSet::empty("v9");
        assert!(set.is_empty());
        assert_eq!(set.version(), "v9");
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn into_iter_yields_owned_resources() {
        let set = ResourceSet::new("v1", vec![endpoint("a", 0)]).unwrap();
        let owned: Vec<Resource> = set.into_iter().collect();
        assert_eq!(owned, vec![endpoint("a", 0)]);
    }
}
