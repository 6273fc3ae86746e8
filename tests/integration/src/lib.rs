//! Integration tests for envoy-snapshot.

#[cfg(test)]
mod fixtures;

#[cfg(test)]
mod cache_tests;

#[cfg(test)]
mod snapshot_tests;
