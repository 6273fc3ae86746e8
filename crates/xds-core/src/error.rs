//! Error types for snapshot operations.
//!
//! This module provides [`XdsError`], the single error type returned by
//! resource set construction, body decoding and the snapshot consistency
//! check.

/// Error type for snapshot operations.
///
/// Every failure is reported as a value; nothing in the snapshot pipeline
/// panics. The consistency variants carry the exact names involved so the
/// publishing path can log them and keep serving the last good snapshot.
///
/// # Example
///
/// ```rust
/// use xds_core::{TypeUrl, XdsError};
///
/// let err = XdsError::MissingReference {
///     type_url: TypeUrl::ENDPOINT.to_string(),
///     names: vec!["backend".to_string()],
/// };
/// assert!(err.to_string().contains("backend"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XdsError {
    /// An operation was attempted on an absent snapshot.
    #[error("nil snapshot")]
    NoSnapshot,

    /// The number of referenced names differs from the number of provided resources.
    #[error(
        "mismatched {type_url} reference and resource lengths: length of {references:?} does not equal length of {resources:?} ({} references vs {} resources)",
        .references.len(),
        .resources.len()
    )]
    LengthMismatch {
        /// Type URL of the referenced (child) resources.
        type_url: String,
        /// Referenced names, sorted.
        references: Vec<String>,
        /// Provided resource names, sorted.
        resources: Vec<String>,
    },

    /// One or more referenced names have no corresponding resource.
    #[error("missing {type_url} resources: {names:?}")]
    MissingReference {
        /// Type URL of the referenced (child) resources.
        type_url: String,
        /// Referenced names with no matching resource, sorted.
        names: Vec<String>,
    },

    /// Two resources in one set share a name.
    #[error("duplicate resource name {name:?} in resource set version {version:?}")]
    DuplicateResourceName {
        /// The duplicated name.
        name: String,
        /// Version of the set being built.
        version: String,
    },

    /// A resource cannot be placed in a resource set.
    #[error("invalid resource {type_url}/{name}: {reason}")]
    InvalidResource {
        /// The type URL of the resource.
        type_url: String,
        /// The name of the resource.
        name: String,
        /// Reason for the rejection.
        reason: String,
    },

    /// Protobuf decoding failed.
    #[error("decoding error for {type_url}: {message}")]
    DecodingError {
        /// The type URL being decoded.
        type_url: String,
        /// Error message.
        message: String,
    },
}

impl XdsError {
    /// Create a decoding error from any displayable decoder error.
    pub fn decoding(type_url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::DecodingError {
            type_url: type_url.into(),
            message: err.to_string(),
        }
    }

    /// Whether this error reports a dangling or orphaned cross-type reference.
    #[must_use]
    pub fn is_inconsistency(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. } | Self::MissingReference { .. }
        )
    }
}
