//! # xds-core
//!
//! Core types and error handling shared by the snapshot crates.
//!
//! - [`XdsError`] - Error type for resource set construction, decoding and
//!   snapshot consistency checks
//! - [`TypeUrl`] - Type URL constants for both protocol generations
//! - [`ResourceType`] - The eight (kind, generation) slots of a snapshot
//! - [`ResourceVersion`] - Opaque version token
//!
//! ## Example
//!
//! ```rust
//! use xds_core::{ResourceKind, ResourceType, TypeUrl};
//!
//! let ty = ResourceType::from_type_url(TypeUrl::LISTENER).unwrap();
//! assert_eq!(ty.kind(), ResourceKind::Listener);
//! assert_eq!(ty.kind().references(), Some(ResourceKind::Route));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod type_url;
mod version;

pub use error::XdsError;
pub use type_url::{ApiGeneration, ResourceKind, ResourceType, TypeUrl};
pub use version::ResourceVersion;

/// Result type alias using [`XdsError`].
pub type Result<T> = std::result::Result<T, XdsError>;
