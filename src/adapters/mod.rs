// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete implementations.
//!
//! This module contains the concrete implementations of the port traits:
//! the Consul-backed gateway, the TLS trust policy machinery, and the
//! resource loaders used to resolve trust stores.

pub mod consul;
pub mod resource;
pub mod trust;

// Re-export the adapter types
pub use consul::ConsulGateway;
pub use resource::{EmbeddedResources, FilesystemResources, ResourceChain};
pub use trust::{TrustPolicy, TrustStoreFormat};
