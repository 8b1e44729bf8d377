// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the
//! interfaces of the crate: the gateway lookup contract and the resource
//! loading capability used for trust stores.

pub mod gateway;
pub mod resource;

// Re-export the port traits
pub use gateway::ConfigGateway;
pub use resource::ResourceLoader;
