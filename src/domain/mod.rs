// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the core domain types for the gateway crate. It is
//! independent of any transport or TLS concerns and defines the fundamental
//! concepts used throughout the library.

pub mod agent_config;
pub mod entry;
pub mod errors;

// Re-export commonly used types
pub use agent_config::AgentConfig;
pub use entry::KvEntry;
pub use errors::{GatewayError, Result};
