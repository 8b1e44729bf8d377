// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hexagonal architecture configuration gateway for the Consul key/value
//! store.
//!
//! This crate fetches configuration values from a Consul agent over HTTP(S),
//! with a pluggable TLS trust policy and bounded per-call timeouts. It maps
//! the store's responses onto typed results, distinguishing "key absent"
//! (a normal, successful outcome) from transport and store errors.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types (`AgentConfig`, `KvEntry`, errors)
//! - **Ports**: Trait definitions (`ConfigGateway`, `ResourceLoader`)
//! - **Adapters**: The Consul HTTP gateway, TLS trust policy construction,
//!   and resource loaders for trust stores
//!
//! # Trust modes
//!
//! Three mutually exclusive TLS trust modes are derived once at gateway
//! construction:
//!
//! - **Pinned**: a PEM or PKCS#12 trust store restricts accepted server
//!   certificates to exactly the store's contents (server-name verification
//!   disabled)
//! - **Trust-all**: any certificate is accepted; for development against
//!   self-signed local agents only
//! - **System default**: standard certificate and server-name validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use consulcfg::prelude::*;
//!
//! # fn main() -> consulcfg::domain::Result<()> {
//! let gateway = ConsulGateway::new(AgentConfig::default())?;
//! match gateway.lookup("app/greeting")? {
//!     Some(entry) => println!("found: {:?}", entry.decoded_value_utf8()?),
//!     None => println!("key not present"),
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for
/// convenient access.
pub mod prelude {
    pub use crate::adapters::{ConsulGateway, EmbeddedResources, ResourceChain, TrustPolicy};
    pub use crate::domain::{AgentConfig, GatewayError, KvEntry, Result};
    pub use crate::ports::{ConfigGateway, ResourceLoader};
}
