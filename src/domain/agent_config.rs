// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connection settings for the Consul agent.
//!
//! This module provides the immutable configuration record consumed by the
//! gateway at construction time. The crate does not parse configuration file
//! formats itself; callers assemble an [`AgentConfig`] from whatever
//! configuration mechanism the surrounding application uses.

use std::path::PathBuf;
use std::time::Duration;

/// Connection and trust settings for a Consul agent.
///
/// All fields are captured once at gateway construction and never mutated
/// afterwards.
///
/// # Trust modes
///
/// At most one of the custom trust options is effective:
///
/// - `key_store` set: trust exactly the certificates in the store, nothing
///   else. Takes precedence when both options are given.
/// - `trust_certs` true: accept any server certificate (development/test
///   against self-signed local agents).
/// - neither: standard platform certificate validation.
///
/// # Examples
///
/// ```
/// use consulcfg::domain::AgentConfig;
///
/// let config = AgentConfig {
///     host: "consul.internal".to_string(),
///     use_https: true,
///     token: Some("s3cr3t".to_string()),
///     ..AgentConfig::default()
/// };
/// assert_eq!(config.port, 8500);
/// ```
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Agent host name or address
    pub host: String,
    /// Agent HTTP(S) API port
    pub port: u16,
    /// Whether to use HTTPS when talking to the agent
    pub use_https: bool,
    /// Bound on establishing a connection to the agent
    pub connection_timeout: Duration,
    /// Bound on reading a response from the agent
    pub read_timeout: Duration,
    /// Optional bearer token sent in the `Authorization` header
    pub token: Option<String>,
    /// Accept any server certificate (less secure; development only)
    pub trust_certs: bool,
    /// Optional trust store restricting accepted server certificates
    pub key_store: Option<PathBuf>,
    /// Optional password for a PKCS#12 trust store
    pub key_store_password: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            host: "localhost".to_string(),
            port: 8500,
            use_https: false,
            connection_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(60),
            token: None,
            trust_certs: false,
            key_store: None,
            key_store_password: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_agent() {
        let config = AgentConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 8500);
        assert!(!config.use_https);
        assert_eq!(config.connection_timeout, Duration::from_secs(10));
        assert_eq!(config.read_timeout, Duration::from_secs(60));
        assert!(config.token.is_none());
        assert!(!config.trust_certs);
        assert!(config.key_store.is_none());
        assert!(config.key_store_password.is_none());
    }

    #[test]
    fn test_struct_update_syntax() {
        let config = AgentConfig {
            port: 8501,
            ..AgentConfig::default()
        };
        assert_eq!(config.port, 8501);
        assert_eq!(config.host, "localhost");
    }
}
