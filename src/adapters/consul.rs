// SPDX-License-Identifier: MIT OR Apache-2.0

//! Consul configuration gateway adapter.
//!
//! This module provides the [`ConfigGateway`] implementation backed by the
//! Consul HTTP API. Each lookup is a single GET against the agent's
//! `/v1/kv/{key}` endpoint with bounded timeouts; the response is decoded
//! into zero-or-one [`KvEntry`].

use crate::adapters::resource::{EmbeddedResources, ResourceChain};
use crate::adapters::trust::TrustPolicy;
use crate::domain::{AgentConfig, GatewayError, KvEntry, Result};
use crate::ports::ConfigGateway;
use reqwest::blocking::Client;
use reqwest::StatusCode;

/// Configuration gateway for the Consul key/value store.
///
/// The gateway captures its configuration and TLS trust policy once at
/// construction. Lookups are stateless beyond that: a fresh transport is
/// built per call and torn down with it, so concurrent lookups from multiple
/// threads need no locking and no connection is ever left open, whichever
/// way a call exits.
///
/// # Examples
///
/// ```rust,no_run
/// use consulcfg::adapters::ConsulGateway;
/// use consulcfg::domain::AgentConfig;
/// use consulcfg::ports::ConfigGateway;
///
/// # fn main() -> consulcfg::domain::Result<()> {
/// let gateway = ConsulGateway::new(AgentConfig::default())?;
/// if let Some(entry) = gateway.lookup("app/greeting")? {
///     println!("{:?}", entry.decoded_value_utf8()?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConsulGateway {
    /// Agent connection settings
    config: AgentConfig,
    /// Trust policy, derived once from the configuration
    trust: TrustPolicy,
}

impl ConsulGateway {
    /// Creates a gateway for `config`, resolving any trust store through the
    /// default embedded-then-filesystem resource chain.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TrustInit`] when the TLS trust material cannot
    /// be built. The error is fatal; construction is never retried.
    pub fn new(config: AgentConfig) -> Result<Self> {
        Self::with_resources(config, ResourceChain::default())
    }

    /// Creates a gateway whose trust store resolves against an
    /// application-provided embedded bundle before the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TrustInit`] when the TLS trust material cannot
    /// be built.
    pub fn with_embedded(config: AgentConfig, embedded: EmbeddedResources) -> Result<Self> {
        Self::with_resources(config, ResourceChain::with_embedded(embedded))
    }

    /// Creates a gateway with an explicit resource chain.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TrustInit`] when the TLS trust material cannot
    /// be built.
    pub fn with_resources(config: AgentConfig, resources: ResourceChain) -> Result<Self> {
        let trust = TrustPolicy::from_config(&config, &resources)?;
        tracing::debug!(
            "consul gateway ready for {}:{} (trust policy: {})",
            config.host,
            config.port,
            trust.name()
        );
        Ok(ConsulGateway { config, trust })
    }

    /// Returns the trust policy the gateway was constructed with.
    pub fn trust_policy(&self) -> &TrustPolicy {
        &self.trust
    }

    /// Builds the lookup URL for `key`.
    fn kv_url(&self, key: &str) -> String {
        format!(
            "{}://{}:{}/v1/kv/{}",
            if self.config.use_https { "https" } else { "http" },
            self.config.host,
            self.config.port,
            key
        )
    }

    /// Builds the per-call transport with the configured timeouts and trust
    /// policy attached.
    fn build_client(&self, url: &str) -> Result<Client> {
        let mut builder = Client::builder()
            .connect_timeout(self.config.connection_timeout)
            .timeout(self.config.read_timeout);
        if let Some(tls) = self.trust.client_config() {
            builder = builder.use_preconfigured_tls((*tls).clone());
        }
        builder.build().map_err(|e| GatewayError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        })
    }
}

impl ConfigGateway for ConsulGateway {
    fn lookup(&self, key: &str) -> Result<Option<KvEntry>> {
        let url = self.kv_url(key);
        let client = self.build_client(&url)?;

        let mut request = client.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.config.token {
            // The raw token value goes on the wire, bearer-style.
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request.send().map_err(|e| GatewayError::Transport {
            url: url.clone(),
            source: Box::new(e),
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!("key '{}' not present in store", key);
            return Ok(None);
        }
        if status != StatusCode::OK {
            return Err(GatewayError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().map_err(|e| GatewayError::Transport {
            url: url.clone(),
            source: Box::new(e),
        })?;
        if body.trim().is_empty() {
            return Err(GatewayError::EmptyBody { url });
        }

        let mut entries: Vec<KvEntry> = serde_json::from_str(&body)
            .map_err(|e| GatewayError::MalformedBody { url, source: e })?;
        if entries.len() != 1 {
            return Err(GatewayError::ProtocolViolation {
                key: key.to_string(),
                count: entries.len(),
            });
        }
        tracing::debug!("key '{}' resolved from store", key);
        Ok(entries.pop())
    }
}
