// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration gateway.
//!
//! This module defines the error taxonomy for gateway construction and key
//! lookups. All errors use `thiserror` for proper error handling and
//! conversion. A `404` from the store is deliberately *not* represented here:
//! a missing key is a successful lookup with an empty result.

use thiserror::Error;

/// The main error type for gateway operations.
///
/// Construction-time failures surface as [`GatewayError::TrustInit`] and make
/// the gateway unusable. Lookup-time failures distinguish transport problems
/// from store responses that violate the lookup protocol. The enum is marked
/// `#[non_exhaustive]` to allow for future additions without breaking
/// backwards compatibility.
///
/// # Examples
///
/// ```
/// use consulcfg::domain::errors::GatewayError;
///
/// fn fetch() -> Result<String, GatewayError> {
///     Err(GatewayError::UnexpectedStatus {
///         status: 500,
///         url: "http://localhost:8500/v1/kv/app.name".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The TLS trust material could not be built at gateway construction.
    ///
    /// This is fatal: the gateway must not be used with a partially-built
    /// trust policy. It is never retried internally.
    #[error("failed to build TLS trust material: {message}")]
    TrustInit {
        /// Description of what went wrong
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A network-level failure occurred while talking to the store.
    ///
    /// Covers connect/read timeouts, DNS failures and TLS handshake errors.
    #[error("transport failure while querying {url}: {source}")]
    Transport {
        /// The request URL
        url: String,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The store answered with a status code other than `200` or `404`.
    #[error("got unexpected HTTP response code {status} from {url}")]
    UnexpectedStatus {
        /// The HTTP status code observed
        status: u16,
        /// The request URL
        url: String,
    },

    /// The store answered `200` but sent no body.
    #[error("got empty HTTP response body from {url}")]
    EmptyBody {
        /// The request URL
        url: String,
    },

    /// The store answered `200` with a body that is not a JSON entry array.
    #[error("malformed response body from {url}: {source}")]
    MalformedBody {
        /// The request URL
        url: String,
        /// The underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// The store returned a number of entries other than exactly one.
    ///
    /// An exact key lookup must yield a single entry; any other count is an
    /// ambiguous response and is never silently truncated to the first
    /// element.
    #[error("store returned {count} results when looking up value of key '{key}'")]
    ProtocolViolation {
        /// The key that was looked up
        key: String,
        /// The number of entries observed
        count: usize,
    },

    /// An entry's base64 value payload could not be decoded.
    #[error("failed to decode base64 value for key '{key}': {source}")]
    ValueDecode {
        /// The key whose value failed to decode
        key: String,
        /// The underlying decoding error
        #[source]
        source: base64::DecodeError,
    },

    /// An I/O error occurred while reading local resources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    /// Creates a `TrustInit` error from a message only.
    pub fn trust_init(message: impl Into<String>) -> Self {
        GatewayError::TrustInit {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a `TrustInit` error wrapping an underlying cause.
    pub fn trust_init_with(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        GatewayError::TrustInit {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A specialized Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
