// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration gateway trait definition.
//!
//! This module defines the `ConfigGateway` trait, the primary port
//! (interface) for fetching configuration entries from a remote key/value
//! store. The surrounding application composes an implementation of this
//! trait into its configuration-resolution chain.

use crate::domain::{KvEntry, Result};

/// A trait for remote key/value configuration gateways.
///
/// A gateway performs one lookup per call against the backing store and maps
/// the store's response onto a typed result. A missing key is a *successful*
/// lookup with an empty result, never an error.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. A gateway holds no mutable state
/// across calls, so callers may invoke [`lookup`](ConfigGateway::lookup)
/// concurrently without locking.
///
/// # Examples
///
/// ```rust
/// use consulcfg::ports::ConfigGateway;
/// use consulcfg::domain::{KvEntry, Result};
///
/// struct StaticGateway;
///
/// impl ConfigGateway for StaticGateway {
///     fn lookup(&self, key: &str) -> Result<Option<KvEntry>> {
///         if key == "app.name" {
///             Ok(Some(KvEntry {
///                 key: key.to_string(),
///                 value: Some("TXlBcHA=".to_string()),
///                 flags: None,
///                 lock_index: None,
///                 create_index: None,
///                 modify_index: None,
///                 session: None,
///             }))
///         } else {
///             Ok(None)
///         }
///     }
/// }
///
/// let gateway = StaticGateway;
/// assert!(gateway.lookup("app.name").unwrap().is_some());
/// assert!(gateway.lookup("missing").unwrap().is_none());
/// ```
pub trait ConfigGateway: Send + Sync {
    /// Fetches the entry stored under `key`, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(KvEntry))` - the store holds exactly one entry for the key
    /// * `Ok(None)` - the key does not exist in the store
    /// * `Err(GatewayError)` - the store could not be reached, answered with
    ///   an unexpected status, or violated the one-entry-per-key contract
    fn lookup(&self, key: &str) -> Result<Option<KvEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EmptyGateway;

    impl ConfigGateway for EmptyGateway {
        fn lookup(&self, _key: &str) -> Result<Option<KvEntry>> {
            Ok(None)
        }
    }

    #[test]
    fn test_missing_key_is_not_an_error() {
        let gateway = EmptyGateway;
        assert!(gateway.lookup("anything").unwrap().is_none());
    }

    #[test]
    fn test_gateway_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ConfigGateway>();
        let boxed: Box<dyn ConfigGateway> = Box::new(EmptyGateway);
        assert!(boxed.lookup("k").unwrap().is_none());
    }
}
