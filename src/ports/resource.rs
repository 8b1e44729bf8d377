// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource loader trait definition.
//!
//! This module defines the `ResourceLoader` trait, the port used to resolve
//! trust-store bytes by path. Loaders are tried in order; the first one that
//! yields bytes wins. This mirrors the common deployment split between
//! application-bundled resources and plain filesystem paths.

use crate::domain::Result;
use std::path::Path;

/// A trait for loading resource bytes by path.
///
/// Implementations must be `Send + Sync` so a chain of loaders can be shared
/// by a gateway that is used from multiple threads.
///
/// # Examples
///
/// ```rust
/// use consulcfg::ports::ResourceLoader;
/// use consulcfg::domain::Result;
/// use std::path::Path;
///
/// struct NullLoader;
///
/// impl ResourceLoader for NullLoader {
///     fn name(&self) -> &str {
///         "null"
///     }
///
///     fn load(&self, _path: &Path) -> Result<Option<Vec<u8>>> {
///         Ok(None)
///     }
/// }
///
/// let loader = NullLoader;
/// assert!(loader.load(Path::new("anything")).unwrap().is_none());
/// ```
pub trait ResourceLoader: Send + Sync {
    /// Returns the name of this loader, used in diagnostics.
    fn name(&self) -> &str;

    /// Attempts to load the resource at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bytes))` - this loader can resolve the path
    /// * `Ok(None)` - the path is unknown to this loader (the next loader in
    ///   the chain should be consulted)
    /// * `Err(GatewayError)` - the path is known but reading it failed
    fn load(&self, path: &Path) -> Result<Option<Vec<u8>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLoader(Vec<u8>);

    impl ResourceLoader for FixedLoader {
        fn name(&self) -> &str {
            "fixed"
        }

        fn load(&self, _path: &Path) -> Result<Option<Vec<u8>>> {
            Ok(Some(self.0.clone()))
        }
    }

    #[test]
    fn test_loader_returns_bytes() {
        let loader = FixedLoader(vec![1, 2, 3]);
        assert_eq!(loader.name(), "fixed");
        assert_eq!(
            loader.load(Path::new("any")).unwrap(),
            Some(vec![1, 2, 3])
        );
    }

    #[test]
    fn test_loader_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ResourceLoader>();
    }
}
