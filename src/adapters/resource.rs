// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource loader adapters.
//!
//! This module provides the concrete [`ResourceLoader`] implementations used
//! to resolve trust-store bytes: an in-memory bundle registered by the
//! application, a plain filesystem loader, and an ordered chain combining
//! them.

use crate::domain::Result;
use crate::ports::ResourceLoader;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// In-memory resource bundle registered by the application.
///
/// This is the analogue of application-bundled (classpath-style) resources:
/// deployments that ship their trust store inside the binary register its
/// bytes here under a virtual path, and that path then resolves without
/// touching the filesystem.
///
/// # Examples
///
/// ```
/// use consulcfg::adapters::EmbeddedResources;
/// use consulcfg::ports::ResourceLoader;
/// use std::path::Path;
///
/// let mut bundle = EmbeddedResources::new();
/// bundle.register("tls/agent-ca.pem", b"-----BEGIN CERTIFICATE-----".to_vec());
/// assert!(bundle.load(Path::new("tls/agent-ca.pem")).unwrap().is_some());
/// assert!(bundle.load(Path::new("other.pem")).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmbeddedResources {
    resources: HashMap<PathBuf, Vec<u8>>,
}

impl EmbeddedResources {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        EmbeddedResources {
            resources: HashMap::new(),
        }
    }

    /// Registers `bytes` under the virtual path `path`.
    pub fn register<P: Into<PathBuf>>(&mut self, path: P, bytes: Vec<u8>) {
        self.resources.insert(path.into(), bytes);
    }
}

impl ResourceLoader for EmbeddedResources {
    fn name(&self) -> &str {
        "embedded"
    }

    fn load(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self.resources.get(path).cloned())
    }
}

/// Filesystem resource loader.
///
/// Resolves paths directly against the filesystem. A path that does not
/// exist yields `Ok(None)` so the next loader in a chain can be consulted;
/// a path that exists but cannot be read is an error.
#[derive(Debug, Clone, Default)]
pub struct FilesystemResources;

impl FilesystemResources {
    /// Creates a new filesystem loader.
    pub fn new() -> Self {
        FilesystemResources
    }
}

impl ResourceLoader for FilesystemResources {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn load(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }
}

/// Ordered chain of resource loaders, first match wins.
///
/// The default chain tries an (empty) embedded bundle first and then the
/// filesystem, so bundled stores always shadow on-disk ones.
pub struct ResourceChain {
    loaders: Vec<Box<dyn ResourceLoader>>,
}

impl ResourceChain {
    /// Creates a chain from an explicit loader list.
    pub fn new(loaders: Vec<Box<dyn ResourceLoader>>) -> Self {
        ResourceChain { loaders }
    }

    /// Creates the default embedded-then-filesystem chain.
    pub fn with_embedded(embedded: EmbeddedResources) -> Self {
        ResourceChain {
            loaders: vec![Box::new(embedded), Box::new(FilesystemResources::new())],
        }
    }

    /// Resolves `path` through the chain.
    ///
    /// Returns the bytes from the first loader that knows the path, or
    /// `Ok(None)` when no loader does.
    pub fn load(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        for loader in &self.loaders {
            if let Some(bytes) = loader.load(path)? {
                tracing::debug!(
                    "resolved resource '{}' via {} loader ({} bytes)",
                    path.display(),
                    loader.name(),
                    bytes.len()
                );
                return Ok(Some(bytes));
            }
        }
        Ok(None)
    }
}

impl Default for ResourceChain {
    fn default() -> Self {
        ResourceChain::with_embedded(EmbeddedResources::new())
    }
}
