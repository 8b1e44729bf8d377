// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key/value entry type returned by the store's lookup endpoint.

use crate::domain::errors::{GatewayError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One key/value record as returned by the store's `/v1/kv` endpoint.
///
/// The store serializes entry fields in PascalCase; both spellings are
/// accepted so that hand-written fixtures and proxied responses decode the
/// same way. Unknown fields are ignored, keeping the decoder
/// forward-compatible with store versions that add metadata.
///
/// The `value` field carries the base64 text exactly as sent by the store.
/// Metadata fields (`flags`, indexes, `session`) are opaque pass-through
/// values and are never reinterpreted by this crate.
///
/// # Examples
///
/// ```
/// use consulcfg::domain::KvEntry;
///
/// let entry: KvEntry =
///     serde_json::from_str(r#"{"key":"greeting","value":"aGVsbG8="}"#).unwrap();
/// assert_eq!(entry.key, "greeting");
/// assert_eq!(entry.decoded_value().unwrap(), Some(b"hello".to_vec()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvEntry {
    /// The full key path
    #[serde(alias = "Key")]
    pub key: String,
    /// Base64-encoded value payload; `None` when the store holds no bytes
    #[serde(default, alias = "Value")]
    pub value: Option<String>,
    /// Opaque flags attached to the entry
    #[serde(default, alias = "Flags")]
    pub flags: Option<u64>,
    /// Lock index metadata
    #[serde(default, alias = "LockIndex")]
    pub lock_index: Option<u64>,
    /// Index at which the entry was created
    #[serde(default, alias = "CreateIndex")]
    pub create_index: Option<u64>,
    /// Index at which the entry was last modified
    #[serde(default, alias = "ModifyIndex")]
    pub modify_index: Option<u64>,
    /// Session holding the entry's lock, if any
    #[serde(default, alias = "Session")]
    pub session: Option<String>,
}

impl KvEntry {
    /// Decodes the base64 value payload into raw bytes.
    ///
    /// Returns `Ok(None)` when the store holds no bytes for the key.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValueDecode`] when the payload is not valid
    /// base64.
    pub fn decoded_value(&self) -> Result<Option<Vec<u8>>> {
        match &self.value {
            None => Ok(None),
            Some(encoded) => BASE64
                .decode(encoded)
                .map(Some)
                .map_err(|e| GatewayError::ValueDecode {
                    key: self.key.clone(),
                    source: e,
                }),
        }
    }

    /// Decodes the base64 value payload into a UTF-8 string.
    ///
    /// Returns `Ok(None)` when the store holds no bytes for the key.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ValueDecode`] when the payload is not valid
    /// base64, or [`GatewayError::Io`] when the decoded bytes are not UTF-8.
    pub fn decoded_value_utf8(&self) -> Result<Option<String>> {
        match self.decoded_value()? {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                GatewayError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("value for key '{}' is not valid UTF-8: {}", self.key, e),
                ))
            }),
        }
    }
}
