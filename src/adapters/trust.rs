// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS trust policy construction.
//!
//! This module derives the gateway's trust policy from an [`AgentConfig`],
//! exactly once at construction time. Three mutually exclusive modes exist:
//! a pinned trust store (only the certificates in the store are trusted,
//! server-name verification disabled), a trust-everything mode for
//! development against self-signed agents, and the platform default.
//!
//! Any failure to build the trust material is unrecoverable: construction
//! fails and the gateway never exists with a partially-built policy.

use crate::adapters::resource::ResourceChain;
use crate::domain::{AgentConfig, GatewayError, Result};
use once_cell::sync::Lazy;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{
    CertificateError, ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
};
use std::path::Path;
use std::sync::Arc;

// The process-wide rustls crypto provider is installed at most once; the
// install call fails harmlessly if the application already picked one.
static CRYPTO_PROVIDER: Lazy<()> = Lazy::new(|| {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
});

/// Container format of a trust store, sniffed from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustStoreFormat {
    /// PKCS#12 container (`.p12`, `.pkcs12`, `.pfx`), optionally
    /// password-protected
    Pkcs12,
    /// PEM certificate bundle (everything else)
    Pem,
}

impl TrustStoreFormat {
    /// Determines the container format from the trust store path.
    ///
    /// `.p12`, `.pkcs12` and `.pfx` (case-insensitive) select PKCS#12; any
    /// other name defaults to a PEM bundle.
    pub fn detect(path: &Path) -> Self {
        let name = path.to_string_lossy().to_lowercase();
        if name.ends_with(".p12") || name.ends_with(".pkcs12") || name.ends_with(".pfx") {
            TrustStoreFormat::Pkcs12
        } else {
            TrustStoreFormat::Pem
        }
    }
}

/// The TLS trust policy a gateway operates under.
///
/// Built once from an [`AgentConfig`] and held, immutable, for the gateway's
/// entire lifetime. The non-default variants carry a fully assembled rustls
/// client configuration ready to be attached to a transport.
pub enum TrustPolicy {
    /// Standard platform certificate and server-name validation
    SystemDefault,
    /// Trust exactly the certificates from the configured store; server-name
    /// verification disabled
    Pinned(Arc<ClientConfig>),
    /// Accept any server certificate and any name (development/test only)
    TrustAll(Arc<ClientConfig>),
}

impl TrustPolicy {
    /// Derives the trust policy for `config`, resolving any trust store
    /// through `resources`.
    ///
    /// When both a trust store and `trust_certs` are configured, the trust
    /// store wins.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::TrustInit`] when the store cannot be found,
    /// parsed, or turned into trust material.
    pub fn from_config(config: &AgentConfig, resources: &ResourceChain) -> Result<Self> {
        Lazy::force(&CRYPTO_PROVIDER);
        if let Some(path) = &config.key_store {
            let certs = load_trust_store(path, config.key_store_password.as_deref(), resources)?;
            Ok(TrustPolicy::Pinned(pinned_client_config(certs)?))
        } else if config.trust_certs {
            Ok(TrustPolicy::TrustAll(trust_all_client_config()))
        } else {
            Ok(TrustPolicy::SystemDefault)
        }
    }

    /// Returns a short name for the policy mode, used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TrustPolicy::SystemDefault => "system-default",
            TrustPolicy::Pinned(_) => "pinned",
            TrustPolicy::TrustAll(_) => "trust-all",
        }
    }

    /// Returns the rustls client configuration override, if any.
    ///
    /// `None` means the transport's standard TLS stack applies unchanged.
    pub(crate) fn client_config(&self) -> Option<Arc<ClientConfig>> {
        match self {
            TrustPolicy::SystemDefault => None,
            TrustPolicy::Pinned(config) | TrustPolicy::TrustAll(config) => Some(Arc::clone(config)),
        }
    }
}

impl std::fmt::Debug for TrustPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TrustPolicy").field(&self.name()).finish()
    }
}

/// Loads and parses the certificates of a trust store.
fn load_trust_store(
    path: &Path,
    password: Option<&str>,
    resources: &ResourceChain,
) -> Result<Vec<CertificateDer<'static>>> {
    let bytes = resources.load(path)?.ok_or_else(|| {
        GatewayError::trust_init(format!(
            "trust store '{}' not found in any resource location",
            path.display()
        ))
    })?;
    match TrustStoreFormat::detect(path) {
        TrustStoreFormat::Pem => parse_pem_bundle(&bytes, path),
        TrustStoreFormat::Pkcs12 => parse_pkcs12_store(&bytes, password, path),
    }
}

/// Parses a PEM certificate bundle.
fn parse_pem_bundle(bytes: &[u8], path: &Path) -> Result<Vec<CertificateDer<'static>>> {
    let certs = CertificateDer::pem_slice_iter(bytes)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| {
            GatewayError::trust_init(format!(
                "cannot parse PEM trust store '{}': {:?}",
                path.display(),
                e
            ))
        })?;
    if certs.is_empty() {
        return Err(GatewayError::trust_init(format!(
            "trust store '{}' contains no certificates",
            path.display()
        )));
    }
    Ok(certs)
}

/// Parses a PKCS#12 container, verifying its MAC against the password.
///
/// An absent password is treated as the empty password, matching how the
/// container format itself handles unprotected stores.
fn parse_pkcs12_store(
    bytes: &[u8],
    password: Option<&str>,
    path: &Path,
) -> Result<Vec<CertificateDer<'static>>> {
    let pfx = p12::PFX::parse(bytes).map_err(|e| {
        GatewayError::trust_init(format!(
            "cannot parse PKCS#12 trust store '{}': {:?}",
            path.display(),
            e
        ))
    })?;
    let password = password.unwrap_or("");
    if !pfx.verify_mac(password) {
        return Err(GatewayError::trust_init(format!(
            "password verification failed for trust store '{}'",
            path.display()
        )));
    }
    let ders = pfx.cert_bags(password).map_err(|e| {
        GatewayError::trust_init(format!(
            "cannot read certificates from trust store '{}': {:?}",
            path.display(),
            e
        ))
    })?;
    if ders.is_empty() {
        return Err(GatewayError::trust_init(format!(
            "trust store '{}' contains no certificates",
            path.display()
        )));
    }
    Ok(ders.into_iter().map(CertificateDer::from).collect())
}

/// Builds a client configuration trusting exactly `certs`.
fn pinned_client_config(certs: Vec<CertificateDer<'static>>) -> Result<Arc<ClientConfig>> {
    let mut roots = RootCertStore::empty();
    for cert in certs {
        roots
            .add(cert)
            .map_err(|e| GatewayError::trust_init_with("rejected certificate in trust store", e))?;
    }
    let webpki = WebPkiServerVerifier::builder(Arc::new(roots))
        .build()
        .map_err(|e| GatewayError::trust_init_with("cannot build certificate verifier", e))?;
    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(PinnedServerVerifier { inner: webpki }))
        .with_no_client_auth();
    Ok(Arc::new(config))
}

/// Builds a client configuration accepting any server certificate.
fn trust_all_client_config() -> Arc<ClientConfig> {
    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(TrustAllVerifier::new()))
        .with_no_client_auth();
    Arc::new(config)
}

/// Certificate verifier for the pinned trust mode.
///
/// Chain validation is delegated to the standard webpki verifier over the
/// pinned roots; only the server-name check is waived. Operators pinning
/// exact certificates routinely dial agents by IP or by internal names the
/// certificate does not carry, so this mode does not verify hostnames.
#[derive(Debug)]
struct PinnedServerVerifier {
    inner: Arc<WebPkiServerVerifier>,
}

fn is_name_mismatch(error: &CertificateError) -> bool {
    matches!(
        error,
        CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. }
    )
}

impl ServerCertVerifier for PinnedServerVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        match self.inner.verify_server_cert(
            end_entity,
            intermediates,
            server_name,
            ocsp_response,
            now,
        ) {
            Err(rustls::Error::InvalidCertificate(e)) if is_name_mismatch(&e) => {
                Ok(ServerCertVerified::assertion())
            }
            other => other,
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

/// Certificate verifier for the trust-everything mode.
///
/// Accepts any certificate, any chain and any name. This exists for
/// development and test against self-signed local agents and must never be
/// enabled in production deployments.
#[derive(Debug)]
struct TrustAllVerifier {
    schemes: Vec<SignatureScheme>,
}

impl TrustAllVerifier {
    fn new() -> Self {
        TrustAllVerifier {
            schemes: rustls::crypto::aws_lc_rs::default_provider()
                .signature_verification_algorithms
                .supported_schemes(),
        }
    }
}

impl ServerCertVerifier for TrustAllVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &CertificateDer<'_>,
        _dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.schemes.clone()
    }
}
