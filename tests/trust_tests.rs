// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for trust-policy construction and TLS lookups.
//!
//! These tests exercise the three trust modes end to end against an
//! in-process TLS stub agent: pinned trust stores (PEM and PKCS#12),
//! trust-everything, and the system default, plus the construction-time
//! failure paths.

use consulcfg::adapters::ConsulGateway;
use consulcfg::domain::{AgentConfig, GatewayError};
use consulcfg::ports::ConfigGateway;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{ServerConfig, ServerConnection, StreamOwned};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const ENTRY_BODY: &str = r#"[{"key":"app/greeting","value":"aGVsbG8="}]"#;

/// Ephemeral TLS material for a stub agent.
struct TlsFixture {
    cert_pem: String,
    cert_der: CertificateDer<'static>,
    key_der: Vec<u8>,
}

fn generate_tls_fixture() -> TlsFixture {
    let rcgen::CertifiedKey { cert, signing_key } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    TlsFixture {
        cert_pem: cert.pem(),
        cert_der: CertificateDer::from(cert),
        key_der: signing_key.serialize_der(),
    }
}

/// Starts a one-shot TLS stub that answers any request with `ENTRY_BODY`.
///
/// Handshake failures are expected in the negative tests, so the server
/// thread never panics on I/O errors.
fn start_tls_server(fixture: &TlsFixture) -> (SocketAddr, thread::JoinHandle<()>) {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    let config = ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(
            vec![fixture.cert_der.clone()],
            PrivateKeyDer::from(PrivatePkcs8KeyDer::from(fixture.key_der.clone())),
        )
        .unwrap();
    let config = Arc::new(config);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        if let Ok((tcp, _)) = listener.accept() {
            let conn = ServerConnection::new(config).unwrap();
            let mut stream = StreamOwned::new(conn, tcp);
            let mut buf = [0u8; 2048];
            if stream.read(&mut buf).is_ok() {
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                    ENTRY_BODY.len(),
                    ENTRY_BODY
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        }
    });
    (addr, handle)
}

fn https_config(addr: SocketAddr) -> AgentConfig {
    AgentConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        use_https: true,
        connection_timeout: Duration::from_secs(2),
        read_timeout: Duration::from_secs(2),
        ..AgentConfig::default()
    }
}

fn write_pem_store(dir: &TempDir, pem: &str) -> PathBuf {
    let path = dir.path().join("agent-ca.pem");
    std::fs::write(&path, pem).unwrap();
    path
}

fn write_pkcs12_store(dir: &TempDir, fixture: &TlsFixture, password: &str) -> PathBuf {
    let pfx = p12::PFX::new(
        fixture.cert_der.as_ref(),
        &fixture.key_der,
        None,
        password,
        "consul-agent",
    )
    .unwrap();
    let path = dir.path().join("agent-ca.p12");
    std::fs::write(&path, pfx.to_der()).unwrap();
    path
}

#[test]
fn test_pinned_pem_lookup_succeeds_without_matching_hostname() {
    let fixture = generate_tls_fixture();
    let (addr, handle) = start_tls_server(&fixture);
    let dir = TempDir::new().unwrap();

    // The certificate only names "localhost"; the gateway dials the IP.
    // Pinned trust waives the server-name check, so this must succeed.
    let config = AgentConfig {
        key_store: Some(write_pem_store(&dir, &fixture.cert_pem)),
        ..https_config(addr)
    };
    let gateway = ConsulGateway::new(config).unwrap();
    assert_eq!(gateway.trust_policy().name(), "pinned");

    let entry = gateway.lookup("app/greeting").unwrap().unwrap();
    handle.join().unwrap();

    assert_eq!(entry.key, "app/greeting");
    assert_eq!(entry.decoded_value().unwrap(), Some(b"hello".to_vec()));
}

#[test]
fn test_pinned_trust_rejects_other_certificates() {
    let server_fixture = generate_tls_fixture();
    let pinned_fixture = generate_tls_fixture();
    let (addr, handle) = start_tls_server(&server_fixture);
    let dir = TempDir::new().unwrap();

    // The store pins a certificate the server does not present.
    let config = AgentConfig {
        key_store: Some(write_pem_store(&dir, &pinned_fixture.cert_pem)),
        ..https_config(addr)
    };
    let gateway = ConsulGateway::new(config).unwrap();

    let err = gateway.lookup("app/greeting").unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, GatewayError::Transport { .. }), "{err:?}");
}

#[test]
fn test_trust_all_lookup_succeeds_against_self_signed_agent() {
    let fixture = generate_tls_fixture();
    let (addr, handle) = start_tls_server(&fixture);

    let config = AgentConfig {
        trust_certs: true,
        ..https_config(addr)
    };
    let gateway = ConsulGateway::new(config).unwrap();
    assert_eq!(gateway.trust_policy().name(), "trust-all");

    let entry = gateway.lookup("app/greeting").unwrap().unwrap();
    handle.join().unwrap();

    assert_eq!(entry.key, "app/greeting");
}

#[test]
fn test_system_default_rejects_self_signed_agent() {
    let fixture = generate_tls_fixture();
    let (addr, handle) = start_tls_server(&fixture);

    let gateway = ConsulGateway::new(https_config(addr)).unwrap();
    assert_eq!(gateway.trust_policy().name(), "system-default");

    let err = gateway.lookup("app/greeting").unwrap_err();
    handle.join().unwrap();

    assert!(matches!(err, GatewayError::Transport { .. }), "{err:?}");
}

#[test]
fn test_pkcs12_store_with_correct_password() {
    let fixture = generate_tls_fixture();
    let (addr, handle) = start_tls_server(&fixture);
    let dir = TempDir::new().unwrap();

    let config = AgentConfig {
        key_store: Some(write_pkcs12_store(&dir, &fixture, "changeit")),
        key_store_password: Some("changeit".to_string()),
        ..https_config(addr)
    };
    let gateway = ConsulGateway::new(config).unwrap();
    assert_eq!(gateway.trust_policy().name(), "pinned");

    let entry = gateway.lookup("app/greeting").unwrap().unwrap();
    handle.join().unwrap();

    assert_eq!(entry.key, "app/greeting");
}

#[test]
fn test_pkcs12_store_with_wrong_password_fails_construction() {
    let fixture = generate_tls_fixture();
    let dir = TempDir::new().unwrap();

    let config = AgentConfig {
        key_store: Some(write_pkcs12_store(&dir, &fixture, "changeit")),
        key_store_password: Some("wrong".to_string()),
        ..AgentConfig::default()
    };
    let err = ConsulGateway::new(config).unwrap_err();

    assert!(matches!(err, GatewayError::TrustInit { .. }), "{err:?}");
    assert!(err.to_string().contains("password verification failed"));
}

#[test]
fn test_missing_store_fails_construction() {
    let config = AgentConfig {
        key_store: Some(PathBuf::from("/definitely/not/a/real/store.pem")),
        ..AgentConfig::default()
    };
    let err = ConsulGateway::new(config).unwrap_err();
    assert!(matches!(err, GatewayError::TrustInit { .. }), "{err:?}");
}
