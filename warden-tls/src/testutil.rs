//! Certificate fixtures for tests

use crate::bundle::{CA_FILE, CERT_FILE, KEY_FILE};
use rcgen::{BasicConstraints, CertificateParams, DnType, IsCa, KeyPair};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Base64-valid PEM block that is not a certificate
pub const BOGUS_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";

/// PEM block whose body is not base64 at all
pub const BAD_BASE64_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----\n";

/// PEM block that is never closed
pub const UNTERMINATED_CERT_PEM: &str = "-----BEGIN CERTIFICATE-----\nAAAA\n";

/// Scratch directory holding candidate directories
pub struct Fixture {
    root: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Create (if needed) and return a named subdirectory
    pub fn dir(&self, name: &str) -> PathBuf {
        let dir = self.root.path().join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }
}

/// A throwaway certificate authority
pub struct Authority {
    cert: rcgen::Certificate,
    key: KeyPair,
}

impl Authority {
    pub fn new() -> Self {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        params
            .distinguished_name
            .push(DnType::CommonName, "Warden Test CA");
        let cert = params.self_signed(&key).unwrap();
        Self { cert, key }
    }

    pub fn cert_pem(&self) -> String {
        self.cert.pem()
    }

    pub fn cert_der(&self) -> rustls::pki_types::CertificateDer<'static> {
        self.cert.der().clone()
    }

    /// Issue a `localhost` leaf, returning (cert PEM, key PEM)
    pub fn issue(&self) -> (String, String) {
        let key = KeyPair::generate().unwrap();
        let mut params = CertificateParams::new(vec!["localhost".to_string()]).unwrap();
        params
            .distinguished_name
            .push(DnType::CommonName, "localhost");
        let cert = params.signed_by(&key, &self.cert, &self.key).unwrap();
        (cert.pem(), key.serialize_pem())
    }
}

/// Write `public.crt` and `private.key` issued by `ca` into `dir`
pub fn write_server_bundle(dir: &Path, ca: &Authority) {
    let (cert, key) = ca.issue();
    std::fs::write(dir.join(CERT_FILE), cert).unwrap();
    std::fs::write(dir.join(KEY_FILE), key).unwrap();
}

/// Write `ca.crt` for `ca` into `dir`
pub fn write_ca_bundle(dir: &Path, ca: &Authority) {
    std::fs::write(dir.join(CA_FILE), ca.cert_pem()).unwrap();
}
