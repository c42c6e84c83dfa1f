//! Certificate bundle loading
//!
//! 📂 A bundle is the set of PEM files kept in one candidate directory.

use crate::error::{LoadError, ResolveError};
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::sign::CertifiedKey;
use rustls::{InconsistentKeys, RootCertStore};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Server certificate (possibly a chain)
pub const CERT_FILE: &str = "public.crt";
/// Private key paired with [`CERT_FILE`]
pub const KEY_FILE: &str = "private.key";
/// Optional certificate-authority bundle
pub const CA_FILE: &str = "ca.crt";

/// Paths of the bundle files inside one candidate directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePaths {
    pub dir: PathBuf,
    pub cert: PathBuf,
    pub key: PathBuf,
    pub ca: PathBuf,
}

impl BundlePaths {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            dir: dir.to_path_buf(),
            cert: dir.join(CERT_FILE),
            key: dir.join(KEY_FILE),
            ca: dir.join(CA_FILE),
        }
    }
}

/// A loaded certificate chain with the key it was checked against
pub(crate) struct KeyPair {
    pub chain: Vec<CertificateDer<'static>>,
    pub key: PrivateKeyDer<'static>,
}

/// Existence check that only treats "not found" as absence
pub(crate) fn file_exists(path: &Path) -> Result<bool, ResolveError> {
    path.try_exists().map_err(|source| ResolveError::Filesystem {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and cross-check the certificate chain and private key
pub(crate) fn load_key_pair(
    cert_path: &Path,
    key_path: &Path,
    provider: &CryptoProvider,
) -> Result<KeyPair, LoadError> {
    let cert_pem = read(cert_path)?;
    let chain = rustls_pemfile::certs(&mut Cursor::new(&cert_pem))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| LoadError::Pem {
            path: cert_path.to_path_buf(),
            source,
        })?;
    if chain.is_empty() {
        return Err(LoadError::NoCertificate {
            path: cert_path.to_path_buf(),
        });
    }

    let key_pem = read(key_path)?;
    let key = rustls_pemfile::private_key(&mut Cursor::new(&key_pem))
        .map_err(|source| LoadError::Pem {
            path: key_path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| LoadError::NoPrivateKey {
            path: key_path.to_path_buf(),
        })?;

    let signing_key = provider
        .key_provider
        .load_private_key(key.clone_key())
        .map_err(LoadError::UnsupportedKey)?;

    // Keys whose public half the provider cannot expose are accepted as-is.
    match CertifiedKey::new(chain.clone(), signing_key).keys_match() {
        Ok(()) | Err(rustls::Error::InconsistentKeys(InconsistentKeys::Unknown)) => {}
        Err(e) => return Err(LoadError::KeyMismatch(e)),
    }

    Ok(KeyPair { chain, key })
}

/// Build a root store from a PEM bundle.
///
/// Blocks that do not decode to a usable trust anchor are skipped. The bundle
/// is rejected only when nothing could be added.
pub(crate) fn load_authorities(path: &Path) -> Result<RootCertStore, ResolveError> {
    let pem = std::fs::read(path).map_err(|source| ResolveError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;

    let mut roots = RootCertStore::empty();
    let (added, _ignored) = roots.add_parsable_certificates(
        rustls_pemfile::certs(&mut Cursor::new(&pem)).filter_map(|r| r.ok()),
    );
    if added == 0 {
        return Err(ResolveError::InvalidAuthorityBundle {
            path: path.to_path_buf(),
        });
    }

    Ok(roots)
}

fn read(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
