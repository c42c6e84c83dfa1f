//! Resolved TLS settings for one endpoint
//!
//! 🔐 Holds the loaded key pair and the optional custom root store, and turns
//! them into the rustls configuration a listener installs.

use crate::error::ResolveError;
use crate::inspect::CertificateSummary;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{RootCertStore, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;

/// Crypto provider used for key loading and server configs
pub(crate) fn provider() -> Arc<CryptoProvider> {
    Arc::new(rustls::crypto::ring::default_provider())
}

/// 🔐 TLS settings loaded from a certificate bundle
#[derive(Debug)]
pub struct TlsSettings {
    chain: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
    roots: Option<Arc<RootCertStore>>,
    source_dir: PathBuf,
}

impl TlsSettings {
    pub(crate) fn new(
        chain: Vec<CertificateDer<'static>>,
        key: PrivateKeyDer<'static>,
        roots: Option<RootCertStore>,
        source_dir: PathBuf,
    ) -> Self {
        Self {
            chain,
            key,
            roots: roots.map(Arc::new),
            source_dir,
        }
    }

    /// Server certificate followed by any intermediates
    pub fn certificate_chain(&self) -> &[CertificateDer<'static>] {
        &self.chain
    }

    pub fn private_key(&self) -> &PrivateKeyDer<'static> {
        &self.key
    }

    /// Custom trust store from `ca.crt`; `None` means the platform default
    pub fn root_store(&self) -> Option<&Arc<RootCertStore>> {
        self.roots.as_ref()
    }

    pub fn has_custom_roots(&self) -> bool {
        self.roots.is_some()
    }

    /// Directory the bundle was loaded from
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Summary of the leaf certificate
    pub fn leaf_summary(&self) -> Option<CertificateSummary> {
        self.chain
            .first()
            .and_then(|der| CertificateSummary::from_der(der).ok())
    }

    /// Build a rustls server config.
    ///
    /// With a custom root store, client certificates that are presented get
    /// verified against it, but clients without one are still admitted.
    pub fn server_config(&self) -> Result<ServerConfig, ResolveError> {
        let provider = provider();
        let builder = ServerConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?;

        let config = match &self.roots {
            Some(roots) => {
                let verifier = WebPkiClientVerifier::builder_with_provider(roots.clone(), provider)
                    .allow_unauthenticated()
                    .build()?;
                builder
                    .with_client_cert_verifier(verifier)
                    .with_single_cert(self.chain.clone(), self.key.clone_key())?
            }
            None => builder
                .with_no_client_auth()
                .with_single_cert(self.chain.clone(), self.key.clone_key())?,
        };

        Ok(config)
    }

    /// Build a rustls server config that rejects clients without a
    /// certificate issued by the custom root store.
    pub fn server_config_requiring_client_auth(&self) -> Result<ServerConfig, ResolveError> {
        let roots = self
            .roots
            .clone()
            .ok_or_else(|| ResolveError::MissingClientRoots {
                path: self.source_dir.join(crate::bundle::CA_FILE),
            })?;

        let provider = provider();
        let verifier = WebPkiClientVerifier::builder_with_provider(roots, provider.clone())
            .build()?;

        let config = ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_client_cert_verifier(verifier)
            .with_single_cert(self.chain.clone(), self.key.clone_key())?;

        Ok(config)
    }

    /// 🚀 Acceptor for a tokio listener
    pub fn acceptor(&self) -> Result<TlsAcceptor, ResolveError> {
        Ok(TlsAcceptor::from(Arc::new(self.server_config()?)))
    }
}
