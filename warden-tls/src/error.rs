//! Error types for TLS resolution

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while resolving the TLS settings of an endpoint
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Existence check or read failed for a reason other than "not found"
    #[error("💥 Filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A matched directory holds a certificate that could not be loaded
    #[error("🔑 Failed to load TLS key pair from {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// The CA bundle contains no usable authority certificate
    #[error("📜 No valid CA certificate in {}", .path.display())]
    InvalidAuthorityBundle { path: PathBuf },

    /// TLS is required but no candidate directory holds a certificate
    #[error("🔍 TLS certificates not found in [{}]", DisplayDirs(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// rustls rejected the loaded material
    #[error("⚠️ Invalid TLS server configuration: {0}")]
    ServerConfig(#[from] rustls::Error),

    /// The client certificate verifier could not be built from the CA bundle
    #[error("⚠️ Invalid client verifier: {0}")]
    ClientVerifier(#[from] rustls::server::VerifierBuilderError),

    /// Client authentication was requested without a custom CA bundle
    #[error("⚠️ Client authentication requires a CA bundle in {}", .path.display())]
    MissingClientRoots { path: PathBuf },
}

impl ResolveError {
    /// Directories searched before giving up, if this is a not-found error
    pub fn searched(&self) -> Option<&[PathBuf]> {
        match self {
            Self::NotFound { searched } => Some(searched),
            _ => None,
        }
    }
}

/// Reasons a certificate/key pair fails to load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed PEM in {}: {source}", .path.display())]
    Pem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificate found in {}", .path.display())]
    NoCertificate { path: PathBuf },

    #[error("no private key found in {}", .path.display())]
    NoPrivateKey { path: PathBuf },

    #[error("unsupported private key: {0}")]
    UnsupportedKey(#[source] rustls::Error),

    #[error("private key does not match certificate: {0}")]
    KeyMismatch(#[source] rustls::Error),
}

struct DisplayDirs<'a>(&'a [PathBuf]);

impl fmt::Display for DisplayDirs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, dir) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", dir.display())?;
        }
        Ok(())
    }
}
