//! Error types for Warden

use thiserror::Error;

/// Result type for Warden operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Warden
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TLS error
    #[error("TLS error: {0}")]
    Tls(#[from] warden_tls::ResolveError),
}
