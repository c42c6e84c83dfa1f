//! Warden TLS Module
//!
//! TLS resolution for listening endpoints:
//! - Plaintext policy (`localhost:` bindings, explicit opt-out)
//! - Ordered search of certificate directories
//! - Key pair and CA bundle loading
//! - rustls / tokio-rustls configuration for listeners

pub mod bundle;
pub mod error;
pub mod inspect;
pub mod manager;
pub mod resolver;
pub mod search_path;
pub mod settings;

#[cfg(test)]
pub(crate) mod testutil;

pub use bundle::{BundlePaths, CA_FILE, CERT_FILE, KEY_FILE};
pub use error::{LoadError, ResolveError};
pub use inspect::{CertificateSummary, InspectError};
pub use manager::{EndpointTls, TlsManager};
pub use resolver::{resolve, tls_optional, TlsResolver, LOCALHOST_PREFIX};
pub use search_path::default_tls_dirs;
pub use settings::TlsSettings;
