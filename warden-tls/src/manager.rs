//! TLS Manager
//!
//! 🛡️ Resolves the TLS settings of every configured endpoint at startup.

use crate::error::ResolveError;
use crate::resolver::TlsResolver;
use crate::settings::TlsSettings;
use std::path::PathBuf;

/// Resolution outcome for one endpoint
#[derive(Debug)]
pub struct EndpointTls {
    pub bind: String,
    /// `None` when the endpoint accepts plaintext
    pub settings: Option<TlsSettings>,
}

impl EndpointTls {
    pub fn is_tls(&self) -> bool {
        self.settings.is_some()
    }
}

/// 🛡️ TLS Manager for Warden endpoints
#[derive(Debug, Clone, Default)]
pub struct TlsManager {
    resolver: TlsResolver,
}

impl TlsManager {
    /// Create a manager searching `dirs` in order
    pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            resolver: TlsResolver::new(dirs),
        }
    }

    pub fn resolver(&self) -> &TlsResolver {
        &self.resolver
    }

    /// 🔍 Resolve one endpoint, logging the outcome
    pub fn resolve_endpoint(
        &self,
        bind: &str,
        force_plaintext: bool,
    ) -> Result<EndpointTls, ResolveError> {
        tracing::debug!(bind, force_plaintext, dirs = ?self.resolver.dirs(), "🔍 Resolving TLS");

        match self.resolver.resolve(bind, force_plaintext) {
            Ok(None) => {
                tracing::info!(bind, "🔓 Plaintext allowed");
                Ok(EndpointTls {
                    bind: bind.to_string(),
                    settings: None,
                })
            }
            Ok(Some(settings)) => {
                tracing::info!(
                    bind,
                    source = %settings.source_dir().display(),
                    chain_len = settings.certificate_chain().len(),
                    custom_ca = settings.has_custom_roots(),
                    "🔐 TLS enabled"
                );
                Ok(EndpointTls {
                    bind: bind.to_string(),
                    settings: Some(settings),
                })
            }
            Err(e) => {
                tracing::error!(bind, error = %e, "❌ TLS resolution failed");
                Err(e)
            }
        }
    }

    /// Resolve every `(bind, force_plaintext)` pair, stopping at the first failure
    pub fn resolve_all<'a>(
        &self,
        endpoints: impl IntoIterator<Item = (&'a str, bool)>,
    ) -> Result<Vec<EndpointTls>, ResolveError> {
        endpoints
            .into_iter()
            .map(|(bind, plaintext)| self.resolve_endpoint(bind, plaintext))
            .collect()
    }
}
