//! Configuration type definitions
//!
//! These types represent the runtime configuration for Warden.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;
use warden_tls::{EndpointTls, TlsManager};

/// Environment variable overriding the certificate search directories
pub const TLS_DIRS_ENV: &str = "WARDEN_TLS_DIRS";

/// Root configuration for Warden
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WardenConfig {
    /// Listening endpoints
    #[serde(default)]
    pub listeners: Vec<ListenerConfig>,

    /// Certificate search configuration
    #[serde(default)]
    pub tls: TlsSearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WardenConfig {
    /// Check the configuration for mistakes that would only surface at bind time
    pub fn validate(&self) -> Result<()> {
        if self.listeners.is_empty() {
            return Err(Error::Config("no listeners configured".to_string()));
        }

        let mut seen = HashSet::new();
        for listener in &self.listeners {
            let bind = listener.bind.trim();
            if bind.is_empty() {
                return Err(Error::Config(format!(
                    "listener '{}' has an empty bind address",
                    listener.display_name()
                )));
            }
            match bind.rsplit_once(':') {
                Some((_, port)) if port.parse::<u16>().is_ok() => {}
                _ => {
                    return Err(Error::Config(format!(
                        "bind address '{}' must be host:port",
                        bind
                    )));
                }
            }
            if !seen.insert(bind) {
                return Err(Error::Config(format!("duplicate bind address '{}'", bind)));
            }
        }

        Ok(())
    }

    /// Resolve the TLS settings of every listener, in order.
    ///
    /// Stops at the first listener whose TLS cannot be resolved.
    pub fn resolve_listeners(&self) -> Result<Vec<EndpointTls>> {
        let manager = TlsManager::new(self.tls.resolve_dirs());
        let endpoints = manager.resolve_all(
            self.listeners
                .iter()
                .map(|listener| (listener.bind.as_str(), listener.plaintext)),
        )?;
        Ok(endpoints)
    }
}

/// Listening endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListenerConfig {
    /// Optional label used in logs
    pub name: Option<String>,

    /// `host:port` to bind
    pub bind: String,

    /// Accept plaintext even on a non-local address
    #[serde(default)]
    pub plaintext: bool,
}

impl ListenerConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.bind)
    }
}

/// Certificate search configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TlsSearchConfig {
    /// Candidate directories in priority order
    #[serde(default)]
    pub directories: Option<Vec<PathBuf>>,
}

impl TlsSearchConfig {
    /// Effective search directories: configured list, then `WARDEN_TLS_DIRS`,
    /// then the built-in defaults
    pub fn resolve_dirs(&self) -> Vec<PathBuf> {
        self.resolve_dirs_with(std::env::var_os(TLS_DIRS_ENV))
    }

    pub(crate) fn resolve_dirs_with(&self, env: Option<OsString>) -> Vec<PathBuf> {
        if let Some(dirs) = &self.directories {
            return dirs.clone();
        }
        match env {
            Some(value) if !value.is_empty() => std::env::split_paths(&value).collect(),
            _ => warden_tls::default_tls_dirs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log output formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listener(bind: &str) -> ListenerConfig {
        ListenerConfig {
            name: None,
            bind: bind.to_string(),
            plaintext: false,
        }
    }

    #[test]
    fn test_validate_ok() {
        let config = WardenConfig {
            listeners: vec![listener("localhost:7419"), listener("0.0.0.0:7420")],
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(WardenConfig::default().validate().is_err());

        let config = WardenConfig {
            listeners: vec![listener("  ")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_missing_port() {
        for bind in ["localhost", "0.0.0.0:", "0.0.0.0:http", "host:70000"] {
            let config = WardenConfig {
                listeners: vec![listener(bind)],
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bind} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = WardenConfig {
            listeners: vec![listener("0.0.0.0:7419"), listener("0.0.0.0:7419")],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_dirs_precedence() {
        let explicit = TlsSearchConfig {
            directories: Some(vec![PathBuf::from("/srv/tls")]),
        };
        assert_eq!(
            explicit.resolve_dirs_with(Some(OsString::from("/from/env"))),
            vec![PathBuf::from("/srv/tls")]
        );

        let unset = TlsSearchConfig::default();
        assert_eq!(
            unset.resolve_dirs_with(Some(OsString::from("/from/env"))),
            vec![PathBuf::from("/from/env")]
        );
        assert_eq!(unset.resolve_dirs_with(None), warden_tls::default_tls_dirs());
        assert_eq!(
            unset.resolve_dirs_with(Some(OsString::new())),
            warden_tls::default_tls_dirs()
        );
    }

    #[test]
    fn test_resolve_listeners() {
        let empty = tempfile::tempdir().unwrap();
        let mut plaintext = listener("10.0.0.1:7420");
        plaintext.plaintext = true;
        let config = WardenConfig {
            listeners: vec![listener("localhost:7419"), plaintext],
            tls: TlsSearchConfig {
                directories: Some(vec![empty.path().to_path_buf()]),
            },
            ..Default::default()
        };

        let endpoints = config.resolve_listeners().unwrap();
        assert_eq!(endpoints.len(), 2);
        assert!(endpoints.iter().all(|e| !e.is_tls()));
        assert_eq!(endpoints[1].bind, "10.0.0.1:7420");
    }

    #[test]
    fn test_resolve_listeners_not_found() {
        let empty = tempfile::tempdir().unwrap();
        let config = WardenConfig {
            listeners: vec![listener("localhost:7419"), listener("0.0.0.0:7420")],
            tls: TlsSearchConfig {
                directories: Some(vec![empty.path().to_path_buf()]),
            },
            ..Default::default()
        };

        let err = config.resolve_listeners().unwrap_err();
        match err {
            Error::Tls(warden_tls::ResolveError::NotFound { searched }) => {
                assert_eq!(searched, vec![empty.path().to_path_buf()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_name() {
        let mut l = listener("0.0.0.0:7419");
        assert_eq!(l.display_name(), "0.0.0.0:7419");
        l.name = Some("public".to_string());
        assert_eq!(l.display_name(), "public");
    }
}
