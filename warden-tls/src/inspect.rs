//! Certificate inspection for diagnostics

use thiserror::Error;
use x509_parser::extensions::GeneralName;
use x509_parser::prelude::{FromDer, X509Certificate};

#[derive(Debug, Error)]
#[error("📜 Invalid X.509 certificate: {0}")]
pub struct InspectError(String);

/// Human-readable facts about a certificate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateSummary {
    pub subject: String,
    pub issuer: String,
    /// Hex serial number, colon separated
    pub serial: String,
    /// Unix timestamps
    pub not_before: i64,
    pub not_after: i64,
    /// DNS subject alternative names
    pub dns_names: Vec<String>,
}

impl CertificateSummary {
    pub fn from_der(der: &[u8]) -> Result<Self, InspectError> {
        let (_, cert) =
            X509Certificate::from_der(der).map_err(|e| InspectError(e.to_string()))?;

        let mut dns_names = Vec::new();
        if let Ok(Some(san)) = cert.subject_alternative_name() {
            for name in san.value.general_names.iter() {
                if let GeneralName::DNSName(dns) = name {
                    dns_names.push(dns.to_string());
                }
            }
        }

        Ok(Self {
            subject: cert.subject().to_string(),
            issuer: cert.issuer().to_string(),
            serial: cert.raw_serial_as_string(),
            not_before: cert.validity().not_before.timestamp(),
            not_after: cert.validity().not_after.timestamp(),
            dns_names,
        })
    }

    /// Seconds until expiry relative to `now` (negative once expired)
    pub fn seconds_until_expiry(&self, now: i64) -> i64 {
        self.not_after - now
    }
}
