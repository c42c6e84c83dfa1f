//! Default certificate search directories

use std::path::PathBuf;

/// System-wide bundle directory
pub const SYSTEM_TLS_DIR: &str = "/etc/warden/tls";

/// Per-user bundle directory, relative to the home directory
pub const USER_TLS_SUBDIR: &str = ".warden/tls";

/// Default candidate directories, user-level first.
///
/// The user directory is left out when the home directory is unknown.
pub fn default_tls_dirs() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(USER_TLS_SUBDIR));
    }
    candidates.push(PathBuf::from(SYSTEM_TLS_DIR));
    candidates
}
