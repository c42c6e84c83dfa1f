//! TLS resolution for a listening endpoint
//!
//! 🛡️ Decides whether an endpoint may run in plaintext and, when it may not,
//! loads the first certificate bundle found in the candidate directories.
//!
//! There is deliberately no switch to turn TLS off for a non-local address:
//! only `localhost:` bindings and an explicit plaintext request skip it.

use crate::bundle::{self, BundlePaths};
use crate::error::ResolveError;
use crate::settings::{self, TlsSettings};
use std::path::{Path, PathBuf};

/// Bind addresses starting with this prefix never require TLS
pub const LOCALHOST_PREFIX: &str = "localhost:";

/// Whether an endpoint bound to `bind` may accept plaintext connections
pub fn tls_optional(bind: &str, force_plaintext: bool) -> bool {
    bind.starts_with(LOCALHOST_PREFIX) || force_plaintext
}

/// Resolve the TLS settings for `bind`.
///
/// Returns `Ok(None)` when plaintext is allowed, the settings loaded from the
/// first directory containing `public.crt` otherwise. A directory that has a
/// certificate but fails to load is an error; later directories are not
/// consulted.
pub fn resolve<P: AsRef<Path>>(
    bind: &str,
    force_plaintext: bool,
    dirs: &[P],
) -> Result<Option<TlsSettings>, ResolveError> {
    if tls_optional(bind, force_plaintext) {
        return Ok(None);
    }

    for dir in dirs {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() {
            continue;
        }
        if let Some(settings) = load_dir(dir)? {
            return Ok(Some(settings));
        }
    }

    Err(ResolveError::NotFound {
        searched: dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
    })
}

/// Load the bundle in `dir`, or `None` if it has no `public.crt`
fn load_dir(dir: &Path) -> Result<Option<TlsSettings>, ResolveError> {
    let paths = BundlePaths::new(dir);
    if !bundle::file_exists(&paths.cert)? {
        return Ok(None);
    }

    let pair = bundle::load_key_pair(&paths.cert, &paths.key, &settings::provider())
        .map_err(|source| ResolveError::Load {
            path: paths.dir.clone(),
            source,
        })?;

    let roots = if bundle::file_exists(&paths.ca)? {
        Some(bundle::load_authorities(&paths.ca)?)
    } else {
        None
    };

    Ok(Some(TlsSettings::new(pair.chain, pair.key, roots, paths.dir)))
}

/// 🛡️ Resolver bound to an ordered list of candidate directories
#[derive(Debug, Clone, Default)]
pub struct TlsResolver {
    dirs: Vec<PathBuf>,
}

impl TlsResolver {
    pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolver over [`default_tls_dirs`](crate::search_path::default_tls_dirs)
    pub fn with_default_dirs() -> Self {
        Self::new(crate::search_path::default_tls_dirs())
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn resolve(
        &self,
        bind: &str,
        force_plaintext: bool,
    ) -> Result<Option<TlsSettings>, ResolveError> {
        resolve(bind, force_plaintext, &self.dirs)
    }
}
