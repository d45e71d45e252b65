//! Trust material for the Vessel TLS endpoint
//!
//! The service certificate chains to a CA that is not present in every
//! platform trust store, so deployments may ship one or two PEM certificates
//! (primary CA and an intermediate) alongside the client. A [`TrustBundle`]
//! holds whichever of the two could be read; missing or unreadable files
//! degrade the bundle instead of failing the client.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// File name of the primary CA certificate under the trust root.
pub const PRIMARY_CA_FILE: &str = "ca.pem";

/// File name of the intermediate (sub) CA certificate under the trust root.
pub const SECONDARY_CA_FILE: &str = "sub.class1.server.ca.pem";

/// Default deployment-local directory holding the bundled certificates.
pub const DEFAULT_TRUST_ROOT: &str = "/usr/local/share/vessel/certs";

static SHARED: OnceLock<TrustBundle> = OnceLock::new();

/// An immutable set of zero, one, or two PEM-encoded trust anchors.
///
/// The bundle is loaded once and never mutated afterwards; a failed read is
/// not retried. Certificates are exposed as raw byte buffers so the HTTP
/// layer can turn them into whatever its TLS stack needs.
#[derive(Debug, Clone, Default)]
pub struct TrustBundle {
    primary: Option<Vec<u8>>,
    secondary: Option<Vec<u8>>,
}

impl TrustBundle {
    /// Load both certificates from `root`.
    ///
    /// Each file is independently optional; absence is logged and yields a
    /// smaller bundle, never an error.
    pub fn load<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            primary: read_cert(root, PRIMARY_CA_FILE),
            secondary: read_cert(root, SECONDARY_CA_FILE),
        }
    }

    /// A bundle with no extra trust anchors (platform default trust only).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Process-wide bundle for [`DEFAULT_TRUST_ROOT`].
    ///
    /// Initialized exactly once; concurrent first callers observe the same
    /// bundle.
    pub fn shared() -> &'static TrustBundle {
        SHARED.get_or_init(|| TrustBundle::load(DEFAULT_TRUST_ROOT))
    }

    /// The primary CA certificate, if it could be read.
    pub fn primary(&self) -> Option<&[u8]> {
        self.primary.as_deref()
    }

    /// The intermediate CA certificate, if it could be read.
    pub fn secondary(&self) -> Option<&[u8]> {
        self.secondary.as_deref()
    }

    /// Certificates in load order (primary first).
    pub fn certificates(&self) -> impl Iterator<Item = &[u8]> {
        self.primary.as_deref().into_iter().chain(self.secondary.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }
}

fn read_cert(root: &Path, name: &str) -> Option<Vec<u8>> {
    let path = root.join(name);
    match fs::read(&path) {
        Ok(bytes) => {
            debug!("loaded trust anchor from {:?} ({} bytes)", path, bytes.len());
            Some(bytes)
        }
        Err(err) => {
            warn!(
                "trust anchor {:?} unavailable ({}), continuing with platform trust",
                path, err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_root_yields_empty_bundle() {
        let bundle = TrustBundle::load("/nonexistent/vessel/certs");
        assert!(bundle.is_empty());
        assert_eq!(bundle.certificates().count(), 0);
    }

    #[test]
    fn empty_bundle_has_no_certificates() {
        let bundle = TrustBundle::empty();
        assert!(bundle.primary().is_none());
        assert!(bundle.secondary().is_none());
    }
}
