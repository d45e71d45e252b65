//! Upload request data model

use std::path::PathBuf;

/// Everything a single upload needs, owned by the caller.
///
/// The proxy fields are only honored together: a proxy is active when
/// `proxy_host` is non-empty and `proxy_port` is positive, and credentials
/// are attached only when `proxy_user` is additionally non-empty. Stray
/// values in the remaining fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Account API key, sent as the `api_key` form field.
    pub api_key: String,

    /// Release notes shown to testers, sent as `releasenotes`.
    pub release_notes: String,

    /// Path to the artifact (APK/IPA) on the local filesystem.
    pub file: PathBuf,

    /// Overwrite an existing build with the same version identifier.
    /// Unset is treated as `false`.
    pub replace: Option<bool>,

    /// Comma-separated tester group names, sent as `groups` when non-empty.
    pub user_groups: Option<String>,

    /// Comma-separated tester identifiers, sent as `users` when non-empty.
    pub users: Option<String>,

    /// Symbol-mapping file reference, sent as `mapping` when non-empty.
    pub mapping: Option<String>,

    pub proxy_host: Option<String>,
    pub proxy_user: Option<String>,
    pub proxy_pass: Option<String>,
    pub proxy_port: i32,
}

/// Proxy settings derived from an [`UploadRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub host: String,
    pub port: u16,
    /// Basic-auth credentials, present only when a proxy user was given.
    pub credentials: Option<(String, String)>,
}

impl ProxySettings {
    /// Proxy URL in the form `http://host:port`.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl UploadRequest {
    /// The effective proxy for this request, if any.
    pub fn proxy(&self) -> Option<ProxySettings> {
        let host = self.proxy_host.as_deref().unwrap_or("");
        if host.is_empty() || self.proxy_port <= 0 {
            return None;
        }
        let port = u16::try_from(self.proxy_port).ok()?;

        let credentials = match self.proxy_user.as_deref() {
            Some(user) if !user.is_empty() => Some((
                user.to_string(),
                self.proxy_pass.clone().unwrap_or_default(),
            )),
            _ => None,
        };

        Some(ProxySettings {
            host: host.to_string(),
            port,
            credentials,
        })
    }

    /// Literal `"true"`/`"false"` value of the `replace` form field.
    pub fn replace_field(&self) -> &'static str {
        if self.replace.unwrap_or(false) {
            "true"
        } else {
            "false"
        }
    }
}
