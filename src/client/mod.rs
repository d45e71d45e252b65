//! Upload client
//!
//! One blocking multipart POST per call: build the TLS configuration from
//! the trust bundle, apply the request's proxy settings, send the form, and
//! classify the outcome. A 200 is decoded by [`ResponseDecoder`]; any other
//! status is surfaced as [`UploadError::Rejected`] carrying the status code
//! and the body verbatim. No retries.

use crate::config::ClientConfig;
use crate::response::{DecodeError, ResponseDecoder, UploadResult};
use crate::trust::TrustBundle;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::Client;
use reqwest::{Certificate, Proxy, StatusCode};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

mod request;

pub use request::{ProxySettings, UploadRequest};

/// Upload errors
#[derive(Error, Debug)]
pub enum UploadError {
    /// DNS, connect, TLS handshake, or timeout failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The artifact file could not be read.
    #[error("failed to read artifact {path:?}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A bundled certificate is not valid PEM.
    #[error("invalid trust material: {0}")]
    Trust(#[source] reqwest::Error),

    /// The service answered with a status other than 200.
    #[error("upload rejected with HTTP {status}")]
    Rejected { status: u16, body: String },

    /// The service answered 200 with a body that is not JSON.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Blocking client for the Vessel upload endpoint.
pub struct UploadClient {
    endpoint: String,
    trust: TrustBundle,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl UploadClient {
    /// Create a client for the configured endpoint with the given trust
    /// bundle. The bundle is immutable for the client's lifetime.
    pub fn new(config: &ClientConfig, trust: TrustBundle) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            trust,
            connect_timeout: config.connect_timeout(),
            read_timeout: config.read_timeout(),
        }
    }

    /// Push the artifact described by `request`.
    ///
    /// Returns `Ok(None)` when the service answers 200 with a JSON body that
    /// is not an object. A result with `success == false` is a normal
    /// negative outcome, not an error.
    pub fn upload(&self, request: &UploadRequest) -> Result<Option<UploadResult>, UploadError> {
        let http = self.build_http_client(request)?;
        let form = build_form(request)?;

        info!(
            "uploading {:?} to {} (replace: {})",
            request.file,
            self.endpoint,
            request.replace_field()
        );

        let response = http.post(&self.endpoint).multipart(form).send()?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.text()?;
            debug!("upload rejected: HTTP {} ({} body bytes)", status, body.len());
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes()?;
        Ok(ResponseDecoder::decode(&body)?)
    }

    /// Assemble the per-request HTTP client: platform trust plus any bundled
    /// anchors, proxy routing when the request asks for it, and timeouts.
    fn build_http_client(&self, request: &UploadRequest) -> Result<Client, UploadError> {
        let mut builder = Client::builder()
            .use_rustls_tls()
            .connect_timeout(self.connect_timeout)
            .timeout(self.read_timeout);

        for pem in self.trust.certificates() {
            let cert = Certificate::from_pem(pem).map_err(UploadError::Trust)?;
            builder = builder.add_root_certificate(cert);
        }

        if let Some(proxy) = request.proxy() {
            debug!("routing upload through proxy {}", proxy.url());
            let mut p = Proxy::all(proxy.url())?;
            if let Some((user, pass)) = &proxy.credentials {
                p = p.basic_auth(user, pass);
            }
            builder = builder.proxy(p);
        }

        Ok(builder.build()?)
    }
}

/// Multipart body with the service's fixed field-name set. Optional fields
/// are attached only when non-empty.
fn build_form(request: &UploadRequest) -> Result<Form, UploadError> {
    let mut form = Form::new()
        .text("api_key", request.api_key.clone())
        .text("releasenotes", request.release_notes.clone())
        .file("file", &request.file)
        .map_err(|source| UploadError::Artifact {
            path: request.file.clone(),
            source,
        })?
        .text("replace", request.replace_field());

    if let Some(users) = non_empty(&request.users) {
        form = form.text("users", users);
    }
    if let Some(groups) = non_empty(&request.user_groups) {
        form = form.text("groups", groups);
    }
    if let Some(mapping) = non_empty(&request.mapping) {
        form = form.text("mapping", mapping);
    }

    Ok(form)
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_is_an_artifact_error() {
        let request = UploadRequest {
            api_key: "key".into(),
            file: "/nonexistent/app.apk".into(),
            ..Default::default()
        };
        let err = build_form(&request).unwrap_err();
        assert!(matches!(err, UploadError::Artifact { .. }));
    }

    #[test]
    fn empty_optional_fields_are_dropped() {
        assert_eq!(non_empty(&None), None);
        assert_eq!(non_empty(&Some(String::new())), None);
        assert_eq!(non_empty(&Some("qa".into())), Some("qa".to_string()));
    }
}
