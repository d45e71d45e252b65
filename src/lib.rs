//! Vessel Push Library
//!
//! Client for pushing mobile build artifacts (APK/IPA) to the Vessel beta
//! distribution service.
//!
//! # Features
//!
//! - **Single multipart POST**: one blocking upload per call, no retries
//! - **Bundled trust anchors**: optional Vessel CA certificates layered on
//!   top of the platform trust store
//! - **Proxy support**: optional HTTP proxy with basic-auth credentials
//! - **Typed outcomes**: transport failures, HTTP rejections, and response
//!   parse failures are distinct error variants
//!
//! # Example
//!
//! ```no_run
//! use vessel_push::{ClientConfig, TrustBundle, UploadClient, UploadRequest};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::default();
//!     let client = UploadClient::new(&config, TrustBundle::shared().clone());
//!
//!     let request = UploadRequest {
//!         api_key: "secret".into(),
//!         release_notes: "Nightly build".into(),
//!         file: "target/app-release.apk".into(),
//!         ..Default::default()
//!     };
//!
//!     let result = client.upload(&request)?;
//!     println!("accepted: {:?}", result);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod response;
pub mod trust;

// Re-export commonly used types
pub use client::{ProxySettings, UploadClient, UploadError, UploadRequest};
pub use config::{ClientConfig, ConfigError};
pub use response::{DecodeError, ResponseDecoder, UploadResult};
pub use trust::TrustBundle;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
