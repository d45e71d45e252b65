//! Vessel Push - push a build artifact to the Vessel distribution service
//!
//! Diagnostic command-line front end for the upload client.

use anyhow::bail;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vessel_push::{ClientConfig, UploadClient, UploadError, UploadRequest, UploadResult};

/// Vessel Push - upload an APK/IPA build to Vessel
#[derive(Parser, Debug)]
#[command(name = "vessel-push")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Account API key
    api_key: String,

    /// Release notes shown to testers
    release_notes: String,

    /// Path to the artifact file (APK/IPA)
    file: PathBuf,

    /// Comma-separated tester group names
    user_groups: Option<String>,

    /// Symbol-mapping file reference
    mapping: Option<String>,

    /// Overwrite an existing build with the same version
    #[arg(long)]
    replace: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Vessel Push v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &args.config {
        Some(path) => {
            let config = ClientConfig::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => ClientConfig::default(),
    };

    let client = UploadClient::new(&config, config.trust_bundle());

    let request = UploadRequest {
        api_key: args.api_key,
        release_notes: args.release_notes,
        file: args.file,
        replace: Some(args.replace),
        user_groups: args.user_groups,
        mapping: args.mapping,
        ..Default::default()
    };

    match client.upload(&request) {
        Ok(result) => {
            if report(result) {
                Ok(())
            } else {
                bail!("service did not accept the upload");
            }
        }
        Err(UploadError::Rejected { status, body }) => {
            error!("upload rejected: HTTP {}", status);
            error!("{}", body);
            bail!("upload rejected with HTTP {}", status);
        }
        Err(err) => Err(err.into()),
    }
}

/// Log the service's verdict; returns whether the upload was accepted.
fn report(result: Option<UploadResult>) -> bool {
    let Some(result) = result else {
        warn!("service returned an empty response");
        return false;
    };

    for warning in result.warnings() {
        warn!("service warning: {}", warning);
    }

    if let Some(fields) = &result.field_errors {
        for (field, messages) in fields {
            for message in messages {
                error!("{}: {}", field, message);
            }
        }
    }

    if result.success {
        if let Some(url) = result.direct_download_url() {
            info!("build available at {}", url);
        }
        true
    } else {
        false
    }
}
