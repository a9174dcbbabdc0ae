//! Command implementations and shared plumbing.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use armoire_client::form::{ImageUpload, SubmitOutcome};
use armoire_client::{ApiClient, ApiError, CatalogStore, Config};
use armoire_core::Pagination;

pub mod categories;
pub mod colors;
pub mod models;
pub mod products;
pub mod session;

pub use categories::CategoryAction;
pub use colors::ColorAction;
pub use models::ModelAction;
pub use products::ProductAction;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Request or session failure from the client.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Missing or malformed environment configuration.
    #[error(transparent)]
    Config(#[from] armoire_client::config::ConfigError),

    /// Filesystem error while reading manifests or images.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed product manifest.
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),

    /// Referenced file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// No password given via flag or ARMOIRE_PASSWORD.
    #[error("Password required: pass --password or set ARMOIRE_PASSWORD")]
    MissingPassword,

    /// Destructive command invoked without --yes.
    #[error("Refusing to delete {0} without --yes")]
    NeedsConfirmation(String),

    /// The draft or arguments failed a client-side check.
    #[error("{0}")]
    InvalidInput(String),
}

/// Build the cached store from environment configuration, restoring any
/// persisted session.
pub(crate) async fn store() -> Result<CatalogStore, CliError> {
    let config = Config::from_env()?;
    let client = ApiClient::new(&config).await?;
    Ok(CatalogStore::new(client))
}

/// Gate for destructive commands.
pub(crate) fn require_yes(yes: bool, what: &str) -> Result<(), CliError> {
    if yes {
        Ok(())
    } else {
        Err(CliError::NeedsConfirmation(what.to_owned()))
    }
}

/// Turn a submit outcome into a command result.
pub(crate) fn expect_saved(outcome: SubmitOutcome) -> Result<(), CliError> {
    match outcome {
        SubmitOutcome::Saved => Ok(()),
        SubmitOutcome::Invalid { message } => Err(CliError::InvalidInput(message)),
        SubmitOutcome::AlreadyInFlight => Err(CliError::InvalidInput(
            "another submission is already running".to_owned(),
        )),
    }
}

/// Read an image file into an upload, deriving the MIME type from its
/// extension.
pub(crate) async fn load_image(path: &Path) -> Result<ImageUpload, CliError> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("image")
        .to_owned();
    Ok(ImageUpload::new(file_name, image_mime(path), data))
}

fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

pub(crate) fn log_pagination(pagination: &Pagination) {
    info!(
        "Page {} of {} ({} total)",
        pagination.page, pagination.total_pages, pagination.total
    );
}
