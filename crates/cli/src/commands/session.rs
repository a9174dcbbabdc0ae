//! Session commands: login, logout, whoami.
//!
//! # Environment Variables
//!
//! - `ARMOIRE_PASSWORD` - Password fallback when `--password` is not given

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use super::{CliError, store};

/// Log in and persist the session token.
pub async fn login(email: &str, password: Option<String>) -> Result<(), CliError> {
    let store = store().await?;

    let password = password
        .map(SecretString::from)
        .or_else(|| {
            std::env::var("ARMOIRE_PASSWORD")
                .ok()
                .map(SecretString::from)
        })
        .ok_or(CliError::MissingPassword)?;

    let session = store.login(email, password.expose_secret()).await?;

    info!("Logged in as {} ({})", session.user_id, session.role);
    if let Some(expires) = chrono::DateTime::from_timestamp(session.expires_at, 0) {
        info!("Session valid until {expires}");
    }
    Ok(())
}

/// Clear the persisted session.
pub async fn logout() -> Result<(), CliError> {
    let store = store().await?;
    store.logout().await;
    info!("Logged out");
    Ok(())
}

/// Show the current session and fetch the account profile.
pub async fn whoami() -> Result<(), CliError> {
    let store = store().await?;

    let Some(session) = store.session().await else {
        info!("Not logged in");
        return Ok(());
    };

    info!("User id: {}", session.user_id);
    info!("Role: {}", session.role);
    if let Some(expires) = chrono::DateTime::from_timestamp(session.expires_at, 0) {
        info!("Session valid until {expires}");
    }

    let profile = store.client().profile(&session.user_id).await?;
    info!("Name: {}", profile.name);
    info!("Email: {}", profile.email);
    Ok(())
}
