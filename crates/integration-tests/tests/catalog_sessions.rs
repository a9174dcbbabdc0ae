//! Integration tests for login, session persistence, and logout.
//!
//! These tests require:
//! - A running catalog backend (`ARMOIRE_API_BASE_URL`)
//! - A test account (`ARMOIRE_TEST_EMAIL` / `ARMOIRE_TEST_PASSWORD`)
//!
//! Run with: cargo test -p armoire-integration-tests -- --ignored

use std::time::Duration;

use armoire_client::{ApiClient, CatalogStore, Config};
use tempfile::TempDir;

/// Base URL for the catalog API (configurable via environment).
fn api_base_url() -> String {
    std::env::var("ARMOIRE_API_BASE_URL")
        .unwrap_or_else(|_| "http://localhost:5000/api/v1".to_string())
}

/// Credentials for the test account.
fn test_credentials() -> (String, String) {
    let email =
        std::env::var("ARMOIRE_TEST_EMAIL").expect("Set ARMOIRE_TEST_EMAIL to run live tests");
    let password = std::env::var("ARMOIRE_TEST_PASSWORD")
        .expect("Set ARMOIRE_TEST_PASSWORD to run live tests");
    (email, password)
}

/// Config pointing at the live backend with a session file under `dir`,
/// so tests never touch the developer's real session.
fn live_config(dir: &TempDir) -> Config {
    Config {
        api_base_url: api_base_url().parse().expect("Invalid ARMOIRE_API_BASE_URL"),
        session_file: dir.path().join("session.json"),
        http_timeout: Duration::from_secs(30),
    }
}

async fn fresh_store(dir: &TempDir) -> CatalogStore {
    dotenvy::dotenv().ok();
    let client = ApiClient::new(&live_config(dir))
        .await
        .expect("Failed to build API client");
    CatalogStore::new(client)
}

fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_login_returns_session() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = fresh_store(&dir).await;
    let (email, password) = test_credentials();

    let session = store
        .login(&email, &password)
        .await
        .expect("Login failed; check ARMOIRE_TEST_EMAIL / ARMOIRE_TEST_PASSWORD");

    assert!(!session.is_expired_at(unix_now()));
    let current = store.session().await.expect("Session missing after login");
    assert_eq!(current.user_id, session.user_id);
}

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_login_rejects_wrong_password() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = fresh_store(&dir).await;
    let (email, _) = test_credentials();

    let result = store.login(&email, "definitely-not-the-password").await;

    assert!(result.is_err(), "Login with a wrong password must fail");
    assert!(
        store.session().await.is_none(),
        "A failed login must not leave a session behind"
    );
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_session_survives_a_new_client() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = fresh_store(&dir).await;
    let (email, password) = test_credentials();

    let session = store.login(&email, &password).await.expect("Login failed");

    // A second client over the same session file restores the login.
    let restored = fresh_store(&dir).await;
    let current = restored
        .session()
        .await
        .expect("Restored client lost the session");
    assert_eq!(current.user_id, session.user_id);
    assert_eq!(current.role, session.role);

    // And it can make authenticated calls without logging in again.
    restored
        .client()
        .profile(&current.user_id)
        .await
        .expect("Restored session could not fetch the profile");
}

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_profile_matches_login_email() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = fresh_store(&dir).await;
    let (email, password) = test_credentials();

    let session = store.login(&email, &password).await.expect("Login failed");
    let profile = store
        .client()
        .profile(&session.user_id)
        .await
        .expect("Failed to fetch profile");

    assert_eq!(profile.email.to_lowercase(), email.to_lowercase());
    assert_eq!(profile.id, session.user_id);
}

// ============================================================================
// Logout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires a running catalog backend and test credentials"]
async fn test_logout_clears_the_session() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = fresh_store(&dir).await;
    let (email, password) = test_credentials();

    store.login(&email, &password).await.expect("Login failed");
    store.logout().await;

    assert!(store.session().await.is_none());

    // The session file is gone too, so a new client starts logged out.
    let next = fresh_store(&dir).await;
    assert!(next.session().await.is_none());
}
