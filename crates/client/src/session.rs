//! Persistent login session for the catalog backend.
//!
//! A successful login yields a bearer token whose JWT claims carry the user
//! id, role, and expiry. The token is held in memory for the life of the
//! process and mirrored to a session file so later invocations stay logged
//! in until the token expires.
//!
//! Claims are only inspected client-side to know who is logged in and when
//! the token lapses. The backend verifies signatures on every request, so
//! decoding here deliberately skips signature validation.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use armoire_core::{Role, UserId};
use jsonwebtoken::{DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Errors raised while persisting or restoring a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read or write session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode session token: {0}")]
    TokenDecode(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by the backend's bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id the token was issued for.
    pub id: UserId,
    /// Role encoded at issue time.
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl TokenClaims {
    /// Decode claims from a bearer token without verifying its signature.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::TokenDecode` if the token is not a parseable
    /// JWT or its payload lacks the expected claims.
    pub fn decode(token: &str) -> Result<Self, SessionError> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims = HashSet::new();

        let data = jsonwebtoken::decode::<Self>(token, &DecodingKey::from_secret(b""), &validation)?;
        Ok(data.claims)
    }
}

/// An authenticated session.
#[derive(Clone)]
pub struct Session {
    /// Bearer token sent on authenticated requests.
    pub token: SecretString,
    /// Logged-in user id.
    pub user_id: UserId,
    /// Role decoded from the token.
    pub role: Role,
    /// Token expiry, seconds since the Unix epoch.
    pub expires_at: i64,
}

impl Session {
    /// Whether the token has lapsed as of `now` (seconds since epoch).
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at < now
    }
}

// Manual Debug implementation to prevent token leakage in logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// On-disk shape of the session file.
#[derive(Serialize, Deserialize)]
struct SessionFile {
    token: String,
    user_id: UserId,
}

/// In-memory session holder backed by a session file.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Create a store over `path` without touching the filesystem.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            current: RwLock::new(None),
        }
    }

    /// Restore a previously persisted session, if one is still valid.
    ///
    /// An unreadable, undecodable, or expired session file is removed and
    /// treated as "not logged in" rather than surfaced as an error.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` only for filesystem failures other than
    /// the file being absent.
    pub async fn restore(&self) -> Result<Option<Session>, SessionError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionError::Io(e)),
        };

        let Ok(file) = serde_json::from_str::<SessionFile>(&contents) else {
            warn!("Session file is malformed, removing it");
            let _ = std::fs::remove_file(&self.path);
            return Ok(None);
        };

        let Ok(claims) = TokenClaims::decode(&file.token) else {
            warn!("Persisted token is not decodable, removing session file");
            let _ = std::fs::remove_file(&self.path);
            return Ok(None);
        };

        let session = Session {
            token: SecretString::from(file.token),
            user_id: file.user_id,
            role: claims.role,
            expires_at: claims.exp,
        };

        if session.is_expired_at(chrono::Utc::now().timestamp()) {
            debug!("Persisted session has expired, removing session file");
            let _ = std::fs::remove_file(&self.path);
            return Ok(None);
        }

        *self.current.write().await = Some(session.clone());
        Ok(Some(session))
    }

    /// Record a fresh login and persist it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::TokenDecode` if the token's claims cannot be
    /// read, or `SessionError::Io` if the session file cannot be written.
    pub async fn login(&self, token: String, user_id: UserId) -> Result<Session, SessionError> {
        let claims = TokenClaims::decode(&token)?;

        let file = SessionFile {
            token: token.clone(),
            user_id: user_id.clone(),
        };
        // serde_json::to_string on this struct cannot fail
        let contents =
            serde_json::to_string_pretty(&file).map_err(|e| SessionError::Io(e.into()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_restricted(&self.path, &contents)?;

        let session = Session {
            token: SecretString::from(token),
            user_id,
            role: claims.role,
            expires_at: claims.exp,
        };
        *self.current.write().await = Some(session.clone());
        Ok(session)
    }

    /// Forget the session in memory and on disk.
    ///
    /// Purely local, no request is made to the backend.
    pub async fn logout(&self) {
        *self.current.write().await = None;
        let _ = std::fs::remove_file(&self.path);
    }

    /// The live session, if any.
    ///
    /// A session observed to be expired is cleared as if logged out.
    pub async fn current(&self) -> Option<Session> {
        let now = chrono::Utc::now().timestamp();
        {
            let guard = self.current.read().await;
            match guard.as_ref() {
                None => return None,
                Some(session) if !session.is_expired_at(now) => return Some(session.clone()),
                Some(_) => {}
            }
        }
        debug!("Session expired, logging out");
        self.logout().await;
        None
    }

    /// The current bearer token, exposed for header construction.
    pub async fn bearer_token(&self) -> Option<String> {
        self.current()
            .await
            .map(|session| session.token.expose_secret().to_string())
    }
}

#[cfg(unix)]
fn write_restricted(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_restricted(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents)
}
