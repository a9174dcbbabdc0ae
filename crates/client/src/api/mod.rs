//! HTTP gateway for the catalog backend.
//!
//! All requests share one [`reqwest::Client`] and one [`SessionStore`].
//! Endpoint paths are joined onto the configured base URL, the bearer
//! token is attached to every call except login, and responses are
//! decoded through a common envelope check before the typed payload is
//! extracted.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ApiError;
use crate::session::{Session, SessionStore};

mod categories;
mod models;
mod products;
mod users;

pub use products::ProductQuery;

/// Query parameters shared by the paged list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListQuery {
    /// Server-side name filter, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            page: 1,
            limit: 10,
        }
    }
}

/// One page of a listing together with its pagination envelope.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: armoire_core::Pagination,
}

/// Minimal acknowledgement shape every backend response carries.
///
/// Responses that omit `success` are treated as successful since the
/// HTTP status already passed.
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {
    #[serde(default = "ack_success_default")]
    pub(crate) success: bool,
    #[serde(default)]
    pub(crate) message: String,
}

fn ack_success_default() -> bool {
    true
}

/// Catalog backend client.
///
/// Cheap to clone; all clones share the HTTP connection pool and the
/// login session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Base URL with any trailing slash trimmed; paths start with `/`.
    base_url: String,
    sessions: SessionStore,
}

impl ApiClient {
    /// Create a client and restore any persisted session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built, or
    /// `ApiError::Session` if the session file exists but cannot be read.
    pub async fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let sessions = SessionStore::new(config.session_file.clone());
        sessions.restore().await?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
                sessions,
            }),
        })
    }

    /// The current login session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.inner.sessions.current().await
    }

    /// Drop the login session locally. No request is made to the backend.
    pub async fn logout(&self) {
        self.inner.sessions.logout().await;
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Build an unauthenticated request (login only).
    fn request_unauthenticated(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner.http.request(method, self.endpoint(path))
    }

    /// Build a request with the bearer token attached.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotLoggedIn` when no live session exists.
    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self
            .inner
            .sessions
            .bearer_token()
            .await
            .ok_or(ApiError::NotLoggedIn)?;
        Ok(self
            .inner
            .http
            .request(method, self.endpoint(path))
            .bearer_auth(token))
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    /// Send a request and decode the typed payload.
    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: &'static str,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ApiError::RateLimited(retry_after));
        }

        // The backend rejected the token; the stored session is useless now
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.inner.sessions.logout().await;
            return Err(ApiError::Unauthorized);
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            let message = serde_json::from_str::<Ack>(&response_text)
                .map(|ack| ack.message)
                .unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // A 2xx body can still report failure through its success flag
        let ack: Ack = match serde_json::from_str(&response_text) {
            Ok(ack) => ack,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog API response"
                );
                return Err(ApiError::Parse { context, source: e });
            }
        };
        if !ack.success {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: ack.message,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog API response is missing expected fields"
            );
            ApiError::Parse { context, source: e }
        })
    }

    /// Send a request where only the acknowledgement matters.
    async fn send_ok(
        &self,
        builder: RequestBuilder,
        context: &'static str,
    ) -> Result<(), ApiError> {
        let _: Ack = self.send(builder, context).await?;
        Ok(())
    }
}
