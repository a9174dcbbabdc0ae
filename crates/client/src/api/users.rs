//! Login and profile endpoints.

use armoire_core::{Email, User, UserId};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::session::{Session, TokenClaims};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginEnvelope {
    #[serde(default)]
    message: String,
    token: Option<String>,
    data: Option<User>,
}

#[derive(Deserialize)]
struct ProfileEnvelope {
    data: User,
}

impl ApiClient {
    /// Log in with email and password.
    ///
    /// On success the bearer token is decoded, the session is persisted,
    /// and every later request authenticates with it.
    ///
    /// # Arguments
    ///
    /// * `email` - Account email
    /// * `password` - Account password
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidEmail` for a structurally invalid address
    /// (checked before any request goes out), `ApiError::Api` when the
    /// backend rejects the credentials or answers without a token, and
    /// `ApiError::Session` when the token cannot be decoded or the session
    /// file cannot be written.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let email = Email::parse(email)?;
        let builder = self
            .request_unauthenticated(Method::POST, "/users/login")
            .json(&LoginRequest {
                email: email.as_str(),
                password,
            });
        let envelope: LoginEnvelope = self.send(builder, "login response").await?;

        let Some(token) = envelope.token else {
            let message = if envelope.message.is_empty() {
                "Login failed!".to_string()
            } else {
                envelope.message
            };
            return Err(ApiError::Api {
                status: 200,
                message,
            });
        };

        let user_id = match envelope.data {
            Some(user) => user.id,
            None => TokenClaims::decode(&token)?.id,
        };

        let session = self.inner.sessions.login(token, user_id).await?;
        tracing::info!(user_id = %session.user_id, "Logged in");
        Ok(session)
    }

    /// Fetch a user profile by id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the response cannot be
    /// parsed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn profile(&self, user_id: &UserId) -> Result<User, ApiError> {
        let builder = self
            .request(Method::GET, &format!("/users/{user_id}"))
            .await?;
        let envelope: ProfileEnvelope = self.send(builder, "profile response").await?;
        Ok(envelope.data)
    }
}
