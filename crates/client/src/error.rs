//! Error taxonomy for the catalog client.
//!
//! Errors split into three families the callers care about: transport and
//! parse failures, backend rejections that carry a server message, and
//! session problems that require logging in again.

use armoire_core::EmailError;
use thiserror::Error;

use crate::session::SessionError;

/// Errors that can occur when talking to the catalog backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Login was attempted with a structurally invalid email address.
    /// Caught before any request is sent.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Backend rejected the request (non-2xx or `success: false`).
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-provided message, empty when the body had none.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("parse error in {context}: {source}")]
    Parse {
        /// Which response was being decoded.
        context: &'static str,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Backend returned 401; the stored session has been cleared.
    #[error("unauthorized: session cleared, log in again")]
    Unauthorized,

    /// Rate limited by the backend.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// An authenticated call was made without a stored session.
    #[error("not logged in")]
    NotLoggedIn,

    /// Session persistence failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl ApiError {
    /// Operator-facing message for notifications.
    ///
    /// Server messages pass through verbatim when present; otherwise the
    /// copy falls back to a generic line depending on whether the request
    /// reached the backend at all.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_owned(),
            Self::Http(_) | Self::Api { .. } | Self::Parse { .. } | Self::RateLimited(_) => {
                "Request failed. Please try again.".to_owned()
            }
            Self::Unauthorized | Self::NotLoggedIn => {
                "Your session has expired. Please log in again.".to_owned()
            }
            Self::Session(_) => "Something went wrong. Please try again.".to_owned(),
        }
    }
}
