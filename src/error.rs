//! Error taxonomy for track resolution.
//!
//! Every failure is scoped to a single resolution request. Each variant maps
//! to a stable machine-readable code and an HTTP status so the API layer can
//! render `{error, message}` bodies without inspecting the message text.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::types::ErrorBody;

/// Message shown when every resolution path has failed.
pub const MANUAL_ENTRY_MESSAGE: &str =
    "Could not fetch track details from Spotify. Please enter the song and artist manually.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Malformed identifier. Never reaches the network.
    #[error("invalid track id: {0}")]
    Validation(String),

    /// Missing credentials, rejected exchange or a token refused upstream.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("track not found: {0}")]
    NotFound(String),

    #[error("rate limited: {0}")]
    RateLimit(String),

    /// Any other non-2xx status, network failure or timeout.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Proxy, page or title parsing failure on the fallback path.
    #[error("scrape failed: {0}")]
    Scrape(String),
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::Validation(_) => "invalid_track_id",
            ResolveError::Auth(_) => "auth_failed",
            ResolveError::NotFound(_) => "track_not_found",
            ResolveError::RateLimit(_) => "rate_limited",
            ResolveError::Upstream(_) => "upstream_error",
            ResolveError::Scrape(_) => "scrape_failed",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::Validation(_) => StatusCode::BAD_REQUEST,
            ResolveError::Auth(_) => StatusCode::UNAUTHORIZED,
            ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
            ResolveError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            ResolveError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ResolveError::Scrape(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ResolveError::Validation(m)
            | ResolveError::Auth(m)
            | ResolveError::NotFound(m)
            | ResolveError::RateLimit(m)
            | ResolveError::Upstream(m)
            | ResolveError::Scrape(m) => m,
        }
    }

    /// Classifies a non-2xx upstream status.
    pub fn from_status(status: reqwest::StatusCode, context: &str) -> Self {
        match status {
            reqwest::StatusCode::UNAUTHORIZED => {
                ResolveError::Auth(format!("{context}: access token rejected"))
            }
            reqwest::StatusCode::NOT_FOUND => {
                ResolveError::NotFound(format!("{context}: no such track"))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => {
                ResolveError::RateLimit(format!("{context}: too many requests"))
            }
            other => ResolveError::Upstream(format!("{context}: HTTP {other}")),
        }
    }

    /// Network, timeout and decoding failures all count as upstream errors.
    pub fn from_transport(err: reqwest::Error, context: &str) -> Self {
        if err.is_timeout() {
            ResolveError::Upstream(format!("{context}: request timed out"))
        } else if let Some(status) = err.status() {
            Self::from_status(status, context)
        } else {
            ResolveError::Upstream(format!("{context}: {err}"))
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code().to_string(),
            message: self.message().to_string(),
        }
    }
}

impl IntoResponse for ResolveError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
