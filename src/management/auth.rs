use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::RwLock;

use crate::{
    config::Config, error::ResolveError, info, spotify, success, types::AccessToken, warning,
};

/// Owns the client-credentials bearer token.
///
/// The cached token is shared, read-mostly state. Concurrent callers that all
/// observe an expired token may each perform an exchange; every outcome is a
/// valid token and the last write wins. No lock is held across the exchange.
pub struct TokenManager {
    client: Client,
    config: Arc<Config>,
    token: RwLock<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(client: Client, config: Arc<Config>) -> Self {
        TokenManager {
            client,
            config,
            token: RwLock::new(None),
        }
    }

    pub async fn get_token(&self) -> Result<AccessToken, ResolveError> {
        self.get_token_at(Utc::now()).await
    }

    /// Returns the cached token if it is still valid at `now`, otherwise
    /// performs one exchange.
    ///
    /// A failed exchange leaves the cache untouched, so a token that is still
    /// inside its validity window is never invalidated by a failed refresh.
    pub async fn get_token_at(&self, now: DateTime<Utc>) -> Result<AccessToken, ResolveError> {
        if let Some(token) = self.current_at(now).await {
            return Ok(token);
        }

        let credentials = self.config.credentials.as_ref().ok_or_else(|| {
            ResolveError::Auth(
                "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set".to_string(),
            )
        })?;

        info!("Requesting Spotify access token...");
        let token = match spotify::auth::request_token(&self.client, &self.config, credentials)
            .await
        {
            Ok(token) => token,
            Err(e) => {
                warning!("Token exchange failed: {}", e);
                return Err(e);
            }
        };

        *self.token.write().await = Some(token.clone());
        success!("Access token obtained, valid until {}", token.expires_at);
        Ok(token)
    }

    /// The cached token, if it is valid at `now`.
    pub async fn current_at(&self, now: DateTime<Utc>) -> Option<AccessToken> {
        self.token
            .read()
            .await
            .as_ref()
            .filter(|t| t.is_valid_at(now))
            .cloned()
    }

    /// Drops a token the provider has refused, so the next call re-exchanges.
    ///
    /// Only the rejected value is dropped; a newer token stored meanwhile by a
    /// concurrent refresh is kept.
    pub async fn invalidate(&self, rejected: &AccessToken) {
        let mut lock = self.token.write().await;
        if lock.as_ref().is_some_and(|t| t.value == rejected.value) {
            *lock = None;
        }
    }
}
