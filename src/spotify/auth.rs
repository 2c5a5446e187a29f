use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    config::Config,
    error::ResolveError,
    types::{AccessToken, Credentials, TokenResponse},
};

/// Performs a single OAuth client-credentials exchange.
///
/// Sends `grant_type=client_credentials` to the configured token endpoint with
/// HTTP Basic authentication built from the client id and secret. There are no
/// retries: any failure, including network errors and timeouts, is reported
/// immediately as [`ResolveError::Auth`].
///
/// The returned token expires `expires_in` seconds after issue minus the
/// configured safety margin.
pub async fn request_token(
    client: &Client,
    config: &Config,
    credentials: &Credentials,
) -> Result<AccessToken, ResolveError> {
    let issued_at = Utc::now();
    let res = client
        .post(&config.token_url)
        .header(AUTHORIZATION, basic_auth_header(credentials))
        .form(&[("grant_type", "client_credentials")])
        .timeout(config.upstream_timeout)
        .send()
        .await
        .map_err(|e| ResolveError::Auth(format!("token exchange failed: {e}")))?;

    let status = res.status();
    if !status.is_success() {
        return Err(ResolveError::Auth(format!(
            "token endpoint rejected the exchange with HTTP {status}"
        )));
    }

    let json: TokenResponse = res
        .json()
        .await
        .map_err(|e| ResolveError::Auth(format!("malformed token response: {e}")))?;

    if json.access_token.is_empty() {
        return Err(ResolveError::Auth("token endpoint returned no token".into()));
    }

    let expires_at = expiry(issued_at, json.expires_in, config.token_margin)
        .ok_or_else(|| ResolveError::Auth("token endpoint returned an expired token".into()))?;

    Ok(AccessToken {
        value: json.access_token,
        expires_at,
    })
}

pub fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(pair))
}

/// Issue time plus TTL minus margin.
///
/// Lifetimes not longer than the margin keep half of the reported TTL so a
/// short-lived token is still usable; a zero TTL yields `None`.
pub fn expiry(issued_at: DateTime<Utc>, expires_in: u64, margin: TimeDelta) -> Option<DateTime<Utc>> {
    let ttl = TimeDelta::try_seconds(i64::try_from(expires_in).ok()?)?;
    if ttl <= TimeDelta::zero() {
        return None;
    }
    let lifetime = if ttl > margin { ttl - margin } else { ttl / 2 };
    if lifetime <= TimeDelta::zero() {
        return None;
    }
    issued_at.checked_add_signed(lifetime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_header_encodes_id_and_secret() {
        let creds = Credentials::new("client", "secret");
        // base64("client:secret")
        assert_eq!(basic_auth_header(&creds), "Basic Y2xpZW50OnNlY3JldA==");
    }

    #[test]
    fn expiry_subtracts_margin() {
        let now = Utc::now();
        let at = expiry(now, 3600, TimeDelta::minutes(5)).unwrap();
        assert_eq!((at - now).num_minutes(), 55);
    }

    #[test]
    fn short_ttl_keeps_half() {
        let now = Utc::now();
        let at = expiry(now, 120, TimeDelta::minutes(5)).unwrap();
        assert_eq!((at - now).num_seconds(), 60);
        assert!(expiry(now, 0, TimeDelta::minutes(5)).is_none());
    }
}
