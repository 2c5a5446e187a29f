use chrono::Utc;

use crate::{config::Config, error, management::TokenManager, success};

pub async fn token(show: bool) {
    let tokens = TokenManager::new(reqwest::Client::new(), Config::from_env().into());

    match tokens.get_token().await {
        Ok(token) => {
            success!(
                "Token valid for {} more seconds (until {})",
                token.expires_in_at(Utc::now()),
                token.expires_at
            );
            if show {
                println!("{}", token.value);
            }
        }
        Err(e) => error!("{}", e),
    }
}
