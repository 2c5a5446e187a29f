use std::sync::Arc;

use crate::{config::Config, error, resolver::Resolver, server, warning};

pub async fn serve(address: Option<String>) {
    let config = Config::from_env();
    if config.credentials.is_none() {
        warning!(
            "SPOTIFY_CLIENT_ID/SPOTIFY_CLIENT_SECRET not set, only the scrape fallback will work"
        );
    }

    let address = address.unwrap_or_else(|| config.server_address.clone());
    let resolver = Arc::new(Resolver::new(config));

    if let Err(e) = server::start_api_server(resolver, &address).await {
        error!("Server stopped: {}", e);
    }
}
