use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::resolver::Resolver;

pub async fn health(Extension(resolver): Extension<Arc<Resolver>>) -> Json<Value> {
    let config = resolver.config();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "credentials": config.credentials.is_some(),
        "scrapeFallback": config.scrape_fallback,
        "cachedTracks": resolver.cache().len().await,
    }))
}
