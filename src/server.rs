use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, middleware, routing::get};

use crate::{Res, api, info, resolver::Resolver};

pub fn router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/token", get(api::token))
        .route("/track-info", get(api::track_info))
        .method_not_allowed_fallback(api::method_not_allowed)
        .fallback(api::not_found)
        .layer(Extension(resolver))
        .layer(middleware::from_fn(api::cors))
}

pub async fn start_api_server(resolver: Arc<Resolver>, address: &str) -> Res<()> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| format!("Failed to parse server address {address}: {e}"))?;

    let app = router(resolver);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
