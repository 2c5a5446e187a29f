use std::sync::Arc;

use axum::{Extension, Json, response::IntoResponse};
use chrono::Utc;

use crate::{error::ResolveError, resolver::Resolver, types::TokenBody};

/// `GET /token`: the managed client-credentials token and its remaining lifetime.
pub async fn token(
    Extension(resolver): Extension<Arc<Resolver>>,
) -> Result<impl IntoResponse, ResolveError> {
    let token = resolver.tokens().get_token().await?;
    Ok(Json(TokenBody {
        expires_in: token.expires_in_at(Utc::now()),
        access_token: token.value,
    }))
}
