use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension, Json,
    extract::Query,
    http::{HeaderName, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::{
    resolver::Resolver,
    types::{ErrorBody, ResolvedTrack},
};

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
pub const X_TRACK_ESTIMATED: HeaderName = HeaderName::from_static("x-track-estimated");

/// `GET /track-info?id=<22 alphanumerics>`
///
/// Responds with canonical track JSON (or the partial scrape shape), tagged
/// with `X-Cache: HIT|MISS|STALE|SCRAPE`.
pub async fn track_info(
    Query(params): Query<HashMap<String, String>>,
    Extension(resolver): Extension<Arc<Resolver>>,
) -> Response {
    let Some(id) = params.get("id").filter(|s| !s.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "missing_track_id".to_string(),
                message: "Provide a track id: /track-info?id=TRACK_ID".to_string(),
            }),
        )
            .into_response();
    };

    match resolver.resolve(id).await {
        Ok(resolution) => {
            let estimated = resolution.is_estimated();
            let mut response = match resolution.track {
                ResolvedTrack::Full(data) => Json(data).into_response(),
                ResolvedTrack::Partial(partial) => Json(partial).into_response(),
            };

            let headers = response.headers_mut();
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=300"),
            );
            headers.insert(
                X_CACHE,
                HeaderValue::from_static(resolution.provenance.as_str()),
            );
            if estimated {
                headers.insert(X_TRACK_ESTIMATED, HeaderValue::from_static("true"));
            }
            response
        }
        Err(e) => e.into_response(),
    }
}
