use axum::{Json, http::StatusCode};

use crate::types::ErrorBody;

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "method_not_allowed".to_string(),
            message: "Only GET and OPTIONS are supported".to_string(),
        }),
    )
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not_found".to_string(),
            message: "Unknown endpoint".to_string(),
        }),
    )
}
