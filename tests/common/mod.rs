//! In-process stand-in for the token endpoint, the Web API, and the scrape
//! proxy, with per-endpoint call counters and switchable failure modes.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::sync::Mutex;

use spotcard::{config::Config, resolver::Resolver, types::Credentials};

pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
pub const TRACK_ID: &str = "4uLU6hMCjMI75M1A2tKUQC";
pub const OTHER_TRACK_ID: &str = "7qiZfU4dY1lWllzX7mPBI3";
pub const THIRD_TRACK_ID: &str = "0VjIjW4GlUZAMYd2vXMi3b";

pub struct Stub {
    pub token_calls: AtomicUsize,
    pub track_calls: AtomicUsize,
    pub feature_calls: AtomicUsize,
    pub proxy_calls: AtomicUsize,
    token_status: AtomicU16,
    track_status: AtomicU16,
    feature_status: AtomicU16,
    proxy_status: AtomicU16,
    track_delay_ms: AtomicU64,
    page_title: Mutex<Option<String>>,
    last_proxied_url: Mutex<Option<String>>,
}

impl Stub {
    fn new() -> Self {
        Self {
            token_calls: AtomicUsize::new(0),
            track_calls: AtomicUsize::new(0),
            feature_calls: AtomicUsize::new(0),
            proxy_calls: AtomicUsize::new(0),
            token_status: AtomicU16::new(200),
            track_status: AtomicU16::new(200),
            feature_status: AtomicU16::new(200),
            proxy_status: AtomicU16::new(200),
            track_delay_ms: AtomicU64::new(0),
            page_title: Mutex::new(None),
            last_proxied_url: Mutex::new(None),
        }
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn track_calls(&self) -> usize {
        self.track_calls.load(Ordering::SeqCst)
    }

    pub fn feature_calls(&self) -> usize {
        self.feature_calls.load(Ordering::SeqCst)
    }

    pub fn proxy_calls(&self) -> usize {
        self.proxy_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.token_calls() + self.track_calls() + self.feature_calls() + self.proxy_calls()
    }

    pub fn set_token_status(&self, status: u16) {
        self.token_status.store(status, Ordering::SeqCst);
    }

    pub fn set_track_status(&self, status: u16) {
        self.track_status.store(status, Ordering::SeqCst);
    }

    pub fn set_feature_status(&self, status: u16) {
        self.feature_status.store(status, Ordering::SeqCst);
    }

    pub fn set_proxy_status(&self, status: u16) {
        self.proxy_status.store(status, Ordering::SeqCst);
    }

    pub fn set_track_delay(&self, delay: Duration) {
        self.track_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn set_page_title(&self, title: &str) {
        *self.page_title.lock().await = Some(title.to_string());
    }

    pub async fn last_proxied_url(&self) -> Option<String> {
        self.last_proxied_url.lock().await.clone()
    }
}

pub struct Upstream {
    pub addr: SocketAddr,
    pub stub: Arc<Stub>,
}

impl Upstream {
    pub async fn start() -> Self {
        let stub = Arc::new(Stub::new());
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/tracks/{id}", get(track))
            .route("/v1/audio-features/{id}", get(audio_features))
            .route("/proxy", get(proxy))
            .with_state(Arc::clone(&stub));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, stub }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::new(Some(Credentials::new(CLIENT_ID, CLIENT_SECRET)));
        config.api_url = format!("http://{}/v1", self.addr);
        config.token_url = format!("http://{}/api/token", self.addr);
        config.proxy_url = format!("http://{}/proxy?url=", self.addr);
        config.upstream_timeout = Duration::from_secs(2);
        config.scrape_timeout = Duration::from_secs(2);
        config
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.config())
    }
}

fn status_of(code: &AtomicU16) -> StatusCode {
    StatusCode::from_u16(code.load(Ordering::SeqCst)).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn failure(status: StatusCode) -> Response {
    (
        status,
        Json(json!({ "error": { "status": status.as_u16(), "message": "stubbed failure" } })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer stub-token-"))
}

async fn token(State(stub): State<Arc<Stub>>, headers: HeaderMap, body: String) -> Response {
    let n = stub.token_calls.fetch_add(1, Ordering::SeqCst) + 1;

    let status = status_of(&stub.token_status);
    if !status.is_success() {
        return failure(status);
    }

    // base64("test-client:test-secret")
    let expected = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if auth != Some(expected) || body != "grant_type=client_credentials" {
        return failure(StatusCode::BAD_REQUEST);
    }

    Json(json!({
        "access_token": format!("stub-token-{n}"),
        "token_type": "Bearer",
        "expires_in": 3600
    }))
    .into_response()
}

async fn track(
    State(stub): State<Arc<Stub>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    stub.track_calls.fetch_add(1, Ordering::SeqCst);

    let delay = stub.track_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    if !authorized(&headers) {
        return failure(StatusCode::UNAUTHORIZED);
    }
    let status = status_of(&stub.track_status);
    if !status.is_success() {
        return failure(status);
    }

    Json(json!({
        "id": id,
        "name": format!("Song {id}"),
        "artists": [
            { "id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley", "type": "artist" },
            { "id": "1vCWHaC5f2uS3yhpwWbIA6", "name": "Avicii", "type": "artist" }
        ],
        "album": {
            "id": "6XhjNHCyCDyyGJRM5mg40G",
            "name": "Whenever You Need Somebody",
            "album_type": "album",
            "images": [{ "url": "https://i.scdn.co/image/cover", "height": 640, "width": 640 }],
            "release_date": "1987-11-12"
        },
        "duration_ms": 213573,
        "popularity": 77,
        "preview_url": null,
        "external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") }
    }))
    .into_response()
}

async fn audio_features(
    State(stub): State<Arc<Stub>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    stub.feature_calls.fetch_add(1, Ordering::SeqCst);

    if !authorized(&headers) {
        return failure(StatusCode::UNAUTHORIZED);
    }
    let status = status_of(&stub.feature_status);
    if !status.is_success() {
        return failure(status);
    }

    Json(json!({
        "danceability": 0.73,
        "energy": 0.94,
        "key": 8,
        "loudness": -11.8,
        "tempo": 113.3,
        "time_signature": 4,
        "valence": 0.92
    }))
    .into_response()
}

async fn proxy(
    State(stub): State<Arc<Stub>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.proxy_calls.fetch_add(1, Ordering::SeqCst);
    *stub.last_proxied_url.lock().await = params.get("url").cloned();

    let status = status_of(&stub.proxy_status);
    if !status.is_success() {
        return failure(status);
    }

    let title = stub.page_title.lock().await.clone();
    let contents = match title {
        Some(t) => format!("<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{t}</title></head><body></body></html>"),
        None => "<!DOCTYPE html><html><head></head><body></body></html>".to_string(),
    };

    Json(json!({ "contents": contents, "status": { "http_code": 200 } })).into_response()
}
