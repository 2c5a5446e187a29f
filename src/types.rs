use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Application credentials for the client-credentials exchange.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

// never print the secret
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Whole seconds left before expiry, zero once expired.
    pub fn expires_in_at(&self, now: DateTime<Utc>) -> u64 {
        (self.expires_at - now).num_seconds().max(0) as u64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBody {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    pub images: Vec<Image>,
    pub release_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub tempo: f64,
    pub time_signature: u32,
    pub valence: f64,
}

/// Neutral vector used whenever the audio-features call fails.
impl Default for AudioFeatures {
    fn default() -> Self {
        Self {
            danceability: 0.5,
            energy: 0.5,
            key: 0,
            loudness: -10.0,
            tempo: 120.0,
            time_signature: 4,
            valence: 0.5,
        }
    }
}

/// Canonical resolved track. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackData {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: TrackAlbum,
    pub duration_ms: u64,
    pub popularity: u32,
    pub preview_url: Option<String>,
    pub external_urls: BTreeMap<String, String>,
    pub audio_features: AudioFeatures,
}

impl TrackData {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// What the scrape fallback can recover from a public track page.
///
/// Every field has the same name and shape as in [`TrackData`], so clients
/// can read it as a narrower track. Artists carry an empty `id`.
/// `duration_ms` is fabricated; the estimate is signalled by
/// [`Provenance::Scrape`], never in the body. Album art, popularity and
/// audio features are never present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialTrackData {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub duration_ms: u64,
}

impl PartialTrackData {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResolvedTrack {
    Full(TrackData),
    Partial(PartialTrackData),
}

impl ResolvedTrack {
    pub fn name(&self) -> &str {
        match self {
            ResolvedTrack::Full(t) => &t.name,
            ResolvedTrack::Partial(p) => &p.name,
        }
    }

    pub fn artist_names(&self) -> String {
        match self {
            ResolvedTrack::Full(t) => t.artist_names(),
            ResolvedTrack::Partial(p) => p.artist_names(),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            ResolvedTrack::Full(t) => t.duration_ms,
            ResolvedTrack::Partial(p) => p.duration_ms,
        }
    }

    pub fn as_full(&self) -> Option<&TrackData> {
        match self {
            ResolvedTrack::Full(t) => Some(t),
            ResolvedTrack::Partial(_) => None,
        }
    }

    pub fn as_partial(&self) -> Option<&PartialTrackData> {
        match self {
            ResolvedTrack::Full(_) => None,
            ResolvedTrack::Partial(p) => Some(p),
        }
    }
}

/// Where a resolution was served from. Also the `X-Cache` header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Hit,
    Miss,
    Stale,
    Scrape,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Hit => "HIT",
            Provenance::Miss => "MISS",
            Provenance::Stale => "STALE",
            Provenance::Scrape => "SCRAPE",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub track: ResolvedTrack,
    pub provenance: Provenance,
}

impl Resolution {
    pub fn is_stale(&self) -> bool {
        self.provenance == Provenance::Stale
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self.track, ResolvedTrack::Partial(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotifyKind {
    Track,
    Album,
    Playlist,
}

impl SpotifyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpotifyKind::Track => "track",
            SpotifyKind::Album => "album",
            SpotifyKind::Playlist => "playlist",
        }
    }
}

impl fmt::Display for SpotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyLink {
    pub kind: SpotifyKind,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeStyle {
    /// Black bars on white.
    #[default]
    Dark,
    /// White bars on a transparent background.
    Light,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyAudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub tempo: f64,
    pub time_signature: u32,
    pub valence: f64,
}

impl From<SpotifyAudioFeatures> for AudioFeatures {
    fn from(f: SpotifyAudioFeatures) -> Self {
        Self {
            danceability: f.danceability,
            energy: f.energy,
            key: f.key,
            loudness: f.loudness,
            tempo: f.tempo,
            time_signature: f.time_signature,
            valence: f.valence,
        }
    }
}

/// Body returned by the CORS proxy: the fetched page wrapped in JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyResponse {
    #[serde(default)]
    pub contents: Option<String>,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub field: String,
    pub value: String,
}
