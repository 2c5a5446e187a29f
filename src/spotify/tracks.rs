use reqwest::Client;

use crate::{
    config::Config,
    error::ResolveError,
    types::{
        AccessToken, AudioFeatures, SpotifyAudioFeatures, SpotifyTrack, TrackAlbum, TrackArtist,
        TrackData,
    },
    utils, warning,
};

/// Fetches canonical track data for `id`.
///
/// The identifier is validated before anything touches the network. The
/// track-detail and audio-features requests are then issued concurrently and
/// joined:
///
/// - Track detail is mandatory. Its failure is returned as the matching
///   [`ResolveError`] kind (401 → `Auth`, 404 → `NotFound`, 429 →
///   `RateLimit`, anything else including timeouts → `Upstream`).
/// - Audio features are optional. Any failure is logged and replaced with
///   [`AudioFeatures::default`], the fetch still succeeds.
///
/// # Example
///
/// ```
/// let token = tokens.get_token().await?;
/// let track = fetch_track(&client, &config, "4uLU6hMCjMI75M1A2tKUQC", &token).await?;
/// println!("{} by {}", track.name, track.artist_names());
/// ```
pub async fn fetch_track(
    client: &Client,
    config: &Config,
    id: &str,
    token: &AccessToken,
) -> Result<TrackData, ResolveError> {
    validate_track_id(id)?;

    let (track, features) = tokio::join!(
        get_track(client, config, id, token),
        get_audio_features(client, config, id, token)
    );

    let track = track?;
    let audio_features = features.unwrap_or_else(|e| {
        warning!("Could not fetch audio features for {}: {}", id, e);
        AudioFeatures::default()
    });

    Ok(into_track_data(track, audio_features))
}

/// Rejects anything that is not exactly 22 ASCII alphanumerics.
pub fn validate_track_id(id: &str) -> Result<(), ResolveError> {
    if id.is_empty() {
        return Err(ResolveError::Validation("track id is empty".into()));
    }
    if !utils::is_valid_id(id) {
        return Err(ResolveError::Validation(format!(
            "track id must be 22 alphanumeric characters, got {:?}",
            id
        )));
    }
    Ok(())
}

async fn get_track(
    client: &Client,
    config: &Config,
    id: &str,
    token: &AccessToken,
) -> Result<SpotifyTrack, ResolveError> {
    let api_url = format!("{uri}/tracks/{id}", uri = config.api_url);
    get_json(client, config, &api_url, token, "track").await
}

async fn get_audio_features(
    client: &Client,
    config: &Config,
    id: &str,
    token: &AccessToken,
) -> Result<AudioFeatures, ResolveError> {
    let api_url = format!("{uri}/audio-features/{id}", uri = config.api_url);
    let features: SpotifyAudioFeatures =
        get_json(client, config, &api_url, token, "audio features").await?;
    Ok(features.into())
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &Client,
    config: &Config,
    api_url: &str,
    token: &AccessToken,
    context: &str,
) -> Result<T, ResolveError> {
    let response = client
        .get(api_url)
        .bearer_auth(&token.value)
        .timeout(config.upstream_timeout)
        .send()
        .await
        .map_err(|e| ResolveError::from_transport(e, context))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ResolveError::from_status(status, context));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ResolveError::from_transport(e, context))
}

/// Field selection and renaming only.
pub fn into_track_data(track: SpotifyTrack, audio_features: AudioFeatures) -> TrackData {
    TrackData {
        id: track.id,
        name: track.name,
        artists: track
            .artists
            .into_iter()
            .map(|a| TrackArtist {
                id: a.id.unwrap_or_default(),
                name: a.name,
            })
            .collect(),
        album: TrackAlbum {
            id: track.album.id.unwrap_or_default(),
            name: track.album.name,
            images: track.album.images,
            release_date: track.album.release_date.unwrap_or_default(),
        },
        duration_ms: track.duration_ms,
        popularity: track.popularity,
        preview_url: track.preview_url,
        external_urls: track.external_urls,
        audio_features,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_ids() {
        for id in ["", "short", "4uLU6hMCjMI75M1A2tKUQC1", "4uLU6hMCjMI75M1A2tKU-C"] {
            assert!(
                matches!(validate_track_id(id), Err(ResolveError::Validation(_))),
                "{id:?} should be rejected"
            );
        }
        assert!(validate_track_id("4uLU6hMCjMI75M1A2tKUQC").is_ok());
    }

    #[test]
    fn maps_provider_payload() {
        let raw = serde_json::json!({
            "id": "4uLU6hMCjMI75M1A2tKUQC",
            "name": "Never Gonna Give You Up",
            "artists": [{ "id": "0gxyHStUsqpMadRV0Di1Qt", "name": "Rick Astley", "type": "artist" }],
            "album": {
                "id": "6XhjNHCyCDyyGJRM5mg40G",
                "name": "Whenever You Need Somebody",
                "album_type": "album",
                "images": [{ "url": "https://i.scdn.co/image/abc", "height": 640, "width": 640 }],
                "release_date": "1987-11-12"
            },
            "duration_ms": 213573,
            "popularity": 77,
            "preview_url": null,
            "external_urls": { "spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC" }
        });
        let track: SpotifyTrack = serde_json::from_value(raw).unwrap();
        let data = into_track_data(track, AudioFeatures::default());

        assert_eq!(data.artists[0].name, "Rick Astley");
        assert_eq!(data.album.images.len(), 1);
        assert_eq!(data.album.release_date, "1987-11-12");
        assert_eq!(data.duration_ms, 213573);
        assert!(data.preview_url.is_none());
        assert_eq!(data.audio_features, AudioFeatures::default());

        // absent optionals still serialise as keys
        let json = serde_json::to_value(&data).unwrap();
        assert!(json.get("preview_url").is_some());
        assert!(json["audio_features"].get("tempo").is_some());
    }
}
