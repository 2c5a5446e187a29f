use std::sync::LazyLock;

use regex::Regex;

use crate::types::{CodeStyle, SpotifyKind, SpotifyLink};

pub const TRACK_ID_LEN: usize = 22;
pub const SCANNABLES_URL: &str = "https://scannables.scdn.co/uri/plain/png";

// tried in order, first match wins
static LINK_PATTERNS: LazyLock<Vec<(Regex, SpotifyKind)>> = LazyLock::new(|| {
    [
        (r"track/([a-zA-Z0-9]{22})(?:[^a-zA-Z0-9]|$)", SpotifyKind::Track),
        (r"spotify:track:([a-zA-Z0-9]{22})(?:[^a-zA-Z0-9]|$)", SpotifyKind::Track),
        (r"album/([a-zA-Z0-9]{22})(?:[^a-zA-Z0-9]|$)", SpotifyKind::Album),
        (r"spotify:album:([a-zA-Z0-9]{22})(?:[^a-zA-Z0-9]|$)", SpotifyKind::Album),
        (r"playlist/([a-zA-Z0-9]{22})(?:[^a-zA-Z0-9]|$)", SpotifyKind::Playlist),
        (r"spotify:playlist:([a-zA-Z0-9]{22})(?:[^a-zA-Z0-9]|$)", SpotifyKind::Playlist),
    ]
    .into_iter()
    .filter_map(|(pattern, kind)| Regex::new(pattern).ok().map(|re| (re, kind)))
    .collect()
});

/// Exactly 22 ASCII alphanumerics.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == TRACK_ID_LEN && id.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Extracts the kind and id from a Spotify link.
///
/// Accepts `open.spotify.com/{track,album,playlist}/<id>` URLs (query strings
/// and locale prefixes such as `/intl-es/` are fine), `spotify:<kind>:<id>`
/// URIs and bare 22-character ids, which are taken to be tracks.
///
/// # Example
///
/// ```
/// let link = parse_spotify_link("https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC?si=x").unwrap();
/// assert_eq!(link.kind, SpotifyKind::Track);
/// ```
pub fn parse_spotify_link(input: &str) -> Option<SpotifyLink> {
    let input = input.trim();
    if is_valid_id(input) {
        return Some(SpotifyLink {
            kind: SpotifyKind::Track,
            id: input.to_string(),
        });
    }

    LINK_PATTERNS.iter().find_map(|(re, kind)| {
        re.captures(input).and_then(|caps| {
            caps.get(1).map(|id| SpotifyLink {
                kind: *kind,
                id: id.as_str().to_string(),
            })
        })
    })
}

pub fn spotify_uri(kind: SpotifyKind, id: &str) -> String {
    format!("spotify:{}:{}", kind, id)
}

/// URL of the scannable Spotify code image for `uri`.
pub fn scannable_code_url(uri: &str, style: CodeStyle) -> String {
    let (bar, background) = match style {
        CodeStyle::Dark => ("000000", "white"),
        CodeStyle::Light => ("ffffff", "transparent"),
    };
    format!("{SCANNABLES_URL}/{bar}/{background}/800/{uri}")
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
