use std::{ops::RangeInclusive, sync::LazyLock, time::Duration};

use rand::Rng;
use regex::Regex;
use reqwest::Client;

use crate::{
    config::Config,
    error::ResolveError,
    types::{PartialTrackData, ProxyResponse, TrackArtist},
};

/// Only this much of the relayed document is searched for a title.
const MAX_SCANNED_BYTES: usize = 512 * 1024;

static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title regex"));

/// One page-title format and how to pull song and artist out of it.
///
/// Both capture groups are required: group 1 is the song, group 2 the artist.
#[derive(Debug, Clone)]
pub struct TitlePattern {
    pub name: &'static str,
    regex: Regex,
}

impl TitlePattern {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
        })
    }

    pub fn extract(&self, title: &str) -> Option<(String, String)> {
        let caps = self.regex.captures(title)?;
        let song = caps.get(1)?.as_str().trim();
        let artist = caps.get(2)?.as_str().trim();
        if song.is_empty() || artist.is_empty() {
            return None;
        }
        Some((song.to_string(), artist.to_string()))
    }
}

/// Known Spotify page-title formats, highest priority first.
pub fn default_patterns() -> Vec<TitlePattern> {
    [
        // "<song> - song by <artist> | Spotify" (also single/album/other labels)
        (
            "dash-by",
            r"(?i)^(.*?)\s+-\s+(?:song|single|album|.*?)\s+by\s+(.*?)\s+\|\s+Spotify",
        ),
        // "<song> · <artist> | Spotify"
        ("middle-dot", r"(?i)^(.*?)\s+[·•]\s+(.*?)\s+\|\s+Spotify"),
    ]
    .into_iter()
    .filter_map(|(name, pattern)| TitlePattern::new(name, pattern).ok())
    .collect()
}

/// Last-resort resolver that reads song and artist from the public track page.
///
/// The page is fetched unauthenticated through a CORS proxy that returns the
/// raw body wrapped in JSON (`{"contents": "..."}`). Both the proxy and the
/// HTML are untrusted: only a bounded prefix of the document is scanned, and
/// only the `<title>` is used.
///
/// The title does not carry a duration, so one is fabricated inside the
/// configured range. Callers learn it is an estimate from the provenance.
pub struct ScrapeResolver {
    client: Client,
    proxy_url: String,
    open_url: String,
    timeout: Duration,
    duration_secs: RangeInclusive<u64>,
    patterns: Vec<TitlePattern>,
}

impl ScrapeResolver {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            proxy_url: config.proxy_url.clone(),
            open_url: config.open_url.clone(),
            timeout: config.scrape_timeout,
            duration_secs: config.scrape_duration_secs.clone(),
            patterns: default_patterns(),
        }
    }

    /// Replaces the title formats. Order is priority order.
    pub fn with_patterns(mut self, patterns: Vec<TitlePattern>) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn page_url(&self, id: &str) -> String {
        format!("{}/track/{}", self.open_url.trim_end_matches('/'), id)
    }

    pub async fn scrape_track(&self, id: &str) -> Result<PartialTrackData, ResolveError> {
        let proxied = format!(
            "{}{}",
            self.proxy_url,
            urlencoding::encode(&self.page_url(id))
        );

        let response = self
            .client
            .get(&proxied)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ResolveError::Scrape(format!("proxy request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ResolveError::Scrape(format!(
                "proxy answered HTTP {}",
                response.status()
            )));
        }

        let body: ProxyResponse = response
            .json()
            .await
            .map_err(|e| ResolveError::Scrape(format!("malformed proxy response: {e}")))?;

        let html = body
            .contents
            .ok_or_else(|| ResolveError::Scrape("proxy returned no page contents".into()))?;

        let title = extract_title(&html)
            .ok_or_else(|| ResolveError::Scrape("page has no <title>".into()))?;

        let (name, artist) = parse_title(title, &self.patterns).ok_or_else(|| {
            ResolveError::Scrape(format!("unrecognised page title {:?}", title))
        })?;

        Ok(PartialTrackData {
            id: id.to_string(),
            name: unescape_minimal(&name),
            artists: vec![TrackArtist {
                id: String::new(),
                name: unescape_minimal(&artist),
            }],
            duration_ms: self.estimate_duration_ms(),
        })
    }

    fn estimate_duration_ms(&self) -> u64 {
        let secs = rand::rng().random_range(self.duration_secs.clone());
        secs * 1000
    }
}

/// Text of the first `<title>` element within the scanned prefix.
pub fn extract_title(html: &str) -> Option<&str> {
    let mut end = html.len().min(MAX_SCANNED_BYTES);
    while !html.is_char_boundary(end) {
        end -= 1;
    }
    let caps = TITLE_TAG.captures(&html[..end])?;
    let title = caps.get(1)?.as_str().trim();
    (!title.is_empty()).then_some(title)
}

/// First matching pattern wins; results are never merged across patterns.
pub fn parse_title(title: &str, patterns: &[TitlePattern]) -> Option<(String, String)> {
    patterns.iter().find_map(|p| p.extract(title))
}

/// Decodes `&#x27;` and `&amp;` only. Other entities are left untouched.
pub fn unescape_minimal(s: &str) -> String {
    s.replace("&#x27;", "'").replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_by_format() {
        let parsed = parse_title("Song - song by Artist | Spotify", &default_patterns());
        assert_eq!(parsed, Some(("Song".into(), "Artist".into())));
    }

    #[test]
    fn middle_dot_format() {
        let parsed = parse_title("Clocks · Coldplay | Spotify", &default_patterns());
        assert_eq!(parsed, Some(("Clocks".into(), "Coldplay".into())));
    }

    #[test]
    fn first_pattern_wins() {
        // both formats match; the dash form has priority
        let title = "A · B - single by C | Spotify";
        let parsed = parse_title(title, &default_patterns());
        assert_eq!(parsed, Some(("A · B".into(), "C".into())));
    }

    #[test]
    fn unknown_title_is_rejected() {
        assert_eq!(parse_title("Spotify – Web Player", &default_patterns()), None);
    }

    #[test]
    fn title_tag_is_extracted() {
        let html = "<html><head><title data-x=\"1\">Song - song by Artist | Spotify</title></head></html>";
        assert_eq!(extract_title(html), Some("Song - song by Artist | Spotify"));
        assert_eq!(extract_title("<html><body>nothing</body></html>"), None);
    }

    #[test]
    fn only_two_entities_are_decoded() {
        assert_eq!(unescape_minimal("Don&#x27;t Stop"), "Don't Stop");
        assert_eq!(unescape_minimal("Simon &amp; Garfunkel"), "Simon & Garfunkel");
        assert_eq!(unescape_minimal("Beyonc&eacute; &quot;x&quot;"), "Beyonc&eacute; &quot;x&quot;");
    }

    #[test]
    fn fabricated_duration_stays_in_range() {
        let config = Config::new(None);
        let scraper = ScrapeResolver::new(Client::new(), &config);
        for _ in 0..100 {
            let ms = scraper.estimate_duration_ms();
            assert!((150_000..=270_000).contains(&ms));
        }
    }

    #[test]
    fn page_url_targets_open_spotify() {
        let config = Config::new(None);
        let scraper = ScrapeResolver::new(Client::new(), &config);
        assert_eq!(
            scraper.page_url("4uLU6hMCjMI75M1A2tKUQC"),
            "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"
        );
    }
}
