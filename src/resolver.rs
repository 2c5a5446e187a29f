//! Resolution facade.
//!
//! One entry point, [`Resolver::resolve`], walks the degradation ladder:
//!
//! ```text
//! Idle → CacheCheck ─ fresh ─────────────────────────────→ Resolved (HIT)
//!            │ miss/stale
//!            ↓
//!       TokenAcquire ─ AuthError ─────────────┐
//!            │ ok                             │
//!            ↓                                │
//!          Fetch ─ ok → cache.put ───────────────────────→ Resolved (MISS)
//!            │ error                          │
//!            ├─ stale entry ─────────────────────────────→ Resolved (STALE)
//!            ↓ none                           ↓
//!          Scrape ←───────────────────────────┘
//!            ├─ ok ──────────────────────────────────────→ Resolved (SCRAPE)
//!            └─ error ───────────────────────────────────→ Failed
//! ```
//!
//! Terminal states are never retried. Concurrent resolutions of the same id
//! are not coalesced; each writes the cache independently and the later write
//! wins.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Config,
    error::{MANUAL_ENTRY_MESSAGE, ResolveError},
    info,
    management::{TokenManager, TrackCache},
    spotify::{self, scrape::ScrapeResolver, tracks::validate_track_id},
    success,
    types::{Provenance, Resolution, ResolvedTrack, TrackData},
    warning,
};

pub struct Resolver {
    client: Client,
    config: Arc<Config>,
    tokens: TokenManager,
    cache: TrackCache,
    scraper: ScrapeResolver,
}

/// Why the API path gave up.
enum ApiFailure {
    Token(ResolveError),
    Fetch(ResolveError),
}

impl Resolver {
    pub fn new(config: Config) -> Self {
        let client = Client::new();
        let config = Arc::new(config);
        Self {
            tokens: TokenManager::new(client.clone(), Arc::clone(&config)),
            cache: TrackCache::from_config(&config),
            scraper: ScrapeResolver::new(client.clone(), &config),
            client,
            config,
        }
    }

    /// Swaps the scrape fallback, e.g. to use different title patterns.
    pub fn with_scraper(mut self, scraper: ScrapeResolver) -> Self {
        self.scraper = scraper;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn cache(&self) -> &TrackCache {
        &self.cache
    }

    /// Resolves a track id to canonical or, as a last resort, partial data.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Validation`] for a malformed id, before any I/O.
    /// - [`ResolveError::Scrape`] with a manual-entry message when every
    ///   path failed.
    /// - The API-path error itself when the scrape fallback is disabled and
    ///   no stale entry exists.
    pub async fn resolve(&self, id: &str) -> Result<Resolution, ResolveError> {
        validate_track_id(id)?;

        if let Some(entry) = self.cache.get(id).await {
            info!("Cache HIT for track {}", id);
            return Ok(Resolution {
                track: ResolvedTrack::Full(entry.data),
                provenance: Provenance::Hit,
            });
        }

        let api_error = match self.fetch_from_api(id).await {
            Ok(data) => {
                self.cache.put(id, data.clone()).await;
                success!("Fetched track {} ({})", id, data.name);
                return Ok(Resolution {
                    track: ResolvedTrack::Full(data),
                    provenance: Provenance::Miss,
                });
            }
            // token failures skip the stale lookup
            Err(ApiFailure::Token(e)) => e,
            Err(ApiFailure::Fetch(e)) => {
                warning!("Fetching track {} failed: {}", id, e);
                if let Some(entry) = self.cache.get_stale(id).await {
                    warning!("Serving STALE cache entry for track {}", id);
                    return Ok(Resolution {
                        track: ResolvedTrack::Full(entry.data),
                        provenance: Provenance::Stale,
                    });
                }
                e
            }
        };

        if !self.config.scrape_fallback {
            return Err(api_error);
        }

        info!("Falling back to scraping the track page for {}", id);
        match self.scraper.scrape_track(id).await {
            Ok(partial) => {
                warning!("Resolved {} from page title, duration is an estimate", id);
                Ok(Resolution {
                    track: ResolvedTrack::Partial(partial),
                    provenance: Provenance::Scrape,
                })
            }
            Err(e) => {
                warning!("Scrape fallback for {} failed: {}", id, e);
                Err(ResolveError::Scrape(MANUAL_ENTRY_MESSAGE.to_string()))
            }
        }
    }

    async fn fetch_from_api(&self, id: &str) -> Result<TrackData, ApiFailure> {
        let token = self.tokens.get_token().await.map_err(ApiFailure::Token)?;

        match spotify::tracks::fetch_track(&self.client, &self.config, id, &token).await {
            Ok(data) => Ok(data),
            Err(e) => {
                if matches!(e, ResolveError::Auth(_)) {
                    self.tokens.invalidate(&token).await;
                }
                Err(ApiFailure::Fetch(e))
            }
        }
    }
}
