//! # Spotify Integration Module
//!
//! Upstream calls made by the resolver. Each submodule wraps one unreliable
//! dependency and translates its failures into [`crate::error::ResolveError`]:
//!
//! ```text
//! Resolver (facade)
//!     ├── auth    client-credentials exchange (token endpoint)
//!     ├── tracks  track detail + audio features (Web API)
//!     └── scrape  public track page through a CORS proxy
//! ```
//!
//! ## Timeouts
//!
//! Every outbound request carries an explicit timeout from
//! [`crate::config::Config`]. A timed-out call is reported exactly like a
//! network error of the same kind.
//!
//! ## Trust boundary
//!
//! The proxy and the HTML it relays are untrusted. The scrape module only
//! ever extracts the page title, with linear-time patterns, from a bounded
//! prefix of the document.

pub mod auth;
pub mod scrape;
pub mod tracks;
