//! # API Module
//!
//! HTTP endpoints served by `spotcard serve`.
//!
//! ## Endpoints
//!
//! - [`health`] - `GET /health`, status and version for monitoring.
//! - [`token`] - `GET /token`, the managed client-credentials token as
//!   `{accessToken, expiresIn}`.
//! - [`track_info`] - `GET /track-info?id=<id>`, resolved track data with
//!   cache provenance in the `X-Cache` header.
//!
//! Failures are rendered as `{error, message}` where `error` is a stable
//! machine code (see [`crate::error::ResolveError::code`]).
//!
//! ## CORS
//!
//! [`cors`] is installed as middleware on the whole router: any origin,
//! `GET`/`OPTIONS`, header `Content-Type`. Every `OPTIONS` request
//! short-circuits with 200 and no body.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use spotcard::{config::Config, resolver::Resolver, server};
//!
//! let resolver = Arc::new(Resolver::new(Config::from_env()));
//! let app = server::router(resolver);
//! ```

mod cors;
mod fallback;
mod health;
mod token;
mod track_info;

pub use cors::cors;
pub use fallback::method_not_allowed;
pub use fallback::not_found;
pub use health::health;
pub use token::token;
pub use track_info::X_CACHE;
pub use track_info::X_TRACK_ESTIMATED;
pub use track_info::track_info;
