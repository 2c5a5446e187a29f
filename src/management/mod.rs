mod auth;
mod cache;

pub use auth::TokenManager;
pub use cache::CacheEntry;
pub use cache::TrackCache;
