//! Spotify Card Track Resolver Library
//!
//! This library resolves Spotify track identifiers into the metadata a
//! "Spotify card" renderer needs. It acquires and caches a client-credentials
//! token, fetches track detail and audio features with partial-failure
//! tolerance, serves stale cached data when upstream fails and, as a last
//! resort, scrapes the public track page for song and artist.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for `/health`, `/token` and `/track-info`
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Resolution error taxonomy
//! - `management` - In-memory token manager and resolution cache
//! - `resolver` - The resolution facade tying everything together
//! - `server` - Router and HTTP server
//! - `spotify` - Upstream calls: token exchange, tracks, scrape fallback
//! - `types` - Data structures and type definitions
//! - `utils` - Link parsing, scannable codes and formatting helpers
//!
//! # Example
//!
//! ```
//! use spotcard::{config::{self, Config}, resolver::Resolver};
//!
//! #[tokio::main]
//! async fn main() -> spotcard::Res<()> {
//!     config::load_env().await?;
//!     let resolver = Resolver::new(Config::from_env());
//!     let resolution = resolver.resolve("4uLU6hMCjMI75M1A2tKUQC").await?;
//!     println!("{}", resolution.track.name());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod resolver;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spotcard::Res;
///
/// async fn bind() -> Res<String> {
///     Ok("127.0.0.1:3000".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Requesting Spotify access token...");
/// info!("Cache HIT for track {}", id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations. Used to provide positive feedback
/// when operations complete successfully.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Access token obtained");
/// success!("Fetched track {} ({})", id, name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Used for unrecoverable errors
/// that require immediate program termination.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// error!("Cannot bind {}: {}", address, err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues or important notices that don't require program termination.
/// Used for recoverable issues or important information that users should notice.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Serving STALE cache entry for track {}", id);
/// warning!("Could not fetch audio features for {}: {}", id, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
