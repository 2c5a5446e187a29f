//! # CLI Module
//!
//! Command-line front end for the track resolver. Each command delegates to
//! the same facade the HTTP server uses, so the terminal and the web card see
//! identical degradation behaviour.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP API (`/health`, `/token`, `/track-info`)
//! - [`resolve`] - Resolves a track link and prints its card data as a table
//! - [`code`] - Prints the scannable Spotify code URL for any link
//! - [`token`] - Performs a client-credentials exchange and reports its lifetime
//!
//! ## Usage Patterns
//!
//! ```bash
//! spotcard serve --address 0.0.0.0:3000
//! spotcard resolve https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC
//! spotcard code spotify:album:6XhjNHCyCDyyGJRM5mg40G --light
//! spotcard token --show
//! ```
//!
//! Fatal errors are printed with the `error!` macro, which exits the process.

mod code;
mod resolve;
mod serve;
mod token;

pub use code::code;
pub use resolve::resolve;
pub use serve::serve;
pub use token::token;
