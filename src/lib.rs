//! Playlist Organizer CLI Library
//!
//! Client for the Spotify Web API that authorizes a user with the OAuth 2.0
//! PKCE flow, fetches their playlists page by page into a session cache and
//! builds a table of which tracks appear in which of the selected playlists.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from environment variables and `.env`
//! - `error` - Error type shared by the library
//! - `management` - Session cache, playlist selection, song table, verifier storage
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client and token management
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE helpers and formatting
//!
//! # Example
//!
//! ```
//! use plorgcli::{config::{self, Config}, management::VerifierStore, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> plorgcli::error::Result<()> {
//!     config::load_env().await?;
//!     let mut client = SpotifyClient::new(Config::from_env()?, VerifierStore::default())?;
//!     // authorize, then fetch playlists...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational line prefixed with a blue `o`.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Waiting for authorization in the browser...");
/// info!("Showing {} of {} playlists", shown, total);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green `✓` once an operation completed.
///
/// ```
/// success!("Cached {} tracks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits the process with code 1.
///
/// Only the CLI layer and `main` use it. Library functions return
/// [`error::Error`] and leave the decision to the caller.
///
/// ```
/// error!("Failed to fetch playlists: {}", e);
/// // not reached
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr for problems the program recovers from,
/// such as a failed token refresh.
///
/// ```
/// warning!("Failed to refresh access token: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
