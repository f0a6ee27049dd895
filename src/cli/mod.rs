//! # CLI Module
//!
//! User-facing commands. Each command opens its own session: it runs the
//! PKCE flow (see [`auth`]), then talks to the API through
//! [`crate::spotify::SpotifyClient`] and prints the result as a table.
//!
//! - [`auth`] - authorize and report the granted scope
//! - [`list_playlists`] - one page of the user's playlists
//! - [`song_table`] - which tracks appear in which of the given playlists
//!
//! Errors end the process through the `error!` macro, the library below
//! never exits on its own.

mod auth;
mod playlists;
mod table;

pub use auth::auth;
pub use auth::login;
pub use playlists::list_playlists;
pub use table::song_table;
