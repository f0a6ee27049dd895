//! # API Module
//!
//! HTTP endpoints of the local server that receives the OAuth redirect.
//!
//! - [`callback`] - stores the query parameters of the authorization redirect
//!   (`code` or `error`) for the waiting auth flow
//! - [`health`] - status and version, handy to check the server is listening

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
