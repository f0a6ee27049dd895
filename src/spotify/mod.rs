//! # Spotify Integration Module
//!
//! Client side of the Spotify Web API used by the playlist organizer.
//!
//! ```text
//! CLI
//!  ↓
//! SpotifyClient ── ApiCache / Selection / SongTable
//!  ↓
//! TokenManager (OAuth 2.0 PKCE, refresh)
//!  ↓
//! reqwest → Spotify Web API
//! ```
//!
//! [`SpotifyClient`] is the session: it owns the [`auth::TokenManager`],
//! the cache of everything fetched so far, the user's playlist selection and
//! the last computed song table. Nothing is shared between clients.
//!
//! The client is read-only towards the platform and issues one request at a
//! time. Calls that touch the same playlist must not overlap.
//!
//! ## API Coverage
//!
//! - `GET /authorize` - PKCE authorization redirect
//! - `POST /api/token` - code exchange and refresh
//! - `GET /me/playlists` - one page of the user's playlists
//! - `GET /playlists/{id}/tracks` - one page of a playlist's entries

pub mod auth;
pub mod playlists;
mod schema;

use std::time::Duration;

use reqwest::{Client, Method, header::ACCEPT};
use serde_json::Value;

use crate::{
    config::Config,
    error::{Error, Result},
    management::{ApiCache, Selection, VerifierStore, build_song_table},
    types::SongTable,
};

use self::auth::TokenManager;

/// Page size used when caching whole playlists.
pub const PAGE_SIZE: usize = 50;

/// A session against the Spotify Web API.
///
/// # Example
///
/// ```
/// let mut client = SpotifyClient::new(Config::from_env()?, VerifierStore::default())?;
/// authenticate(&mut client, Duration::from_secs(120)).await?;
///
/// client.get_user_playlists(50, 0).await?;
/// client.save_selection(vec!["p1".to_string(), "p2".to_string()]);
/// client.cache_selected_playlists(|progress| println!("{:?}", progress)).await?;
/// let table = client.song_table();
/// ```
pub struct SpotifyClient {
    http: Client,
    tokens: TokenManager,
    cache: ApiCache,
    selection: Selection,
    song_table: SongTable,
}

impl SpotifyClient {
    /// Creates a session with no token yet.
    pub fn new(config: Config, verifier_store: VerifierStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("plorgcli/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let tokens = TokenManager::new(config, http.clone(), verifier_store);
        Ok(Self::with_token_manager(http, tokens))
    }

    pub fn with_token_manager(http: Client, tokens: TokenManager) -> Self {
        Self {
            http,
            tokens,
            cache: ApiCache::new(),
            selection: Selection::new(),
            song_table: SongTable::new(),
        }
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenManager {
        &mut self.tokens
    }

    pub fn cache(&self) -> &ApiCache {
        &self.cache
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces the selected playlist ids.
    ///
    /// The song table is left as is, call [`SpotifyClient::build_song_table`]
    /// or [`SpotifyClient::cache_selected_playlists`] to bring it up to date.
    pub fn save_selection(&mut self, ids: Vec<String>) {
        self.selection.save(ids);
    }

    /// Recomputes the song table from the cache and the current selection.
    pub fn build_song_table(&mut self) -> &SongTable {
        self.song_table = build_song_table(&self.cache, &self.selection);
        &self.song_table
    }

    /// The last computed song table, built on first access when empty.
    pub fn song_table(&mut self) -> &SongTable {
        if self.song_table.is_empty() {
            self.build_song_table();
        }
        &self.song_table
    }

    /// Sends an authenticated request and returns the parsed JSON body.
    ///
    /// `GET` parameters go into the query string, every other method sends
    /// them as a form body. Any non-2xx status becomes [`Error::Api`].
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `endpoint` - Path relative to the configured API base, e.g. `me/playlists`
    /// * `params` - Query or form parameters
    ///
    /// # Returns
    ///
    /// The decoded body, or `Value::Null` for an empty success response.
    pub async fn request(
        &mut self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Value> {
        let token = self.tokens.get_valid_access_token().await?;
        let url = format!(
            "{base}/{endpoint}",
            base = self.tokens.config().api_url.trim_end_matches('/'),
            endpoint = endpoint.trim_start_matches('/')
        );

        let request = self
            .http
            .request(method.clone(), &url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json");
        let request = if method == Method::GET {
            request.query(params)
        } else {
            request.form(params)
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(schema::api_error(status, &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::data(format!("response is not valid JSON: {}", e)))
    }
}
