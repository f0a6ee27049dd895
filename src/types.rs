use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Token as issued by the platform's token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub refresh_token: String,
    pub scope: String,
}

impl Token {
    /// `expires_in` as a [`Duration`], `None` when it does not fit one.
    pub fn lifetime(&self) -> Option<Duration> {
        i64::try_from(self.expires_in)
            .ok()
            .and_then(Duration::try_seconds)
    }
}

/// The live session token together with the moment it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenData {
    pub token: Token,
    pub last_refresh: DateTime<Utc>,
}

impl TokenData {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            last_refresh: Utc::now(),
        }
    }

    /// True once strictly more than `expires_in` seconds passed since the last refresh.
    ///
    /// A lifetime too large to represent never runs out.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.token.lifetime() {
            Some(lifetime) => now - self.last_refresh > lifetime,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub uri: String,
}

/// Summary of a playlist's track collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracksRef {
    pub href: String,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub collaborative: bool,
    pub public: Option<bool>,
    pub owner: Owner,
    pub tracks: TracksRef,
    pub snapshot_id: String,
}

/// One page of the current user's playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlists {
    pub href: String,
    pub limit: usize,
    pub next: Option<String>,
    pub offset: usize,
    pub previous: Option<String>,
    pub total: usize,
    pub items: Vec<Playlist>,
}

/// A track entry of a playlist.
///
/// `id` is `None` for entries the platform no longer resolves to a track;
/// they are kept so positions inside the playlist stay aligned with offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: Option<String>,
    pub name: String,
    pub album_art: Option<String>,
    pub artists: Vec<String>,
    pub duration_ms: u64,
    pub is_local: bool,
}

/// Result of [`crate::spotify::SpotifyClient::fetch_playlist_items`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistItemsPage {
    pub items: Vec<PlaylistItem>,
    /// Total number of entries in the playlist as reported by the server.
    pub total: usize,
    pub from_cache: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub pos: usize,
    pub total: usize,
}

/// Emitted after every page fetched while caching the selected playlists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheProgress {
    pub playlist: Position,
    pub items: Position,
}

/// Track id -> (playlist id -> presence), restricted to the selected playlists.
pub type SongTable = HashMap<String, HashMap<String, bool>>;

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: usize,
}
