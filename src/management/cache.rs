use std::collections::HashMap;

use crate::types::{Playlist, PlaylistItem, Playlists};

/// Ordered entries of one playlist, filled page by page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistItemsCache {
    items: Vec<PlaylistItem>,
    total: usize,
}

impl PlaylistItemsCache {
    pub fn items(&self) -> &[PlaylistItem] {
        &self.items
    }

    /// Offset the next page has to be requested from.
    pub fn next_offset(&self) -> usize {
        self.items.len()
    }

    /// Number of entries the server reported for the playlist.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_complete(&self) -> bool {
        self.items.len() >= self.total
    }

    /// Entries in `[offset, offset + limit)`, clamped to what is cached.
    pub fn slice(&self, offset: usize, limit: usize) -> Vec<PlaylistItem> {
        let start = offset.min(self.items.len());
        let end = offset.saturating_add(limit).min(self.items.len());
        self.items[start..end].to_vec()
    }
}

/// Session-lifetime store of everything fetched from the platform.
///
/// Nothing here expires: once a value is stored it is served for the rest
/// of the session.
///
/// # Contents
///
/// - the first page of the user's playlists, as returned by the platform
/// - every known playlist indexed by id
/// - every known track indexed by id
/// - per playlist, the entries fetched so far in playlist order together
///   with the total the server reported
///
/// # Example
///
/// ```
/// let mut cache = ApiCache::new();
/// cache.add_playlist_page("p1", 0, 2, &first_page);
/// assert!(cache.is_playlist_complete("p1"));
/// assert!(cache.get_track("t1").is_some());
/// ```
#[derive(Debug, Default)]
pub struct ApiCache {
    playlists: Option<Playlists>,
    playlist_map: HashMap<String, Playlist>,
    playlist_items: HashMap<String, PlaylistItemsCache>,
    track_map: HashMap<String, PlaylistItem>,
}

impl ApiCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn playlists(&self) -> Option<&Playlists> {
        self.playlists.as_ref()
    }

    /// Replaces the playlist list and indexes every playlist by id.
    pub fn set_playlists(&mut self, playlists: Playlists) -> &mut Self {
        for playlist in &playlists.items {
            self.playlist_map
                .insert(playlist.id.clone(), playlist.clone());
        }
        self.playlists = Some(playlists);
        self
    }

    pub fn get_playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlist_map.get(id)
    }

    pub fn get_track(&self, id: &str) -> Option<&PlaylistItem> {
        self.track_map.get(id)
    }

    pub fn playlist_items(&self, playlist_id: &str) -> Option<&PlaylistItemsCache> {
        self.playlist_items.get(playlist_id)
    }

    /// True when the playlist's cached entries reached the server-reported total.
    pub fn is_playlist_complete(&self, playlist_id: &str) -> bool {
        self.playlist_items
            .get(playlist_id)
            .is_some_and(PlaylistItemsCache::is_complete)
    }

    /// Merges a freshly fetched page.
    ///
    /// Every entry with an id lands in the track map (last write wins). The
    /// entries are appended to the playlist's sequence only when `offset`
    /// continues it, so the sequence never has holes or duplicates.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Playlist the page belongs to
    /// * `offset` - Index of the page's first entry within the playlist
    /// * `total` - Entry count the server reported with the page
    /// * `items` - The page's entries in playlist order
    pub fn add_playlist_page(
        &mut self,
        playlist_id: &str,
        offset: usize,
        total: usize,
        items: &[PlaylistItem],
    ) -> &mut Self {
        for item in items {
            if let Some(id) = &item.id {
                self.track_map.insert(id.clone(), item.clone());
            }
        }

        let entry = self
            .playlist_items
            .entry(playlist_id.to_string())
            .or_default();
        entry.total = total;
        if offset == entry.items.len() {
            entry.items.extend_from_slice(items);
        }
        self
    }

    pub fn count_tracks(&self) -> usize {
        self.track_map.len()
    }
}
