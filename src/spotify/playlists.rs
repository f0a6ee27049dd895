use reqwest::Method;

use crate::{
    error::Result,
    types::{CacheProgress, PlaylistItemsPage, Playlists, Position},
};

use super::{PAGE_SIZE, SpotifyClient, schema};

impl SpotifyClient {
    /// Returns the user's playlists.
    ///
    /// The first call fetches a single page (`limit` entries from `offset`)
    /// and caches it. Later calls return the cached page whatever their
    /// arguments are, nothing beyond that first page is ever requested.
    pub async fn get_user_playlists(&mut self, limit: usize, offset: usize) -> Result<Playlists> {
        if let Some(playlists) = self.cache.playlists() {
            return Ok(playlists.clone());
        }

        let json = self
            .request(
                Method::GET,
                "me/playlists",
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;
        let playlists = schema::parse_playlists(json)?;

        self.cache.set_playlists(playlists.clone());
        Ok(playlists)
    }

    /// Returns the entries `[offset, offset + limit)` of a playlist.
    ///
    /// Served from the cache when it already holds entries past `offset` or
    /// when the playlist is complete. Otherwise the page is fetched, its tracks
    /// are cached and it extends the playlist's cached sequence.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Spotify id of the playlist
    /// * `limit` - Maximum number of entries to return
    /// * `offset` - Index of the first entry
    ///
    /// # Returns
    ///
    /// A [`PlaylistItemsPage`] with the entries, the server-reported total
    /// and whether the page came from the cache. Fails with
    /// [`Error::Api`](crate::error::Error::Api) on a non-2xx response and
    /// with [`Error::Data`](crate::error::Error::Data) when the response has
    /// no `items` list. A failed request leaves the cache untouched.
    ///
    /// # Example
    ///
    /// ```
    /// let page = client.fetch_playlist_items("37i9dQZF1DXcBWIGoYBM5M", 50, 0).await?;
    /// println!("{} of {} entries", page.items.len(), page.total);
    /// ```
    pub async fn fetch_playlist_items(
        &mut self,
        playlist_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<PlaylistItemsPage> {
        if let Some(cached) = self.cache.playlist_items(playlist_id) {
            if cached.items().len() > offset || cached.is_complete() {
                return Ok(PlaylistItemsPage {
                    items: cached.slice(offset, limit),
                    total: cached.total(),
                    from_cache: true,
                });
            }
        }

        let json = self
            .request(
                Method::GET,
                &format!("playlists/{}/tracks", playlist_id),
                &[("limit", limit.to_string()), ("offset", offset.to_string())],
            )
            .await?;
        let (items, total) = schema::parse_playlist_items(json)?;

        self.cache
            .add_playlist_page(playlist_id, offset, total, &items);

        Ok(PlaylistItemsPage {
            items,
            total,
            from_cache: false,
        })
    }

    /// Caches every selected playlist completely, then rebuilds the song table.
    ///
    /// Pages of [`PAGE_SIZE`] entries are requested one after the other,
    /// resuming from what is already cached. `on_progress` is called after
    /// every page. A failed page stops the whole run, the pages cached so far
    /// are kept and the next run resumes from them.
    pub async fn cache_selected_playlists<F>(&mut self, mut on_progress: F) -> Result<()>
    where
        F: FnMut(CacheProgress),
    {
        let selected = self.selection.ids().to_vec();
        let playlist_count = selected.len();

        for (index, playlist_id) in selected.iter().enumerate() {
            if self.cache.is_playlist_complete(playlist_id) {
                continue;
            }

            let mut offset = self
                .cache
                .playlist_items(playlist_id)
                .map_or(0, |cached| cached.next_offset());

            loop {
                let page = self
                    .fetch_playlist_items(playlist_id, PAGE_SIZE, offset)
                    .await?;
                offset += page.items.len();

                on_progress(CacheProgress {
                    playlist: Position {
                        pos: index + 1,
                        total: playlist_count,
                    },
                    items: Position {
                        pos: offset.min(page.total),
                        total: page.total,
                    },
                });

                // an empty page short of the total means the playlist shrank upstream
                if offset >= page.total || page.items.is_empty() {
                    break;
                }
            }
        }

        self.build_song_table();
        Ok(())
    }
}
