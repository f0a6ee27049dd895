use std::collections::HashMap;

use super::{ApiCache, Selection};
use crate::types::SongTable;

/// Builds the presence table for the selected playlists from cached entries.
///
/// Every row has one cell per selected playlist. Entries without a track id
/// are skipped, and playlists with nothing cached contribute only `false` cells.
pub fn build_song_table(cache: &ApiCache, selection: &Selection) -> SongTable {
    let mut table = SongTable::new();

    for playlist_id in selection.ids() {
        let Some(items) = cache.playlist_items(playlist_id) else {
            continue;
        };

        for track_id in items.items().iter().filter_map(|item| item.id.as_ref()) {
            let row = table.entry(track_id.clone()).or_insert_with(|| {
                selection
                    .ids()
                    .iter()
                    .map(|id| (id.clone(), false))
                    .collect::<HashMap<_, _>>()
            });
            row.insert(playlist_id.clone(), true);
        }
    }

    table
}
