use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::{Table, builder::Builder};

use crate::{
    config::Config, error, management::ApiCache, spotify::SpotifyClient, success,
    types::SongTable, utils, warning,
};

use super::auth::login;

pub async fn song_table(config: Config, playlist_ids: Vec<String>, limit: usize) {
    let mut client = match login(config).await {
        Ok(client) => client,
        Err(e) => error!("Authentication failed: {}", e),
    };

    if let Err(e) = client.get_user_playlists(limit, 0).await {
        error!("Failed to fetch playlists: {}", e);
    }
    for id in &playlist_ids {
        if client.cache().get_playlist(id).is_none() {
            warning!("Playlist {} is not among your first {} playlists", id, limit);
        }
    }
    client.save_selection(playlist_ids);

    let pb = ProgressBar::new(0);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let cached = client
        .cache_selected_playlists(|progress| {
            pb.set_message(format!(
                "Caching playlist {}/{}",
                progress.playlist.pos, progress.playlist.total
            ));
            pb.set_length(progress.items.total as u64);
            pb.set_position(progress.items.pos as u64);
        })
        .await;
    pb.finish_and_clear();

    if let Err(e) = cached {
        error!("Failed to cache playlists: {}", e);
    }
    success!("Cached {} tracks", client.cache().count_tracks());

    let headers = column_headers(&client);
    let rows = song_table_rows(client.song_table().clone(), client.cache(), &headers.0);

    let mut builder = Builder::default();
    builder.push_record(headers.1);
    for row in rows {
        builder.push_record(row);
    }
    let table: Table = builder.build();
    println!("{}", table);
}

/// Selected playlist ids and the header line naming them.
fn column_headers(client: &SpotifyClient) -> (Vec<String>, Vec<String>) {
    let ids = client.selection().ids().to_vec();
    let mut header = vec![
        "Track".to_string(),
        "Artists".to_string(),
        "Length".to_string(),
    ];
    header.extend(ids.iter().map(|id| {
        client
            .cache()
            .get_playlist(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.clone())
    }));
    (ids, header)
}

/// One printable row per track, sorted by track name then id.
fn song_table_rows(table: SongTable, cache: &ApiCache, playlist_ids: &[String]) -> Vec<Vec<String>> {
    let mut rows: Vec<(String, String, Vec<String>)> = table
        .into_iter()
        .map(|(track_id, presence)| {
            let track = cache.get_track(&track_id);
            let mut row = vec![
                track.map(|t| t.name.clone()).unwrap_or_else(|| track_id.clone()),
                track.map(|t| t.artists.join(", ")).unwrap_or_default(),
                track.map(|t| utils::format_duration(t.duration_ms)).unwrap_or_default(),
            ];
            row.extend(playlist_ids.iter().map(|id| {
                if presence.get(id).copied().unwrap_or(false) {
                    "✓".to_string()
                } else {
                    String::new()
                }
            }));
            (row[0].clone(), track_id, row)
        })
        .collect();

    rows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    rows.into_iter().map(|(_, _, row)| row).collect()
}
