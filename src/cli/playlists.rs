use tabled::Table;

use crate::{config::Config, error, info, types::PlaylistTableRow};

use super::auth::login;

pub async fn list_playlists(config: Config, limit: usize, offset: usize) {
    let mut client = match login(config).await {
        Ok(client) => client,
        Err(e) => error!("Authentication failed: {}", e),
    };

    let playlists = match client.get_user_playlists(limit, offset).await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    let rows: Vec<PlaylistTableRow> = playlists
        .items
        .iter()
        .map(|p| PlaylistTableRow {
            id: p.id.clone(),
            name: p.name.clone(),
            owner: p
                .owner
                .display_name
                .clone()
                .unwrap_or_else(|| p.owner.id.clone()),
            tracks: p.tracks.total,
        })
        .collect();

    println!("{}", Table::new(rows));
    let shown = playlists.items.len();
    info!(
        "Showing {} of {} playlists from offset {}",
        shown, playlists.total, playlists.offset
    );
    if playlists.next.is_some() {
        info!("Use --offset {} for the next page", playlists.offset + shown);
    }
}
