#![allow(dead_code)]

use std::ops::Range;

use chrono::{Duration, Utc};
use plorgcli::{
    config::Config,
    management::VerifierStore,
    spotify::{SpotifyClient, auth::TokenManager},
    types::{Token, TokenData},
};
use reqwest::Client;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::MockServer;

pub fn config_for(server: &MockServer) -> Config {
    Config::new("test-client-id")
        .with_auth_url(format!("{}/authorize", server.uri()))
        .with_token_url(format!("{}/api/token", server.uri()))
        .with_api_url(format!("{}/v1", server.uri()))
        .with_redirect_uri("http://127.0.0.1:5173/callback")
}

pub fn token(access_token: &str, expires_in: u64) -> Token {
    Token {
        access_token: access_token.to_string(),
        token_type: "Bearer".to_string(),
        expires_in,
        refresh_token: "refresh-token".to_string(),
        scope: "user-read-private playlist-read-private".to_string(),
    }
}

/// Token data refreshed `age_secs` seconds ago.
pub fn token_data(access_token: &str, expires_in: u64, age_secs: i64) -> TokenData {
    TokenData {
        token: token(access_token, expires_in),
        last_refresh: Utc::now() - Duration::seconds(age_secs),
    }
}

pub fn token_json(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "token_type": "Bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-token",
        "scope": "user-read-private playlist-read-private"
    })
}

pub fn verifier_store(dir: &TempDir) -> VerifierStore {
    VerifierStore::new(dir.path().join("state/code_verifier"))
}

pub fn token_manager(server: &MockServer, dir: &TempDir) -> TokenManager {
    TokenManager::new(config_for(server), Client::new(), verifier_store(dir))
}

/// Client with a fresh access token `access`.
pub fn authorized_client(server: &MockServer, dir: &TempDir) -> SpotifyClient {
    let http = Client::new();
    let tokens = TokenManager::new(config_for(server), http.clone(), verifier_store(dir))
        .with_token_data(token_data("access", 3600, 0));
    SpotifyClient::with_token_manager(http, tokens)
}

pub fn playlist_json(id: &str, name: &str, total: usize) -> Value {
    json!({
        "collaborative": false,
        "description": format!("{} description", name),
        "external_urls": { "spotify": format!("https://open.spotify.com/playlist/{}", id) },
        "href": format!("https://api.spotify.com/v1/playlists/{}", id),
        "id": id,
        "images": [],
        "name": name,
        "owner": {
            "external_urls": { "spotify": "https://open.spotify.com/user/me" },
            "href": "https://api.spotify.com/v1/users/me",
            "id": "me",
            "type": "user",
            "uri": "spotify:user:me",
            "display_name": "Me"
        },
        "public": false,
        "snapshot_id": format!("snap-{}", id),
        "tracks": {
            "href": format!("https://api.spotify.com/v1/playlists/{}/tracks", id),
            "total": total
        },
        "type": "playlist",
        "uri": format!("spotify:playlist:{}", id)
    })
}

pub fn playlists_json(playlists: &[(&str, &str, usize)]) -> Value {
    json!({
        "href": "https://api.spotify.com/v1/me/playlists?offset=0&limit=20",
        "limit": 20,
        "next": null,
        "offset": 0,
        "previous": null,
        "total": playlists.len(),
        "items": playlists
            .iter()
            .map(|(id, name, total)| playlist_json(id, name, *total))
            .collect::<Vec<_>>()
    })
}

/// A page of playlist entries with track ids `{prefix}{i}` for `i` in `range`.
pub fn items_page(prefix: &str, range: Range<usize>, total: usize) -> Value {
    let offset = range.start;
    let items: Vec<Value> = range
        .map(|i| {
            json!({
                "added_at": "2024-01-01T00:00:00Z",
                "is_local": false,
                "track": {
                    "id": format!("{}{}", prefix, i),
                    "name": format!("Song {}{}", prefix, i),
                    "duration_ms": 180000,
                    "album": { "images": [{ "url": "https://i.scdn.co/image/cover", "height": 640, "width": 640 }] },
                    "artists": [{ "name": "Artist" }],
                    "type": "track"
                }
            })
        })
        .collect();

    json!({
        "href": "https://api.spotify.com/v1/playlists/x/tracks",
        "limit": 50,
        "offset": offset,
        "total": total,
        "items": items
    })
}
