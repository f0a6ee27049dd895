//! Wire shapes of the platform's JSON responses.
//!
//! Responses are validated here and converted into the types of
//! [`crate::types`] before anything reaches the cache.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{Error, Result},
    types::{PlaylistItem, Playlists, Token},
};

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    expires_in: Option<u64>,
    refresh_token: Option<String>,
    scope: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenResponse {
    /// The platform's `error: error_description` pair, if the response carries one.
    pub(crate) fn error_message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        Some(match &self.error_description {
            Some(description) => format!("{}: {}", error, description),
            None => error.clone(),
        })
    }

    /// Converts the response into a [`Token`].
    ///
    /// `previous_refresh_token` is used when the platform does not rotate the
    /// refresh token on a refresh grant.
    pub(crate) fn into_token(self, previous_refresh_token: Option<&str>) -> Result<Token> {
        if let Some(message) = self.error_message() {
            return Err(Error::Auth(message));
        }

        let access_token = self
            .access_token
            .ok_or_else(|| Error::auth("token response has no access_token"))?;
        let expires_in = self
            .expires_in
            .ok_or_else(|| Error::auth("token response has no expires_in"))?;
        let refresh_token = self
            .refresh_token
            .or_else(|| previous_refresh_token.map(str::to_string))
            .ok_or_else(|| Error::auth("token response has no refresh_token"))?;

        let token = Token {
            access_token,
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
            expires_in,
            refresh_token,
            scope: self.scope.unwrap_or_default(),
        };
        if token.lifetime().is_none() {
            return Err(Error::Auth(format!(
                "token response has out of range expires_in: {}",
                expires_in
            )));
        }

        Ok(token)
    }
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize)]
struct AlbumObject {
    #[serde(default)]
    images: Vec<ImageObject>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    duration_ms: u64,
    album: Option<AlbumObject>,
    #[serde(default)]
    artists: Vec<ArtistObject>,
}

#[derive(Debug, Deserialize)]
struct PlaylistTrackObject {
    #[serde(default)]
    is_local: bool,
    track: Option<TrackObject>,
}

impl From<PlaylistTrackObject> for PlaylistItem {
    fn from(entry: PlaylistTrackObject) -> Self {
        let Some(track) = entry.track else {
            return PlaylistItem {
                id: None,
                name: String::new(),
                album_art: None,
                artists: Vec::new(),
                duration_ms: 0,
                is_local: entry.is_local,
            };
        };

        PlaylistItem {
            id: track.id.filter(|id| !id.is_empty()),
            name: track.name,
            album_art: track
                .album
                .and_then(|album| album.images.into_iter().next())
                .map(|image| image.url),
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            duration_ms: track.duration_ms,
            is_local: entry.is_local,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistItemsResponse {
    items: Vec<PlaylistTrackObject>,
    total: usize,
}

fn require_items(json: &Value) -> Result<()> {
    match json.get("items") {
        Some(Value::Array(_)) => Ok(()),
        Some(_) => Err(Error::data("`items` is not a list")),
        None => Err(Error::data("response has no `items` field")),
    }
}

pub(crate) fn parse_playlists(json: Value) -> Result<Playlists> {
    require_items(&json)?;
    serde_json::from_value(json).map_err(|e| Error::data(format!("invalid playlist page: {}", e)))
}

/// Returns the page's entries and the total reported by the server.
pub(crate) fn parse_playlist_items(json: Value) -> Result<(Vec<PlaylistItem>, usize)> {
    require_items(&json)?;
    let page: PlaylistItemsResponse = serde_json::from_value(json)
        .map_err(|e| Error::data(format!("invalid playlist items page: {}", e)))?;
    let items = page.items.into_iter().map(PlaylistItem::from).collect();
    Ok((items, page.total))
}

/// Builds an [`Error::Api`] from an error response body of the form
/// `{"error": {"status": 401, "message": "..."}}`, falling back to the raw body.
pub(crate) fn api_error(status: StatusCode, body: &str) -> Error {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let error = parsed.as_ref().and_then(|json| json.get("error"));

    let message = error
        .and_then(|e| e.get("message").and_then(Value::as_str).or_else(|| e.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| {
            let body = body.trim();
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.to_string()
            }
        });
    let status = error
        .and_then(|e| e.get("status"))
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(status.as_u16());

    Error::Api { status, message }
}
