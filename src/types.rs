use std::fmt;

use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::utils;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Reads an OAuth token endpoint response. `refresh_token` and `scope` may be
    /// absent (refresh responses often omit them) and are left empty.
    pub fn from_response(json: &Value) -> Result<Self, String> {
        let access_token = match json["access_token"].as_str() {
            Some(token) => token.to_string(),
            None => {
                return Err(json["error_description"]
                    .as_str()
                    .or(json["error"].as_str())
                    .unwrap_or("token response carries no access_token")
                    .to_string());
            }
        };

        Ok(Token {
            access_token,
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            scope: json["scope"].as_str().unwrap_or_default().to_string(),
            expires_in: json["expires_in"].as_u64().unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Streaming service a cached session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    Spotify,
    Tidal,
}

impl Service {
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Spotify => "spotify",
            Service::Tidal => "tidal",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Spotify => write!(f, "Spotify"),
            Service::Tidal => write!(f, "Tidal"),
        }
    }
}

/// Identity of the user a session is logged in as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: String,
}

/// One page of an offset/limit listing. `total` is the collection size the
/// service reported for this particular response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub track_count: u32,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub index: usize,
    pub name: String,
    pub tracks: u32,
}

/// A track read from the source catalog.
///
/// Playlists may contain the same ISRC more than once; order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTrack {
    pub artist_name: String,
    pub title: String,
    pub isrc: String,
}

impl SourceTrack {
    pub fn new(artist_name: &str, title: &str, isrc: &str) -> Self {
        Self {
            artist_name: artist_name.to_string(),
            title: title.to_string(),
            isrc: utils::normalize_isrc(isrc),
        }
    }
}

impl fmt::Display for SourceTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.artist_name, self.title)
    }
}

/// A lookup candidate returned by the destination catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationTrack {
    pub id: String,
    pub title: Option<String>,
    pub isrc: Option<String>,
}

/// A source track paired with the destination track chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack<'a> {
    pub source: &'a SourceTrack,
    pub destination_track_id: String,
}

/// Outcome of reconciling a whole source sequence.
///
/// Both vectors keep the relative order of the source sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconciliationResult<'a> {
    pub resolved: Vec<ResolvedTrack<'a>>,
    pub unresolved_tracks: Vec<&'a SourceTrack>,
}

impl ReconciliationResult<'_> {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved_tracks.len()
    }

    pub fn track_ids(&self) -> Vec<String> {
        self.resolved
            .iter()
            .map(|r| r.destination_track_id.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationPlaylist {
    pub id: String,
    pub title: String,
    pub description: String,
}

// Spotify wire types

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
}

impl From<SpotifyUser> for UserIdentity {
    fn from(user: SpotifyUser) -> Self {
        Self {
            display_name: user.display_name.unwrap_or_else(|| user.id.clone()),
            id: user.id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPage<T> {
    pub items: Vec<T>,
    pub total: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Option<SpotifyTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTracksRef {
    pub total: u32,
}

impl From<SpotifyPlaylist> for PlaylistSummary {
    fn from(playlist: SpotifyPlaylist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name,
            track_count: playlist.tracks.map_or(0, |t| t.total),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    pub external_ids: Option<SpotifyExternalIds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyExternalIds {
    pub isrc: Option<String>,
}

impl From<SpotifyTrack> for SourceTrack {
    fn from(track: SpotifyTrack) -> Self {
        let artist = track
            .artists
            .first()
            .map(|a| a.name.as_str())
            .unwrap_or_default();
        let isrc = track
            .external_ids
            .as_ref()
            .and_then(|ids| ids.isrc.as_deref())
            .unwrap_or_default();
        SourceTrack::new(artist, &track.name, isrc)
    }
}

// Tidal wire types

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalDeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub verification_uri_complete: Option<String>,
    pub expires_in: u64,
    pub interval: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalSession {
    pub user_id: u64,
    pub country_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TidalUserProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl TidalUserProfile {
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<&str>>()
            .join(" ");
        match &self.email {
            Some(email) if name.is_empty() => email.clone(),
            Some(email) => format!("{} | {}", name, email),
            None => name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalPlaylist {
    pub uuid: String,
    pub title: String,
    pub description: Option<String>,
}

impl From<TidalPlaylist> for DestinationPlaylist {
    fn from(playlist: TidalPlaylist) -> Self {
        Self {
            id: playlist.uuid,
            title: playlist.title,
            description: playlist.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalTrackDocument {
    #[serde(default)]
    pub data: Vec<TidalTrackResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalTrackResource {
    pub id: String,
    pub attributes: Option<TidalTrackAttributes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TidalTrackAttributes {
    pub title: Option<String>,
    pub isrc: Option<String>,
}

impl From<TidalTrackResource> for DestinationTrack {
    fn from(resource: TidalTrackResource) -> Self {
        let (title, isrc) = match resource.attributes {
            Some(attrs) => (attrs.title, attrs.isrc),
            None => (None, None),
        };
        Self {
            id: resource.id,
            title,
            isrc,
        }
    }
}
