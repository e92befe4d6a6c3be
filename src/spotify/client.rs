use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    Res,
    catalog::SourceCatalog,
    config::Config,
    management::TokenManager,
    spotify::auth,
    types::{
        Page, PlaylistSummary, Service, SourceTrack, SpotifyPage, SpotifyPlaylist,
        SpotifyPlaylistItem, SpotifyUser, UserIdentity,
    },
};

/// Largest page `GET /users/{id}/playlists` returns.
pub const PLAYLIST_PAGE_SIZE: u32 = 50;
/// Largest page `GET /users/{id}/playlists/{id}/tracks` returns.
pub const TRACK_PAGE_SIZE: u32 = 100;

const TRACK_FIELDS: &str = "items(track(name,artists(name),external_ids(isrc))),total";

/// Authenticated Spotify Web API session.
pub struct SpotifyClient {
    client: Client,
    config: Config,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: &Config, tokens: TokenManager) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
            tokens: Mutex::new(tokens),
        }
    }

    /// Uses the cached session when there is one, otherwise runs the PKCE login.
    pub async fn connect(config: &Config) -> Res<Self> {
        let tokens = match TokenManager::load(Service::Spotify).await {
            Ok(tokens) => tokens,
            Err(_) => auth::auth(config).await?,
        };
        Ok(Self::new(config, tokens))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Res<T> {
        let token = self.tokens.lock().await.get_valid_token(&self.config).await?;
        let api_url = format!("{uri}{path}", uri = &self.config.spotify_api_url, path = path);

        let response = self
            .client
            .get(&api_url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SourceCatalog for SpotifyClient {
    async fn current_user(&self) -> Res<UserIdentity> {
        let user: SpotifyUser = self.get("/me", &[]).await?;
        Ok(user.into())
    }

    async fn list_user_playlists(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<PlaylistSummary>> {
        let page: SpotifyPage<SpotifyPlaylist> = self
            .get(
                &format!("/users/{}/playlists", user_id),
                &[
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;

        Ok(Page {
            items: page.items.into_iter().map(PlaylistSummary::from).collect(),
            total: page.total,
        })
    }

    async fn list_playlist_tracks(
        &self,
        user_id: &str,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<SourceTrack>> {
        let page: SpotifyPage<SpotifyPlaylistItem> = self
            .get(
                &format!("/users/{}/playlists/{}/tracks", user_id, playlist_id),
                &[
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                    ("fields", TRACK_FIELDS.to_string()),
                ],
            )
            .await?;

        Ok(Page {
            items: page
                .items
                .into_iter()
                .filter_map(|item| item.track)
                .map(SourceTrack::from)
                .collect(),
            total: page.total,
        })
    }
}
