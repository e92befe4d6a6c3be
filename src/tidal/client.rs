use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{ACCEPT, ETAG, IF_NONE_MATCH},
};
use tokio::sync::Mutex;

use crate::{
    Res,
    catalog::DestinationCatalog,
    config::Config,
    management::TokenManager,
    tidal::auth,
    types::{
        DestinationPlaylist, DestinationTrack, Service, TidalPlaylist, TidalSession,
        TidalTrackDocument, TidalUserProfile, UserIdentity,
    },
};

const JSON_API: &str = "application/vnd.api+json";

/// Authenticated Tidal session.
pub struct TidalClient {
    client: Client,
    config: Config,
    tokens: Mutex<TokenManager>,
    session: TidalSession,
    allow_duplicates: bool,
}

impl TidalClient {
    /// Uses the cached session when there is one, otherwise runs the device
    /// login, then resolves the user id and country code of the session.
    pub async fn connect(config: &Config) -> Res<Self> {
        let mut tokens = match TokenManager::load(Service::Tidal).await {
            Ok(tokens) => tokens,
            Err(_) => auth::auth(config).await?,
        };

        let client = Client::new();
        let token = tokens.get_valid_token(config).await?;
        let session: TidalSession = client
            .get(format!("{}/sessions", config.tidal_api_url))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Self {
            client,
            config: config.clone(),
            tokens: Mutex::new(tokens),
            session,
            allow_duplicates: false,
        })
    }

    /// Whether a track already in the playlist is added again. Off by default,
    /// in which case Tidal skips it.
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn country_code(&self) -> &str {
        &self.session.country_code
    }

    async fn authorized(&self, request: RequestBuilder) -> Res<RequestBuilder> {
        let token = self.tokens.lock().await.get_valid_token(&self.config).await?;
        Ok(request
            .bearer_auth(token)
            .query(&[("countryCode", self.country_code())]))
    }

    /// Current `ETag` of a playlist, required by every v1 playlist write.
    async fn etag(&self, playlist_id: &str) -> Res<String> {
        let request = self.client.get(format!(
            "{}/playlists/{}",
            self.config.tidal_api_url, playlist_id
        ));
        let response = self
            .authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?;

        let etag = response
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| format!("Tidal returned no ETag for playlist {}", playlist_id))?;
        Ok(etag.to_string())
    }
}

/// Form body of a playlist append: the first `limit` ids, comma-joined.
///
/// Ids Tidal cannot add (region-locked, withdrawn) are skipped rather than
/// failing the whole request. Returns `None` when there is nothing to send.
pub fn append_form(
    track_ids: &[String],
    limit: usize,
    allow_duplicates: bool,
) -> Option<[(&'static str, String); 3]> {
    let ids = track_ids
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(",");
    if ids.is_empty() {
        return None;
    }

    let on_dupes = if allow_duplicates { "ADD" } else { "SKIP" };
    Some([
        ("trackIds", ids),
        ("onArtifactNotFound", "SKIP".to_string()),
        ("onDupes", on_dupes.to_string()),
    ])
}

#[async_trait]
impl DestinationCatalog for TidalClient {
    async fn current_user(&self) -> Res<UserIdentity> {
        let request = self.client.get(format!(
            "{}/users/{}",
            self.config.tidal_api_url, self.session.user_id
        ));
        let profile: TidalUserProfile = self
            .authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(UserIdentity {
            id: self.session.user_id.to_string(),
            display_name: profile.display_name(),
        })
    }

    async fn lookup_tracks_by_isrc(&self, isrc: &str) -> Res<Vec<DestinationTrack>> {
        let request = self
            .client
            .get(format!("{}/tracks", self.config.tidal_openapi_url))
            .header(ACCEPT, JSON_API)
            .query(&[("filter[isrc]", isrc)]);
        let response = self.authorized(request).await?.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let document: TidalTrackDocument = response.error_for_status()?.json().await?;
        Ok(document
            .data
            .into_iter()
            .map(DestinationTrack::from)
            .collect())
    }

    async fn create_playlist(&self, title: &str, description: &str) -> Res<DestinationPlaylist> {
        let request = self
            .client
            .post(format!(
                "{}/users/{}/playlists",
                self.config.tidal_api_url, self.session.user_id
            ))
            .form(&[("title", title), ("description", description)]);
        let playlist: TidalPlaylist = self
            .authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(playlist.into())
    }

    async fn append_tracks(
        &self,
        playlist: &DestinationPlaylist,
        track_ids: &[String],
        limit: usize,
    ) -> Res<()> {
        let Some(form) = append_form(track_ids, limit, self.allow_duplicates) else {
            return Ok(());
        };

        let etag = self.etag(&playlist.id).await?;
        let request = self
            .client
            .post(format!(
                "{}/playlists/{}/items",
                self.config.tidal_api_url, playlist.id
            ))
            .header(IF_NONE_MATCH, etag)
            .form(&form);

        self.authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_description(
        &self,
        playlist: &DestinationPlaylist,
        description: &str,
    ) -> Res<()> {
        let etag = self.etag(&playlist.id).await?;
        let request = self
            .client
            .post(format!(
                "{}/playlists/{}",
                self.config.tidal_api_url, playlist.id
            ))
            .header(IF_NONE_MATCH, etag)
            .form(&[
                ("title", playlist.title.as_str()),
                ("description", description),
            ]);

        self.authorized(request)
            .await?
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
