use std::path::PathBuf;

use chrono::Utc;

use crate::{
    Res,
    config::{self, Config},
    spotify, tidal,
    types::{Service, Token},
};

/// Seconds before the reported expiry at which a token is already refreshed.
const EXPIRY_MARGIN: u64 = 240;

/// Cached session token of one service.
pub struct TokenManager {
    service: Service,
    token: Token,
}

impl TokenManager {
    pub fn new(service: Service, token: Token) -> Self {
        TokenManager { service, token }
    }

    pub async fn load(service: Service) -> Result<Self, String> {
        let path = Self::token_path(service);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { service, token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path(self.service);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and re-persisting it first when it
    /// is about to expire.
    pub async fn get_valid_token(&mut self, config: &Config) -> Res<String> {
        if self.is_expired() {
            let mut new_token = match self.service {
                Service::Spotify => {
                    spotify::auth::refresh_token(config, &self.token.refresh_token).await
                }
                Service::Tidal => tidal::auth::refresh_token(config, &self.token.refresh_token).await,
            }
            .map_err(|e| {
                format!(
                    "{} session expired and could not be refreshed, run plmigrate auth {}: {}",
                    self.service,
                    self.service.as_str(),
                    e
                )
            })?;

            if new_token.refresh_token.is_empty() {
                new_token.refresh_token = self.token.refresh_token.clone();
            }
            self.token = new_token;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now >= (self.token.obtained_at + self.token.expires_in).saturating_sub(EXPIRY_MARGIN)
    }

    pub fn token_path(service: Service) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/{}-token.json", service.as_str()));
        path
    }
}
