use crate::{
    Res,
    catalog::{DestinationCatalog, SourceCatalog},
    config::Config,
    error, info,
    management::TokenManager,
    spotify::{self, SpotifyClient},
    success,
    tidal::{self, TidalClient},
    types::{Service, UserIdentity},
};

/// Forces a new login for `service`, replacing its cached session.
pub async fn auth(config: &Config, service: Service) {
    let identity = match service {
        Service::Spotify => login_spotify(config).await,
        Service::Tidal => login_tidal(config).await,
    };

    announce_login(service, &identity);
}

async fn login_spotify(config: &Config) -> Res<UserIdentity> {
    let tokens = spotify::auth::auth(config).await?;
    SpotifyClient::new(config, tokens).current_user().await
}

async fn login_tidal(config: &Config) -> Res<UserIdentity> {
    tidal::auth::auth(config).await?;
    TidalClient::connect(config).await?.current_user().await
}

/// Reports who a session is logged in as and where its cache lives, or exits
/// when the identity could not be fetched.
pub(crate) fn announce_login(service: Service, identity: &Res<UserIdentity>) {
    match identity {
        Ok(user) => {
            success!("You're logged in to {} as {}", service, user.display_name);
            info!(
                "(To force a new login, delete the file at {})",
                TokenManager::token_path(service).display()
            );
        }
        Err(e) => error!("Failed to log in to {}: {}", service, e),
    }
}
