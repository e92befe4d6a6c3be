use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Res,
    config::Config,
    management::TokenManager,
    server, success,
    types::{PkceToken, Service, Token},
    utils, warning,
};

/// How long the callback server waits for the user to authorize.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the complete OAuth 2.0 PKCE flow and caches the resulting token.
///
/// 1. **PKCE Setup**: Generates the code verifier and its S256 challenge
/// 2. **Server Start**: Binds the local callback server on `config.server_addr`
/// 3. **Browser Launch**: Opens the Spotify authorization URL
/// 4. **Callback Handling**: The server exchanges the returned code for a token
/// 5. **Token Persistence**: The token is written to the Spotify session cache
///
/// # Errors
///
/// Fails when the callback server cannot bind, when the user does not finish
/// the authorization within two minutes, or when the token cannot be saved.
/// A browser that cannot be opened only produces a warning with the URL.
pub async fn auth(config: &Config) -> Res<TokenManager> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let listener = server::bind(&config.server_addr).await?;
    let server_state = Arc::clone(&shared_state);
    let server_config = Arc::new(config.clone());
    let server = tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, server_state, server_config).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = Url::parse_with_params(
        &config.spotify_auth_url,
        &[
            ("client_id", config.spotify_client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.spotify_redirect_uri.as_str()),
            ("code_challenge", code_challenge.as_str()),
            ("code_challenge_method", "S256"),
            ("scope", config.spotify_scope.as_str()),
        ],
    )?;

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(Service::Spotify, t);
            token_manager
                .persist()
                .await
                .map_err(|e| format!("Failed to save token to cache: {}", e))?;

            success!("Spotify authentication successful!");
            Ok(token_manager)
        }
        None => Err("Spotify authentication failed or timed out.".into()),
    }
}

/// Polls the shared state once per second until the callback handler stored a
/// token, giving up after [`AUTH_TIMEOUT`].
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may omit `refresh_token` in the response, in which case the returned
/// token carries an empty one and the caller keeps the previous value.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Res<Token> {
    let client = Client::new();
    let res = client
        .post(&config.spotify_token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", config.spotify_client_id.as_str()),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;
    Ok(Token::from_response(&json)?)
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// `verifier` must be the code verifier whose challenge was sent with the
/// authorization request.
pub async fn exchange_code_pkce(config: &Config, code: &str, verifier: &str) -> Res<Token> {
    let client = Client::new();
    let res = client
        .post(&config.spotify_token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.spotify_client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", config.spotify_redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;
    Ok(Token::from_response(&json)?)
}
