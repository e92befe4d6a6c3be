use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::Value;

use crate::{
    Res,
    config::Config,
    info,
    management::TokenManager,
    success,
    types::{Service, TidalDeviceAuthorization, Token},
    warning,
};

const DEVICE_CODE_GRANT: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Runs the device authorization flow and caches the resulting token.
///
/// Prints the verification link and user code, tries to open the link in the
/// browser, then polls until the user confirmed, denied or the code expired.
pub async fn auth(config: &Config) -> Res<TokenManager> {
    let client = Client::new();
    let device: TidalDeviceAuthorization = client
        .post(format!("{}/device_authorization", config.tidal_auth_url))
        .form(&[
            ("client_id", config.tidal_client_id.as_str()),
            ("scope", config.tidal_scope.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let link = verification_link(&device);
    info!(
        "Visit {} and confirm the code {} to log in to Tidal.",
        link, device.user_code
    );
    if webbrowser::open(&link).is_err() {
        warning!("Failed to open browser. Please open the link above manually.");
    }

    let token = poll_for_token(config, &client, &device).await?;
    let token_manager = TokenManager::new(Service::Tidal, token);
    token_manager
        .persist()
        .await
        .map_err(|e| format!("Failed to save token to cache: {}", e))?;

    success!("Tidal authentication successful!");
    Ok(token_manager)
}

fn verification_link(device: &TidalDeviceAuthorization) -> String {
    let link = device
        .verification_uri_complete
        .clone()
        .unwrap_or_else(|| device.verification_uri.clone());
    if link.starts_with("http") {
        link
    } else {
        format!("https://{}", link)
    }
}

async fn poll_for_token(
    config: &Config,
    client: &Client,
    device: &TidalDeviceAuthorization,
) -> Res<Token> {
    let deadline = Instant::now() + Duration::from_secs(device.expires_in);
    let mut interval = Duration::from_secs(device.interval.max(1));

    let mut form = vec![
        ("client_id", config.tidal_client_id.as_str()),
        ("device_code", device.device_code.as_str()),
        ("grant_type", DEVICE_CODE_GRANT),
        ("scope", config.tidal_scope.as_str()),
    ];
    if !config.tidal_client_secret.is_empty() {
        form.push(("client_secret", config.tidal_client_secret.as_str()));
    }

    while Instant::now() < deadline {
        tokio::time::sleep(interval).await;

        let res = client
            .post(format!("{}/token", config.tidal_auth_url))
            .form(&form)
            .send()
            .await?;
        let ok = res.status().is_success();
        let json: Value = res.json().await?;

        if ok {
            return Ok(Token::from_response(&json)?);
        }

        match json["error"].as_str() {
            Some("authorization_pending") => continue,
            Some("slow_down") => interval += Duration::from_secs(5),
            _ => {
                let reason = json["error_description"]
                    .as_str()
                    .or(json["error"].as_str())
                    .unwrap_or("unknown error");
                return Err(format!("Tidal login failed: {}", reason).into());
            }
        }
    }

    Err("Tidal login code expired before it was confirmed.".into())
}

/// Exchanges a Tidal refresh token for a new access token.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Res<Token> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", config.tidal_client_id.as_str()),
        ("scope", config.tidal_scope.as_str()),
    ];
    if !config.tidal_client_secret.is_empty() {
        form.push(("client_secret", config.tidal_client_secret.as_str()));
    }

    let res = Client::new()
        .post(format!("{}/token", config.tidal_auth_url))
        .form(&form)
        .send()
        .await?;

    let json: Value = res.json().await?;
    Ok(Token::from_response(&json)?)
}
