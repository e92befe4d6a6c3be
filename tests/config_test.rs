use std::collections::HashMap;

use plmigrate::{
    config::{Config, ConfigError, MAX_BATCH_SIZE},
    management::TokenManager,
    types::Service,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

const REQUIRED: [(&str, &str); 2] = [
    ("SPOTIFY_API_AUTH_CLIENT_ID", "spotify-client"),
    ("TIDAL_CLIENT_ID", "tidal-client"),
];

#[test]
fn test_defaults_with_only_required_keys() {
    let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();

    assert_eq!(config.spotify_client_id, "spotify-client");
    assert_eq!(config.tidal_client_id, "tidal-client");
    assert_eq!(config.spotify_redirect_uri, "http://127.0.0.1:8888/callback");
    assert_eq!(config.server_addr, "127.0.0.1:8888");
    assert_eq!(config.spotify_api_url, "https://api.spotify.com/v1");
    assert_eq!(config.tidal_api_url, "https://api.tidal.com/v1");
    assert_eq!(config.tidal_openapi_url, "https://openapi.tidal.com/v2");
    assert!(config.tidal_client_secret.is_empty());
    assert_eq!(config.batch_size, MAX_BATCH_SIZE);
}

#[test]
fn test_overrides_are_applied() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("SERVER_ADDRESS", "0.0.0.0:9000"));
    vars.push(("SPOTIFY_API_URL", "http://localhost:1234"));
    vars.push(("TIDAL_CLIENT_SECRET", "shh"));
    vars.push(("MIGRATE_BATCH_SIZE", "25"));

    let config = Config::from_lookup(lookup(&vars)).unwrap();

    assert_eq!(config.server_addr, "0.0.0.0:9000");
    assert_eq!(config.spotify_api_url, "http://localhost:1234");
    assert_eq!(config.tidal_client_secret, "shh");
    assert_eq!(config.batch_size, 25);
}

#[test]
fn test_missing_required_key() {
    let err = Config::from_lookup(lookup(&[("TIDAL_CLIENT_ID", "tidal-client")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"));

    let err = Config::from_lookup(lookup(&[(
        "SPOTIFY_API_AUTH_CLIENT_ID",
        "spotify-client",
    )]))
    .unwrap_err();
    assert_eq!(err, ConfigError::Missing("TIDAL_CLIENT_ID"));
}

#[test]
fn test_blank_value_counts_as_unset() {
    let err = Config::from_lookup(lookup(&[
        ("SPOTIFY_API_AUTH_CLIENT_ID", "  "),
        ("TIDAL_CLIENT_ID", "tidal-client"),
    ]))
    .unwrap_err();
    assert_eq!(err, ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"));

    let mut vars = REQUIRED.to_vec();
    vars.push(("SERVER_ADDRESS", ""));
    let config = Config::from_lookup(lookup(&vars)).unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:8888");
}

#[test]
fn test_batch_size_is_clamped() {
    for (value, expected) in [("0", 1), ("1", 1), ("100", 100), ("500", MAX_BATCH_SIZE)] {
        let mut vars = REQUIRED.to_vec();
        vars.push(("MIGRATE_BATCH_SIZE", value));

        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.batch_size, expected, "MIGRATE_BATCH_SIZE={}", value);
    }
}

#[test]
fn test_invalid_batch_size() {
    let mut vars = REQUIRED.to_vec();
    vars.push(("MIGRATE_BATCH_SIZE", "lots"));

    let err = Config::from_lookup(lookup(&vars)).unwrap_err();
    assert_eq!(
        err,
        ConfigError::Invalid {
            key: "MIGRATE_BATCH_SIZE",
            value: "lots".to_string(),
        }
    );
    assert!(err.to_string().contains("lots"));
}

#[test]
fn test_token_cache_path_per_service() {
    let spotify = TokenManager::token_path(Service::Spotify);
    let tidal = TokenManager::token_path(Service::Tidal);

    assert!(spotify.ends_with("plmigrate/cache/spotify-token.json"));
    assert!(tidal.ends_with("plmigrate/cache/tidal-token.json"));
}
