use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, config::Config, types::PkceToken};

/// Binds the callback server address so a port conflict surfaces before the
/// user is sent to the browser.
pub async fn bind(server_addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(server_addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", server_addr, e))?;
    let listener = TcpListener::bind(&addr).await?;
    Ok(listener)
}

pub async fn start_api_server(
    listener: TcpListener,
    state: Arc<Mutex<Option<PkceToken>>>,
    config: Arc<Config>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(config));

    axum::serve(listener, app).await?;
    Ok(())
}
