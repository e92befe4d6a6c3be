//! # Spotify Integration Module
//!
//! The source side of a migration: authentication against Spotify and read
//! access to the current user's playlists.
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - OAuth 2.0 PKCE (Proof Key for Code Exchange) flow:
//! - **Code Verifier/Challenge**: 128 random alphanumerics hashed with SHA256
//! - **Local Callback Server**: Temporary axum server receiving the redirect
//! - **Browser Integration**: Opens the authorization URL automatically
//! - **Token Refresh**: Exchanges the refresh token once the access token expires
//!
//! ### Client Module
//!
//! [`client`] - [`SpotifyClient`], the [`crate::catalog::SourceCatalog`] backed by
//! the Web API:
//! - `GET /me` - Identity of the logged-in user
//! - `GET /users/{user_id}/playlists` - Playlists, 50 per page
//! - `GET /users/{user_id}/playlists/{playlist_id}/tracks` - Tracks, 100 per page
//!
//! Playlist items without a track (removed or local files) are skipped. Tracks
//! without an ISRC are kept with an empty ISRC so they show up as unresolved.
//!
//! ## Usage Patterns
//!
//! ```rust
//! let spotify = SpotifyClient::connect(&config).await?;
//! let me = spotify.current_user().await?;
//! let page = spotify.list_user_playlists(&me.id, 0, 50).await?;
//! ```

pub mod auth;
pub mod client;

pub use client::SpotifyClient;
