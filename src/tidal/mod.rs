//! # Tidal Integration Module
//!
//! The destination side of a migration.
//!
//! - [`auth`] - OAuth 2.0 device authorization: the user confirms a short code
//!   in the browser while the CLI polls the token endpoint.
//! - [`client`] - [`TidalClient`], the [`crate::catalog::DestinationCatalog`]
//!   backed by the Tidal APIs. ISRC lookups go to the v2 open API, playlist
//!   writes to the v1 API, which guards every modification with the playlist's
//!   `ETag`.

pub mod auth;
pub mod client;

pub use client::TidalClient;
