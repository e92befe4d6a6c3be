//! # API Module
//!
//! HTTP endpoints of the short-lived local server that receives the Spotify
//! OAuth redirect.
//!
//! ## Endpoints
//!
//! - [`callback`] - Completes the PKCE flow by exchanging the authorization code
//!   for an access token and handing it to the waiting auth flow.
//! - [`health`] - Returns application status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use plmigrate::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
