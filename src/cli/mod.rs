//! # CLI Module
//!
//! User-facing commands of plmigrate. Each command connects the services it
//! needs, delegates to the library and renders progress and errors on the
//! console.
//!
//! ## Commands
//!
//! - [`auth`] - Forces a fresh login to Spotify or Tidal
//! - [`playlists`] - Shows the Spotify playlists available for migration
//! - [`migrate`] - The interactive migration flow:
//!   1. Log in to Tidal, then Spotify (cached sessions are reused)
//!   2. Pick a Spotify playlist by its index
//!   3. Read all of its tracks
//!   4. Look every track up on Tidal by ISRC, reporting misses as they happen
//!   5. Name the new Tidal playlist and add the found tracks in batches
//!
//! ## Usage Patterns
//!
//! ```bash
//! plmigrate auth tidal                 # Log in to Tidal
//! plmigrate playlists                  # List Spotify playlists
//! plmigrate migrate                    # Interactive migration
//! plmigrate migrate --playlist 3 --title "Road Trip"
//! ```
//!
//! Failures that end a run are reported through [`crate::error!`], which exits
//! the process.

mod auth;
mod migrate;
mod playlists;

pub use auth::auth;
pub use migrate::MigrateRequest;
pub use migrate::migrate;
pub use playlists::playlists;
