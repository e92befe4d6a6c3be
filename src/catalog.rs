//! Catalog seams consumed by the migration core.
//!
//! The Spotify and Tidal clients implement these traits against the real web
//! APIs; tests implement them in memory.

use async_trait::async_trait;

use crate::{
    Res,
    types::{DestinationPlaylist, DestinationTrack, Page, PlaylistSummary, SourceTrack, UserIdentity},
};

/// Read access to the catalog playlists are migrated from.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// The user the session is logged in as.
    async fn current_user(&self) -> Res<UserIdentity>;

    async fn list_user_playlists(
        &self,
        user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<PlaylistSummary>>;

    async fn list_playlist_tracks(
        &self,
        user_id: &str,
        playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<SourceTrack>>;
}

/// Lookup and write access to the catalog playlists are migrated to.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    async fn current_user(&self) -> Res<UserIdentity>;

    /// All tracks carrying `isrc`, in the order the service returns them.
    /// An unknown ISRC yields an empty list.
    async fn lookup_tracks_by_isrc(&self, isrc: &str) -> Res<Vec<DestinationTrack>>;

    async fn create_playlist(&self, title: &str, description: &str) -> Res<DestinationPlaylist>;

    /// Appends at most `limit` ids from the front of `track_ids`.
    async fn append_tracks(
        &self,
        playlist: &DestinationPlaylist,
        track_ids: &[String],
        limit: usize,
    ) -> Res<()>;

    async fn update_description(
        &self,
        playlist: &DestinationPlaylist,
        description: &str,
    ) -> Res<()>;
}
