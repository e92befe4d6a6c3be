#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use plmigrate::{
    Res,
    catalog::{DestinationCatalog, SourceCatalog},
    types::{
        DestinationPlaylist, DestinationTrack, Page, PlaylistSummary, SourceTrack, UserIdentity,
    },
};

pub fn track(artist: &str, title: &str, isrc: &str) -> SourceTrack {
    SourceTrack::new(artist, title, isrc)
}

pub fn candidate(id: &str) -> DestinationTrack {
    DestinationTrack {
        id: id.to_string(),
        title: None,
        isrc: None,
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// In-memory destination catalog recording every call it receives.
#[derive(Default)]
pub struct FakeDestination {
    pub catalog: HashMap<String, Vec<DestinationTrack>>,
    pub failing_isrcs: HashSet<String>,
    pub delays_ms: HashMap<String, u64>,
    pub fail_create: bool,
    /// Zero-based index of the append call that fails.
    pub fail_append_at: Option<usize>,
    pub fail_update: bool,
    pub lookups: Mutex<Vec<String>>,
    pub created: Mutex<Vec<DestinationPlaylist>>,
    pub appends: Mutex<Vec<Vec<String>>>,
    pub descriptions: Mutex<Vec<String>>,
}

impl FakeDestination {
    /// One candidate per ISRC.
    pub fn with_tracks(entries: &[(&str, &str)]) -> Self {
        let catalog = entries
            .iter()
            .map(|(isrc, id)| (isrc.to_string(), vec![candidate(id)]))
            .collect();
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn with_candidates(mut self, isrc: &str, ids: &[&str]) -> Self {
        self.catalog
            .insert(isrc.to_string(), ids.iter().map(|id| candidate(id)).collect());
        self
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn appends(&self) -> Vec<Vec<String>> {
        self.appends.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<DestinationPlaylist> {
        self.created.lock().unwrap().clone()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.descriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl DestinationCatalog for FakeDestination {
    async fn current_user(&self) -> Res<UserIdentity> {
        Ok(UserIdentity {
            id: "42".to_string(),
            display_name: "Test User".to_string(),
        })
    }

    async fn lookup_tracks_by_isrc(&self, isrc: &str) -> Res<Vec<DestinationTrack>> {
        self.lookups.lock().unwrap().push(isrc.to_string());

        if let Some(ms) = self.delays_ms.get(isrc) {
            tokio::time::sleep(Duration::from_millis(*ms)).await;
        }
        if self.failing_isrcs.contains(isrc) {
            return Err(format!("lookup failed for {}", isrc).into());
        }

        Ok(self.catalog.get(isrc).cloned().unwrap_or_default())
    }

    async fn create_playlist(&self, title: &str, description: &str) -> Res<DestinationPlaylist> {
        if self.fail_create {
            return Err("create failed".into());
        }

        let mut created = self.created.lock().unwrap();
        let playlist = DestinationPlaylist {
            id: format!("playlist-{}", created.len() + 1),
            title: title.to_string(),
            description: description.to_string(),
        };
        created.push(playlist.clone());
        Ok(playlist)
    }

    async fn append_tracks(
        &self,
        _playlist: &DestinationPlaylist,
        track_ids: &[String],
        limit: usize,
    ) -> Res<()> {
        let mut appends = self.appends.lock().unwrap();
        if self.fail_append_at == Some(appends.len()) {
            return Err("append failed".into());
        }

        appends.push(track_ids.iter().take(limit).cloned().collect());
        Ok(())
    }

    async fn update_description(
        &self,
        _playlist: &DestinationPlaylist,
        description: &str,
    ) -> Res<()> {
        if self.fail_update {
            return Err("update failed".into());
        }

        self.descriptions.lock().unwrap().push(description.to_string());
        Ok(())
    }
}

/// In-memory source catalog serving fixed playlists and tracks.
#[derive(Default)]
pub struct FakeSource {
    pub playlists: Vec<PlaylistSummary>,
    pub tracks: Vec<SourceTrack>,
    pub track_calls: Mutex<Vec<(u32, u32)>>,
}

#[async_trait]
impl SourceCatalog for FakeSource {
    async fn current_user(&self) -> Res<UserIdentity> {
        Ok(UserIdentity {
            id: "spotify-user".to_string(),
            display_name: "Spotify User".to_string(),
        })
    }

    async fn list_user_playlists(
        &self,
        _user_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<PlaylistSummary>> {
        Ok(Page {
            items: self
                .playlists
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
            total: self.playlists.len() as u32,
        })
    }

    async fn list_playlist_tracks(
        &self,
        _user_id: &str,
        _playlist_id: &str,
        offset: u32,
        limit: u32,
    ) -> Res<Page<SourceTrack>> {
        self.track_calls.lock().unwrap().push((offset, limit));
        Ok(Page {
            items: self
                .tracks
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect(),
            total: self.tracks.len() as u32,
        })
    }
}
