use crate::{
    Res,
    catalog::{DestinationCatalog, SourceCatalog},
    cli::{
        auth::announce_login,
        playlists::{fetch_playlists, print_playlists},
    },
    config::Config,
    error, info,
    migration::{self, CommitError, LookupOutcome, ReconcileOptions},
    pagination,
    spotify::{SpotifyClient, client::TRACK_PAGE_SIZE},
    success,
    tidal::TidalClient,
    types::{Page, Service, SourceTrack},
    utils, warning,
};

/// Choices for a migration run. Anything left `None` is asked for interactively.
#[derive(Debug, Clone, Default)]
pub struct MigrateRequest {
    pub playlist: Option<usize>,
    pub title: Option<String>,
    pub concurrency: usize,
    pub allow_duplicates: bool,
}

pub async fn migrate(config: &Config, request: MigrateRequest) {
    info!("Logging in to Tidal!");
    let tidal = match TidalClient::connect(config).await {
        Ok(client) => client.allow_duplicates(request.allow_duplicates),
        Err(e) => error!("Failed to log in to Tidal: {}", e),
    };
    announce_login(Service::Tidal, &tidal.current_user().await);

    info!("Logging in to Spotify!");
    let spotify = match SpotifyClient::connect(config).await {
        Ok(client) => client,
        Err(e) => error!("Failed to log in to Spotify: {}", e),
    };
    let me = spotify.current_user().await;
    announce_login(Service::Spotify, &me);
    let Ok(me) = me else { return };

    let playlists = match fetch_playlists(&spotify, &me).await {
        Ok(playlists) => playlists,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };
    print_playlists(&playlists);

    let selection = match request.playlist {
        Some(index) => utils::parse_selection(&index.to_string(), playlists.len()),
        None => match utils::prompt("\nEnter a number to select a playlist (Default: 0):") {
            Ok(input) => utils::parse_selection(&input, playlists.len()),
            Err(e) => error!("Failed to read selection: {}", e),
        },
    };
    let playlist = match selection {
        Ok(index) => &playlists[index],
        Err(e) => error!("{}", e),
    };

    info!("Reading tracks of {}...", playlist.name);
    let tracks = match pagination::fetch_all_pages(TRACK_PAGE_SIZE, |offset, limit| {
        fetch_tracks_page(&spotify, &me.id, &playlist.id, offset, limit)
    })
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => error!("Failed to fetch tracks of {}: {}", playlist.name, e),
    };

    info!("Collecting track list...");
    let pb = utils::progress_bar(tracks.len() as u64, "Looking up tracks on Tidal");
    let options = ReconcileOptions {
        concurrency: request.concurrency.max(1),
        ..ReconcileOptions::default()
    };
    let result = migration::reconcile(&tidal, &tracks, &options, |_, outcome| {
        pb.inc(1);
        match outcome {
            LookupOutcome::Resolved(_) => {}
            LookupOutcome::NotFound(track) => {
                pb.suspend(|| warning!("Tidal couldn't locate {}", track))
            }
            LookupOutcome::Failed(track, reason) => {
                pb.suspend(|| warning!("Tidal couldn't locate {} ({})", track, reason))
            }
        }
    })
    .await;
    pb.finish_and_clear();

    if result.unresolved_count() > 0 {
        warning!("Unable to find {} track(s)", result.unresolved_count());
    }
    success!(
        "Found {} of {} track(s) on Tidal",
        result.resolved.len(),
        tracks.len()
    );

    let title = match request.title {
        Some(title) => title,
        None => match utils::prompt(&format!(
            "Enter Tidal playlist title (Default: {}):",
            migration::DEFAULT_PLAYLIST_TITLE
        )) {
            Ok(title) => title,
            Err(e) => error!("Failed to read playlist title: {}", e),
        },
    };

    let track_ids = result.track_ids();
    let pb = utils::progress_bar(track_ids.len() as u64, "Adding tracks to Tidal playlist");
    let committed = migration::commit(
        &tidal,
        &title,
        migration::DEFAULT_DESCRIPTION,
        &track_ids,
        config.batch_size,
        |appended, _| pb.set_position(appended as u64),
    )
    .await;
    pb.finish_and_clear();

    match committed {
        Ok(created) => success!(
            "Created Tidal playlist {} with {} track(s).",
            created.title,
            track_ids.len()
        ),
        Err(CommitError::Append {
            playlist,
            appended,
            marked_incomplete,
            source,
        }) => {
            if marked_incomplete {
                warning!(
                    "Playlist {} was left with {} of {} track(s) and marked incomplete.",
                    playlist.title,
                    appended,
                    track_ids.len()
                );
            } else {
                warning!(
                    "Playlist {} was left with {} of {} track(s).",
                    playlist.title,
                    appended,
                    track_ids.len()
                );
            }
            error!("Failed to add tracks to Tidal playlist: {}", source)
        }
        Err(e) => error!("{}", e),
    }
}

async fn fetch_tracks_page(
    spotify: &SpotifyClient,
    user_id: &str,
    playlist_id: &str,
    offset: u32,
    limit: u32,
) -> Res<Page<SourceTrack>> {
    let page = spotify
        .list_playlist_tracks(user_id, playlist_id, offset, limit)
        .await?;
    for (idx, track) in page.items.iter().enumerate() {
        println!("{} {}", offset as usize + idx, track);
    }
    Ok(page)
}
