use tabled::Table;

use crate::{
    Res,
    catalog::SourceCatalog,
    cli::auth::announce_login,
    config::Config,
    error, info, pagination,
    spotify::{SpotifyClient, client::PLAYLIST_PAGE_SIZE},
    types::{PlaylistSummary, PlaylistTableRow, Service, UserIdentity},
    utils,
};

/// Prints the Spotify playlists of the logged-in user as an indexed table.
pub async fn playlists(config: &Config) {
    let spotify = match SpotifyClient::connect(config).await {
        Ok(client) => client,
        Err(e) => error!("Failed to log in to Spotify: {}", e),
    };

    let user = spotify.current_user().await;
    announce_login(Service::Spotify, &user);
    let Ok(user) = user else { return };

    let pb = utils::spinner("Fetching playlists...");
    let playlists = fetch_playlists(&spotify, &user).await;
    pb.finish_and_clear();

    match playlists {
        Ok(playlists) => print_playlists(&playlists),
        Err(e) => error!("Failed to fetch playlists: {}", e),
    }
}

pub(crate) async fn fetch_playlists(
    source: &dyn SourceCatalog,
    user: &UserIdentity,
) -> Res<Vec<PlaylistSummary>> {
    pagination::fetch_all_pages(PLAYLIST_PAGE_SIZE, |offset, limit| {
        source.list_user_playlists(&user.id, offset, limit)
    })
    .await
}

pub(crate) fn print_playlists(playlists: &[PlaylistSummary]) {
    if playlists.is_empty() {
        info!("No playlists found.");
        return;
    }

    let rows: Vec<PlaylistTableRow> = playlists
        .iter()
        .enumerate()
        .map(|(index, p)| PlaylistTableRow {
            index,
            name: p.name.clone(),
            tracks: p.track_count,
        })
        .collect();

    println!("{}", Table::new(rows));
}
