use std::{error::Error, fmt};

use crate::{catalog::DestinationCatalog, types::DestinationPlaylist};

pub const DEFAULT_PLAYLIST_TITLE: &str = "plmigrate";
pub const DEFAULT_DESCRIPTION: &str = "This playlist was created with plmigrate.";
/// Prepended to the description of a playlist whose tracks were not all appended.
pub const INCOMPLETE_PREFIX: &str = "[incomplete] ";

#[derive(Debug)]
pub enum CommitError {
    Create(Box<dyn Error + Send + Sync>),
    Append {
        playlist: DestinationPlaylist,
        /// Tracks appended before the failing batch.
        appended: usize,
        /// Whether the description was rewritten with [`INCOMPLETE_PREFIX`].
        marked_incomplete: bool,
        source: Box<dyn Error + Send + Sync>,
    },
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::Create(e) => write!(f, "failed to create playlist: {}", e),
            CommitError::Append {
                playlist,
                appended,
                source,
                ..
            } => write!(
                f,
                "failed to add tracks to playlist '{}' after {} track(s): {}",
                playlist.title, appended, source
            ),
        }
    }
}

impl Error for CommitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CommitError::Create(e) => Some(e.as_ref()),
            CommitError::Append { source, .. } => Some(source.as_ref()),
        }
    }
}

/// Creates a playlist and fills it with `track_ids` in order.
///
/// An empty (or blank) `title` falls back to [`DEFAULT_PLAYLIST_TITLE`]. Ids are
/// sent in consecutive batches of at most `batch_size`, the last batch holding
/// the remainder; an empty `track_ids` still creates the playlist but sends no
/// batch. `on_batch` receives the running count of appended ids and the total
/// after every successful batch.
///
/// # Errors
///
/// A failed create or a failed batch ends the commit. The playlist is not
/// deleted on a failed batch; instead its description is rewritten with
/// [`INCOMPLETE_PREFIX`] on a best-effort basis and the error reports how far
/// the commit got.
pub async fn commit<F>(
    destination: &dyn DestinationCatalog,
    title: &str,
    description: &str,
    track_ids: &[String],
    batch_size: usize,
    mut on_batch: F,
) -> Result<DestinationPlaylist, CommitError>
where
    F: FnMut(usize, usize),
{
    let title = match title.trim() {
        "" => DEFAULT_PLAYLIST_TITLE,
        t => t,
    };
    let batch_size = batch_size.max(1);

    let playlist = destination
        .create_playlist(title, description)
        .await
        .map_err(CommitError::Create)?;

    let mut appended = 0;
    for batch in track_ids.chunks(batch_size) {
        if let Err(source) = destination
            .append_tracks(&playlist, batch, batch_size)
            .await
        {
            let marked_incomplete = destination
                .update_description(&playlist, &format!("{}{}", INCOMPLETE_PREFIX, description))
                .await
                .is_ok();

            return Err(CommitError::Append {
                playlist,
                appended,
                marked_incomplete,
                source,
            });
        }

        appended += batch.len();
        on_batch(appended, track_ids.len());
    }

    Ok(playlist)
}
