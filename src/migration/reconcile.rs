use std::pin::pin;

use futures::{StreamExt, stream};

use crate::{
    catalog::DestinationCatalog,
    types::{DestinationTrack, ReconciliationResult, ResolvedTrack, SourceTrack},
    utils,
};

/// Chooses the destination track for a source track among the candidates an
/// ISRC lookup returned.
pub trait CandidateSelector: Send + Sync {
    fn select<'c>(
        &self,
        source: &SourceTrack,
        candidates: &'c [DestinationTrack],
    ) -> Option<&'c DestinationTrack>;
}

/// Takes whatever the service lists first.
///
/// Releases that share a recording (remasters, compilations, explicit and clean
/// cuts) are not told apart, so the chosen track is not guaranteed to be the
/// closest match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl CandidateSelector for FirstMatch {
    fn select<'c>(
        &self,
        _source: &SourceTrack,
        candidates: &'c [DestinationTrack],
    ) -> Option<&'c DestinationTrack> {
        candidates.first()
    }
}

pub struct ReconcileOptions<'s> {
    pub selector: &'s dyn CandidateSelector,
    /// Lookups in flight at once. `1` keeps the loop strictly serial.
    pub concurrency: usize,
}

impl Default for ReconcileOptions<'static> {
    fn default() -> Self {
        Self {
            selector: &FirstMatch,
            concurrency: 1,
        }
    }
}

/// Result of looking up a single source track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome<'a> {
    Resolved(ResolvedTrack<'a>),
    /// The ISRC matched nothing, or the track carries no ISRC at all.
    NotFound(&'a SourceTrack),
    /// The lookup request itself failed. Counted the same as `NotFound`.
    Failed(&'a SourceTrack, String),
}

impl<'a> LookupOutcome<'a> {
    pub fn source(&self) -> &'a SourceTrack {
        match self {
            LookupOutcome::Resolved(resolved) => resolved.source,
            LookupOutcome::NotFound(track) | LookupOutcome::Failed(track, _) => track,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, LookupOutcome::Resolved(_))
    }
}

/// Resolves `tracks` in the destination catalog by ISRC.
///
/// Every track gets exactly one lookup; there are no retries. A track whose
/// lookup finds nothing or fails lands in `unresolved_tracks` and processing
/// moves on, so no single track can abort the run. `on_outcome` is called for
/// each track as soon as its outcome is known, in source order, together with
/// the track's index.
///
/// With `options.concurrency > 1` several lookups run at once, but outcomes are
/// still delivered and collected in source order.
///
/// # Example
///
/// ```
/// let result = reconcile(&tidal, &tracks, &ReconcileOptions::default(), |_, outcome| {
///     if !outcome.is_resolved() {
///         warning!("Tidal couldn't locate {}", outcome.source());
///     }
/// })
/// .await;
/// ```
pub async fn reconcile<'a, F>(
    destination: &dyn DestinationCatalog,
    tracks: &'a [SourceTrack],
    options: &ReconcileOptions<'_>,
    mut on_outcome: F,
) -> ReconciliationResult<'a>
where
    F: FnMut(usize, &LookupOutcome<'a>),
{
    let selector = options.selector;
    let lookups = stream::iter(tracks.iter())
        .map(|track| lookup_track(destination, selector, track))
        .buffered(options.concurrency.max(1))
        .enumerate();
    let mut lookups = pin!(lookups);

    let mut result = ReconciliationResult::default();
    while let Some((index, outcome)) = lookups.next().await {
        on_outcome(index, &outcome);
        match outcome {
            LookupOutcome::Resolved(resolved) => result.resolved.push(resolved),
            LookupOutcome::NotFound(track) | LookupOutcome::Failed(track, _) => {
                result.unresolved_tracks.push(track)
            }
        }
    }

    result
}

async fn lookup_track<'a>(
    destination: &dyn DestinationCatalog,
    selector: &dyn CandidateSelector,
    track: &'a SourceTrack,
) -> LookupOutcome<'a> {
    let isrc = utils::normalize_isrc(&track.isrc);
    if isrc.is_empty() {
        return LookupOutcome::NotFound(track);
    }

    match destination.lookup_tracks_by_isrc(&isrc).await {
        Ok(candidates) => match selector.select(track, &candidates) {
            Some(candidate) => LookupOutcome::Resolved(ResolvedTrack {
                source: track,
                destination_track_id: candidate.id.clone(),
            }),
            None => LookupOutcome::NotFound(track),
        },
        Err(e) => LookupOutcome::Failed(track, e.to_string()),
    }
}
