//! # Migration Core
//!
//! The two steps that turn a list of source tracks into a destination playlist:
//!
//! 1. [`reconcile`] looks every source track up by ISRC in the destination
//!    catalog. Tracks that cannot be matched, or whose lookup errors, are set
//!    aside and the run continues.
//! 2. [`commit`] creates the destination playlist and appends the resolved ids
//!    in batches no larger than the service accepts per request.
//!
//! The output of the first step keeps the source order, skipping unresolved
//! tracks, and is fed unchanged into the second.

mod commit;
mod reconcile;

pub use commit::CommitError;
pub use commit::DEFAULT_DESCRIPTION;
pub use commit::DEFAULT_PLAYLIST_TITLE;
pub use commit::INCOMPLETE_PREFIX;
pub use commit::commit;
pub use reconcile::CandidateSelector;
pub use reconcile::FirstMatch;
pub use reconcile::LookupOutcome;
pub use reconcile::ReconcileOptions;
pub use reconcile::reconcile;
