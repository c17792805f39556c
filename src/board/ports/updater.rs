//! Update port: the single entry point through which board state changes.

use crate::board::domain::{BoardTransform, DanglingReference, LoadedBoard};
use thiserror::Error;

/// Result type for board update operations.
pub type BoardUpdateResult<T> = Result<T, BoardUpdateError>;

/// Outcome of applying one transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The state changed and was committed as the given revision.
    Committed {
        /// Revision number after the commit.
        revision: u64,
    },
    /// The transformation returned an equal state; nothing was committed.
    Unchanged,
}

/// Owner of the committed board snapshot.
///
/// Implementations apply each transformation to the state current at call
/// time and commit the result whole, persisting it as they see fit. Because
/// every caller goes through [`BoardUpdater::apply_update`], no two
/// transformations interleave against one snapshot.
pub trait BoardUpdater {
    /// Applies `transform` to the current state and commits the result.
    ///
    /// # Errors
    ///
    /// Returns [`BoardUpdateError::DanglingReferences`] when the result
    /// would reference tasks that do not exist, or
    /// [`BoardUpdateError::Unavailable`] when the snapshot cannot be
    /// accessed. The committed state is unchanged in both cases.
    fn apply_update(&self, transform: BoardTransform) -> BoardUpdateResult<CommitOutcome>;

    /// Returns the current snapshot for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`BoardUpdateError::Unavailable`] when the snapshot cannot be
    /// accessed.
    fn snapshot(&self) -> BoardUpdateResult<LoadedBoard>;
}

/// Errors returned by board updater implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardUpdateError {
    /// The transformation would leave column entries without task records.
    #[error("commit rejected: {} column entries would not resolve", .0.len())]
    DanglingReferences(Vec<DanglingReference>),

    /// The snapshot could not be accessed.
    #[error("board snapshot unavailable: {0}")]
    Unavailable(String),
}
