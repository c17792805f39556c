//! In-memory board store for hosts and tests.

use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};
use tracing::debug;

use crate::board::{
    domain::{BoardState, BoardTransform, DanglingReference, LoadedBoard},
    ports::{BoardUpdateError, BoardUpdateResult, BoardUpdater, CommitOutcome},
};

/// Thread-safe in-memory holder of one board snapshot.
#[derive(Debug, Clone)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug)]
struct InMemoryBoardState {
    board: LoadedBoard,
    revision: u64,
}

impl InMemoryBoardStore {
    /// Creates a store holding `board` at revision zero.
    #[must_use]
    pub fn new(board: LoadedBoard) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryBoardState { board, revision: 0 })),
        }
    }

    /// Creates a store from a fully valid board state.
    #[must_use]
    pub fn from_state(state: BoardState) -> Self {
        Self::new(LoadedBoard::from(state))
    }

    /// Returns the number of commits applied so far.
    ///
    /// # Errors
    ///
    /// Returns [`BoardUpdateError::Unavailable`] when the lock is poisoned.
    pub fn revision(&self) -> BoardUpdateResult<u64> {
        let state = self
            .state
            .read()
            .map_err(|err| BoardUpdateError::Unavailable(err.to_string()))?;
        Ok(state.revision)
    }
}

/// Returns the dangling references present in `next` but not in `current`.
fn introduced_dangling(current: &BoardState, next: &BoardState) -> Vec<DanglingReference> {
    let existing: BTreeSet<DanglingReference> = current.dangling_references();
    next.dangling_references()
        .into_iter()
        .filter(|reference| !existing.contains(reference))
        .collect()
}

impl BoardUpdater for InMemoryBoardStore {
    fn apply_update(&self, transform: BoardTransform) -> BoardUpdateResult<CommitOutcome> {
        let mut state = self
            .state
            .write()
            .map_err(|err| BoardUpdateError::Unavailable(err.to_string()))?;

        let next = transform(state.board.state());
        if &next == state.board.state() {
            return Ok(CommitOutcome::Unchanged);
        }

        let introduced = introduced_dangling(state.board.state(), &next);
        if !introduced.is_empty() {
            return Err(BoardUpdateError::DanglingReferences(introduced));
        }

        state.board = state.board.with_state(next);
        state.revision += 1;
        debug!(revision = state.revision, "board state committed");
        Ok(CommitOutcome::Committed {
            revision: state.revision,
        })
    }

    fn snapshot(&self) -> BoardUpdateResult<LoadedBoard> {
        let state = self
            .state
            .read()
            .map_err(|err| BoardUpdateError::Unavailable(err.to_string()))?;
        Ok(state.board.clone())
    }
}
