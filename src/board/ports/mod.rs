//! Port contracts for the task board.
//!
//! Ports define the collaborators the board talks to without naming their
//! implementation: the committed-state owner and the confirmation prompt.

pub mod confirmation;
pub mod updater;

pub use confirmation::ConfirmationPrompt;
pub use updater::{BoardUpdateError, BoardUpdateResult, BoardUpdater, CommitOutcome};
