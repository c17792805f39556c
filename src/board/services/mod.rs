//! Application services for board interaction.

mod session;

pub use session::{BoardSession, DeleteOutcome, SessionError, SessionResult};
