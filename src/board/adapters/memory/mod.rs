//! In-memory adapter implementations.
//!
//! The store keeps one board snapshot behind a lock and is suitable for
//! embedding hosts that persist elsewhere, and for tests.

mod store;

pub use store::InMemoryBoardStore;
