//! Kanban task board for project pages.
//!
//! The board keeps tasks in ordered columns, moves them by drag and drop,
//! creates and edits them through a validated form, and derives a filtered,
//! priority-sorted view for rendering. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
