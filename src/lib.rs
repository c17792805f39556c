//! Taskboard: the task board core of a project-management application.
//!
//! This crate holds the state machine behind a project's kanban board:
//! tasks in ordered columns, drag-and-drop moves, a validated create/edit
//! form, confirmed deletion and a filtered, priority-sorted view. Persistence
//! and rendering belong to the host.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`board`]: Board model, gestures, form validation and view derivation
//! - [`config`]: Column set and validation limits

pub mod board;
pub mod config;
