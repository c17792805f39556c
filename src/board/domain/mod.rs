//! Domain model for the task board.
//!
//! The board domain owns tasks, columns and their ordering, the drag/drop
//! and task-form state machines, and the read-only view derivation. It has
//! no knowledge of where snapshots come from or how commits are persisted.

mod category;
mod drag;
mod error;
mod form;
mod ids;
mod snapshot;
mod state;
mod task;
pub mod transform;
mod view;

pub use category::Category;
pub use drag::{DragController, DragPayload, DragState, DropEffect};
pub use error::{BoardDomainError, ParsePriorityError};
pub use form::{FormError, FormErrors, TaskField, TaskForm, TaskModal};
pub use ids::{CategoryId, TaskId, UserId};
pub use snapshot::{BoardStructureError, ColumnError, ColumnSlot, LoadedBoard, MalformedColumn};
pub use state::{BoardState, DanglingReference, MoveOutcome};
pub use task::{Priority, Task, User, parse_due_date};
pub use transform::BoardTransform;
pub use view::{AssigneeFilter, BoardView, ColumnTasks, ColumnView, TaskCount};
