//! Board transformations committed through the single update entry point.
//!
//! A transformation maps the current state to the next one. Each constructor
//! here captures its inputs by value and resolves them against whatever state
//! is current at commit time; when the inputs no longer fit (a column was
//! removed, a task vanished), the transformation logs the reason and returns
//! the state unchanged.

use super::{BoardState, CategoryId, MoveOutcome, Task, TaskId};
use tracing::{debug, warn};

/// Pure function from the current board state to the next one.
pub type BoardTransform = Box<dyn FnOnce(&BoardState) -> BoardState + Send>;

/// Inserts a new task and appends it to `category`.
#[must_use]
pub fn create_task(category: CategoryId, task: Task) -> BoardTransform {
    Box::new(move |current| {
        let task_id = task.id().clone();
        match current.with_task_created(&category, task) {
            Ok(next) => {
                debug!(%task_id, %category, "task created");
                next
            }
            Err(err) => {
                warn!(%task_id, %category, error = %err, "task creation skipped");
                current.clone()
            }
        }
    })
}

/// Replaces an existing task record in place.
#[must_use]
pub fn replace_task(task: Task) -> BoardTransform {
    Box::new(move |current| {
        let task_id = task.id().clone();
        match current.with_task_replaced(task) {
            Ok(next) => {
                debug!(%task_id, "task updated");
                next
            }
            Err(err) => {
                warn!(%task_id, error = %err, "task update skipped");
                current.clone()
            }
        }
    })
}

/// Removes a task from the task map and from every column.
#[must_use]
pub fn delete_task(task_id: TaskId) -> BoardTransform {
    Box::new(move |current| {
        if current.task(&task_id).is_none() && current.column_of(&task_id).is_none() {
            warn!(%task_id, "delete ignored: task not found");
            return current.clone();
        }
        debug!(%task_id, "task deleted");
        current.with_task_deleted(&task_id)
    })
}

/// Moves a task to the end of `target`.
#[must_use]
pub fn move_task(task_id: TaskId, target: CategoryId) -> BoardTransform {
    Box::new(move |current| {
        let outcome = current.with_task_moved(&task_id, &target);
        match &outcome {
            MoveOutcome::Moved(_) => debug!(%task_id, %target, "task moved"),
            MoveOutcome::AlreadyInColumn => {
                debug!(%task_id, %target, "task already in target column");
            }
            MoveOutcome::SourceNotFound => {
                warn!(%task_id, %target, "move ignored: no column lists the task");
            }
            MoveOutcome::TargetNotFound => {
                warn!(%task_id, %target, "move ignored: target column not found");
            }
            MoveOutcome::UnknownTask => {
                warn!(%task_id, %target, "move ignored: task record not found");
            }
        }
        outcome.into_state(current)
    })
}
