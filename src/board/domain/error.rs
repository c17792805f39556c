//! Error types for board domain construction and parsing.

use super::{CategoryId, TaskId};
use thiserror::Error;

/// Errors returned while constructing board domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// A task identifier is blank.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// A category identifier is blank.
    #[error("category identifier must not be empty")]
    EmptyCategoryId,

    /// A user identifier is blank.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// Two task records share one identifier.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// Two categories share one identifier.
    #[error("duplicate category identifier: {0}")]
    DuplicateCategory(CategoryId),

    /// The category order lists a category twice.
    #[error("category {0} appears more than once in the column order")]
    DuplicateCategoryInOrder(CategoryId),

    /// The category order names a category that does not exist.
    #[error("column order references unknown category {0}")]
    UnknownCategoryInOrder(CategoryId),

    /// A category exists but is absent from the column order.
    #[error("category {0} is missing from the column order")]
    CategoryMissingFromOrder(CategoryId),

    /// A task identifier is listed by more than one column, or twice by one.
    #[error("task {task_id} is listed in both {first} and {second}")]
    TaskInMultipleColumns {
        /// The task listed more than once.
        task_id: TaskId,
        /// First column listing the task.
        first: CategoryId,
        /// Second column listing the task.
        second: CategoryId,
    },

    /// A due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The target category does not exist.
    #[error("category not found: {0}")]
    UnknownCategory(CategoryId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),
}

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
