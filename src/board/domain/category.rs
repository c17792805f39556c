//! Board columns.

use super::{CategoryId, TaskId};
use serde::{Deserialize, Serialize};

/// A named, ordered bucket of task identifiers.
///
/// A category references tasks by identifier only; the task records live in
/// the board's task map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    id: CategoryId,
    title: String,
    task_ids: Vec<TaskId>,
}

impl Category {
    /// Creates an empty column.
    #[must_use]
    pub fn new(id: CategoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Replaces the task sequence.
    #[must_use]
    pub fn with_task_ids(mut self, task_ids: impl IntoIterator<Item = TaskId>) -> Self {
        self.task_ids = task_ids.into_iter().collect();
        self
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ordered task identifiers.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns whether the column lists `task_id`.
    #[must_use]
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }

    pub(super) fn push(&mut self, task_id: TaskId) {
        self.task_ids.push(task_id);
    }

    pub(super) fn remove(&mut self, task_id: &TaskId) {
        self.task_ids.retain(|id| id != task_id);
    }
}
