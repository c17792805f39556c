//! Board session: orchestrates the task modal, drag/drop and deletion.

use crate::board::{
    domain::{
        CategoryId, DragController, DragPayload, DragState, DropEffect, FormErrors, LoadedBoard,
        TaskForm, TaskId, TaskModal, User, transform,
    },
    ports::{BoardUpdateError, BoardUpdater, CommitOutcome, ConfirmationPrompt},
};
use crate::config::BoardConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for board session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Form validation failed; nothing was committed.
    #[error(transparent)]
    Form(#[from] FormErrors),
    /// The updater rejected or could not apply the commit.
    #[error(transparent)]
    Update(#[from] BoardUpdateError),
    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    UnknownTask(TaskId),
    /// The referenced column does not exist or failed validation.
    #[error("column not available: {0}")]
    UnknownColumn(CategoryId),
}

/// Result type for board session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Outcome of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user confirmed and the deletion was committed.
    Deleted(CommitOutcome),
    /// The user declined; nothing changed.
    Cancelled,
}

/// One user's interaction with a board.
///
/// The session holds only gesture state. Board data lives with the updater,
/// and every change is sent to it as one transformation.
pub struct BoardSession<U>
where
    U: BoardUpdater,
{
    updater: Arc<U>,
    config: BoardConfig,
    assignees: Vec<User>,
    drag: DragController,
}

impl<U> BoardSession<U>
where
    U: BoardUpdater,
{
    /// Creates a session over `updater` with the eligible assignees.
    #[must_use]
    pub fn new(updater: Arc<U>, config: BoardConfig, assignees: Vec<User>) -> Self {
        Self {
            updater,
            config,
            assignees,
            drag: DragController::new(),
        }
    }

    /// Returns the eligible assignees.
    #[must_use]
    pub fn assignees(&self) -> &[User] {
        &self.assignees
    }

    /// Returns the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Update`] when the snapshot is unavailable.
    pub fn snapshot(&self) -> SessionResult<LoadedBoard> {
        Ok(self.updater.snapshot()?)
    }

    /// Opens the modal in create mode for `category`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownColumn`] when the column is missing or
    /// malformed.
    pub fn open_create(&self, category: CategoryId) -> SessionResult<(TaskModal, TaskForm)> {
        let board = self.snapshot()?;
        if board.state().category(&category).is_none() {
            return Err(SessionError::UnknownColumn(category));
        }
        Ok((TaskModal::Create { category }, TaskForm::default()))
    }

    /// Opens the modal in edit mode, pre-filled from the task.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownTask`] when the task does not exist.
    pub fn open_edit(&self, task_id: TaskId) -> SessionResult<(TaskModal, TaskForm)> {
        let board = self.snapshot()?;
        let form = board
            .state()
            .task(&task_id)
            .map(TaskForm::from_task)
            .ok_or_else(|| SessionError::UnknownTask(task_id.clone()))?;
        Ok((TaskModal::Edit { task_id }, form))
    }

    /// Validates and commits a modal submission.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Form`] when validation fails, in which case
    /// no transformation is sent, or [`SessionError::Update`] when the commit
    /// fails.
    pub fn submit(&self, modal: &TaskModal, form: &TaskForm) -> SessionResult<CommitOutcome> {
        let transform = modal.submit(form, &self.config, &self.assignees)?;
        Ok(self.updater.apply_update(transform)?)
    }

    /// Deletes a task after the user confirms.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownTask`] when the task does not exist,
    /// or [`SessionError::Update`] when the commit fails.
    pub fn delete_task(
        &self,
        task_id: &TaskId,
        prompt: &impl ConfirmationPrompt,
    ) -> SessionResult<DeleteOutcome> {
        let board = self.snapshot()?;
        let task = board
            .state()
            .task(task_id)
            .ok_or_else(|| SessionError::UnknownTask(task_id.clone()))?;

        let message = format!(
            "Möchten Sie die Aufgabe \"{}\" wirklich löschen?",
            task.title()
        );
        if !prompt.confirm(&message) {
            debug!(%task_id, "deletion cancelled");
            return Ok(DeleteOutcome::Cancelled);
        }

        let outcome = self
            .updater
            .apply_update(transform::delete_task(task_id.clone()))?;
        Ok(DeleteOutcome::Deleted(outcome))
    }

    /// Returns the drag gesture state.
    #[must_use]
    pub const fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Starts dragging a task.
    pub fn drag_start(&mut self, task_id: TaskId) -> DragPayload {
        self.drag.drag_start(task_id)
    }

    /// Reports the drop effect for a hovered column.
    #[must_use]
    pub fn drag_over(&self, column: &CategoryId) -> DropEffect {
        self.drag.drag_over(column)
    }

    /// Drops the dragged task onto `column` and commits the move.
    ///
    /// Dropping onto the task's current column commits nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Update`] when the commit fails.
    pub fn drop(
        &mut self,
        column: CategoryId,
        payload: &DragPayload,
    ) -> SessionResult<CommitOutcome> {
        let transform = self.drag.drop(column, payload);
        Ok(self.updater.apply_update(transform)?)
    }

    /// Abandons the drag without a drop.
    pub fn drag_leave(&mut self) {
        self.drag.drag_leave();
    }
}
