//! Drag-and-drop gesture state machine.
//!
//! The controller turns platform drag events into at most one board
//! transformation per drop. It holds no board data; the move itself is
//! resolved against the state current at commit time.

use super::{BoardDomainError, BoardTransform, CategoryId, TaskId, transform};
use tracing::{debug, warn};

/// Current gesture state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A task is being dragged.
    Dragging(TaskId),
}

/// Drop effect the host must report for a hovered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    /// The column accepts the drop; suppress the platform default that
    /// would reject it.
    Move,
}

/// Data attached to the platform drag event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    task_id: TaskId,
}

impl DragPayload {
    /// MIME type under which the payload travels.
    pub const MIME_TYPE: &'static str = "text/plain";

    /// Creates a payload for `task_id`.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self { task_id }
    }

    /// Reads a payload from the platform's text data.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskId`] when the text is blank.
    pub fn from_text(text: &str) -> Result<Self, BoardDomainError> {
        TaskId::new(text).map(Self::new)
    }

    /// Returns the text stored in the platform payload.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.task_id.to_string()
    }

    /// Returns the dragged task identifier.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }
}

/// Interprets drag-start, drag-over, drop and drag-leave gestures.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current gesture state.
    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Starts dragging `task_id` and returns the payload to attach.
    pub fn drag_start(&mut self, task_id: TaskId) -> DragPayload {
        debug!(%task_id, "drag started");
        self.state = DragState::Dragging(task_id.clone());
        DragPayload::new(task_id)
    }

    /// Reports that `column` is a valid drop target. No state change.
    #[must_use]
    pub fn drag_over(&self, column: &CategoryId) -> DropEffect {
        debug!(%column, "drag over column");
        DropEffect::Move
    }

    /// Completes the gesture, returning the move to commit.
    ///
    /// The payload names the task, as the platform delivers it with the drop
    /// event. Whether the move changes anything is decided against the
    /// committed state: dropping onto the task's own column yields the state
    /// unchanged.
    pub fn drop(&mut self, column: CategoryId, payload: &DragPayload) -> BoardTransform {
        let previous = std::mem::take(&mut self.state);
        match &previous {
            DragState::Dragging(dragged) if dragged != payload.task_id() => {
                warn!(
                    %dragged,
                    dropped = %payload.task_id(),
                    "drop payload differs from dragged task, using payload"
                );
            }
            DragState::Idle => {
                debug!(task_id = %payload.task_id(), "drop without drag start");
            }
            DragState::Dragging(_) => {}
        }
        transform::move_task(payload.task_id().clone(), column)
    }

    /// Ends a drag outside any drop target. No transformation results.
    pub fn drag_leave(&mut self) {
        if let DragState::Dragging(task_id) = std::mem::take(&mut self.state) {
            debug!(%task_id, "drag cancelled");
        }
    }
}
