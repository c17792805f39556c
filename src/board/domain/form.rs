//! Create/edit task form and its validation.
//!
//! The modal works on raw form input. Submitting validates every field,
//! collecting all field errors, and on success yields the transformation to
//! commit. A rejected submission commits nothing.

use super::{
    BoardTransform, CategoryId, Priority, Task, TaskId, User, UserId, parse_due_date, transform,
};
use crate::config::BoardConfig;
use thiserror::Error;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// Task title.
    Title,
    /// Task description.
    Description,
    /// Assigned user.
    Assignee,
    /// Due date.
    DueDate,
}

/// Field-level validation failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    /// The title is empty after trimming.
    #[error("title is required")]
    TitleRequired,

    /// The title exceeds the configured length.
    #[error("title has {actual} characters, limit is {max}")]
    TitleTooLong {
        /// Configured limit.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// The description exceeds the configured length.
    #[error("description has {actual} characters, limit is {max}")]
    DescriptionTooLong {
        /// Configured limit.
        max: usize,
        /// Submitted length.
        actual: usize,
    },

    /// The assignee is not an eligible user.
    #[error("'{0}' cannot be assigned to tasks on this board")]
    UnknownAssignee(String),

    /// The due date is not a `YYYY-MM-DD` date.
    #[error("due date '{0}' is not a valid date")]
    InvalidDueDate(String),
}

impl FormError {
    /// Returns the field the message belongs to.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::TitleRequired | Self::TitleTooLong { .. } => TaskField::Title,
            Self::DescriptionTooLong { .. } => TaskField::Description,
            Self::UnknownAssignee(_) => TaskField::Assignee,
            Self::InvalidDueDate(_) => TaskField::DueDate,
        }
    }
}

/// All field errors of one rejected submission.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task form: {}", join_messages(.0))]
pub struct FormErrors(Vec<FormError>);

impl FormErrors {
    /// Returns the individual field errors.
    #[must_use]
    pub fn errors(&self) -> &[FormError] {
        &self.0
    }

    /// Returns the first message for `field`, if any.
    #[must_use]
    pub fn for_field(&self, field: TaskField) -> Option<&FormError> {
        self.0.iter().find(|error| error.field() == field)
    }
}

fn join_messages(errors: &[FormError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raw input of the task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Title text.
    pub title: String,
    /// Description text; blank means none.
    pub description: String,
    /// Selected assignee identifier; blank means unassigned.
    pub assignee: String,
    /// Selected priority.
    pub priority: Priority,
    /// Due date as `YYYY-MM-DD`; blank means none.
    pub due_date: String,
}

impl TaskForm {
    /// Creates a form with the given title and defaults elsewhere.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Pre-fills a form from an existing task.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().unwrap_or_default().to_owned(),
            assignee: task
                .assignee()
                .map(ToString::to_string)
                .unwrap_or_default(),
            priority: task.priority(),
            due_date: task
                .due_date()
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }
}

/// Modal mode: what a submission does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskModal {
    /// Create a task in the given column.
    Create {
        /// Column receiving the new task.
        category: CategoryId,
    },
    /// Edit an existing task; column membership is unchanged.
    Edit {
        /// Task being edited.
        task_id: TaskId,
    },
}

impl TaskModal {
    /// Validates `form` and returns the transformation to commit.
    ///
    /// In create mode a fresh identifier is generated from the configured
    /// prefix; in edit mode the existing identifier is kept.
    ///
    /// # Errors
    ///
    /// Returns [`FormErrors`] listing every invalid field. Nothing is
    /// committed in that case.
    pub fn submit(
        &self,
        form: &TaskForm,
        config: &BoardConfig,
        assignees: &[User],
    ) -> Result<BoardTransform, FormErrors> {
        let task_id = match self {
            Self::Create { .. } => TaskId::generate(&config.task_id_prefix),
            Self::Edit { task_id } => task_id.clone(),
        };
        let task = build_task(task_id, form, config, assignees)?;
        Ok(match self {
            Self::Create { category } => transform::create_task(category.clone(), task),
            Self::Edit { .. } => transform::replace_task(task),
        })
    }
}

fn build_task(
    task_id: TaskId,
    form: &TaskForm,
    config: &BoardConfig,
    assignees: &[User],
) -> Result<Task, FormErrors> {
    let mut errors = Vec::new();

    let title = form.title.trim();
    let title_length = title.chars().count();
    if title.is_empty() {
        errors.push(FormError::TitleRequired);
    } else if title_length > config.max_title_length {
        errors.push(FormError::TitleTooLong {
            max: config.max_title_length,
            actual: title_length,
        });
    }

    let description_length = form.description.trim().chars().count();
    if description_length > config.max_description_length {
        errors.push(FormError::DescriptionTooLong {
            max: config.max_description_length,
            actual: description_length,
        });
    }

    let assignee = match validate_assignee(&form.assignee, assignees) {
        Ok(assignee) => assignee,
        Err(error) => {
            errors.push(error);
            None
        }
    };

    let due_date = if form.due_date.trim().is_empty() {
        None
    } else if let Ok(date) = parse_due_date(&form.due_date) {
        Some(date)
    } else {
        errors.push(FormError::InvalidDueDate(form.due_date.clone()));
        None
    };

    if !errors.is_empty() {
        return Err(FormErrors(errors));
    }

    let task = Task::new(task_id, title)
        .map_err(|_| FormErrors(vec![FormError::TitleRequired]))?
        .with_description(form.description.trim())
        .with_assignee(assignee)
        .with_priority(form.priority)
        .with_due_date(due_date);
    Ok(task)
}

fn validate_assignee(raw: &str, assignees: &[User]) -> Result<Option<UserId>, FormError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let id = UserId::new(raw).map_err(|_| FormError::UnknownAssignee(raw.to_owned()))?;
    if assignees.iter().any(|user| user.id == id) {
        Ok(Some(id))
    } else {
        Err(FormError::UnknownAssignee(raw.to_owned()))
    }
}
