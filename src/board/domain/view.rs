//! Read-only projection of a board for rendering.

use super::{Category, CategoryId, ColumnSlot, LoadedBoard, MalformedColumn, Task, UserId};
use std::fmt;

/// Assignee filter applied to every column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AssigneeFilter {
    /// Show every task.
    #[default]
    All,
    /// Show only tasks assigned to this user.
    Assignee(UserId),
}

impl AssigneeFilter {
    /// Reads the filter selector value; `all` or blank means no filter.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Self::All;
        }
        UserId::new(trimmed).map_or(Self::All, Self::Assignee)
    }

    /// Returns whether a filter is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Assignee(_))
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Assignee(user) => task.is_assigned_to(user),
        }
    }
}

/// Column header count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCount {
    /// No filter: number of resolved tasks.
    Total(usize),
    /// Filter active: shown tasks out of resolved tasks.
    Filtered {
        /// Tasks passing the filter.
        shown: usize,
        /// Resolved tasks in the column.
        total: usize,
    },
}

impl fmt::Display for TaskCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Total(total) => write!(f, "({total})"),
            Self::Filtered { shown, total } => write!(f, "({shown} / {total})"),
        }
    }
}

/// Tasks of one valid column, filtered and sorted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTasks<'a> {
    category: &'a Category,
    tasks: Vec<&'a Task>,
    count: TaskCount,
}

impl<'a> ColumnTasks<'a> {
    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &'a CategoryId {
        self.category.id()
    }

    /// Returns the column title.
    #[must_use]
    pub fn title(&self) -> &'a str {
        self.category.title()
    }

    /// Returns the visible tasks, most urgent first.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }

    /// Returns the header count.
    #[must_use]
    pub const fn count(&self) -> TaskCount {
        self.count
    }
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnView<'a> {
    /// A valid column.
    Ready(ColumnTasks<'a>),
    /// A column that failed validation; rendered as an inline error.
    Malformed(&'a MalformedColumn),
}

impl ColumnView<'_> {
    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        match self {
            Self::Ready(column) => column.category.id(),
            Self::Malformed(column) => column.id(),
        }
    }
}

/// Filtered, priority-sorted projection of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    columns: Vec<ColumnView<'a>>,
}

impl<'a> BoardView<'a> {
    /// Derives the view without touching the board.
    ///
    /// Column identifiers that do not resolve to a task are dropped with a
    /// warning. Tasks are ordered by descending priority; equal priorities
    /// keep their column order.
    #[must_use]
    pub fn derive(board: &'a LoadedBoard, filter: &AssigneeFilter) -> Self {
        let state = board.state();
        let columns = board
            .columns()
            .iter()
            .filter_map(|slot| match slot {
                ColumnSlot::Ready(id) => state
                    .category(id)
                    .map(|category| ColumnView::Ready(resolve_column(board, category, filter))),
                ColumnSlot::Malformed(column) => Some(ColumnView::Malformed(column)),
            })
            .collect();
        Self { columns }
    }

    /// Returns the columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnView<'a>] {
        &self.columns
    }

    /// Looks up a column by identifier.
    #[must_use]
    pub fn column(&self, id: &CategoryId) -> Option<&ColumnView<'a>> {
        self.columns.iter().find(|column| column.id() == id)
    }
}

fn resolve_column<'a>(
    board: &'a LoadedBoard,
    category: &'a Category,
    filter: &AssigneeFilter,
) -> ColumnTasks<'a> {
    let resolved = board.state().resolve(category.id());
    let total = resolved.len();

    let mut tasks: Vec<&Task> = resolved
        .into_iter()
        .filter(|task| filter.matches(task))
        .collect();
    tasks.sort_by(|left, right| right.priority().cmp(&left.priority()));

    let count = if filter.is_active() {
        TaskCount::Filtered {
            shown: tasks.len(),
            total,
        }
    } else {
        TaskCount::Total(total)
    };

    ColumnTasks {
        category,
        tasks,
        count,
    }
}
