//! Board state aggregate.
//!
//! `BoardState` is the single source of truth for one project's board. Every
//! mutation is expressed as a method returning a new state, so a caller never
//! observes a half-applied change.
//!
//! # Invariants
//!
//! - The column order is a permutation of the category map's keys.
//! - A task identifier is listed by at most one column, at most once.
//!
//! Both hold for every constructed value. Referential integrity (every listed
//! identifier resolves to a task record) is not enforced on construction,
//! since boards read from the external store may lag behind concurrent edits;
//! it is reported by [`BoardState::dangling_references`] and preserved by
//! every transformation defined here.

use super::{BoardDomainError, Category, CategoryId, Task, TaskId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::warn;

/// Complete board snapshot: tasks, columns and column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    tasks: BTreeMap<TaskId, Task>,
    categories: BTreeMap<CategoryId, Category>,
    category_order: Vec<CategoryId>,
}

/// A column entry whose task identifier has no task record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DanglingReference {
    /// Column listing the identifier.
    pub category: CategoryId,
    /// Identifier without a task record.
    pub task_id: TaskId,
}

/// Result of computing a task move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The task left its source column and was appended to the target.
    Moved(BoardState),
    /// The task already sits in the target column.
    AlreadyInColumn,
    /// No column lists the task.
    SourceNotFound,
    /// The target column does not exist.
    TargetNotFound,
    /// The identifier has no task record.
    UnknownTask,
}

impl MoveOutcome {
    /// Returns the moved state, or a copy of `current` for every no-op.
    #[must_use]
    pub fn into_state(self, current: &BoardState) -> BoardState {
        match self {
            Self::Moved(next) => next,
            Self::AlreadyInColumn
            | Self::SourceNotFound
            | Self::TargetNotFound
            | Self::UnknownTask => current.clone(),
        }
    }
}

impl BoardState {
    /// Builds a board from its parts, checking the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when identifiers are duplicated, the
    /// column order is not a permutation of the categories, or a task is
    /// listed by more than one column.
    pub fn new(
        tasks: impl IntoIterator<Item = Task>,
        categories: impl IntoIterator<Item = Category>,
        category_order: Vec<CategoryId>,
    ) -> Result<Self, BoardDomainError> {
        let mut task_map = BTreeMap::new();
        for task in tasks {
            let id = task.id().clone();
            if task_map.insert(id.clone(), task).is_some() {
                return Err(BoardDomainError::DuplicateTask(id));
            }
        }

        let mut category_map = BTreeMap::new();
        for category in categories {
            let id = category.id().clone();
            if category_map.insert(id.clone(), category).is_some() {
                return Err(BoardDomainError::DuplicateCategory(id));
            }
        }

        check_order_is_permutation(&category_map, &category_order)?;
        check_unique_membership(&category_map, &category_order)?;

        Ok(Self {
            tasks: task_map,
            categories: category_map,
            category_order,
        })
    }

    /// Builds a board with the given empty columns in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateCategory`] when two columns share
    /// an identifier.
    pub fn with_columns(
        columns: impl IntoIterator<Item = Category>,
    ) -> Result<Self, BoardDomainError> {
        let columns: Vec<Category> = columns.into_iter().collect();
        let order = columns.iter().map(|column| column.id().clone()).collect();
        Self::new(Vec::new(), columns, order)
    }

    /// Returns the task map.
    #[must_use]
    pub const fn tasks(&self) -> &BTreeMap<TaskId, Task> {
        &self.tasks
    }

    /// Returns the category map.
    #[must_use]
    pub const fn categories(&self) -> &BTreeMap<CategoryId, Category> {
        &self.categories
    }

    /// Returns the column display order.
    #[must_use]
    pub fn category_order(&self) -> &[CategoryId] {
        &self.category_order
    }

    /// Looks up a task record.
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Looks up a column.
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.get(id)
    }

    /// Iterates columns in display order.
    pub fn ordered_categories(&self) -> impl Iterator<Item = &Category> {
        self.category_order
            .iter()
            .filter_map(|id| self.categories.get(id))
    }

    /// Finds the column currently listing `task_id` by scanning all columns.
    #[must_use]
    pub fn column_of(&self, task_id: &TaskId) -> Option<&CategoryId> {
        self.ordered_categories()
            .find(|category| category.contains(task_id))
            .map(Category::id)
    }

    /// Resolves a column's identifiers to task records in column order.
    ///
    /// Identifiers without a record are skipped with a warning. An unknown
    /// column resolves to no tasks.
    #[must_use]
    pub fn resolve(&self, category: &CategoryId) -> Vec<&Task> {
        let Some(column) = self.categories.get(category) else {
            return Vec::new();
        };
        column
            .task_ids()
            .iter()
            .filter_map(|task_id| {
                let task = self.tasks.get(task_id);
                if task.is_none() {
                    warn!(%task_id, %category, "dropping unresolved task reference");
                }
                task
            })
            .collect()
    }

    /// Returns every column entry that does not resolve to a task record.
    #[must_use]
    pub fn dangling_references(&self) -> BTreeSet<DanglingReference> {
        self.ordered_categories()
            .flat_map(|category| {
                category
                    .task_ids()
                    .iter()
                    .filter(|id| !self.tasks.contains_key(*id))
                    .map(|id| DanglingReference {
                        category: category.id().clone(),
                        task_id: id.clone(),
                    })
            })
            .collect()
    }

    /// Inserts `task` and appends its identifier to `category`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownCategory`] when the column does not
    /// exist, or [`BoardDomainError::DuplicateTask`] when the identifier is
    /// already in use by a record or a column entry.
    pub fn with_task_created(
        &self,
        category: &CategoryId,
        task: Task,
    ) -> Result<Self, BoardDomainError> {
        if !self.categories.contains_key(category) {
            return Err(BoardDomainError::UnknownCategory(category.clone()));
        }
        if self.tasks.contains_key(task.id()) || self.column_of(task.id()).is_some() {
            return Err(BoardDomainError::DuplicateTask(task.id().clone()));
        }

        let mut next = self.clone();
        let task_id = task.id().clone();
        next.tasks.insert(task_id.clone(), task);
        if let Some(column) = next.categories.get_mut(category) {
            column.push(task_id);
        }
        Ok(next)
    }

    /// Replaces the record of an existing task, keeping column membership.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::UnknownTask`] when no record has the
    /// task's identifier.
    pub fn with_task_replaced(&self, task: Task) -> Result<Self, BoardDomainError> {
        if !self.tasks.contains_key(task.id()) {
            return Err(BoardDomainError::UnknownTask(task.id().clone()));
        }
        let mut next = self.clone();
        next.tasks.insert(task.id().clone(), task);
        Ok(next)
    }

    /// Removes a task record and every column entry naming it.
    #[must_use]
    pub fn with_task_deleted(&self, task_id: &TaskId) -> Self {
        let mut next = self.clone();
        next.tasks.remove(task_id);
        for category in next.categories.values_mut() {
            category.remove(task_id);
        }
        next
    }

    /// Moves a task to the end of `target`.
    ///
    /// Untouched tasks keep their relative order in both columns.
    #[must_use]
    pub fn with_task_moved(&self, task_id: &TaskId, target: &CategoryId) -> MoveOutcome {
        if !self.categories.contains_key(target) {
            return MoveOutcome::TargetNotFound;
        }
        if !self.tasks.contains_key(task_id) {
            return MoveOutcome::UnknownTask;
        }
        let Some(source) = self.column_of(task_id).cloned() else {
            return MoveOutcome::SourceNotFound;
        };
        if &source == target {
            return MoveOutcome::AlreadyInColumn;
        }

        let mut next = self.clone();
        if let Some(column) = next.categories.get_mut(&source) {
            column.remove(task_id);
        }
        if let Some(column) = next.categories.get_mut(target) {
            column.push(task_id.clone());
        }
        MoveOutcome::Moved(next)
    }
}

fn check_order_is_permutation(
    categories: &BTreeMap<CategoryId, Category>,
    order: &[CategoryId],
) -> Result<(), BoardDomainError> {
    let mut seen = BTreeSet::new();
    for id in order {
        if !categories.contains_key(id) {
            return Err(BoardDomainError::UnknownCategoryInOrder(id.clone()));
        }
        if !seen.insert(id) {
            return Err(BoardDomainError::DuplicateCategoryInOrder(id.clone()));
        }
    }
    if let Some(missing) = categories.keys().find(|id| !seen.contains(id)) {
        return Err(BoardDomainError::CategoryMissingFromOrder(missing.clone()));
    }
    Ok(())
}

fn check_unique_membership(
    categories: &BTreeMap<CategoryId, Category>,
    order: &[CategoryId],
) -> Result<(), BoardDomainError> {
    let mut owners: HashMap<&TaskId, &CategoryId> = HashMap::new();
    for category in order.iter().filter_map(|id| categories.get(id)) {
        for task_id in category.task_ids() {
            if let Some(first) = owners.insert(task_id, category.id()) {
                return Err(BoardDomainError::TaskInMultipleColumns {
                    task_id: task_id.clone(),
                    first: first.clone(),
                    second: category.id().clone(),
                });
            }
        }
    }
    Ok(())
}
