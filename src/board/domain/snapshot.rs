//! Boundary parsing of board snapshots from the external project store.
//!
//! The store keeps the board as schema-less JSON. All shape checks happen
//! here, once, producing either a whole-board [`BoardStructureError`] or a
//! [`LoadedBoard`] whose columns are tagged [`ColumnSlot::Ready`] or
//! [`ColumnSlot::Malformed`]. A malformed column is isolated: the remaining
//! columns form a valid [`BoardState`] and keep working.
//!
//! Absent or `null` top-level keys read as empty, which is how a project
//! without a board yet is stored.

use super::{BoardDomainError, BoardState, Category, CategoryId, Task, TaskId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;
use tracing::warn;

const TASKS_KEY: &str = "tasks";
const CATEGORIES_KEY: &str = "categories";
const ORDER_KEY: &str = "categoryOrder";

/// Whole-board structural errors; no partial board is produced.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardStructureError {
    /// The snapshot itself is not a JSON object.
    #[error("board data must be an object")]
    NotAnObject,

    /// The column order is not an array.
    #[error("column order must be an array")]
    OrderNotAnArray,

    /// A column order entry is not a valid identifier.
    #[error("column order entry {index} is not a valid category identifier")]
    InvalidOrderEntry {
        /// Position of the bad entry.
        index: usize,
    },

    /// The category map is not an object.
    #[error("category map must be an object")]
    CategoriesNotAnObject,

    /// A category map key is not a valid identifier.
    #[error("category key '{0}' is not a valid identifier")]
    InvalidCategoryKey(String),

    /// The task map is not an object.
    #[error("task map must be an object")]
    TasksNotAnObject,

    /// A task record cannot be read.
    #[error("task '{key}' is malformed: {reason}")]
    MalformedTask {
        /// Task map key.
        key: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// A task record's identifier differs from its map key.
    #[error("task stored under '{key}' has identifier '{id}'")]
    TaskKeyMismatch {
        /// Task map key.
        key: String,
        /// Identifier inside the record.
        id: TaskId,
    },

    /// The parsed parts violate a board invariant.
    #[error(transparent)]
    Invariant(#[from] BoardDomainError),
}

/// Why a single column could not be read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColumnError {
    /// The column order names a category with no definition.
    #[error("column definition is missing")]
    MissingDefinition,

    /// The category entry is not an object.
    #[error("column data must be an object")]
    NotAnObject,

    /// The category has no task identifier array.
    #[error("column has no task list")]
    MissingTaskIds,

    /// A task list entry is not a valid identifier.
    #[error("task list entry {index} is not a valid task identifier")]
    InvalidTaskId {
        /// Position of the bad entry.
        index: usize,
    },

    /// The category title is present but not a string.
    #[error("column title must be text")]
    InvalidTitle,

    /// The category's own identifier differs from its map key.
    #[error("column identifier '{0}' does not match its key")]
    IdMismatch(String),
}

/// A column that failed validation, kept with its raw data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedColumn {
    id: CategoryId,
    error: ColumnError,
    raw: Option<Value>,
}

impl MalformedColumn {
    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    /// Returns why the column was rejected.
    #[must_use]
    pub const fn error(&self) -> &ColumnError {
        &self.error
    }

    /// Returns the raw column data, if the store had any.
    #[must_use]
    pub const fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// Returns the readable task identifiers in the raw task list.
    #[must_use]
    pub fn listed_task_ids(&self) -> Vec<TaskId> {
        self.raw
            .as_ref()
            .and_then(|raw| raw.get("taskIds"))
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(read_task_id).collect())
            .unwrap_or_default()
    }

    fn without_tasks(&self, removed: &BTreeSet<&TaskId>) -> Self {
        let mut column = self.clone();
        if removed.is_empty() {
            return column;
        }
        if let Some(entries) = column
            .raw
            .as_mut()
            .and_then(|raw| raw.get_mut("taskIds"))
            .and_then(Value::as_array_mut)
        {
            entries.retain(|entry| read_task_id(entry).is_none_or(|id| !removed.contains(&id)));
        }
        column
    }
}

fn read_task_id(entry: &Value) -> Option<TaskId> {
    entry.as_str().and_then(|raw| TaskId::new(raw).ok())
}

/// One column position in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSlot {
    /// A valid column present in the board state.
    Ready(CategoryId),
    /// A column that failed validation.
    Malformed(MalformedColumn),
}

impl ColumnSlot {
    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        match self {
            Self::Ready(id) => id,
            Self::Malformed(column) => column.id(),
        }
    }
}

/// A validated board plus the columns that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedBoard {
    state: BoardState,
    columns: Vec<ColumnSlot>,
}

impl From<BoardState> for LoadedBoard {
    fn from(state: BoardState) -> Self {
        let columns = state
            .category_order()
            .iter()
            .cloned()
            .map(ColumnSlot::Ready)
            .collect();
        Self { state, columns }
    }
}

impl LoadedBoard {
    /// Parses a snapshot read from the external store.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStructureError`] when the board as a whole is
    /// malformed. Column-level problems do not fail the parse; they show up
    /// as [`ColumnSlot::Malformed`].
    pub fn from_value(value: &Value) -> Result<Self, BoardStructureError> {
        let root = value.as_object().ok_or(BoardStructureError::NotAnObject)?;
        let order = parse_order(root.get(ORDER_KEY))?;
        let raw_categories = object_or_empty(
            root.get(CATEGORIES_KEY),
            BoardStructureError::CategoriesNotAnObject,
        )?;
        let tasks = parse_tasks(root.get(TASKS_KEY))?;

        let definitions = index_categories(&raw_categories)?;
        let mut display_order = order;
        let known: BTreeSet<&CategoryId> = display_order.iter().collect();
        let orphans: Vec<CategoryId> = definitions
            .keys()
            .filter(|id| !known.contains(id))
            .cloned()
            .collect();
        for id in &orphans {
            warn!(category = %id, "column missing from order, appending it");
        }
        display_order.extend(orphans);

        let mut columns = Vec::with_capacity(display_order.len());
        let mut ready = Vec::new();
        for id in display_order {
            let raw = definitions.get(&id).copied();
            match parse_category(&id, raw) {
                Ok(category) => {
                    ready.push(category);
                    columns.push(ColumnSlot::Ready(id));
                }
                Err(error) => {
                    warn!(category = %id, %error, "column failed validation");
                    columns.push(ColumnSlot::Malformed(MalformedColumn {
                        raw: raw.cloned(),
                        id,
                        error,
                    }));
                }
            }
        }

        let ready_order = ready.iter().map(|category| category.id().clone()).collect();
        let state = BoardState::new(tasks, ready, ready_order)?;
        check_membership_across_slots(&state, &columns)?;
        Ok(Self { state, columns })
    }

    /// Returns the valid part of the board.
    #[must_use]
    pub const fn state(&self) -> &BoardState {
        &self.state
    }

    /// Returns every column position, valid or not, in display order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    /// Iterates the columns that failed validation.
    pub fn malformed_columns(&self) -> impl Iterator<Item = &MalformedColumn> {
        self.columns.iter().filter_map(|slot| match slot {
            ColumnSlot::Ready(_) => None,
            ColumnSlot::Malformed(column) => Some(column),
        })
    }

    /// Replaces the valid part of the board after a commit.
    ///
    /// Malformed columns keep their display positions; valid positions are
    /// filled from the new state's order and any extra columns are appended.
    /// Tasks deleted by the commit are also removed from the raw task lists
    /// of malformed columns.
    #[must_use]
    pub fn with_state(&self, state: BoardState) -> Self {
        let removed: BTreeSet<&TaskId> = self
            .state
            .tasks()
            .keys()
            .filter(|id| state.task(id).is_none())
            .collect();
        let mut ready = state.category_order().iter().cloned();
        let mut columns = Vec::with_capacity(self.columns.len());
        for slot in &self.columns {
            match slot {
                ColumnSlot::Ready(_) => {
                    if let Some(id) = ready.next() {
                        columns.push(ColumnSlot::Ready(id));
                    }
                }
                ColumnSlot::Malformed(column) => {
                    columns.push(ColumnSlot::Malformed(column.without_tasks(&removed)));
                }
            }
        }
        columns.extend(ready.map(ColumnSlot::Ready));
        Self { state, columns }
    }

    /// Serialises the board back into the store's snapshot shape.
    ///
    /// Malformed columns are written back as read, apart from the task ids
    /// that [`LoadedBoard::with_state`] removed, so persisting a commit never
    /// drops data the store holds.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when a record cannot be serialised.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut categories = Map::new();
        for category in self.state.ordered_categories() {
            categories.insert(
                category.id().to_string(),
                serde_json::to_value(category)?,
            );
        }
        for column in self.malformed_columns() {
            if let Some(raw) = column.raw() {
                categories.insert(column.id().to_string(), raw.clone());
            }
        }

        let snapshot = Snapshot {
            tasks: serde_json::to_value(self.state.tasks())?,
            categories: Value::Object(categories),
            category_order: self.columns.iter().map(ColumnSlot::id).collect(),
        };
        serde_json::to_value(snapshot)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    tasks: Value,
    categories: Value,
    category_order: Vec<&'a CategoryId>,
}

/// Keys category definitions by their normalised identifier.
fn index_categories(
    raw: &Map<String, Value>,
) -> Result<BTreeMap<CategoryId, &Value>, BoardStructureError> {
    let mut definitions = BTreeMap::new();
    for (key, value) in raw {
        let id = CategoryId::new(key.as_str())
            .map_err(|_| BoardStructureError::InvalidCategoryKey(key.clone()))?;
        if definitions.insert(id.clone(), value).is_some() {
            return Err(BoardDomainError::DuplicateCategory(id).into());
        }
    }
    Ok(definitions)
}

/// Extends the one-column-per-task rule to the task lists of malformed
/// columns, so a task cannot hide in a second column the board cannot render.
fn check_membership_across_slots(
    state: &BoardState,
    columns: &[ColumnSlot],
) -> Result<(), BoardStructureError> {
    let mut owners: HashMap<TaskId, &CategoryId> = HashMap::new();
    for slot in columns {
        let listed = match slot {
            ColumnSlot::Ready(id) => state
                .category(id)
                .map(|category| category.task_ids().to_vec())
                .unwrap_or_default(),
            ColumnSlot::Malformed(column) => column.listed_task_ids(),
        };
        for task_id in listed {
            if let Some(first) = owners.insert(task_id.clone(), slot.id()) {
                return Err(BoardDomainError::TaskInMultipleColumns {
                    task_id,
                    first: first.clone(),
                    second: slot.id().clone(),
                }
                .into());
            }
        }
    }
    Ok(())
}

fn object_or_empty(
    value: Option<&Value>,
    error: BoardStructureError,
) -> Result<Map<String, Value>, BoardStructureError> {
    match value {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(error),
    }
}

fn parse_order(value: Option<&Value>) -> Result<Vec<CategoryId>, BoardStructureError> {
    let entries = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(BoardStructureError::OrderNotAnArray),
    };

    let mut order = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let id = entry
            .as_str()
            .and_then(|raw| CategoryId::new(raw).ok())
            .ok_or(BoardStructureError::InvalidOrderEntry { index })?;
        if order.contains(&id) {
            return Err(BoardDomainError::DuplicateCategoryInOrder(id).into());
        }
        order.push(id);
    }
    Ok(order)
}

fn parse_tasks(value: Option<&Value>) -> Result<Vec<Task>, BoardStructureError> {
    let records = object_or_empty(value, BoardStructureError::TasksNotAnObject)?;
    let mut tasks = Vec::with_capacity(records.len());
    for (key, mut record) in records {
        if let Value::Object(fields) = &mut record {
            fields
                .entry("id")
                .or_insert_with(|| Value::String(key.clone()));
        }
        let task: Task =
            serde_json::from_value(record).map_err(|err| BoardStructureError::MalformedTask {
                key: key.clone(),
                reason: err.to_string(),
            })?;
        if task.id().as_str() != key.trim() {
            return Err(BoardStructureError::TaskKeyMismatch {
                key,
                id: task.id().clone(),
            });
        }
        tasks.push(task);
    }
    Ok(tasks)
}

fn parse_category(id: &CategoryId, value: Option<&Value>) -> Result<Category, ColumnError> {
    let fields = match value {
        None => return Err(ColumnError::MissingDefinition),
        Some(Value::Object(fields)) => fields,
        Some(_) => return Err(ColumnError::NotAnObject),
    };

    if let Some(own_id) = fields.get("id")
        && own_id.as_str().map(str::trim) != Some(id.as_str())
    {
        return Err(ColumnError::IdMismatch(own_id.to_string()));
    }

    let title = match fields.get("title") {
        None | Some(Value::Null) => id.to_string(),
        Some(Value::String(title)) => title.clone(),
        Some(_) => return Err(ColumnError::InvalidTitle),
    };

    let entries = fields
        .get("taskIds")
        .and_then(Value::as_array)
        .ok_or(ColumnError::MissingTaskIds)?;
    let task_ids = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| read_task_id(entry).ok_or(ColumnError::InvalidTaskId { index }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Category::new(id.clone(), title).with_task_ids(task_ids))
}
