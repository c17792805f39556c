//! Board configuration.
//!
//! Hosts either use [`BoardConfig::default`] or read a JSON document with
//! [`BoardConfig::from_json_str`]; missing keys fall back to the defaults.
//!
//! # Examples
//!
//! ```
//! use taskboard::config::BoardConfig;
//!
//! let config = BoardConfig::default();
//! assert_eq!(config.columns.len(), 3);
//! assert_eq!(config.task_id_prefix, "task-");
//!
//! let strict = BoardConfig::strict();
//! assert!(strict.max_title_length < config.max_title_length);
//! ```

use crate::board::domain::{BoardDomainError, BoardState, Category, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Configured column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column identifier.
    pub id: CategoryId,
    /// Column title.
    pub title: String,
}

impl ColumnConfig {
    /// Creates a column entry.
    #[must_use]
    pub fn new(id: CategoryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Columns of a new board, in display order.
    pub columns: Vec<ColumnConfig>,
    /// Prefix of generated task identifiers.
    pub task_id_prefix: String,
    /// Maximum task title length in characters.
    pub max_title_length: usize,
    /// Maximum task description length in characters.
    pub max_description_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            task_id_prefix: "task-".to_owned(),
            max_title_length: 200,
            max_description_length: 5_000,
        }
    }
}

/// Errors returned while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid configuration JSON.
    #[error("invalid board configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two configured columns share an identifier.
    #[error("column {0} is configured twice")]
    DuplicateColumn(CategoryId),

    /// The task identifier prefix is blank.
    #[error("task identifier prefix must not be empty")]
    EmptyTaskIdPrefix,

    /// A length limit is zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

impl BoardConfig {
    /// Creates a configuration with reduced limits.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_title_length: 80,
            max_description_length: 1_000,
            ..Self::default()
        }
    }

    /// Reads and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document does not parse or fails
    /// validation.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.task_id_prefix.trim().is_empty() {
            return Err(ConfigError::EmptyTaskIdPrefix);
        }
        if self.max_title_length == 0 {
            return Err(ConfigError::ZeroLimit("maxTitleLength"));
        }
        if self.max_description_length == 0 {
            return Err(ConfigError::ZeroLimit("maxDescriptionLength"));
        }
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(&column.id) {
                return Err(ConfigError::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(())
    }

    /// Builds an empty board with the configured columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::DuplicateCategory`] when two columns share
    /// an identifier.
    pub fn empty_board(&self) -> Result<BoardState, BoardDomainError> {
        BoardState::with_columns(
            self.columns
                .iter()
                .map(|column| Category::new(column.id.clone(), column.title.clone())),
        )
    }
}

fn default_columns() -> Vec<ColumnConfig> {
    [
        ("todo", "Zu erledigen"),
        ("inprogress", "In Bearbeitung"),
        ("done", "Erledigt"),
    ]
    .into_iter()
    .filter_map(|(id, title)| {
        CategoryId::new(id)
            .ok()
            .map(|id| ColumnConfig::new(id, title))
    })
    .collect()
}
