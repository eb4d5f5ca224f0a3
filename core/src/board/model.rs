//! Board model definitions
//!
//! These types define the on-disk format as well: a JSON array of boards,
//! each carrying all four column keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::Result;

/// One of the four fixed board columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnKey {
    Today,
    ThisWeek,
    Future,
    Completed,
}

impl ColumnKey {
    /// All columns in display order
    pub const ALL: [ColumnKey; 4] = [
        ColumnKey::Today,
        ColumnKey::ThisWeek,
        ColumnKey::Future,
        ColumnKey::Completed,
    ];

    /// Wire name of the column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "thisWeek",
            Self::Future => "future",
            Self::Completed => "completed",
        }
    }

    /// Human-readable column heading
    pub fn title(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
            Self::Future => "Future",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ColumnKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown column: {}", s)))
    }
}

/// A task on a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl Task {
    /// Create an open task with a fresh id
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
        }
    }
}

/// The four task columns of a board
///
/// Missing keys deserialize as empty columns, so a loaded board always has
/// every column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Columns {
    #[serde(default)]
    pub today: Vec<Task>,
    #[serde(default)]
    pub this_week: Vec<Task>,
    #[serde(default)]
    pub future: Vec<Task>,
    #[serde(default)]
    pub completed: Vec<Task>,
}

impl Columns {
    pub fn get(&self, key: ColumnKey) -> &Vec<Task> {
        match key {
            ColumnKey::Today => &self.today,
            ColumnKey::ThisWeek => &self.this_week,
            ColumnKey::Future => &self.future,
            ColumnKey::Completed => &self.completed,
        }
    }

    pub fn get_mut(&mut self, key: ColumnKey) -> &mut Vec<Task> {
        match key {
            ColumnKey::Today => &mut self.today,
            ColumnKey::ThisWeek => &mut self.this_week,
            ColumnKey::Future => &mut self.future,
            ColumnKey::Completed => &mut self.completed,
        }
    }

    /// Columns paired with their keys, in display order
    pub fn iter(&self) -> impl Iterator<Item = (ColumnKey, &Vec<Task>)> {
        ColumnKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    /// Total number of tasks across all columns
    pub fn task_count(&self) -> usize {
        self.iter().map(|(_, tasks)| tasks.len()).sum()
    }

    /// Locate a task anywhere on the board
    pub fn find_task(&self, task_id: &str) -> Option<(ColumnKey, &Task)> {
        self.iter().find_map(|(key, tasks)| {
            tasks.iter().find(|t| t.id == task_id).map(|t| (key, t))
        })
    }
}

/// A named board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Columns,
}

impl Board {
    /// Create an empty board with a fresh id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            columns: Columns::default(),
        }
    }
}

/// Partial task update; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Trim a board name or task title, rejecting blank input
pub fn normalize_label(field: &str, raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}
