//! Task and board status vocabularies.
//!
//! Task status arrives from the document store as a loosely-typed string.
//! [`TaskStatus::parse`] is the only place that string is interpreted; the
//! rest of the crate works with the closed enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four board columns a task can sit in.
///
/// The serialized names are the column keys the document store uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "doing")]
    Doing,
    #[serde(rename = "onHold")]
    OnHold,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    /// All columns in board display order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::Doing,
        TaskStatus::OnHold,
        TaskStatus::Done,
    ];

    /// Column key as stored on the task record.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::OnHold => "onHold",
            TaskStatus::Done => "done",
        }
    }

    /// Human label used for the column header.
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::Doing => "In Progress",
            TaskStatus::OnHold => "On Hold",
            TaskStatus::Done => "Completed",
        }
    }

    /// Lenient parse of a raw status read from a task record.
    ///
    /// Matching is case-insensitive, so the historical `"onhold"` spelling
    /// (and any other casing of `onHold`) lands in [`TaskStatus::OnHold`].
    /// Returns `None` for anything else; callers decide how to default.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "todo" => Some(TaskStatus::Todo),
            "doing" => Some(TaskStatus::Doing),
            "onhold" => Some(TaskStatus::OnHold),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a column key supplied by a user action is not one of the four
/// column keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid column: {0:?}")]
pub struct InvalidColumn(pub String);

/// Strict parse used for user-chosen columns (drag targets, "add task" column).
///
/// Unlike [`TaskStatus::parse`] this accepts the exact column keys only.
impl FromStr for TaskStatus {
    type Err = InvalidColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidColumn(s.to_string()))
    }
}

/// Board-level status derived from its task partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl BoardStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BoardStatus::ToDo => "To Do",
            BoardStatus::InProgress => "In Progress",
            BoardStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for BoardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
