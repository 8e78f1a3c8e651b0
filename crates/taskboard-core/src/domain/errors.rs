//! Errors - エラー型と分類

use thiserror::Error;

use super::ids::{BoardId, ChecklistItemId, TaskId};
use super::status::InvalidColumn;

/// ErrorKind は実行エラーの分類
///
/// The engine never retries; callers use this to decide whether a retry is
/// worth it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// May succeed if repeated (network blip, backend overloaded).
    Transient,
    /// Will fail again (missing record, rejected write).
    Permanent,
}

/// Failure reported by a store port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn board_not_found(id: &BoardId) -> Self {
        StoreError::NotFound {
            entity: "board",
            id: id.to_string(),
        }
    }

    pub fn task_not_found(id: &TaskId) -> Self {
        StoreError::NotFound {
            entity: "task",
            id: id.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Unavailable(_) => ErrorKind::Transient,
            StoreError::NotFound { .. } | StoreError::Rejected(_) => ErrorKind::Permanent,
        }
    }
}

/// Failure of the derived-progress write issued by the status engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("failed to persist progress for board {board_id}: {source}")]
    Store {
        board_id: BoardId,
        #[source]
        source: StoreError,
    },

    /// The write task was cancelled or panicked before reporting back.
    #[error("progress write for board {board_id} did not complete: {reason}")]
    Aborted { board_id: BoardId, reason: String },
}

impl PersistError {
    pub fn board_id(&self) -> &BoardId {
        match self {
            PersistError::Store { board_id, .. } | PersistError::Aborted { board_id, .. } => {
                board_id
            }
        }
    }
}

/// Failure of a task board command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("task title must not be empty")]
    EmptyTitle,

    #[error("checklist item text must not be empty")]
    EmptyChecklistText,

    #[error(transparent)]
    InvalidColumn(#[from] InvalidColumn),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("checklist item {item_id} not found on task {task_id}")]
    ChecklistItemNotFound {
        task_id: TaskId,
        item_id: ChecklistItemId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
