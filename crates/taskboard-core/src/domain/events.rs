//! Diagnostic events emitted by the status engine.

use serde::{Deserialize, Serialize};

use super::ids::{BoardId, TaskId};

/// Structured warning handed to a [`crate::ports::DiagnosticSink`].
///
/// Serialized with a `kind` tag:
/// `{"kind": "unrecognized_task_status", "boardId": ..., "taskId": ..., "rawStatus": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Diagnostic {
    /// A task's status matched no column; the task was placed in `todo`.
    /// `raw_status` is `None` when the field was missing entirely.
    UnrecognizedTaskStatus {
        board_id: BoardId,
        task_id: TaskId,
        raw_status: Option<String>,
    },

    /// The derived-progress write for a board failed.
    PersistenceFailure { board_id: BoardId, error: String },
}

/// Discriminant of [`Diagnostic`], used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnrecognizedTaskStatus,
    PersistenceFailure,
}

impl Diagnostic {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::UnrecognizedTaskStatus { .. } => DiagnosticKind::UnrecognizedTaskStatus,
            Diagnostic::PersistenceFailure { .. } => DiagnosticKind::PersistenceFailure,
        }
    }

    pub fn board_id(&self) -> &BoardId {
        match self {
            Diagnostic::UnrecognizedTaskStatus { board_id, .. }
            | Diagnostic::PersistenceFailure { board_id, .. } => board_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_serialize_with_kind_tag() {
        let event = Diagnostic::UnrecognizedTaskStatus {
            board_id: BoardId::new("b1"),
            task_id: TaskId::new("t1"),
            raw_status: Some("bogus".to_string()),
        };

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            serde_json::json!({
                "kind": "unrecognized_task_status",
                "boardId": "b1",
                "taskId": "t1",
                "rawStatus": "bogus"
            })
        );
        assert_eq!(event.kind(), DiagnosticKind::UnrecognizedTaskStatus);
    }

    #[test]
    fn persistence_failure_carries_board() {
        let event = Diagnostic::PersistenceFailure {
            board_id: BoardId::new("b7"),
            error: "backend unavailable".to_string(),
        };

        assert_eq!(event.board_id(), &BoardId::new("b7"));
        assert_eq!(
            serde_json::to_value(&event).unwrap()["kind"],
            "persistence_failure"
        );
    }
}
