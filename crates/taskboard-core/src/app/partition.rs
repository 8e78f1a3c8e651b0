//! Snapshot → four-column partition.

use crate::domain::{BoardId, Buckets, Diagnostic, TaskDocument, TaskStatus};
use crate::ports::DiagnosticSink;

/// Split a board's full task snapshot into its four columns.
///
/// Every input task lands in exactly one column, in input order within that
/// column. A task whose status is missing or matches no column goes to
/// `todo`, and one [`Diagnostic::UnrecognizedTaskStatus`] is emitted for it.
/// A task without an id is malformed and is handled the same way, whatever
/// its status says.
pub fn partition(
    board_id: &BoardId,
    tasks: impl IntoIterator<Item = TaskDocument>,
    diagnostics: &dyn DiagnosticSink,
) -> Buckets {
    let mut buckets = Buckets::new();
    for task in tasks {
        let recognized = task.status().filter(|_| !task.id.is_blank());
        let status = match recognized {
            Some(status) => status,
            None => {
                // The sink does the operator-facing logging.
                tracing::debug!(
                    board_id = %board_id,
                    task_id = %task.id,
                    raw_status = ?task.raw_status(),
                    "unrecognized task status, defaulting to todo"
                );
                diagnostics.emit(Diagnostic::UnrecognizedTaskStatus {
                    board_id: board_id.clone(),
                    task_id: task.id.clone(),
                    raw_status: task.status.clone(),
                });
                TaskStatus::Todo
            }
        };
        buckets.push(status, task);
    }
    buckets
}
