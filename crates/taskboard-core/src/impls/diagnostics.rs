//! DiagnosticSink implementations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::domain::{Diagnostic, DiagnosticKind};
use crate::ports::DiagnosticSink;

/// Logs every diagnostic as a `warn` event and counts them per kind.
#[derive(Debug, Default)]
pub struct TracingDiagnosticSink {
    unrecognized_status: AtomicU64,
    persistence_failures: AtomicU64,
}

impl TracingDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: DiagnosticKind) -> u64 {
        match kind {
            DiagnosticKind::UnrecognizedTaskStatus => self.unrecognized_status.load(Ordering::Relaxed),
            DiagnosticKind::PersistenceFailure => self.persistence_failures.load(Ordering::Relaxed),
        }
    }
}

impl DiagnosticSink for TracingDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::UnrecognizedTaskStatus {
                board_id,
                task_id,
                raw_status,
            } => {
                self.unrecognized_status.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    kind = "unrecognized_task_status",
                    board_id = %board_id,
                    task_id = %task_id,
                    raw_status = ?raw_status,
                    "diagnostic"
                );
            }
            Diagnostic::PersistenceFailure { board_id, error } => {
                self.persistence_failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    kind = "persistence_failure",
                    board_id = %board_id,
                    error = %error,
                    "diagnostic"
                );
            }
        }
    }
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingDiagnosticSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingDiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }
}

impl DiagnosticSink for RecordingDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic);
    }
}
