//! DiagnosticSink port - operator-facing warnings.

use crate::domain::Diagnostic;

/// Receives structured warnings (data quality, failed writes).
///
/// `emit` is synchronous and must not block; it is called from inside the
/// engine's activation and from spawned write tasks.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}
