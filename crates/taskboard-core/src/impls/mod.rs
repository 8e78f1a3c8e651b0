//! Impls - ports の実装
//!
//! In-memory stores for tests and the demo CLI, plus the diagnostics sinks.
//! A production deployment supplies its own `BoardStore` / `TaskStore` backed
//! by the document database.

pub mod diagnostics;
pub mod inmem_board_store;
pub mod inmem_task_store;

pub use self::diagnostics::{RecordingDiagnosticSink, TracingDiagnosticSink};
pub use self::inmem_board_store::InMemoryBoardStore;
pub use self::inmem_task_store::InMemoryTaskStore;
