//! StatusEngineBuilder - wiring for the status engine.
//!
//! Collaborators are passed in explicitly. `build()` fails fast when one is
//! missing instead of discovering it on the first activation.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::app::StatusEngine;
use crate::config::EngineConfig;
use crate::impls::TracingDiagnosticSink;
use crate::ports::{BoardStore, DiagnosticSink};

/// # 使用例
/// ```ignore
/// let engine = StatusEngineBuilder::new()
///     .board_store(Arc::new(firestore_boards))
///     .diagnostics(Arc::new(TracingDiagnosticSink::new()))
///     .build()?;
/// ```
///
/// The diagnostics sink defaults to [`TracingDiagnosticSink`]. The runtime
/// defaults to the one `build()` is called from.
pub struct StatusEngineBuilder {
    boards: Option<Arc<dyn BoardStore>>,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    config: EngineConfig,
    runtime: Option<Handle>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no board store configured; call board_store() before build()")]
    MissingBoardStore,

    #[error("no tokio runtime available for progress writes: {0}")]
    NoRuntime(String),
}

impl StatusEngineBuilder {
    pub fn new() -> Self {
        Self {
            boards: None,
            diagnostics: None,
            config: EngineConfig::default(),
            runtime: None,
        }
    }

    pub fn board_store(mut self, boards: Arc<dyn BoardStore>) -> Self {
        self.boards = Some(boards);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Runtime the fire-and-forget writes are spawned on.
    pub fn runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn build(self) -> Result<StatusEngine, BuildError> {
        let boards = self.boards.ok_or(BuildError::MissingBoardStore)?;
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current().map_err(|e| BuildError::NoRuntime(e.to_string()))?,
        };
        let diagnostics = self
            .diagnostics
            .unwrap_or_else(|| Arc::new(TracingDiagnosticSink::new()));
        Ok(StatusEngine::new(boards, diagnostics, self.config, runtime))
    }
}

impl Default for StatusEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
