//! taskboard-core
//!
//! Board/task status engine for a Kanban-style task board backed by a
//! realtime document store.
//!
//! # モジュール構成
//! - **domain**: ids, task/board records, statuses, buckets, diagnostics, errors
//! - **ports**: collaborator traits (BoardStore, TaskStore, TaskFeed, DiagnosticSink, Clock, IdGenerator)
//! - **app**: partition / derive, StatusEngine, BoardService, NotificationInbox
//! - **impls**: in-memory stores and diagnostics sinks
//! - **config**: layered configuration (figment)

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

pub use app::{
    Activation, BoardService, NotificationInbox, PersistHandle, StatusEngine, StatusEngineBuilder,
    WriteOutcome, board_status, completion_percentage, partition,
};
pub use config::{EngineConfig, TaskboardConfig};
pub use domain::{
    Board, BoardId, BoardProgress, BoardStatus, BucketCounts, Buckets, Diagnostic, TaskDocument,
    TaskId, TaskStatus,
};
