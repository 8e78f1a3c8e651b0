//! App - アプリケーション層
//!
//! Combines ports into the board logic.
//!
//! # 主要コンポーネント
//! - **partition / derive**: pure snapshot → columns → derived board fields
//! - **StatusEngine**: one activation per snapshot, plus the write-back
//! - **BoardService**: validated task commands (add, move, rename, checklist)
//! - **NotificationInbox**: "added to board" notifications with read state

pub mod board_service;
pub mod builder;
pub mod derive;
pub mod notifications;
pub mod partition;
pub mod status_engine;

pub use self::board_service::BoardService;
pub use self::builder::{BuildError, StatusEngineBuilder};
pub use self::derive::{board_status, completion_percentage, derive_progress};
pub use self::notifications::{NotificationGroups, NotificationInbox};
pub use self::partition::partition;
pub use self::status_engine::{
    Activation, PersistHandle, RunSummary, SkipReason, StatusEngine, WriteOutcome,
};
