//! Ports - 抽象化レイヤー
//!
//! Each trait is a seam to a collaborator outside this crate: the managed
//! document database (boards, tasks), its realtime listener (task feed), and
//! the operator-facing diagnostics sink. Application code receives these
//! explicitly; nothing here reaches for process-wide handles.

pub mod board_store;
pub mod clock;
pub mod diagnostics;
pub mod id_generator;
pub mod task_feed;
pub mod task_store;

pub use self::board_store::BoardStore;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::diagnostics::DiagnosticSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::task_feed::{TaskFeed, TaskSnapshot};
pub use self::task_store::TaskStore;
