//! Domain model (ids, statuses, tasks, boards, buckets, diagnostics, errors).

pub mod board;
pub mod buckets;
pub mod errors;
pub mod events;
pub mod ids;
pub mod notification;
pub mod status;
pub mod task;

pub use self::board::{Board, BoardProgress};
pub use self::buckets::{BucketCounts, Buckets};
pub use self::errors::{BoardError, ErrorKind, PersistError, StoreError};
pub use self::events::{Diagnostic, DiagnosticKind};
pub use self::ids::{BoardId, ChecklistItemId, NotificationId, TaskId, UserId};
pub use self::notification::{Notification, NotificationKind};
pub use self::status::{BoardStatus, InvalidColumn, TaskStatus};
pub use self::task::{ChecklistItem, TaskDocument};
