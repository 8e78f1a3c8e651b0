//! IdGenerator port - ID 生成の抽象化
//!
//! The document store normally assigns ids on insert. When records are created
//! through this crate (tests, the in-memory stores, the demo CLI) ids come
//! from here instead.

use crate::domain::ids::{BoardId, ChecklistItemId, Id, IdMarker, TaskId};
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は分散システムで使える ID を生成
pub trait IdGenerator: Send + Sync {
    fn generate_board_id(&self) -> BoardId;

    fn generate_task_id(&self) -> TaskId;

    fn generate_checklist_item_id(&self) -> ChecklistItemId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// The timestamp part comes from the injected [`Clock`], so ids minted under a
/// [`crate::ports::FixedClock`] share a known timestamp.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn mint<T: IdMarker>(&self) -> Id<T> {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Id::from_ulid(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_board_id(&self) -> BoardId {
        self.mint()
    }

    fn generate_task_id(&self) -> TaskId {
        self.mint()
    }

    fn generate_checklist_item_id(&self) -> ChecklistItemId {
        self.mint()
    }
}
