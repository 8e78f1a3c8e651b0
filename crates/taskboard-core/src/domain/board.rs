//! Board records and the derived progress pair written back to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{BoardId, UserId};
use super::status::BoardStatus;

/// The two derived fields the status engine owns on a board record.
///
/// Serialized with the store's field names, so it can be sent as-is as a
/// partial update: `{"completionPercentage": 50, "status": "In Progress"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardProgress {
    /// Always within `0..=100`.
    pub completion_percentage: u8,
    pub status: BoardStatus,
}

/// A board record.
///
/// Created and deleted by board management; the status engine only ever
/// rewrites `completion_percentage` and `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub board_name: String,
    pub created_by: UserId,
    #[serde(default)]
    pub member_ids: Vec<UserId>,
    #[serde(default)]
    pub completion_percentage: u8,
    #[serde(default)]
    pub status: BoardStatus,
    pub created_at: DateTime<Utc>,
}

impl Board {
    pub fn new(
        id: BoardId,
        board_name: impl Into<String>,
        created_by: UserId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            board_name: board_name.into(),
            created_by,
            member_ids: Vec::new(),
            completion_percentage: 0,
            status: BoardStatus::ToDo,
            created_at: now,
        }
    }

    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.member_ids.extend(members);
        self
    }

    pub fn has_member(&self, user: &UserId) -> bool {
        self.member_ids.contains(user)
    }

    pub fn progress(&self) -> BoardProgress {
        BoardProgress {
            completion_percentage: self.completion_percentage,
            status: self.status,
        }
    }

    pub fn apply_progress(&mut self, progress: BoardProgress) {
        self.completion_percentage = progress.completion_percentage;
        self.status = progress.status;
    }
}
