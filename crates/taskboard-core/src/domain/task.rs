//! Task records as stored in a board's task collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ChecklistItemId, TaskId};
use super::status::TaskStatus;

/// One checklist entry on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl ChecklistItem {
    pub fn new(id: ChecklistItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// A task document as delivered by the realtime feed.
///
/// Every field is tolerant of absence: a snapshot containing a malformed
/// document still deserializes, and the status engine decides what to do with
/// it. `status` is kept raw so the engine can report exactly what it saw.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    #[serde(default)]
    pub id: TaskId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskDocument {
    /// A fresh task with an empty checklist, stamped at `now`.
    pub fn new(id: TaskId, title: impl Into<String>, status: TaskStatus, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            status: Some(status.as_str().to_string()),
            checklist: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    pub fn raw_status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Recognized column, or `None` when the raw status is absent or unknown.
    pub fn status(&self) -> Option<TaskStatus> {
        self.raw_status().and_then(TaskStatus::parse)
    }

    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        self.status = Some(status.as_str().to_string());
        self.touch(now);
    }

    pub fn rename(&mut self, title: impl Into<String>, now: DateTime<Utc>) {
        self.title = title.into();
        self.touch(now);
    }

    pub fn push_checklist_item(&mut self, item: ChecklistItem, now: DateTime<Utc>) {
        self.checklist.push(item);
        self.touch(now);
    }

    /// Flip one checklist entry. Returns the new `completed` value, or `None`
    /// when no entry has that id (the task is left untouched).
    pub fn toggle_checklist_item(
        &mut self,
        item_id: &ChecklistItemId,
        now: DateTime<Utc>,
    ) -> Option<bool> {
        let item = self.checklist.iter_mut().find(|item| &item.id == item_id)?;
        item.completed = !item.completed;
        let completed = item.completed;
        self.touch(now);
        Some(completed)
    }

    /// `(completed, total)` checklist entries.
    pub fn checklist_progress(&self) -> (usize, usize) {
        let completed = self.checklist.iter().filter(|item| item.completed).count();
        (completed, self.checklist.len())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
