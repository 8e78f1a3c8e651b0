//! Domain identifiers (strongly-typed IDs).
//!
//! Records come from a managed document database, so identifiers are opaque
//! strings assigned by the persistence layer. `Id<T>` wraps that string and
//! uses a phantom marker so a `BoardId` can never be passed where a `TaskId`
//! is expected.
//!
//! Identifiers minted locally (see [`crate::ports::IdGenerator`]) are
//! `<prefix><ULID>`, e.g. `task-01HV...`, which keeps them sortable by
//! creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Provides the prefix used when an id is minted from a ULID.
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic opaque identifier.
///
/// Serialized as a bare string. A missing id in an incoming document
/// deserializes to the blank id (see [`Id::is_blank`]) instead of failing the
/// whole snapshot.
#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T: IdMarker> {
    raw: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            _marker: PhantomData,
        }
    }

    /// Mint an id from a ULID, using the marker's prefix.
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self::new(format!("{}{}", T::prefix(), ulid))
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// True for ids that carry no usable value (missing or whitespace only).
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }
}

// Manual impls: derives would put bounds on the marker type.

impl<T: IdMarker> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.raw.clone())
    }
}

impl<T: IdMarker> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: IdMarker> Eq for Id<T> {}

impl<T: IdMarker> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: IdMarker> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: IdMarker> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T: IdMarker> Default for Id<T> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<T: IdMarker> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.raw)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<T: IdMarker> From<&str> for Id<T> {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<T: IdMarker> From<String> for Id<T> {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Board {}

impl IdMarker for Board {
    fn prefix() -> &'static str {
        "board-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChecklistItem {}

impl IdMarker for ChecklistItem {
    fn prefix() -> &'static str {
        "item-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum User {}

impl IdMarker for User {
    fn prefix() -> &'static str {
        "user-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Notification {}

impl IdMarker for Notification {
    fn prefix() -> &'static str {
        "notification-"
    }
}

// ========================================
// Type Alias
// ========================================

/// Identifier of a Board (owner of a task collection).
pub type BoardId = Id<Board>;

/// Identifier of a Task (one card on a board).
pub type TaskId = Id<Task>;

/// Identifier of a checklist entry inside a task.
pub type ChecklistItemId = Id<ChecklistItem>;

/// Identifier of an authenticated user.
pub type UserId = Id<User>;

/// Identifier of an inbox notification.
pub type NotificationId = Id<Notification>;
