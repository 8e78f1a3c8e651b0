//! NotificationInbox - "you were added to a board" notifications.
//!
//! Fed by the realtime listener on the boards collection. The listener may
//! replay "added" changes (reconnects, re-subscriptions), so the inbox keeps
//! at most one notification per board for its user.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Board, BoardId, Notification, NotificationId, NotificationKind, UserId};

/// Creator name used when the creator's profile can't be resolved.
pub const UNKNOWN_CREATOR: &str = "Unknown User";

/// Notifications grouped by calendar day relative to "now", newest first.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NotificationGroups<'a> {
    pub today: Vec<&'a Notification>,
    pub yesterday: Vec<&'a Notification>,
    pub older: Vec<&'a Notification>,
}

#[derive(Debug)]
pub struct NotificationInbox {
    user: UserId,
    notifications: Vec<Notification>,
    notified_boards: HashSet<BoardId>,
    unread: HashSet<NotificationId>,
}

impl NotificationInbox {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            notifications: Vec::new(),
            notified_boards: HashSet::new(),
            unread: HashSet::new(),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Handle an "added" change on the boards collection.
    ///
    /// Produces an unread notification when the inbox user is a member of the
    /// board, did not create it, and has not already been notified about it.
    pub fn on_board_added(
        &mut self,
        board: &Board,
        creator_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<&Notification> {
        if !board.has_member(&self.user) || board.created_by == self.user {
            return None;
        }
        if !self.notified_boards.insert(board.id.clone()) {
            tracing::debug!(board_id = %board.id, user = %self.user, "duplicate board notification suppressed");
            return None;
        }

        let creator = creator_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_CREATOR);
        let notification = Notification {
            id: NotificationId::new(format!("board-{}-{}", board.id, now.timestamp_millis())),
            kind: NotificationKind::Board,
            message: format!("{creator} added you to {}", board.board_name),
            board_id: board.id.clone(),
            timestamp: now,
        };
        self.unread.insert(notification.id.clone());
        self.notifications.push(notification);
        self.notifications.last()
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_unread(&self, id: &NotificationId) -> bool {
        self.unread.contains(id)
    }

    pub fn unread_count(&self) -> usize {
        self.unread.len()
    }

    /// Returns whether the notification was unread.
    pub fn mark_read(&mut self, id: &NotificationId) -> bool {
        self.unread.remove(id)
    }

    pub fn mark_all_read(&mut self) {
        self.unread.clear();
    }

    /// Drop notifications for boards that no longer exist. Returns how many
    /// were removed.
    ///
    /// A board that is removed and later re-added may notify again.
    pub fn reconcile(&mut self, existing_boards: &HashSet<BoardId>) -> usize {
        let before = self.notifications.len();
        let unread = &mut self.unread;
        self.notifications.retain(|notification| {
            let keep = existing_boards.contains(&notification.board_id);
            if !keep {
                unread.remove(&notification.id);
            }
            keep
        });
        self.notified_boards.retain(|board| existing_boards.contains(board));
        before - self.notifications.len()
    }

    /// Group by UTC calendar day of `now`.
    pub fn grouped(&self, now: DateTime<Utc>) -> NotificationGroups<'_> {
        let today = now.date_naive();
        let yesterday = today - Duration::days(1);

        let mut sorted: Vec<&Notification> = self.notifications.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut groups = NotificationGroups::default();
        for notification in sorted {
            let day = notification.timestamp.date_naive();
            if day == today {
                groups.today.push(notification);
            } else if day == yesterday {
                groups.yesterday.push(notification);
            } else {
                groups.older.push(notification);
            }
        }
        groups
    }
}
