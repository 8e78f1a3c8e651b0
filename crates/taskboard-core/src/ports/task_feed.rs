//! TaskFeed port - realtime snapshots of one board's tasks.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::TaskDocument;

/// The complete task set of a board at one point in time.
pub type TaskSnapshot = Vec<TaskDocument>;

/// Subscription that yields a full snapshot on every change to a board's
/// task collection.
///
/// Snapshots for one board arrive in a single total order; the consumer
/// processes them in that order. `None` means the subscription has ended.
#[async_trait]
pub trait TaskFeed: Send {
    async fn next_snapshot(&mut self) -> Option<TaskSnapshot>;
}

#[async_trait]
impl TaskFeed for mpsc::Receiver<TaskSnapshot> {
    async fn next_snapshot(&mut self) -> Option<TaskSnapshot> {
        self.recv().await
    }
}

#[async_trait]
impl TaskFeed for mpsc::UnboundedReceiver<TaskSnapshot> {
    async fn next_snapshot(&mut self) -> Option<TaskSnapshot> {
        self.recv().await
    }
}
