//! InMemoryTaskStore - 開発用の task ストア
//!
//! Behaves like the realtime document store the status engine is meant to
//! sit behind: every successful mutation publishes the board's full task
//! snapshot to all of that board's subscribers, in mutation order.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::{BoardId, StoreError, TaskDocument, TaskId};
use crate::ports::{TaskSnapshot, TaskStore};

#[derive(Debug, Default)]
struct BoardTasks {
    tasks: Vec<TaskDocument>,
    subscribers: Vec<mpsc::UnboundedSender<TaskSnapshot>>,
}

impl BoardTasks {
    /// Newest first by `createdAt`; ties keep insertion order.
    fn snapshot(&self) -> TaskSnapshot {
        let mut snapshot = self.tasks.clone();
        snapshot.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        snapshot
    }

    fn publish(&mut self) {
        let snapshot = self.snapshot();
        // Closed receivers are dropped here.
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }

    fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == task_id)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    boards: Mutex<HashMap<BoardId, BoardTasks>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a board's task collection.
    ///
    /// The current snapshot is delivered immediately, then one snapshot per
    /// mutation.
    pub fn subscribe(&self, board_id: &BoardId) -> mpsc::UnboundedReceiver<TaskSnapshot> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut boards = self.lock();
        let board = boards.entry(board_id.clone()).or_default();
        // The receiver is alive, so this cannot fail.
        let _ = tx.send(board.snapshot());
        board.subscribers.push(tx);
        rx
    }

    /// Insert a raw document as-is (no validation), publishing a snapshot.
    /// Used to simulate records written by other clients.
    pub fn seed(&self, board_id: &BoardId, task: TaskDocument) {
        let mut boards = self.lock();
        let board = boards.entry(board_id.clone()).or_default();
        board.tasks.push(task);
        board.publish();
    }

    /// Close every subscription on a board.
    pub fn close_feeds(&self, board_id: &BoardId) {
        if let Some(board) = self.lock().get_mut(board_id) {
            board.subscribers.clear();
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<BoardId, BoardTasks>> {
        self.boards.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert_task(&self, board_id: &BoardId, task: TaskDocument) -> Result<(), StoreError> {
        let mut boards = self.lock();
        let board = boards.entry(board_id.clone()).or_default();
        if board.position(&task.id).is_some() {
            return Err(StoreError::Rejected(format!("task {} already exists", task.id)));
        }
        board.tasks.push(task);
        board.publish();
        Ok(())
    }

    async fn put_task(&self, board_id: &BoardId, task: TaskDocument) -> Result<(), StoreError> {
        let mut boards = self.lock();
        let board = boards
            .get_mut(board_id)
            .ok_or_else(|| StoreError::task_not_found(&task.id))?;
        let index = board
            .position(&task.id)
            .ok_or_else(|| StoreError::task_not_found(&task.id))?;
        board.tasks[index] = task;
        board.publish();
        Ok(())
    }

    async fn delete_task(&self, board_id: &BoardId, task_id: &TaskId) -> Result<(), StoreError> {
        let mut boards = self.lock();
        let board = boards
            .get_mut(board_id)
            .ok_or_else(|| StoreError::task_not_found(task_id))?;
        let index = board
            .position(task_id)
            .ok_or_else(|| StoreError::task_not_found(task_id))?;
        board.tasks.remove(index);
        board.publish();
        Ok(())
    }

    async fn get_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
    ) -> Result<Option<TaskDocument>, StoreError> {
        let boards = self.lock();
        Ok(boards.get(board_id).and_then(|board| {
            board
                .position(task_id)
                .map(|index| board.tasks[index].clone())
        }))
    }

    async fn list_tasks(&self, board_id: &BoardId) -> Result<Vec<TaskDocument>, StoreError> {
        Ok(self
            .lock()
            .get(board_id)
            .map(BoardTasks::snapshot)
            .unwrap_or_default())
    }
}
