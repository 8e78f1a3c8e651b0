//! TaskStore port - a board's task collection.

use async_trait::async_trait;

use crate::domain::{BoardId, StoreError, TaskDocument, TaskId};

/// CRUD over `boards/{board}/tasks`.
///
/// Implementations that also back a [`crate::ports::TaskFeed`] publish a
/// fresh snapshot after every successful mutation.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task. The task's id must not already exist on the board.
    async fn insert_task(&self, board_id: &BoardId, task: TaskDocument) -> Result<(), StoreError>;

    /// Replace an existing task (matched by id).
    async fn put_task(&self, board_id: &BoardId, task: TaskDocument) -> Result<(), StoreError>;

    async fn delete_task(&self, board_id: &BoardId, task_id: &TaskId) -> Result<(), StoreError>;

    async fn get_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
    ) -> Result<Option<TaskDocument>, StoreError>;

    async fn list_tasks(&self, board_id: &BoardId) -> Result<Vec<TaskDocument>, StoreError>;
}
