//! BoardService - task commands issued from the board view.
//!
//! Each command validates its input, applies the change to the task record
//! and writes it through the [`TaskStore`]. The derived board fields are not
//! touched here: the store publishes a new snapshot and the status engine
//! picks it up.

use std::sync::Arc;

use crate::domain::{
    BoardError, BoardId, ChecklistItem, ChecklistItemId, TaskDocument, TaskId, TaskStatus,
};
use crate::ports::{Clock, IdGenerator, TaskStore};

pub struct BoardService {
    tasks: Arc<dyn TaskStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl BoardService {
    pub fn new(tasks: Arc<dyn TaskStore>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { tasks, clock, ids }
    }

    /// Create a task in `column`. The title is trimmed and must not be empty.
    pub async fn add_task(
        &self,
        board_id: &BoardId,
        title: &str,
        column: &str,
    ) -> Result<TaskDocument, BoardError> {
        let title = non_empty(title).ok_or(BoardError::EmptyTitle)?;
        let status: TaskStatus = column.parse()?;

        let task = TaskDocument::new(self.ids.generate_task_id(), title, status, self.clock.now());
        self.tasks.insert_task(board_id, task.clone()).await?;
        tracing::info!(board_id = %board_id, task_id = %task.id, column = %status, "task added");
        Ok(task)
    }

    pub async fn rename_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        title: &str,
    ) -> Result<TaskDocument, BoardError> {
        let title = non_empty(title).ok_or(BoardError::EmptyTitle)?;
        let mut task = self.load(board_id, task_id).await?;

        task.rename(title, self.clock.now());
        self.tasks.put_task(board_id, task.clone()).await?;
        Ok(task)
    }

    /// Drag-and-drop transition to `target_column`.
    ///
    /// Returns `false` without writing when the task is already there. A task
    /// whose stored status is unrecognized counts as sitting in `todo`, the
    /// column it is displayed in.
    pub async fn move_task(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        target_column: &str,
    ) -> Result<bool, BoardError> {
        let target: TaskStatus = target_column.parse()?;
        let mut task = self.load(board_id, task_id).await?;

        let source = task.status().unwrap_or_default();
        if source == target {
            return Ok(false);
        }

        task.set_status(target, self.clock.now());
        self.tasks.put_task(board_id, task).await?;
        tracing::info!(
            board_id = %board_id,
            task_id = %task_id,
            from = %source,
            to = %target,
            "task moved"
        );
        Ok(true)
    }

    pub async fn delete_task(&self, board_id: &BoardId, task_id: &TaskId) -> Result<(), BoardError> {
        self.tasks.delete_task(board_id, task_id).await?;
        tracing::info!(board_id = %board_id, task_id = %task_id, "task deleted");
        Ok(())
    }

    /// Append an unchecked checklist entry. The text is trimmed and must not
    /// be empty.
    pub async fn add_checklist_item(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        text: &str,
    ) -> Result<ChecklistItem, BoardError> {
        let text = non_empty(text).ok_or(BoardError::EmptyChecklistText)?;
        let mut task = self.load(board_id, task_id).await?;

        let item = ChecklistItem::new(self.ids.generate_checklist_item_id(), text);
        task.push_checklist_item(item.clone(), self.clock.now());
        self.tasks.put_task(board_id, task).await?;
        Ok(item)
    }

    /// Flip one checklist entry; returns its new `completed` value.
    pub async fn toggle_checklist_item(
        &self,
        board_id: &BoardId,
        task_id: &TaskId,
        item_id: &ChecklistItemId,
    ) -> Result<bool, BoardError> {
        let mut task = self.load(board_id, task_id).await?;

        let completed = task
            .toggle_checklist_item(item_id, self.clock.now())
            .ok_or_else(|| BoardError::ChecklistItemNotFound {
                task_id: task_id.clone(),
                item_id: item_id.clone(),
            })?;
        self.tasks.put_task(board_id, task).await?;
        Ok(completed)
    }

    async fn load(&self, board_id: &BoardId, task_id: &TaskId) -> Result<TaskDocument, BoardError> {
        self.tasks
            .get_task(board_id, task_id)
            .await?
            .ok_or_else(|| BoardError::TaskNotFound(task_id.clone()))
    }
}

fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
