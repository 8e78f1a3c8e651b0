//! InMemoryBoardStore - 開発用の board ストア
//!
//! Keeps boards in a map and logs every successful progress write, so tests
//! can assert exactly which writes the engine issued. Writes can be made to
//! fail on demand.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{Board, BoardId, BoardProgress, StoreError};
use crate::ports::BoardStore;

#[derive(Debug, Default)]
struct State {
    boards: HashMap<BoardId, Board>,
    writes: Vec<(BoardId, BoardProgress)>,
    fail_with: Option<StoreError>,
}

#[derive(Debug, Default)]
pub struct InMemoryBoardStore {
    state: Mutex<State>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_board(&self, board: Board) {
        self.lock().boards.insert(board.id.clone(), board);
    }

    pub fn remove_board(&self, board_id: &BoardId) -> Option<Board> {
        self.lock().boards.remove(board_id)
    }

    pub fn board(&self, board_id: &BoardId) -> Option<Board> {
        self.lock().boards.get(board_id).cloned()
    }

    pub fn board_ids(&self) -> Vec<BoardId> {
        self.lock().boards.keys().cloned().collect()
    }

    /// Successful progress writes, in the order they were applied.
    pub fn writes(&self) -> Vec<(BoardId, BoardProgress)> {
        self.lock().writes.clone()
    }

    /// Make every following `update_progress` fail with `error` (or succeed
    /// again with `None`).
    pub fn fail_writes_with(&self, error: Option<StoreError>) {
        self.lock().fail_with = error;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn update_progress(
        &self,
        board_id: &BoardId,
        progress: BoardProgress,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        if let Some(error) = &state.fail_with {
            return Err(error.clone());
        }
        let board = state
            .boards
            .get_mut(board_id)
            .ok_or_else(|| StoreError::board_not_found(board_id))?;
        board.apply_progress(progress);
        state.writes.push((board_id.clone(), progress));
        Ok(())
    }

    async fn get_board(&self, board_id: &BoardId) -> Result<Option<Board>, StoreError> {
        Ok(self.board(board_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoardStatus, UserId};
    use chrono::Utc;

    fn progress(pct: u8, status: BoardStatus) -> BoardProgress {
        BoardProgress {
            completion_percentage: pct,
            status,
        }
    }

    #[tokio::test]
    async fn update_progress_applies_and_logs() {
        let store = InMemoryBoardStore::new();
        let id = BoardId::new("b1");
        store.insert_board(Board::new(id.clone(), "Launch", UserId::new("u1"), Utc::now()));

        store
            .update_progress(&id, progress(40, BoardStatus::InProgress))
            .await
            .unwrap();

        let board = store.get_board(&id).await.unwrap().unwrap();
        assert_eq!(board.completion_percentage, 40);
        assert_eq!(store.writes(), vec![(id, progress(40, BoardStatus::InProgress))]);
    }

    #[tokio::test]
    async fn unknown_board_is_not_found() {
        let store = InMemoryBoardStore::new();

        let err = store
            .update_progress(&BoardId::new("nope"), progress(0, BoardStatus::ToDo))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "board", .. }));
    }

    #[tokio::test]
    async fn injected_failure_is_returned() {
        let store = InMemoryBoardStore::new();
        let id = BoardId::new("b1");
        store.insert_board(Board::new(id.clone(), "Launch", UserId::new("u1"), Utc::now()));
        store.fail_writes_with(Some(StoreError::Rejected("read-only".into())));

        let err = store
            .update_progress(&id, progress(10, BoardStatus::InProgress))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::Rejected("read-only".into()));
        assert!(store.writes().is_empty());

        store.fail_writes_with(None);
        assert!(store.update_progress(&id, progress(10, BoardStatus::InProgress)).await.is_ok());
    }
}
