//! BoardStore port - board records in the document store.

use async_trait::async_trait;

use crate::domain::{Board, BoardId, BoardProgress, StoreError};

/// Access to board records.
///
/// The status engine only calls [`BoardStore::update_progress`]; it must be a
/// partial update of the two derived fields, leaving the rest of the record
/// alone.
#[async_trait]
pub trait BoardStore: Send + Sync {
    async fn update_progress(
        &self,
        board_id: &BoardId,
        progress: BoardProgress,
    ) -> Result<(), StoreError>;

    async fn get_board(&self, board_id: &BoardId) -> Result<Option<Board>, StoreError>;
}
