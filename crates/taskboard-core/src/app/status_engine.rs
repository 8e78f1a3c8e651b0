//! StatusEngine - snapshot in, derived progress out.
//!
//! One activation per snapshot:
//! 1. partition the snapshot into four columns
//! 2. derive completion percentage and board status from the column sizes
//! 3. issue the board write without waiting for it
//!
//! The write runs on the tokio runtime. The caller gets a [`PersistHandle`]
//! it may await to learn the outcome, or drop to let the write finish on its
//! own. Either way a failed write is reported to the diagnostics sink.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::derive::derive_progress;
use crate::app::partition::partition;
use crate::config::EngineConfig;
use crate::domain::{BoardId, BoardProgress, Buckets, Diagnostic, PersistError};
use crate::ports::{BoardStore, DiagnosticSink, TaskFeed, TaskSnapshot};

/// Result of one activation.
#[derive(Debug)]
pub struct Activation {
    pub buckets: Buckets,
    pub progress: BoardProgress,
    pub write: PersistHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `engine.persist_derived` is off.
    Disabled,
    /// Same value as the last write issued for the board.
    Unchanged,
    /// A write from a later activation of the same board already landed.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Skipped(SkipReason),
}

/// Handle to the board write issued by an activation.
///
/// Dropping it detaches the write; it still runs to completion.
#[derive(Debug)]
pub struct PersistHandle {
    board_id: BoardId,
    state: HandleState,
}

#[derive(Debug)]
enum HandleState {
    Pending(JoinHandle<Result<WriteOutcome, PersistError>>),
    Skipped(SkipReason),
}

impl PersistHandle {
    fn pending(board_id: BoardId, join: JoinHandle<Result<WriteOutcome, PersistError>>) -> Self {
        Self {
            board_id,
            state: HandleState::Pending(join),
        }
    }

    fn skipped(board_id: BoardId, reason: SkipReason) -> Self {
        Self {
            board_id,
            state: HandleState::Skipped(reason),
        }
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// True when a write was sent to the board store.
    pub fn is_issued(&self) -> bool {
        matches!(self.state, HandleState::Pending(_))
    }

    /// Wait for the write to finish.
    pub async fn outcome(self) -> Result<WriteOutcome, PersistError> {
        match self.state {
            HandleState::Skipped(reason) => Ok(WriteOutcome::Skipped(reason)),
            HandleState::Pending(join) => match join.await {
                Ok(result) => result,
                Err(join_err) => Err(PersistError::Aborted {
                    board_id: self.board_id,
                    reason: join_err.to_string(),
                }),
            },
        }
    }
}

/// Totals reported by [`StatusEngine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub activations: usize,
    pub last_progress: Option<BoardProgress>,
}

/// Per-board write ordering. Writes carry the sequence number of their
/// activation; a write older than the last one applied is dropped.
#[derive(Debug, Default)]
struct WriteLane {
    applied_seq: tokio::sync::Mutex<u64>,
}

pub struct StatusEngine {
    boards: Arc<dyn BoardStore>,
    diagnostics: Arc<dyn DiagnosticSink>,
    config: EngineConfig,
    runtime: Handle,
    next_seq: AtomicU64,
    lanes: Mutex<HashMap<BoardId, Arc<WriteLane>>>,
    last_issued: Arc<Mutex<HashMap<BoardId, BoardProgress>>>,
}

impl StatusEngine {
    pub(crate) fn new(
        boards: Arc<dyn BoardStore>,
        diagnostics: Arc<dyn DiagnosticSink>,
        config: EngineConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            boards,
            diagnostics,
            config,
            runtime,
            next_seq: AtomicU64::new(1),
            lanes: Mutex::new(HashMap::new()),
            last_issued: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Process one full snapshot of a board's tasks.
    ///
    /// Returns as soon as the write has been handed to the runtime.
    pub fn activate(&self, board_id: &BoardId, snapshot: TaskSnapshot) -> Activation {
        let buckets = partition(board_id, snapshot, self.diagnostics.as_ref());
        let counts = buckets.counts();
        let progress = derive_progress(counts);

        tracing::debug!(
            board_id = %board_id,
            todo = counts.todo,
            doing = counts.doing,
            on_hold = counts.on_hold,
            done = counts.done,
            completion_percentage = progress.completion_percentage,
            status = %progress.status,
            "board activated"
        );

        let write = self.persist(board_id, progress);
        Activation {
            buckets,
            progress,
            write,
        }
    }

    /// Drive activations from a feed until it ends or `shutdown` flips to
    /// true. Snapshots are processed strictly one at a time, in delivery
    /// order. Each activation is handed to `on_activation`.
    pub async fn run<F, O>(
        &self,
        board_id: &BoardId,
        mut feed: F,
        mut shutdown: watch::Receiver<bool>,
        mut on_activation: O,
    ) -> RunSummary
    where
        F: TaskFeed,
        O: FnMut(Activation) + Send,
    {
        let mut summary = RunSummary::default();
        let mut shutdown_open = true;

        tracing::info!(board_id = %board_id, "status engine started");
        loop {
            if *shutdown.borrow() {
                break;
            }

            let snapshot = if shutdown_open {
                tokio::select! {
                    changed = shutdown.changed() => {
                        // Sender gone: nobody can ask us to stop any more.
                        if changed.is_err() {
                            shutdown_open = false;
                        }
                        continue;
                    }
                    snapshot = feed.next_snapshot() => snapshot,
                }
            } else {
                feed.next_snapshot().await
            };

            let Some(snapshot) = snapshot else {
                break;
            };

            let activation = self.activate(board_id, snapshot);
            summary.activations += 1;
            summary.last_progress = Some(activation.progress);
            on_activation(activation);
        }
        self.forget(board_id);
        tracing::info!(
            board_id = %board_id,
            activations = summary.activations,
            "status engine stopped"
        );
        summary
    }

    /// Drop the per-board write state kept for `board_id`.
    ///
    /// The write lane is kept while a write for the board is still in
    /// flight, so later writes stay ordered behind it.
    pub fn forget(&self, board_id: &BoardId) {
        lock(&self.last_issued).remove(board_id);
        let mut lanes = lock(&self.lanes);
        if lanes
            .get(board_id)
            .is_some_and(|lane| Arc::strong_count(lane) == 1)
        {
            lanes.remove(board_id);
        }
    }

    fn persist(&self, board_id: &BoardId, progress: BoardProgress) -> PersistHandle {
        if !self.config.persist_derived {
            return PersistHandle::skipped(board_id.clone(), SkipReason::Disabled);
        }

        if self.config.skip_unchanged_writes {
            let mut last_issued = lock(&self.last_issued);
            if last_issued.get(board_id) == Some(&progress) {
                tracing::debug!(board_id = %board_id, "progress unchanged, write skipped");
                return PersistHandle::skipped(board_id.clone(), SkipReason::Unchanged);
            }
            last_issued.insert(board_id.clone(), progress);
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let lane = Arc::clone(lock(&self.lanes).entry(board_id.clone()).or_default());
        let boards = Arc::clone(&self.boards);
        let diagnostics = Arc::clone(&self.diagnostics);
        let last_issued = Arc::clone(&self.last_issued);
        let target = board_id.clone();

        let join = self.runtime.spawn(async move {
            let mut applied_seq = lane.applied_seq.lock().await;
            if *applied_seq > seq {
                tracing::debug!(board_id = %target, seq, "stale progress write dropped");
                return Ok(WriteOutcome::Skipped(SkipReason::Superseded));
            }

            match boards.update_progress(&target, progress).await {
                Ok(()) => {
                    *applied_seq = seq;
                    tracing::debug!(
                        board_id = %target,
                        completion_percentage = progress.completion_percentage,
                        status = %progress.status,
                        "board progress persisted"
                    );
                    Ok(WriteOutcome::Written)
                }
                Err(source) => {
                    // Not written, so an identical later activation must retry.
                    {
                        let mut issued = lock(&last_issued);
                        if issued.get(&target) == Some(&progress) {
                            issued.remove(&target);
                        }
                    }
                    tracing::warn!(board_id = %target, error = %source, "failed to persist board progress");
                    diagnostics.emit(Diagnostic::PersistenceFailure {
                        board_id: target.clone(),
                        error: source.to_string(),
                    });
                    Err(PersistError::Store {
                        board_id: target,
                        source,
                    })
                }
            }
        });

        PersistHandle::pending(board_id.clone(), join)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StatusEngineBuilder;
    use crate::domain::{BoardStatus, DiagnosticKind, StoreError, TaskDocument, TaskId};
    use crate::impls::{InMemoryBoardStore, RecordingDiagnosticSink};

    fn task(id: &str, status: &str) -> TaskDocument {
        TaskDocument {
            id: TaskId::new(id),
            title: id.to_string(),
            status: Some(status.to_string()),
            ..TaskDocument::default()
        }
    }

    fn engine_with(
        config: EngineConfig,
    ) -> (StatusEngine, Arc<InMemoryBoardStore>, Arc<RecordingDiagnosticSink>) {
        let boards = Arc::new(InMemoryBoardStore::new());
        boards.insert_board(crate::domain::Board::new(
            BoardId::new("b1"),
            "Launch",
            crate::domain::UserId::new("u1"),
            chrono::Utc::now(),
        ));
        let sink = Arc::new(RecordingDiagnosticSink::new());
        let engine = StatusEngineBuilder::new()
            .board_store(boards.clone())
            .diagnostics(sink.clone())
            .config(config)
            .build()
            .unwrap();
        (engine, boards, sink)
    }

    #[tokio::test]
    async fn activation_derives_and_writes_once() {
        let (engine, boards, sink) = engine_with(EngineConfig::default());
        let snapshot = vec![
            task("a", "todo"),
            task("b", "doing"),
            task("c", "done"),
            task("d", "done"),
        ];

        let activation = engine.activate(&BoardId::new("b1"), snapshot);

        assert_eq!(activation.buckets.counts().done, 2);
        assert_eq!(activation.progress.completion_percentage, 50);
        assert_eq!(activation.progress.status, BoardStatus::InProgress);
        assert!(activation.write.is_issued());
        assert_eq!(activation.write.outcome().await, Ok(WriteOutcome::Written));

        assert_eq!(
            boards.writes(),
            vec![(
                BoardId::new("b1"),
                BoardProgress {
                    completion_percentage: 50,
                    status: BoardStatus::InProgress,
                }
            )]
        );
        assert!(sink.events().is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_reported_not_raised() {
        let (engine, boards, sink) = engine_with(EngineConfig::default());
        boards.fail_writes_with(Some(StoreError::Unavailable("offline".into())));

        let activation = engine.activate(&BoardId::new("b1"), vec![task("a", "done")]);
        assert_eq!(activation.progress.status, BoardStatus::Completed);

        let err = activation.write.outcome().await.unwrap_err();
        assert!(matches!(err, PersistError::Store { source: StoreError::Unavailable(_), .. }));
        assert_eq!(sink.count(DiagnosticKind::PersistenceFailure), 1);
        assert!(boards.writes().is_empty());
    }

    #[tokio::test]
    async fn dropped_handle_still_writes() {
        let (engine, boards, _sink) = engine_with(EngineConfig::default());

        drop(engine.activate(&BoardId::new("b1"), vec![task("a", "doing")]));

        for _ in 0..100 {
            if !boards.writes().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(boards.writes().len(), 1);
    }

    #[tokio::test]
    async fn persist_disabled_skips_write() {
        let (engine, boards, _sink) = engine_with(EngineConfig {
            persist_derived: false,
            ..EngineConfig::default()
        });

        let activation = engine.activate(&BoardId::new("b1"), vec![task("a", "done")]);

        assert!(!activation.write.is_issued());
        assert_eq!(
            activation.write.outcome().await,
            Ok(WriteOutcome::Skipped(SkipReason::Disabled))
        );
        assert!(boards.writes().is_empty());
    }

    #[tokio::test]
    async fn unchanged_progress_is_skipped_when_configured() {
        let (engine, boards, _sink) = engine_with(EngineConfig {
            skip_unchanged_writes: true,
            ..EngineConfig::default()
        });
        let board = BoardId::new("b1");

        let first = engine.activate(&board, vec![task("a", "todo"), task("b", "done")]);
        assert_eq!(first.write.outcome().await, Ok(WriteOutcome::Written));

        // Different tasks, same derived pair.
        let second = engine.activate(&board, vec![task("c", "done"), task("d", "onHold")]);
        assert_eq!(
            second.write.outcome().await,
            Ok(WriteOutcome::Skipped(SkipReason::Unchanged))
        );
        assert_eq!(boards.writes().len(), 1);
    }

    #[tokio::test]
    async fn failed_write_is_retried_by_identical_activation() {
        let (engine, boards, _sink) = engine_with(EngineConfig {
            skip_unchanged_writes: true,
            ..EngineConfig::default()
        });
        let board = BoardId::new("b1");
        boards.fail_writes_with(Some(StoreError::Unavailable("net".into())));

        let first = engine.activate(&board, vec![task("a", "done")]);
        assert!(first.write.outcome().await.is_err());

        boards.fail_writes_with(None);
        let second = engine.activate(&board, vec![task("a", "done")]);
        assert_eq!(second.write.outcome().await, Ok(WriteOutcome::Written));

        let stored = boards.board(&board).unwrap();
        assert_eq!(stored.completion_percentage, 100);
        assert_eq!(stored.status, BoardStatus::Completed);
    }

    #[tokio::test]
    async fn forget_clears_board_write_state() {
        let (engine, boards, _sink) = engine_with(EngineConfig {
            skip_unchanged_writes: true,
            ..EngineConfig::default()
        });
        let board = BoardId::new("b1");

        let first = engine.activate(&board, vec![task("a", "doing")]);
        first.write.outcome().await.unwrap();
        assert!(lock(&engine.lanes).contains_key(&board));

        engine.forget(&board);
        assert!(lock(&engine.lanes).is_empty());
        assert!(lock(&engine.last_issued).is_empty());

        // Nothing remembered, so the same pair is written again.
        let again = engine.activate(&board, vec![task("a", "doing")]);
        assert_eq!(again.write.outcome().await, Ok(WriteOutcome::Written));
        assert_eq!(boards.writes().len(), 2);
    }

    #[tokio::test]
    async fn lane_is_released_once_writes_settle() {
        let (engine, _boards, _sink) = engine_with(EngineConfig::default());
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        tx.send(vec![task("a", "done")]).unwrap();
        drop(tx);

        let mut handles = Vec::new();
        engine
            .run(&BoardId::new("b1"), rx, shutdown_rx, |activation| {
                handles.push(activation.write)
            })
            .await;
        for handle in handles {
            handle.outcome().await.unwrap();
        }
        engine.forget(&BoardId::new("b1"));

        assert!(lock(&engine.lanes).is_empty());
    }

    #[tokio::test]
    async fn run_processes_snapshots_in_order_until_feed_closes() {
        let (engine, boards, _sink) = engine_with(EngineConfig::default());
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        tx.send(vec![task("a", "todo")]).unwrap();
        tx.send(vec![task("a", "doing")]).unwrap();
        tx.send(vec![task("a", "done")]).unwrap();
        drop(tx);

        let mut handles = Vec::new();
        let summary = engine
            .run(&BoardId::new("b1"), rx, shutdown_rx, |activation| {
                handles.push(activation.write)
            })
            .await;
        for handle in handles {
            handle.outcome().await.unwrap();
        }

        assert_eq!(summary.activations, 3);
        assert_eq!(
            summary.last_progress.map(|p| p.status),
            Some(BoardStatus::Completed)
        );
        let board = boards.board(&BoardId::new("b1")).unwrap();
        assert_eq!(board.status, BoardStatus::Completed);
        assert_eq!(board.completion_percentage, 100);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let (engine, _boards, _sink) = engine_with(EngineConfig::default());
        let (_tx, rx) = tokio::sync::mpsc::unbounded_channel::<TaskSnapshot>();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let stopper = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            shutdown_tx.send(true).unwrap();
            shutdown_tx
        });

        let summary = engine
            .run(&BoardId::new("b1"), rx, shutdown_rx, |_| {})
            .await;
        let _shutdown_tx = stopper.await.unwrap();

        assert_eq!(summary.activations, 0);
        assert_eq!(summary.last_progress, None);
    }
}
