//! Board lifecycle through the in-memory stores: commands → feed → engine →
//! board record.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tokio::sync::watch;

use taskboard_core::app::{BoardService, StatusEngineBuilder, WriteOutcome};
use taskboard_core::domain::{
    Board, BoardId, BoardProgress, BoardStatus, Diagnostic, DiagnosticKind, StoreError,
    TaskDocument, TaskId, UserId,
};
use taskboard_core::impls::{InMemoryBoardStore, InMemoryTaskStore, RecordingDiagnosticSink};
use taskboard_core::ports::{FixedClock, UlidGenerator};

fn board_store(board_id: &BoardId) -> Arc<InMemoryBoardStore> {
    let boards = Arc::new(InMemoryBoardStore::new());
    boards.insert_board(Board::new(
        board_id.clone(),
        "Release 1.0",
        UserId::new("owner"),
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
    ));
    boards
}

fn raw(id: &str, status: &str) -> TaskDocument {
    TaskDocument {
        id: TaskId::new(id),
        title: id.to_string(),
        status: Some(status.to_string()),
        ..TaskDocument::default()
    }
}

#[tokio::test]
async fn four_task_snapshot_scenario() {
    let board_id = BoardId::new("b1");
    let boards = board_store(&board_id);
    let sink = Arc::new(RecordingDiagnosticSink::new());
    let engine = StatusEngineBuilder::new()
        .board_store(boards.clone())
        .diagnostics(sink.clone())
        .build()
        .unwrap();

    let activation = engine.activate(
        &board_id,
        vec![
            raw("t1", "todo"),
            raw("t2", "doing"),
            raw("t3", "done"),
            raw("t4", "done"),
        ],
    );

    let counts = activation.buckets.counts();
    assert_eq!(
        (counts.todo, counts.doing, counts.on_hold, counts.done),
        (1, 1, 0, 2)
    );
    assert_eq!(activation.progress.completion_percentage, 50);
    assert_eq!(activation.progress.status, BoardStatus::InProgress);
    assert_eq!(activation.write.outcome().await, Ok(WriteOutcome::Written));

    assert_eq!(
        boards.writes(),
        vec![(
            board_id,
            BoardProgress {
                completion_percentage: 50,
                status: BoardStatus::InProgress,
            }
        )]
    );
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn commands_drive_the_engine_through_the_feed() {
    let board_id = BoardId::new("b1");
    let boards = board_store(&board_id);
    let tasks = Arc::new(InMemoryTaskStore::new());
    let sink = Arc::new(RecordingDiagnosticSink::new());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    ));
    let service = BoardService::new(
        tasks.clone(),
        clock.clone(),
        Arc::new(UlidGenerator::new(clock.clone())),
    );
    let engine = Arc::new(
        StatusEngineBuilder::new()
            .board_store(boards.clone())
            .diagnostics(sink.clone())
            .build()
            .unwrap(),
    );

    let feed = tasks.subscribe(&board_id);
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = tokio::spawn({
        let engine = Arc::clone(&engine);
        let board_id = board_id.clone();
        async move {
            let mut writes = Vec::new();
            let summary = engine
                .run(&board_id, feed, shutdown_rx, |activation| {
                    writes.push(activation.write)
                })
                .await;
            for write in writes {
                write.outcome().await.unwrap();
            }
            summary
        }
    });

    let a = service.add_task(&board_id, "Write changelog", "todo").await.unwrap();
    let b = service.add_task(&board_id, "Tag release", "todo").await.unwrap();
    service.move_task(&board_id, &a.id, "doing").await.unwrap();
    service.move_task(&board_id, &a.id, "done").await.unwrap();
    service.move_task(&board_id, &b.id, "done").await.unwrap();
    // Someone else wrote a record with a status we don't know.
    tasks.seed(&board_id, raw("legacy", "archived"));
    service.delete_task(&board_id, &TaskId::new("legacy")).await.unwrap();

    tasks.close_feeds(&board_id);
    let summary = runner.await.unwrap();

    // initial empty snapshot + 7 mutations
    assert_eq!(summary.activations, 8);
    assert_eq!(
        summary.last_progress,
        Some(BoardProgress {
            completion_percentage: 100,
            status: BoardStatus::Completed,
        })
    );

    let board = boards.board(&board_id).unwrap();
    assert_eq!(board.completion_percentage, 100);
    assert_eq!(board.status, BoardStatus::Completed);

    assert_eq!(sink.count(DiagnosticKind::UnrecognizedTaskStatus), 1);
    assert!(matches!(
        &sink.events()[0],
        Diagnostic::UnrecognizedTaskStatus { raw_status: Some(s), .. } if s == "archived"
    ));
}

#[tokio::test]
async fn failed_write_leaves_previous_value_and_is_reported() {
    let board_id = BoardId::new("b1");
    let boards = board_store(&board_id);
    let sink = Arc::new(RecordingDiagnosticSink::new());
    let engine = StatusEngineBuilder::new()
        .board_store(boards.clone())
        .diagnostics(sink.clone())
        .build()
        .unwrap();

    let first = engine.activate(&board_id, vec![raw("t1", "doing"), raw("t2", "done")]);
    first.write.outcome().await.unwrap();

    boards.fail_writes_with(Some(StoreError::Unavailable("network".into())));
    let second = engine.activate(&board_id, vec![raw("t1", "done"), raw("t2", "done")]);
    assert_eq!(second.progress.status, BoardStatus::Completed);
    assert!(second.write.outcome().await.is_err());

    // In-memory derived value moved on; persisted one did not.
    let board = boards.board(&board_id).unwrap();
    assert_eq!(board.status, BoardStatus::InProgress);
    assert_eq!(board.completion_percentage, 50);
    assert_eq!(sink.count(DiagnosticKind::PersistenceFailure), 1);
}
