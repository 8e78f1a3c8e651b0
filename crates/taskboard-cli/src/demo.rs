use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use taskboard_core::app::{BoardService, NotificationInbox, StatusEngineBuilder};
use taskboard_core::config::EngineConfig;
use taskboard_core::domain::{Board, BoardId, TaskDocument, UserId};
use taskboard_core::impls::{InMemoryBoardStore, InMemoryTaskStore, TracingDiagnosticSink};
use taskboard_core::ports::{Clock, IdGenerator, SystemClock, UlidGenerator};
use tokio::sync::watch;

/// One board, two people, a handful of drag-and-drops.
pub async fn handle(config: EngineConfig) -> anyhow::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let ids = Arc::new(UlidGenerator::new(SystemClock));
    let boards = Arc::new(InMemoryBoardStore::new());
    let tasks = Arc::new(InMemoryTaskStore::new());
    let diagnostics = Arc::new(TracingDiagnosticSink::new());

    // (A) Board created by bob, shared with alice.
    let alice = UserId::new("alice");
    let bob = UserId::new("bob");
    let board = Board::new(ids.generate_board_id(), "Spring release", bob.clone(), clock.now())
        .with_members([alice.clone(), bob]);
    let board_id = board.id.clone();
    boards.insert_board(board.clone());

    let mut inbox = NotificationInbox::new(alice);
    if let Some(notification) = inbox.on_board_added(&board, Some("Bob"), clock.now()) {
        println!("notification: {}", notification.message);
    }

    // (B) Engine follows the board's task feed.
    let engine = Arc::new(
        StatusEngineBuilder::new()
            .board_store(boards.clone())
            .diagnostics(diagnostics.clone())
            .config(config)
            .build()?,
    );
    let feed = tasks.subscribe(&board_id);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = tokio::spawn({
        let engine = Arc::clone(&engine);
        let board_id = board_id.clone();
        async move {
            let mut writes = Vec::new();
            let summary = engine
                .run(&board_id, feed, shutdown_rx, |activation| {
                    println!(
                        "snapshot: {} tasks -> {}% {}",
                        activation.buckets.total(),
                        activation.progress.completion_percentage,
                        activation.progress.status
                    );
                    writes.push(activation.write);
                })
                .await;
            for write in writes {
                if let Err(e) = write.outcome().await {
                    eprintln!("progress write failed: {e}");
                }
            }
            summary
        }
    });

    // (C) Work the board.
    let service = BoardService::new(tasks.clone(), clock.clone(), ids.clone());
    let plan = service.add_task(&board_id, "Plan scope", "todo").await?;
    let build = service.add_task(&board_id, "Build features", "todo").await?;
    let docs = service.add_task(&board_id, "Write docs", "onHold").await?;

    let item = service.add_checklist_item(&board_id, &build.id, "API").await?;
    service.toggle_checklist_item(&board_id, &build.id, &item.id).await?;

    service.move_task(&board_id, &plan.id, "done").await?;
    service.move_task(&board_id, &build.id, "doing").await?;
    tasks.seed(
        &board_id,
        TaskDocument {
            id: ids.generate_task_id(),
            title: "Imported card".to_string(),
            status: Some("backlog".to_string()),
            ..TaskDocument::default()
        },
    );
    service.move_task(&board_id, &build.id, "done").await?;
    service.move_task(&board_id, &docs.id, "done").await?;

    // (D) Stop following and report.
    tasks.close_feeds(&board_id);
    let summary = runner.await.context("engine task panicked")?;
    drop(shutdown_tx);

    let stored = boards
        .board(&board_id)
        .context("demo board disappeared")?;
    println!(
        "activations={} persisted: {}% {}",
        summary.activations, stored.completion_percentage, stored.status
    );

    let existing: HashSet<BoardId> = boards.board_ids().into_iter().collect();
    inbox.reconcile(&existing);
    println!("unread notifications: {}", inbox.unread_count());
    Ok(())
}
