use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use taskboard_core::domain::{BoardId, BoardProgress, BucketCounts, TaskStatus};
use taskboard_core::impls::TracingDiagnosticSink;
use taskboard_core::ports::TaskSnapshot;
use taskboard_core::app::{derive_progress, partition};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeriveReport {
    board_id: String,
    counts: BucketCounts,
    columns: Vec<ColumnReport>,
    #[serde(flatten)]
    progress: BoardProgress,
}

#[derive(Debug, Serialize)]
struct ColumnReport {
    column: &'static str,
    tasks: Vec<String>,
}

pub fn handle(snapshot_path: &Path, board: &str) -> anyhow::Result<()> {
    let raw = read_input(snapshot_path)?;
    let snapshot: TaskSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of tasks", snapshot_path.display()))?;

    let board_id = BoardId::new(board);
    let sink = TracingDiagnosticSink::new();
    let buckets = partition(&board_id, snapshot, &sink);

    let report = DeriveReport {
        board_id: board_id.to_string(),
        counts: buckets.counts(),
        columns: TaskStatus::ALL
            .into_iter()
            .map(|status| ColumnReport {
                column: status.as_str(),
                tasks: buckets
                    .bucket(status)
                    .iter()
                    .map(|task| task.title.clone())
                    .collect(),
            })
            .collect(),
        progress: derive_progress(buckets.counts()),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
