//! Derived board fields. Both are pure functions of the column sizes.

use crate::domain::{BoardProgress, BoardStatus, BucketCounts};

/// Share of tasks in `done`, as a whole percentage.
///
/// Rounds half up (1 of 8 → 13), so 1 of 3 → 33 and 2 of 3 → 67. An empty
/// board is 0%.
pub fn completion_percentage(counts: BucketCounts) -> u8 {
    let total = counts.total() as u128;
    if total == 0 {
        return 0;
    }
    let done = counts.done as u128;
    // floor(100 * done / total + 1/2) in integers
    let rounded = (200 * done + total) / (2 * total);
    rounded.min(100) as u8
}

/// Board status label.
///
/// All tasks done wins first. Any work in `doing`, or partial completion,
/// means in progress. Everything else (including an empty board) is to do.
pub fn board_status(counts: BucketCounts) -> BoardStatus {
    let total = counts.total();
    if total > 0 && counts.done == total {
        BoardStatus::Completed
    } else if counts.doing > 0 || (counts.done > 0 && total > counts.done) {
        BoardStatus::InProgress
    } else {
        BoardStatus::ToDo
    }
}

pub fn derive_progress(counts: BucketCounts) -> BoardProgress {
    BoardProgress {
        completion_percentage: completion_percentage(counts),
        status: board_status(counts),
    }
}
