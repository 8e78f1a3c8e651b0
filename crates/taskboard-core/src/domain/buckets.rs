//! The four-column partition of a board's tasks.

use serde::Serialize;

use super::status::TaskStatus;
use super::task::TaskDocument;

/// Tasks grouped by column.
///
/// Within a column, tasks keep the order in which they were pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct Buckets<T = TaskDocument> {
    pub todo: Vec<T>,
    pub doing: Vec<T>,
    pub on_hold: Vec<T>,
    pub done: Vec<T>,
}

impl<T> Buckets<T> {
    pub fn new() -> Self {
        Self {
            todo: Vec::new(),
            doing: Vec::new(),
            on_hold: Vec::new(),
            done: Vec::new(),
        }
    }

    pub fn bucket(&self, status: TaskStatus) -> &[T] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::Doing => &self.doing,
            TaskStatus::OnHold => &self.on_hold,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn push(&mut self, status: TaskStatus, item: T) {
        let bucket = match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Doing => &mut self.doing,
            TaskStatus::OnHold => &mut self.on_hold,
            TaskStatus::Done => &mut self.done,
        };
        bucket.push(item);
    }

    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            todo: self.todo.len(),
            doing: self.doing.len(),
            on_hold: self.on_hold.len(),
            done: self.done.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.counts().total()
    }

    /// Every task with its column, columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &T)> {
        TaskStatus::ALL
            .into_iter()
            .flat_map(move |status| self.bucket(status).iter().map(move |item| (status, item)))
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Column sizes. The derived board fields depend on nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCounts {
    pub todo: usize,
    pub doing: usize,
    pub on_hold: usize,
    pub done: usize,
}

impl BucketCounts {
    pub fn new(todo: usize, doing: usize, on_hold: usize, done: usize) -> Self {
        Self {
            todo,
            doing,
            on_hold,
            done,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.doing + self.on_hold + self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_routes_to_the_matching_column() {
        let mut buckets = Buckets::new();
        buckets.push(TaskStatus::OnHold, "a");
        buckets.push(TaskStatus::Done, "b");
        buckets.push(TaskStatus::Done, "c");

        assert_eq!(buckets.bucket(TaskStatus::OnHold), &["a"]);
        assert_eq!(buckets.bucket(TaskStatus::Done), &["b", "c"]);
        assert_eq!(buckets.counts(), BucketCounts::new(0, 0, 1, 2));
        assert_eq!(buckets.total(), 3);
    }

    #[test]
    fn iter_walks_columns_in_display_order() {
        let mut buckets = Buckets::new();
        buckets.push(TaskStatus::Done, 4);
        buckets.push(TaskStatus::Todo, 1);
        buckets.push(TaskStatus::Doing, 2);

        let seen: Vec<_> = buckets.iter().map(|(status, n)| (status, *n)).collect();
        assert_eq!(
            seen,
            vec![
                (TaskStatus::Todo, 1),
                (TaskStatus::Doing, 2),
                (TaskStatus::Done, 4)
            ]
        );
    }
}
