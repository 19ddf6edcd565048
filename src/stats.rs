//! Read-only statistics over the task collection.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::task::{Status, Task};

/// How many recently completed tasks the summary keeps.
const RECENT_LIMIT: usize = 5;

/// Aggregated board summary.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    /// Tasks with a due date before today that are not done.
    pub overdue: usize,
    /// Tasks completed within the last seven days.
    pub completed_this_week: usize,
    /// Most recently completed task titles, newest first.
    pub recently_completed: Vec<String>,
}

/// Compute the summary as of `now`.
pub fn compute_at(tasks: &[Task], now: DateTime<Utc>) -> BoardStats {
    let today: NaiveDate = now.date_naive();
    let week_ago = now - Duration::days(7);

    let mut stats = BoardStats {
        total: tasks.len(),
        todo: 0,
        in_progress: 0,
        done: 0,
        overdue: 0,
        completed_this_week: 0,
        recently_completed: Vec::new(),
    };

    let mut completed: Vec<&Task> = Vec::new();
    for task in tasks {
        match task.status {
            Status::Todo => stats.todo += 1,
            Status::InProgress => stats.in_progress += 1,
            Status::Done => stats.done += 1,
        }
        if task.is_overdue(today) {
            stats.overdue += 1;
        }
        if let Some(completed_at) = task.completed_at {
            if completed_at >= week_ago {
                stats.completed_this_week += 1;
            }
            completed.push(task);
        }
    }

    completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    stats.recently_completed = completed
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|task| task.title.clone())
        .collect();

    stats
}

/// Compute the summary as of the current time.
pub fn compute(tasks: &[Task]) -> BoardStats {
    compute_at(tasks, Utc::now())
}
