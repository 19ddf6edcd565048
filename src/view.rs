//! Filter/sort projection.
//!
//! `project` computes the displayed sequence from the canonical collection
//! and a `FilterCriteria`. It is a pure function: the canonical order is
//! never written back from here, only the explicit reorder path may change
//! it.

use crate::task::{FilterCriteria, PriorityFilter, SortBy, StatusFilter, Task};

/// Apply search, status and priority filters, then a stable sort, in that
/// fixed order. Returns a new sequence; the input is untouched.
pub fn project(tasks: &[Task], criteria: &FilterCriteria) -> Vec<Task> {
    let search = criteria.search.to_lowercase();

    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_search(task, &search))
        .filter(|task| match criteria.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == status,
        })
        .filter(|task| match criteria.priority {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority == priority,
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable, which is what keeps the documented dueDate
    // tie-break (original relative order) intact.
    match criteria.sort_by {
        SortBy::Date => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortBy::DueDate => out.sort_by(|a, b| match (a.due_date, b.due_date) {
            (Some(left), Some(right)) => left.cmp(&right),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }),
        SortBy::Priority => out.sort_by_key(|task| task.priority.rank()),
        SortBy::Title => out.sort_by(|a, b| title_key(&a.title).cmp(&title_key(&b.title))),
    }

    out
}

fn matches_search(task: &Task, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(needle) || task.description.to_lowercase().contains(needle)
}

// Case-folded comparison key; close enough to locale collation for the
// title sort without pulling in ICU.
fn title_key(title: &str) -> String {
    title.to_lowercase()
}
