//! Subtask commands: add, toggle, rm.
//!
//! Every change goes through a whole-record update of the parent task.

use serde::Serialize;

use crate::cli::task::{output_options, short_id};
use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::task::{Subtask, Task};

pub fn run_add(mut ctx: Context, id: &str, title: &str) -> Result<()> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument(
            "subtask title cannot be empty".to_string(),
        ));
    }

    let id = ctx.store.resolve_id(id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let subtask = Subtask::new(title);
    task.subtasks.push(subtask.clone());
    ctx.store.update(task.clone());

    let mut human = HumanOutput::new(format!("Added subtask '{title}' to '{}'", task.title));
    human.push_summary("subtask", short_id(&subtask.id));
    human.push_summary("progress", format!("{}%", task.subtask_progress()));
    emit_success(output_options(&ctx), "subtask add", &task, Some(&human))
}

pub fn run_toggle(mut ctx: Context, id: &str, subtask: &str) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let index = resolve_subtask(&task, subtask)?;
    task.subtasks[index].completed = !task.subtasks[index].completed;
    ctx.store.update(task.clone());

    let entry = &task.subtasks[index];
    let state = if entry.completed { "completed" } else { "reopened" };
    let mut human = HumanOutput::new(format!("Subtask '{}' {state}", entry.title));
    human.push_summary("task", task.title.clone());
    human.push_summary("progress", format!("{}%", task.subtask_progress()));
    emit_success(output_options(&ctx), "subtask toggle", &task, Some(&human))
}

pub fn run_rm(mut ctx: Context, id: &str, subtask: &str) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let index = resolve_subtask(&task, subtask)?;
    let removed = task.subtasks.remove(index);
    ctx.store.update(task.clone());

    #[derive(Serialize)]
    struct SubtaskRmReport {
        task: Task,
        removed: Subtask,
    }

    let mut human = HumanOutput::new(format!(
        "Removed subtask '{}' from '{}'",
        removed.title, task.title
    ));
    human.push_summary("progress", format!("{}%", task.subtask_progress()));
    let report = SubtaskRmReport { task, removed };
    emit_success(output_options(&ctx), "subtask rm", &report, Some(&human))
}

/// Resolve a subtask reference: 0-based position, exact id, or unambiguous
/// id prefix.
fn resolve_subtask(task: &Task, input: &str) -> Result<usize> {
    let input = input.trim();
    if let Ok(position) = input.parse::<usize>() {
        if position < task.subtasks.len() {
            return Ok(position);
        }
        return Err(Error::InvalidArgument(format!(
            "subtask position {} out of range (0..{})",
            position,
            task.subtasks.len()
        )));
    }

    if let Some(index) = task.subtasks.iter().position(|s| s.id == input) {
        return Ok(index);
    }

    let matches: Vec<usize> = task
        .subtasks
        .iter()
        .enumerate()
        .filter(|(_, s)| s.id.starts_with(input))
        .map(|(index, _)| index)
        .collect();
    match matches.as_slice() {
        [index] => Ok(*index),
        [] => Err(Error::InvalidArgument(format!(
            "no subtask matches '{input}'"
        ))),
        many => Err(Error::InvalidArgument(format!(
            "subtask '{input}' is ambiguous ({} matches)",
            many.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;

    fn task_with_subtasks() -> Task {
        let mut task = Task::create(NewTask {
            title: "parent".to_string(),
            ..NewTask::default()
        });
        task.subtasks.push(Subtask::new("uno"));
        task.subtasks.push(Subtask::new("dos"));
        task
    }

    #[test]
    fn resolves_by_position() {
        let task = task_with_subtasks();
        assert_eq!(resolve_subtask(&task, "0").unwrap(), 0);
        assert_eq!(resolve_subtask(&task, "1").unwrap(), 1);
        assert!(resolve_subtask(&task, "2").is_err());
    }

    #[test]
    fn resolves_by_id_and_prefix() {
        let task = task_with_subtasks();
        let id = task.subtasks[1].id.clone();
        assert_eq!(resolve_subtask(&task, &id).unwrap(), 1);
        assert_eq!(resolve_subtask(&task, &id[..8]).unwrap(), 1);
        assert!(resolve_subtask(&task, "zzzz").is_err());
    }
}
