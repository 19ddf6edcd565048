//! Task commands: add, list, show, edit, status, rm, move, tag.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::{
    FilterUpdate, NewTask, PriorityFilter, SortBy, Status, StatusFilter, Task,
};

pub struct AddOptions {
    pub title: String,
    pub description: String,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub tags: Vec<String>,
}

pub struct ListOptions {
    pub search: String,
    pub status: String,
    pub priority: String,
    pub sort: String,
    pub limit: Option<usize>,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due: Option<String>,
    pub clear_due: bool,
    pub priority: Option<String>,
}

pub struct MoveOptions {
    pub lane: String,
    pub from: usize,
    pub to: usize,
    pub search: String,
    pub priority: String,
    pub sort: String,
}

pub fn run_add(mut ctx: Context, options: AddOptions) -> Result<()> {
    let title = options.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }

    let status = match options.status.as_deref() {
        Some(value) => value.parse()?,
        None => ctx.config.default_status()?,
    };
    let priority = match options.priority.as_deref() {
        Some(value) => value.parse()?,
        None => ctx.config.default_priority()?,
    };
    let due_date = options.due.as_deref().map(parse_due).transpose()?;

    let task = ctx.store.create(NewTask {
        title,
        description: options.description,
        status,
        priority,
        tags: options.tags,
        due_date,
    });

    let mut human = HumanOutput::new(format!("Created task '{}'", task.title));
    human.push_summary("id", short_id(&task.id));
    human.push_summary("status", task.status.to_string());
    human.push_summary("priority", task.priority.to_string());
    if let Some(due) = task.due_date {
        human.push_summary("due", due.to_string());
    }
    if !task.tags.is_empty() {
        human.push_summary("tags", task.tags.join(", "));
    }

    emit_success(output_options(&ctx), "add", &task, Some(&human))
}

pub fn run_list(mut ctx: Context, options: ListOptions) -> Result<()> {
    let status: StatusFilter = options.status.parse()?;
    let priority: PriorityFilter = options.priority.parse()?;
    let sort_by: SortBy = options.sort.parse()?;

    ctx.store.set_filter(FilterUpdate {
        search: Some(options.search),
        status: Some(status),
        priority: Some(priority),
        sort_by: Some(sort_by),
    });

    let mut tasks = ctx.store.visible();
    let total = tasks.len();
    if let Some(limit) = options.limit {
        tasks.truncate(limit);
    }

    #[derive(Serialize)]
    struct ListReport {
        total: usize,
        shown: usize,
        tasks: Vec<Task>,
    }

    let report = ListReport {
        total,
        shown: tasks.len(),
        tasks,
    };

    let header = match report.total {
        0 => "No tasks match".to_string(),
        1 => "1 task".to_string(),
        n if n == report.shown => format!("{n} tasks"),
        n => format!("{} of {} tasks", report.shown, n),
    };
    let mut human = HumanOutput::new(header);
    for task in &report.tasks {
        human.push_detail(format_line(task));
    }

    emit_success(output_options(&ctx), "list", &report, Some(&human))
}

pub fn run_show(ctx: Context, id: &str) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let mut human = HumanOutput::new(format!("{} [{}]", task.title, short_id(&task.id)));
    human.push_summary("status", task.status.to_string());
    human.push_summary("priority", task.priority.to_string());
    human.push_summary("created", task.created_at.format("%Y-%m-%d %H:%M").to_string());
    if let Some(due) = task.due_date {
        human.push_summary("due", due.to_string());
    }
    if let Some(completed) = task.completed_at {
        human.push_summary("completed", completed.format("%Y-%m-%d %H:%M").to_string());
    }
    if !task.tags.is_empty() {
        human.push_summary("tags", task.tags.join(", "));
    }
    if !task.description.is_empty() {
        human.push_detail(task.description.clone());
    }
    for subtask in &task.subtasks {
        let mark = if subtask.completed { "x" } else { " " };
        human.push_detail(format!(
            "[{mark}] {} ({})",
            subtask.title,
            short_id(&subtask.id)
        ));
    }
    if !task.subtasks.is_empty() {
        human.push_summary("progress", format!("{}%", task.subtask_progress()));
    }

    emit_success(output_options(&ctx), "show", &task, Some(&human))
}

pub fn run_edit(mut ctx: Context, options: EditOptions) -> Result<()> {
    let id = ctx.store.resolve_id(&options.id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    if let Some(title) = options.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidArgument("title cannot be empty".to_string()));
        }
        task.title = title;
    }
    if let Some(description) = options.description {
        task.description = description;
    }
    if options.clear_due {
        task.due_date = None;
    } else if let Some(due) = options.due.as_deref() {
        task.due_date = Some(parse_due(due)?);
    }
    if let Some(priority) = options.priority.as_deref() {
        task.priority = priority.parse()?;
    }

    ctx.store.update(task.clone());

    let mut human = HumanOutput::new(format!("Updated task '{}'", task.title));
    human.push_summary("id", short_id(&task.id));
    emit_success(output_options(&ctx), "edit", &task, Some(&human))
}

pub fn run_status(mut ctx: Context, id: &str, status: &str) -> Result<()> {
    let status: Status = status.parse()?;
    let id = ctx.store.resolve_id(id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    task.status = status;
    ctx.store.update(task.clone());
    // The store normalizes the completion stamp; report the stored record.
    let task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let mut human = HumanOutput::new(format!("Moved '{}' to {}", task.title, task.status));
    human.push_summary("id", short_id(&task.id));
    if let Some(completed) = task.completed_at {
        human.push_summary("completed", completed.format("%Y-%m-%d %H:%M").to_string());
    }
    emit_success(output_options(&ctx), "status", &task, Some(&human))
}

pub fn run_rm(mut ctx: Context, id: &str) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let title = ctx
        .store
        .get(&id)
        .map(|task| task.title.clone())
        .unwrap_or_default();
    ctx.store.delete(&id);

    #[derive(Serialize)]
    struct RmReport {
        id: String,
        title: String,
    }

    let report = RmReport {
        id: id.clone(),
        title: title.clone(),
    };
    let human = HumanOutput::new(format!("Deleted task '{title}'"));
    emit_success(output_options(&ctx), "rm", &report, Some(&human))
}

pub fn run_move(mut ctx: Context, options: MoveOptions) -> Result<()> {
    let lane: Status = options.lane.parse()?;
    let priority: PriorityFilter = options.priority.parse()?;
    let sort_by: SortBy = options.sort.parse()?;

    ctx.store.set_filter(FilterUpdate {
        search: Some(options.search),
        status: None,
        priority: Some(priority),
        sort_by: Some(sort_by),
    });
    ctx.store.move_in_lane(lane, options.from, options.to)?;

    #[derive(Serialize)]
    struct MoveReport {
        lane: Status,
        from: usize,
        to: usize,
    }

    let report = MoveReport {
        lane,
        from: options.from,
        to: options.to,
    };
    let human = HumanOutput::new(format!(
        "Moved {} task from position {} to {}",
        lane, options.from, options.to
    ));
    emit_success(output_options(&ctx), "move", &report, Some(&human))
}

pub fn run_tag_add(mut ctx: Context, id: &str, tag: &str) -> Result<()> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(Error::InvalidArgument("tag cannot be empty".to_string()));
    }

    let id = ctx.store.resolve_id(id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let mut human = HumanOutput::new(format!("Tagged '{}' with '{tag}'", task.title));
    if task.add_tag(tag) {
        ctx.store.update(task.clone());
    } else {
        human.push_warning(format!("tag '{tag}' was already present"));
    }
    human.push_summary("tags", task.tags.join(", "));
    emit_success(output_options(&ctx), "tag add", &task, Some(&human))
}

pub fn run_tag_rm(mut ctx: Context, id: &str, tag: &str) -> Result<()> {
    let id = ctx.store.resolve_id(id)?;
    let mut task = ctx
        .store
        .get(&id)
        .ok_or_else(|| Error::TaskNotFound(id.clone()))?
        .clone();

    let mut human = HumanOutput::new(format!("Removed tag '{tag}' from '{}'", task.title));
    if task.remove_tag(tag) {
        ctx.store.update(task.clone());
    } else {
        human.push_warning(format!("tag '{tag}' was not present"));
    }
    if !task.tags.is_empty() {
        human.push_summary("tags", task.tags.join(", "));
    }
    emit_success(output_options(&ctx), "tag rm", &task, Some(&human))
}

pub(crate) fn output_options(ctx: &Context) -> OutputOptions {
    OutputOptions {
        json: ctx.json,
        quiet: ctx.quiet,
    }
}

pub(crate) fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

pub(crate) fn parse_due(value: &str) -> Result<NaiveDate> {
    value.trim().parse().map_err(|_| {
        Error::InvalidArgument(format!("invalid due date '{value}': expected YYYY-MM-DD"))
    })
}

fn format_line(task: &Task) -> String {
    let mut line = format!(
        "{} [{}] ({}) {}",
        short_id(&task.id),
        task.status,
        task.priority,
        task.title
    );
    if let Some(due) = task.due_date {
        line.push_str(&format!(" due {due}"));
    }
    if !task.tags.is_empty() {
        line.push_str(&format!(" #{}", task.tags.join(" #")));
    }
    if !task.subtasks.is_empty() {
        line.push_str(&format!(" [{}%]", task.subtask_progress()));
    }
    line
}
