//! Data commands: stats, export, import.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::task::output_options;
use crate::cli::Context;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::stats;
use crate::storage::Storage;

pub fn run_stats(ctx: Context) -> Result<()> {
    let stats = stats::compute(ctx.store.tasks());

    let mut human = HumanOutput::new(format!("{} tasks on the board", stats.total));
    human.push_summary("todo", stats.todo.to_string());
    human.push_summary("in-progress", stats.in_progress.to_string());
    human.push_summary("done", stats.done.to_string());
    human.push_summary("overdue", stats.overdue.to_string());
    human.push_summary("completed this week", stats.completed_this_week.to_string());
    for title in &stats.recently_completed {
        human.push_detail(format!("recently completed: {title}"));
    }

    emit_success(output_options(&ctx), "stats", &stats, Some(&human))
}

pub fn run_export(ctx: Context, out: Option<PathBuf>) -> Result<()> {
    let blob = Storage::export(ctx.store.tasks())?;
    let path = out.unwrap_or_else(|| PathBuf::from(&blob.filename));
    std::fs::write(&path, &blob.bytes)?;

    #[derive(Serialize)]
    struct ExportReport {
        path: PathBuf,
        tasks: usize,
    }

    let report = ExportReport {
        path: path.clone(),
        tasks: ctx.store.tasks().len(),
    };
    let mut human = HumanOutput::new(format!("Exported {} tasks", report.tasks));
    human.push_summary("file", path.display().to_string());
    emit_success(output_options(&ctx), "export", &report, Some(&human))
}

pub fn run_import(mut ctx: Context, file: &Path) -> Result<()> {
    let bytes = std::fs::read(file).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::InvalidArgument(format!("file not found: {}", file.display()))
        } else {
            Error::Io(err)
        }
    })?;

    let tasks = Storage::import_list(&bytes)?;
    let imported = ctx.store.import(tasks);

    #[derive(Serialize)]
    struct ImportReport {
        imported: usize,
        total: usize,
    }

    let report = ImportReport {
        imported,
        total: ctx.store.tasks().len(),
    };
    let mut human = HumanOutput::new(format!("Imported {imported} tasks"));
    human.push_summary("board total", report.total.to_string());
    emit_success(output_options(&ctx), "import", &report, Some(&human))
}
