//! Command-line interface for tareas
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::error::Result;
use crate::storage::Storage;
use crate::store::TaskStore;

mod data;
mod subtask;
mod task;

/// tareas - a personal task board in the terminal
///
/// Tasks live in three lanes (todo, in-progress, done) with priorities,
/// tags, due dates and subtasks, persisted as a single JSON file.
#[derive(Parser, Debug)]
#[command(name = "tareas")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the JSON data file (defaults to the platform data directory)
    #[arg(long, global = true, env = "TAREAS_DATA")]
    pub data: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(long, global = true, env = "TAREAS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Longer free-form description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Initial lane: todo, in-progress, done
        #[arg(long)]
        status: Option<String>,

        /// Priority: low, normal, high, urgent
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// List tasks with filters and sorting
    List {
        /// Case-insensitive text search over title and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Lane filter: all, todo, in-progress, done
        #[arg(long, default_value = "all")]
        status: String,

        /// Priority filter: all, low, normal, high, urgent
        #[arg(short, long, default_value = "all")]
        priority: String,

        /// Sort key: date, due-date, priority, title
        #[arg(long, default_value = "date")]
        sort: String,

        /// Show at most this many tasks
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show one task in full
    Show {
        /// Task id or unambiguous prefix
        id: String,
    },

    /// Edit fields of a task
    Edit {
        /// Task id or unambiguous prefix
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Move a task to another lane
    Status {
        /// Task id or unambiguous prefix
        id: String,

        /// Target lane: todo, in-progress, done
        status: String,
    },

    /// Delete a task
    Rm {
        /// Task id or unambiguous prefix
        id: String,
    },

    /// Reorder a task within a lane's displayed sequence
    Move {
        /// Lane to reorder: todo, in-progress, done
        lane: String,

        /// Current displayed position (0-based)
        from: usize,

        /// Target displayed position (0-based)
        to: usize,

        /// Search filter active while reordering
        #[arg(short, long, default_value = "")]
        search: String,

        /// Priority filter active while reordering
        #[arg(short, long, default_value = "all")]
        priority: String,

        /// Sort key active while reordering
        #[arg(long, default_value = "date")]
        sort: String,
    },

    /// Subtask management
    #[command(subcommand)]
    Subtask(SubtaskCommands),

    /// Tag management
    #[command(subcommand)]
    Tag(TagCommands),

    /// Board summary: lane totals, overdue, completed this week
    Stats,

    /// Export all tasks as pretty JSON
    Export {
        /// Output file (defaults to tareas_<date>.json in the current dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Import tasks from a JSON export, assigning fresh ids
    Import {
        /// File to import
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubtaskCommands {
    /// Add a subtask to a task's checklist
    Add {
        /// Task id or unambiguous prefix
        id: String,

        /// Subtask title
        title: String,
    },

    /// Toggle a subtask's completed state
    Toggle {
        /// Task id or unambiguous prefix
        id: String,

        /// Subtask id, unambiguous prefix, or 0-based position
        subtask: String,
    },

    /// Remove a subtask
    Rm {
        /// Task id or unambiguous prefix
        id: String,

        /// Subtask id, unambiguous prefix, or 0-based position
        subtask: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add a tag to a task
    Add {
        /// Task id or unambiguous prefix
        id: String,

        /// Tag to add
        tag: String,
    },

    /// Remove a tag from a task
    Rm {
        /// Task id or unambiguous prefix
        id: String,

        /// Tag to remove
        tag: String,
    },
}

/// Shared per-invocation context: resolved config and the opened store.
pub(crate) struct Context {
    pub config: Config,
    pub store: TaskStore,
    pub json: bool,
    pub quiet: bool,
}

impl Cli {
    fn context(&self) -> Result<Context> {
        let config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_default(),
        };
        let data_file = config::resolve_data_file(self.data.as_deref(), &config);
        let store = TaskStore::open(Storage::new(data_file));
        Ok(Context {
            config,
            store,
            json: self.json,
            quiet: self.quiet,
        })
    }

    pub fn run(self) -> Result<()> {
        let ctx = self.context()?;
        match self.command {
            Commands::Add {
                title,
                description,
                status,
                priority,
                due,
                tags,
            } => task::run_add(
                ctx,
                task::AddOptions {
                    title,
                    description,
                    status,
                    priority,
                    due,
                    tags,
                },
            ),
            Commands::List {
                search,
                status,
                priority,
                sort,
                limit,
            } => task::run_list(
                ctx,
                task::ListOptions {
                    search,
                    status,
                    priority,
                    sort,
                    limit,
                },
            ),
            Commands::Show { id } => task::run_show(ctx, &id),
            Commands::Edit {
                id,
                title,
                description,
                due,
                clear_due,
                priority,
            } => task::run_edit(
                ctx,
                task::EditOptions {
                    id,
                    title,
                    description,
                    due,
                    clear_due,
                    priority,
                },
            ),
            Commands::Status { id, status } => task::run_status(ctx, &id, &status),
            Commands::Rm { id } => task::run_rm(ctx, &id),
            Commands::Move {
                lane,
                from,
                to,
                search,
                priority,
                sort,
            } => task::run_move(
                ctx,
                task::MoveOptions {
                    lane,
                    from,
                    to,
                    search,
                    priority,
                    sort,
                },
            ),
            Commands::Subtask(cmd) => match cmd {
                SubtaskCommands::Add { id, title } => subtask::run_add(ctx, &id, &title),
                SubtaskCommands::Toggle { id, subtask } => subtask::run_toggle(ctx, &id, &subtask),
                SubtaskCommands::Rm { id, subtask } => subtask::run_rm(ctx, &id, &subtask),
            },
            Commands::Tag(cmd) => match cmd {
                TagCommands::Add { id, tag } => task::run_tag_add(ctx, &id, &tag),
                TagCommands::Rm { id, tag } => task::run_tag_rm(ctx, &id, &tag),
            },
            Commands::Stats => data::run_stats(ctx),
            Commands::Export { out } => data::run_export(ctx, out),
            Commands::Import { file } => data::run_import(ctx, &file),
        }
    }
}
