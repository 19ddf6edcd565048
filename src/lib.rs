//! tareas - Personal Task Board Library
//!
//! This library provides the core functionality for the tareas CLI tool,
//! a kanban-style task board persisted as a single JSON file.
//!
//! # Core Concepts
//!
//! - **Tasks**: Work items with lane, priority, tags, due date and subtasks
//! - **Projection**: A pure filter/sort view computed from the canonical
//!   collection, never persisted
//! - **Reorder**: Drag-style moves inside a displayed lane, translated into
//!   a new canonical order by id
//! - **Persistence**: Fail-soft loads and atomic best-effort saves, plus
//!   export/import of the whole board
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `tareas.toml`
//! - `error`: Error types and result aliases
//! - `task`: Task data model and filter criteria
//! - `view`: Filter/sort projection engine
//! - `reorder`: Reorder planning within a displayed lane
//! - `store`: In-memory store over storage, the single mutation surface
//! - `storage`: JSON file persistence, export and import
//! - `stats`: Read-only board statistics

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod reorder;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;

pub use error::{Error, Result};
