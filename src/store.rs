//! In-memory task store over `Storage`.
//!
//! The store owns the canonical collection (the persisted order), the
//! transient filter criteria, and the single mutation surface. Every
//! mutation rewrites the full collection through one save; persistence
//! failures are logged and swallowed so the in-memory state keeps working.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::reorder;
use crate::storage::Storage;
use crate::task::{FilterCriteria, FilterUpdate, NewTask, Status, StatusFilter, Task};
use crate::view;

/// Owns the canonical collection and the active filter criteria.
#[derive(Debug)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
    criteria: FilterCriteria,
}

impl TaskStore {
    /// Open the store, loading whatever the storage holds (fail-soft: a
    /// missing or unreadable file starts an empty board).
    pub fn open(storage: Storage) -> Self {
        let tasks = storage.load();
        Self {
            storage,
            tasks,
            criteria: FilterCriteria::default(),
        }
    }

    /// Canonical collection in persisted order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Displayed sequence: the projection of the canonical collection under
    /// the active criteria.
    pub fn visible(&self) -> Vec<Task> {
        view::project(&self.tasks, &self.criteria)
    }

    /// Create a task from the given fields, append it to the canonical
    /// collection and persist.
    pub fn create(&mut self, fields: NewTask) -> Task {
        let task = Task::create(fields);
        self.tasks.push(task.clone());
        self.persist();
        task
    }

    /// Look up a task by exact id.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Resolve a full id or an unambiguous id prefix to the full id.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        if let Some(task) = self.get(input) {
            return Ok(task.id.clone());
        }

        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.id.starts_with(input))
            .collect();
        match matches.as_slice() {
            [task] => Ok(task.id.clone()),
            [] => Err(Error::TaskNotFound(input.to_string())),
            many => Err(Error::InvalidArgument(format!(
                "id '{}' is ambiguous ({} matches)",
                input,
                many.len()
            ))),
        }
    }

    /// Replace the record with the same id, normalizing the completion
    /// stamp. Returns false (and persists nothing) when the id is unknown.
    pub fn update(&mut self, mut task: Task) -> bool {
        task.normalize_completion();
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(slot) => {
                *slot = task;
                self.persist();
                true
            }
            None => {
                debug!(id = %task.id, "update for unknown task id ignored");
                false
            }
        }
    }

    /// Remove a task by exact id. Unknown ids are a no-op, but the
    /// collection is persisted either way.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() < before;
        if !removed {
            debug!(id, "delete for unknown task id ignored");
        }
        self.persist();
        removed
    }

    /// Merge a partial criteria update into the active criteria. Purely
    /// in-memory, never persisted.
    pub fn set_filter(&mut self, update: FilterUpdate) {
        self.criteria.apply(update);
    }

    /// Replace the canonical order wholesale and persist.
    pub fn reorder(&mut self, order: Vec<Task>) {
        self.tasks = order;
        self.persist();
    }

    /// Move the task at displayed position `from` to position `to` within
    /// one lane, under the active criteria restricted to that lane.
    pub fn move_in_lane(&mut self, lane: Status, from: usize, to: usize) -> Result<()> {
        let lane_criteria = FilterCriteria {
            status: StatusFilter::Only(lane),
            ..self.criteria.clone()
        };
        let displayed = view::project(&self.tasks, &lane_criteria);
        let order = reorder::plan_move(&self.tasks, &displayed, from, to)?;
        self.reorder(order);
        Ok(())
    }

    /// Append already-built task records (fresh ids, normalized) in one
    /// batch with a single save. Returns how many were added.
    pub fn import(&mut self, tasks: Vec<Task>) -> usize {
        let count = tasks.len();
        self.tasks.extend(tasks);
        self.persist();
        count
    }

    // Best-effort save: a failure is logged, the in-memory state stays
    // authoritative for the rest of the process.
    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.tasks) {
            warn!(path = %self.storage.data_file().display(), error = %err, "failed to save tasks");
        }
    }
}
