//! Storage layer for tareas
//!
//! The whole board lives in a single JSON document: an array of task records,
//! pretty-printed so the file stays hand-readable and diffs stay small. Every
//! save rewrites the full document atomically.
//!
//! Loading is fail-soft by design: a missing or unreadable file yields an
//! empty collection (with a warning) rather than an error, so a corrupted
//! data file never locks the user out of the tool.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::task::{de_opt_date, Priority, Status, Subtask, Task};

/// Storage manager for the task collection
#[derive(Debug, Clone)]
pub struct Storage {
    /// Path to the JSON data file
    data_file: PathBuf,
}

/// An export payload: serialized bytes plus the suggested filename
#[derive(Debug)]
pub struct ExportBlob {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl Storage {
    pub fn new(data_file: PathBuf) -> Self {
        Self { data_file }
    }

    /// Path to the data file backing this storage
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Load the task collection from disk.
    ///
    /// A missing file is a fresh board; a malformed file is logged and
    /// treated as empty rather than aborting the command.
    pub fn load(&self) -> Vec<Task> {
        let content = match fs::read_to_string(&self.data_file) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.data_file.display(), error = %err, "failed to read data file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(path = %self.data_file.display(), error = %err, "malformed data file, starting empty");
                Vec::new()
            }
        }
    }

    /// Save the full task collection, replacing whatever was on disk.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        self.write_atomic(&self.data_file, json.as_bytes())
    }

    /// Write data atomically using temp file + rename
    ///
    /// Ensures readers never see partial writes: the file is either fully
    /// written or untouched.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Create temp file in same directory (for atomic rename)
        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Build an export payload for the given tasks: pretty JSON plus a
    /// date-stamped filename (`tareas_YYYY-MM-DD.json`).
    pub fn export(tasks: &[Task]) -> Result<ExportBlob> {
        let bytes = serde_json::to_vec_pretty(tasks)?;
        let filename = format!("tareas_{}.json", Utc::now().date_naive());
        Ok(ExportBlob { bytes, filename })
    }

    /// Parse an import file into fresh task records.
    ///
    /// The top level must be a JSON array. Incoming ids are discarded and
    /// regenerated so an import can never collide with existing tasks; any
    /// malformed element rejects the whole file.
    pub fn import_list(bytes: &[u8]) -> Result<Vec<Task>> {
        let value: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|err| Error::ImportInvalid(format!("not valid JSON: {}", err)))?;

        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(Error::ImportInvalid(format!(
                    "expected a top-level array, found {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut tasks = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            let imported: ImportedTask = serde_json::from_value(item)
                .map_err(|err| Error::ImportInvalid(format!("entry {}: {}", index, err)))?;
            tasks.push(imported.into_task());
        }
        Ok(tasks)
    }
}

/// Incoming task record for import. The id field is intentionally absent:
/// whatever the file carries is discarded and a fresh one is assigned.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportedTask {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "de_opt_date")]
    due_date: Option<chrono::NaiveDate>,
    #[serde(default = "Utc::now")]
    created_at: chrono::DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<chrono::DateTime<Utc>>,
    #[serde(default)]
    subtasks: Vec<Subtask>,
}

impl ImportedTask {
    fn into_task(self) -> Task {
        let mut task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            tags: crate::task::dedup_tags(self.tags),
            due_date: self.due_date,
            created_at: self.created_at,
            completed_at: self.completed_at,
            subtasks: self.subtasks,
        };
        task.normalize_completion();
        task
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;
    use tempfile::TempDir;

    fn storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("tasks.json"));
        (dir, storage)
    }

    fn task(title: &str) -> Task {
        Task::create(NewTask {
            title: title.to_string(),
            ..NewTask::default()
        })
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let (_dir, storage) = storage();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, storage) = storage();
        let tasks = vec![task("primera"), task("segunda")];
        storage.save(&tasks).unwrap();
        assert_eq!(storage.load(), tasks);
    }

    #[test]
    fn malformed_file_loads_as_empty() {
        let (_dir, storage) = storage();
        fs::write(storage.data_file(), "{not json").unwrap();
        assert!(storage.load().is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("nested").join("tasks.json"));
        storage.save(&[task("a")]).unwrap();
        assert_eq!(storage.load().len(), 1);
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let (_dir, storage) = storage();
        storage.save(&[task("a")]).unwrap();
        assert!(!storage.data_file().with_extension("tmp").exists());
    }

    #[test]
    fn export_names_the_file_with_todays_date() {
        let blob = Storage::export(&[task("a")]).unwrap();
        let expected = format!("tareas_{}.json", Utc::now().date_naive());
        assert_eq!(blob.filename, expected);

        // Export payload is itself importable.
        let imported = Storage::import_list(&blob.bytes).unwrap();
        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].title, "a");
    }

    #[test]
    fn import_regenerates_ids() {
        let original = task("con id");
        let bytes = serde_json::to_vec(&[original.clone()]).unwrap();
        let imported = Storage::import_list(&bytes).unwrap();
        assert_eq!(imported.len(), 1);
        assert_ne!(imported[0].id, original.id);
        assert_eq!(imported[0].title, original.title);
    }

    #[test]
    fn import_fills_defaults_for_sparse_records() {
        let bytes = br#"[{"title": "solo titulo"}]"#;
        let imported = Storage::import_list(bytes).unwrap();
        assert_eq!(imported[0].status, Status::Todo);
        assert_eq!(imported[0].priority, Priority::Normal);
        assert!(imported[0].tags.is_empty());
        assert!(imported[0].due_date.is_none());
    }

    #[test]
    fn import_rejects_non_array_payloads() {
        assert!(matches!(
            Storage::import_list(br#"{"title": "obj"}"#),
            Err(Error::ImportInvalid(_))
        ));
        assert!(matches!(
            Storage::import_list(b"not json at all"),
            Err(Error::ImportInvalid(_))
        ));
    }

    #[test]
    fn import_rejects_the_whole_file_on_one_bad_entry() {
        let bytes = br#"[{"title": "ok"}, {"status": "todo"}]"#;
        assert!(matches!(
            Storage::import_list(bytes),
            Err(Error::ImportInvalid(_))
        ));
    }

    #[test]
    fn import_normalizes_completion_stamps() {
        let bytes = br#"[{"title": "done sin stamp", "status": "done"},
                         {"title": "todo con stamp", "completedAt": "2024-03-01T10:00:00Z"}]"#;
        let imported = Storage::import_list(bytes).unwrap();
        assert!(imported[0].completed_at.is_some());
        assert!(imported[1].completed_at.is_none());
    }

    #[test]
    fn import_treats_empty_due_date_as_none() {
        let bytes = br#"[{"title": "a", "dueDate": ""}]"#;
        let imported = Storage::import_list(bytes).unwrap();
        assert!(imported[0].due_date.is_none());
    }
}
