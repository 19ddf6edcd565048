use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tareas::task::Task;
use tempfile::TempDir;

/// A temporary board: isolated data file and config file, plus a command
/// builder wired to both.
pub struct TestBoard {
    dir: TempDir,
}

impl TestBoard {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        // An empty config keeps the test isolated from any user-level file.
        fs::write(dir.path().join("tareas.toml"), "").expect("write config");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn write_config(&self, contents: &str) {
        fs::write(self.dir.path().join("tareas.toml"), contents).expect("write config");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tareas").expect("binary");
        cmd.current_dir(self.dir.path());
        cmd.env("TAREAS_DATA", self.data_file());
        cmd.env("TAREAS_CONFIG", self.dir.path().join("tareas.toml"));
        cmd
    }

    /// Read the canonical collection straight from the data file.
    pub fn read_tasks(&self) -> Vec<Task> {
        let contents = fs::read_to_string(self.data_file()).expect("read data file");
        serde_json::from_str(&contents).expect("parse data file")
    }
}

/// Run a command with `--json` and parse the success envelope.
pub fn json_output(board: &TestBoard, args: &[&str]) -> serde_json::Value {
    let output = board
        .cmd()
        .arg("--json")
        .args(args)
        .output()
        .expect("run command");
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("parse json output")
}
