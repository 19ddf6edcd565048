mod support;

use predicates::str::contains;

use support::{json_output, TestBoard};

fn board_with_task() -> (TestBoard, String) {
    let board = TestBoard::new();
    let envelope = json_output(&board, &["add", "principal"]);
    let id = envelope["data"]["id"].as_str().unwrap().to_string();
    (board, id)
}

#[test]
fn subtask_add_builds_a_checklist() {
    let (board, id) = board_with_task();

    board
        .cmd()
        .args(["subtask", "add", &id, "primer paso"])
        .assert()
        .success()
        .stdout(contains("Added subtask 'primer paso'"));
    board
        .cmd()
        .args(["subtask", "add", &id, "segundo paso"])
        .assert()
        .success();

    let tasks = board.read_tasks();
    assert_eq!(tasks[0].subtasks.len(), 2);
    assert!(!tasks[0].subtasks[0].completed);
}

#[test]
fn subtask_toggle_flips_completion_by_position() {
    let (board, id) = board_with_task();
    board.cmd().args(["subtask", "add", &id, "uno"]).assert().success();
    board.cmd().args(["subtask", "add", &id, "dos"]).assert().success();

    board
        .cmd()
        .args(["subtask", "toggle", &id, "0"])
        .assert()
        .success()
        .stdout(contains("completed"))
        .stdout(contains("50%"));

    board
        .cmd()
        .args(["subtask", "toggle", &id, "0"])
        .assert()
        .success()
        .stdout(contains("reopened"));

    let tasks = board.read_tasks();
    assert!(!tasks[0].subtasks[0].completed);
}

#[test]
fn subtask_rm_resolves_by_id_prefix() {
    let (board, id) = board_with_task();
    board.cmd().args(["subtask", "add", &id, "uno"]).assert().success();
    board.cmd().args(["subtask", "add", &id, "dos"]).assert().success();

    let subtask_id = board.read_tasks()[0].subtasks[0].id.clone();
    board
        .cmd()
        .args(["subtask", "rm", &id, &subtask_id[..8]])
        .assert()
        .success()
        .stdout(contains("Removed subtask 'uno'"));

    let tasks = board.read_tasks();
    assert_eq!(tasks[0].subtasks.len(), 1);
    assert_eq!(tasks[0].subtasks[0].title, "dos");
}

#[test]
fn subtask_references_must_resolve() {
    let (board, id) = board_with_task();
    board.cmd().args(["subtask", "add", &id, "uno"]).assert().success();

    board
        .cmd()
        .args(["subtask", "toggle", &id, "3"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("out of range"));

    board
        .cmd()
        .args(["subtask", "rm", &id, "zzzz"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("no subtask matches"));

    board
        .cmd()
        .args(["subtask", "add", &id, "   "])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn subtask_add_rejects_unknown_tasks() {
    let (board, _id) = board_with_task();
    board
        .cmd()
        .args(["subtask", "add", "ffffffff", "huerfana"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("Task not found"));
}
