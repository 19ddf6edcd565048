mod support;

use predicates::str::contains;

use support::{json_output, TestBoard};

fn add(board: &TestBoard, title: &str) -> String {
    let envelope = json_output(board, &["add", title]);
    envelope["data"]["id"].as_str().unwrap().to_string()
}

fn canonical_ids(board: &TestBoard) -> Vec<String> {
    board.read_tasks().into_iter().map(|t| t.id).collect()
}

#[test]
fn move_reorders_the_canonical_collection() {
    let board = TestBoard::new();
    let a = add(&board, "a");
    let b = add(&board, "b");
    let c = add(&board, "c");

    // Default view shows newest first (c, b, a); drop c to the bottom.
    board
        .cmd()
        .args(["move", "todo", "0", "2"])
        .assert()
        .success()
        .stdout(contains("Moved todo task from position 0 to 2"));

    assert_eq!(canonical_ids(&board), vec![a, c, b]);
}

#[test]
fn move_under_a_filter_leaves_hidden_tasks_in_place() {
    let board = TestBoard::new();
    let pan = add(&board, "comprar pan");
    let coche = add(&board, "lavar coche");
    let leche = add(&board, "comprar leche");

    // Only the two "comprar" tasks are displayed (newest first: leche, pan).
    // Moving leche after pan must not disturb coche's canonical slot.
    board
        .cmd()
        .args(["move", "todo", "0", "1", "--search", "comprar"])
        .assert()
        .success();

    assert_eq!(canonical_ids(&board), vec![pan, leche, coche]);
}

#[test]
fn move_only_touches_the_named_lane() {
    let board = TestBoard::new();
    let a = add(&board, "a");
    let hecha = add(&board, "hecha");
    let b = add(&board, "b");
    board.cmd().args(["status", &hecha, "done"]).assert().success();

    // Todo lane displays b, a; move b below a.
    board
        .cmd()
        .args(["move", "todo", "0", "1"])
        .assert()
        .success();

    assert_eq!(canonical_ids(&board), vec![a, b, hecha]);
}

#[test]
fn move_rejects_out_of_range_positions() {
    let board = TestBoard::new();
    add(&board, "solitaria");

    board
        .cmd()
        .args(["move", "todo", "0", "5"])
        .assert()
        .failure()
        .code(2)
        .stderr(contains("out of range"));

    // Empty lane: any index is out of range.
    board
        .cmd()
        .args(["move", "done", "0", "0"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn move_to_same_position_changes_nothing() {
    let board = TestBoard::new();
    add(&board, "a");
    add(&board, "b");
    let before = canonical_ids(&board);

    board
        .cmd()
        .args(["move", "todo", "1", "1"])
        .assert()
        .success();

    assert_eq!(canonical_ids(&board), before);
}
