use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn tareas_help_works() {
    Command::cargo_bin("tareas")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("personal task board"));
}

#[test]
fn subcommand_help_lists_flags() {
    Command::cargo_bin("tareas")
        .expect("binary")
        .args(["list", "--help"])
        .assert()
        .success()
        .stdout(contains("--search"))
        .stdout(contains("--sort"));

    Command::cargo_bin("tareas")
        .expect("binary")
        .args(["subtask", "--help"])
        .assert()
        .success()
        .stdout(contains("toggle"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("tareas")
        .expect("binary")
        .arg("frobnicate")
        .assert()
        .failure();
}
