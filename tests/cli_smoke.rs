use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn help_works() {
    Command::cargo_bin("task-tracker")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("task lifecycle"));
}

#[test]
fn version_works() {
    Command::cargo_bin("task-tracker")
        .expect("binary")
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("task-tracker"));
}

#[test]
fn subcommand_help_works() {
    let subcommands = [
        "init", "add", "list", "update", "done", "remove", "purge", "check", "gui",
    ];

    for cmd in subcommands {
        Command::cargo_bin("task-tracker")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}
