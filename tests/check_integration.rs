mod support;

use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

use support::TestRepo;

fn tracker_cmd(repo: &TestRepo) -> Command {
    let mut cmd = support::tracker_cmd();
    cmd.current_dir(repo.path());
    cmd
}

#[test]
fn check_reports_clean_repo() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    tracker_cmd(&repo)
        .args(["add", "review the parser"])
        .assert()
        .success();
    repo.commit_all("track tasks")?;

    tracker_cmd(&repo)
        .arg("check")
        .assert()
        .success()
        .stdout(contains("=== Task Tracker Check ==="))
        .stdout(contains("Active Tasks (1):"))
        .stdout(contains("review the parser"))
        .stdout(contains("All repos clean."));

    Ok(())
}

#[test]
fn check_reports_no_active_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "base\n", "initial commit")?;

    tracker_cmd(&repo)
        .arg("check")
        .assert()
        .success()
        .stdout(contains("No active tasks."));

    Ok(())
}

#[test]
fn check_flags_uncommitted_changes() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    repo.commit_file("README.md", "base\n", "initial commit")?;
    repo.write_file("notes.txt", "dirty\n")?;

    tracker_cmd(&repo)
        .arg("check")
        .assert()
        .success()
        .stdout(contains("Uncommitted changes (1 files)"))
        .stdout(contains("?? notes.txt"))
        .stdout(contains("All repos clean.").not());

    Ok(())
}

#[test]
fn check_scans_workspace_children() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    git2::Repository::init(dir.path().join("alpha"))?;
    git2::Repository::init(dir.path().join("beta"))?;
    std::fs::write(dir.path().join("beta").join("notes.txt"), "dirty\n")?;

    let store = dir.path().join("tasks.jsonl");
    support::tracker_cmd()
        .current_dir(dir.path())
        .args(["--storage", store.to_str().expect("utf8 path")])
        .arg("check")
        .assert()
        .success()
        .stdout(contains("Workspace Git Status (2 repos scanned):"))
        .stdout(contains("beta ("))
        .stdout(contains("alpha (").not());

    Ok(())
}

#[test]
fn check_json_reports_structure() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    tracker_cmd(&repo)
        .args(["add", "active work"])
        .assert()
        .success();
    repo.commit_all("track tasks")?;

    let output = tracker_cmd(&repo)
        .args(["check", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&output)?;

    let active = report["activeTasks"].as_array().expect("activeTasks");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["description"], "active work");

    let repos = report["repoStatus"].as_array().expect("repoStatus");
    assert_eq!(repos.len(), 1);
    assert_eq!(repos[0]["dirty"], false);
    assert_eq!(repos[0]["unpushed"], false);

    Ok(())
}
