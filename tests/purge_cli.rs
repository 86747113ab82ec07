mod support;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

use support::TestRepo;

fn tracker_cmd(repo: &TestRepo) -> Command {
    let mut cmd = support::tracker_cmd();
    cmd.current_dir(repo.path());
    cmd
}

fn add_task(repo: &TestRepo, description: &str) -> String {
    let output = tracker_cmd(repo)
        .args(["add", description, "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let task: Value = serde_json::from_slice(&output).expect("add json");
    task["id"].as_str().expect("task id").to_string()
}

fn mark_done(repo: &TestRepo, id: &str) {
    tracker_cmd(repo).args(["done", id]).assert().success();
}

#[test]
fn purge_removes_done_tasks() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    add_task(&repo, "keep me");
    let done_id = add_task(&repo, "drop me");
    mark_done(&repo, &done_id);

    tracker_cmd(&repo)
        .arg("purge")
        .assert()
        .success()
        .stdout(contains("Purged 1 task(s)"))
        .stdout(contains("drop me"));

    let tasks = repo.read_tasks()?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["description"], "keep me");

    Ok(())
}

#[test]
fn purge_dry_run_leaves_file_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    add_task(&repo, "active");
    let done_id = add_task(&repo, "finished");
    mark_done(&repo, &done_id);

    tracker_cmd(&repo)
        .args(["purge", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Would purge 1 task(s)"));

    assert_eq!(repo.read_tasks()?.len(), 2);

    Ok(())
}

#[test]
fn purge_with_nothing_done() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    add_task(&repo, "active");

    tracker_cmd(&repo)
        .arg("purge")
        .assert()
        .success()
        .stdout(contains("No done tasks to purge"));

    Ok(())
}

#[test]
fn purge_keep_retains_most_recent() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    let first = add_task(&repo, "first done");
    let second = add_task(&repo, "second done");
    let third = add_task(&repo, "third done");
    mark_done(&repo, &first);
    mark_done(&repo, &second);
    mark_done(&repo, &third);

    tracker_cmd(&repo)
        .args(["purge", "--keep", "2"])
        .assert()
        .success()
        .stdout(contains("Purged 1 task(s)"))
        .stdout(contains("first done"));

    let tasks = repo.read_tasks()?;
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t["id"] != first));

    Ok(())
}

#[test]
fn purge_json_reports_count_and_ids() -> Result<(), Box<dyn std::error::Error>> {
    let repo = TestRepo::init()?;
    let done_id = add_task(&repo, "finished");
    mark_done(&repo, &done_id);

    let output = tracker_cmd(&repo)
        .args(["purge", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let result: Value = serde_json::from_slice(&output)?;
    assert_eq!(result["count"], 1);
    assert_eq!(result["ids"][0], done_id.as_str());

    Ok(())
}
