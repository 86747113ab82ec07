//! Terminal output formatting.
//!
//! One-line task rendering plus the multi-section check report. Colors come
//! from `colored`, which honors NO_COLOR and disables itself when stdout is
//! not a terminal, so piped output stays plain.

use colored::Colorize;

use crate::git::RepoStatus;
use crate::task::{Stage, Task};

/// Detail lines shown per repo before truncating with an ellipsis.
const MAX_DETAIL_LINES: usize = 5;

fn colorize_stage(stage: Stage) -> String {
    let name = stage.as_str();
    let painted = match stage {
        Stage::Pending => name.bright_black(),
        Stage::InProgress => name.blue(),
        Stage::Implemented => name.cyan(),
        Stage::Verified => name.yellow(),
        Stage::Committed => name.magenta(),
        Stage::Pushed => name.green(),
        Stage::PrCreated => name.bright_green(),
        Stage::Merged => name.green(),
        Stage::Released => name.bright_blue(),
        Stage::Published => name.bright_green(),
        Stage::Done => name.dimmed(),
    };
    painted.to_string()
}

/// Render one task as a single line: id, stage, optional repo tag,
/// description.
pub fn format_task(task: &Task) -> String {
    let repo = task
        .repo
        .as_deref()
        .map(|r| format!(" [{}]", r).dimmed().to_string())
        .unwrap_or_default();
    format!(
        "{}  {}{}  {}",
        task.id.bold(),
        colorize_stage(task.stage),
        repo,
        task.description
    )
}

/// Render a list of tasks, one per line.
pub fn format_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".dimmed().to_string();
    }
    tasks
        .iter()
        .map(format_task)
        .collect::<Vec<_>>()
        .join("\n")
}

fn needs_attention(repo: &RepoStatus) -> bool {
    repo.dirty || repo.unpushed || repo.error.is_some()
}

fn push_detail_lines(out: &mut String, lines: &[String]) {
    for line in lines.iter().take(MAX_DETAIL_LINES) {
        out.push_str(&format!("      {}\n", line.dimmed()));
    }
    if lines.len() > MAX_DETAIL_LINES {
        let more = format!("      ... and {} more", lines.len() - MAX_DETAIL_LINES);
        out.push_str(&format!("{}\n", more.dimmed()));
    }
}

/// Render the full check report: active tasks plus workspace git status.
pub fn format_check_report(active: &[Task], repos: &[RepoStatus]) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n\n", "=== Task Tracker Check ===".bold()));

    out.push_str(&format!(
        "{}\n",
        format!("Active Tasks ({}):", active.len()).bold()
    ));
    if active.is_empty() {
        out.push_str(&format!("{}\n", "  No active tasks.".dimmed()));
    } else {
        for task in active {
            out.push_str(&format!("  {}\n", format_task(task)));
        }
    }
    out.push('\n');

    out.push_str(&format!(
        "{}\n",
        format!("Workspace Git Status ({} repos scanned):", repos.len()).bold()
    ));
    let flagged: Vec<&RepoStatus> = repos.iter().filter(|r| needs_attention(r)).collect();
    if flagged.is_empty() {
        out.push_str(&format!("{}\n", "  All repos clean.".green()));
        return out;
    }

    for repo in flagged {
        out.push_str(&format!(
            "{}\n",
            format!("  {} ({}):", repo.name, repo.path.display()).yellow()
        ));
        if let Some(err) = &repo.error {
            out.push_str(&format!("{}\n", format!("    Error: {}", err).red()));
        }
        if repo.dirty {
            out.push_str(&format!(
                "{}\n",
                format!("    Uncommitted changes ({} files)", repo.dirty_files.len()).red()
            ));
            push_detail_lines(&mut out, &repo.dirty_files);
        }
        if repo.unpushed {
            out.push_str(&format!(
                "{}\n",
                format!("    Unpushed commits ({}):", repo.unpushed_commits.len()).blue()
            ));
            push_detail_lines(&mut out, &repo.unpushed_commits);
        }
    }

    out
}
