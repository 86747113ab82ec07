//! Git repository discovery and status queries.
//!
//! Wraps the libgit2 operations task-tracker needs: finding the enclosing
//! repository for default storage, and answering "is there unfinished or
//! unpushed work here?" for the check command.

use std::path::{Path, PathBuf};

use git2::{Branch, ErrorCode, Repository, Sort, Status};
use serde::Serialize;

use crate::error::{Error, Result};

/// Discover a git repository from a starting path.
pub fn discover_repo(start: Option<&Path>) -> Result<Repository> {
    let start_path = match start {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    Repository::discover(&start_path).map_err(|err| {
        if err.code() == ErrorCode::NotFound {
            Error::RepoNotFound
        } else {
            Error::Git(err)
        }
    })
}

/// Root of the working tree enclosing `start` (or the current directory).
pub fn repo_root(start: Option<&Path>) -> Result<PathBuf> {
    let repo = discover_repo(start)?;
    repo.workdir()
        .map(|path| path.to_path_buf())
        .ok_or_else(|| Error::OperationFailed("repository has no working directory".to_string()))
}

/// Status summary for one repository, as reported by the check command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStatus {
    pub path: PathBuf,
    /// Directory base name, for display.
    pub name: String,
    pub dirty: bool,
    /// Porcelain-style `XY path` lines for every changed file.
    pub dirty_files: Vec<String>,
    pub unpushed: bool,
    /// `shortid summary` lines for commits ahead of upstream.
    pub unpushed_commits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepoStatus {
    fn clean(dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        RepoStatus {
            path: dir.to_path_buf(),
            name,
            dirty: false,
            dirty_files: Vec::new(),
            unpushed: false,
            unpushed_commits: Vec::new(),
            error: None,
        }
    }
}

/// Inspect one repository directory.
///
/// Never fails: problems running the status query are recorded in the
/// `error` field so one broken checkout cannot abort a workspace scan.
pub fn repo_status(dir: &Path) -> RepoStatus {
    let mut status = RepoStatus::clean(dir);

    let repo = match Repository::open(dir) {
        Ok(repo) => repo,
        Err(err) => {
            tracing::debug!(path = %dir.display(), %err, "failed to open repository");
            status.error = Some("git status failed".to_string());
            return status;
        }
    };

    match dirty_files(&repo) {
        Ok(files) => {
            status.dirty = !files.is_empty();
            status.dirty_files = files;
        }
        Err(err) => {
            tracing::debug!(path = %dir.display(), %err, "failed to query status");
            status.error = Some("git status failed".to_string());
            return status;
        }
    }

    // No upstream configured means nothing to compare against; the repo is
    // simply not "unpushed".
    if let Some(commits) = unpushed_commits(&repo) {
        status.unpushed = !commits.is_empty();
        status.unpushed_commits = commits;
    }

    status
}

/// Scan a workspace directory for git repositories and report their status.
///
/// Covers the directory itself plus immediate non-hidden children, the same
/// one-level shape the task file scanner uses.
pub fn scan_workspace(dir: &Path) -> Vec<RepoStatus> {
    let mut statuses = Vec::new();

    if is_git_repo(dir) {
        statuses.push(repo_status(dir));
    }

    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            let child = entry.path();
            if child.is_dir() && is_git_repo(&child) {
                statuses.push(repo_status(&child));
            }
        }
    }

    statuses
}

fn is_git_repo(dir: &Path) -> bool {
    // A .git file (not dir) covers worktrees and submodules.
    dir.join(".git").exists()
}

fn dirty_files(repo: &Repository) -> Result<Vec<String>> {
    let statuses = repo.statuses(None)?;
    let mut files = Vec::new();

    for entry in statuses.iter() {
        let status = entry.status();
        if status.is_ignored() || status.is_empty() {
            continue;
        }
        let path = entry.path().unwrap_or("");
        files.push(format!("{} {}", status_code(status), path));
    }

    Ok(files)
}

fn status_code(status: Status) -> String {
    if status.is_conflicted() {
        return "UU".to_string();
    }
    if status.is_wt_new() && !status.is_index_new() {
        return "??".to_string();
    }

    let index = if status.is_index_new() {
        'A'
    } else if status.is_index_modified() {
        'M'
    } else if status.is_index_deleted() {
        'D'
    } else if status.is_index_renamed() {
        'R'
    } else if status.is_index_typechange() {
        'T'
    } else {
        ' '
    };

    let worktree = if status.is_wt_modified() {
        'M'
    } else if status.is_wt_deleted() {
        'D'
    } else if status.is_wt_renamed() {
        'R'
    } else if status.is_wt_typechange() {
        'T'
    } else {
        ' '
    };

    format!("{}{}", index, worktree)
}

/// Commits on HEAD's branch that its upstream does not have.
///
/// Returns None when HEAD is detached, has no upstream, or the walk cannot
/// be set up. Those cases all read as "nothing to push".
fn unpushed_commits(repo: &Repository) -> Option<Vec<String>> {
    let head = repo.head().ok()?;
    if !head.is_branch() {
        return None;
    }
    let branch = Branch::wrap(head);
    let upstream = branch.upstream().ok()?;
    let upstream_ref = upstream.get().name()?.to_string();

    let mut revwalk = repo.revwalk().ok()?;
    revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME).ok()?;
    revwalk
        .push_range(&format!("{}..HEAD", upstream_ref))
        .ok()?;

    let mut lines = Vec::new();
    for oid in revwalk {
        let oid = oid.ok()?;
        let commit = repo.find_commit(oid).ok()?;
        let short = commit.as_object().short_id().ok()?;
        lines.push(format!(
            "{} {}",
            short.as_str().unwrap_or_default(),
            commit.summary().unwrap_or_default()
        ));
    }
    Some(lines)
}
