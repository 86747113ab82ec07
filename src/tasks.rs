//! Task service operations
//!
//! High-level operations over a task store: create, list, update, remove,
//! and purge. All operations are whole-file read-modify-write; there is no
//! cross-process locking. The intended user is a single person (or a single
//! agent session per store), so last-writer-wins is acceptable.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::id::generate_id;
use crate::storage::TaskStore;
use crate::task::{now_timestamp, Stage, Task};

/// Retention count used by auto-purge when none is given.
pub const DEFAULT_AUTO_PURGE_KEEP: usize = 20;

/// Options for creating a task.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub stage: Option<Stage>,
    pub repo: Option<String>,
}

/// Filter for listing tasks. Filters combine; a task must match all of them.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Include terminal tasks, which are hidden by default.
    pub all: bool,
    pub stage: Option<Stage>,
    pub repo: Option<String>,
}

/// Partial update for a task. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateFields {
    pub stage: Option<Stage>,
    pub description: Option<String>,
    /// An empty string clears the repo tag.
    pub repo: Option<String>,
}

/// Options for purging completed tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeOptions {
    /// Compute the purge set without writing anything.
    pub dry_run: bool,
    /// Keep this many most-recently-updated done tasks. `None` purges all.
    pub keep: Option<usize>,
}

/// Outcome of a purge: the removed tasks and their count.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeResult {
    pub purged: Vec<Task>,
    pub count: usize,
}

/// Create a new task and append it to the store.
pub fn create_task(
    store: &dyn TaskStore,
    path: &Path,
    description: &str,
    options: CreateOptions,
) -> Result<Task> {
    let now = now_timestamp();
    let task = Task {
        id: generate_id(),
        description: description.to_string(),
        stage: options.stage.unwrap_or_default(),
        created_at: now.clone(),
        updated_at: now,
        repo: options.repo.filter(|r| !r.is_empty()),
    };
    store.append(path, &task)?;
    Ok(task)
}

/// List tasks matching the filter. Terminal tasks are excluded unless
/// `filter.all` is set.
pub fn list_tasks(store: &dyn TaskStore, path: &Path, filter: &ListFilter) -> Result<Vec<Task>> {
    let mut tasks = store.read(path)?;
    if !filter.all {
        tasks.retain(|t| !t.stage.is_terminal());
    }
    if let Some(repo) = filter.repo.as_deref() {
        tasks.retain(|t| t.repo.as_deref() == Some(repo));
    }
    if let Some(stage) = filter.stage {
        tasks.retain(|t| t.stage == stage);
    }
    Ok(tasks)
}

/// Apply a partial update to a task.
///
/// Returns `Ok(None)` when no task has the given id; the store is left
/// untouched in that case. On success `updatedAt` is refreshed even if no
/// field changed.
pub fn update_task(
    store: &dyn TaskStore,
    path: &Path,
    id: &str,
    fields: UpdateFields,
) -> Result<Option<Task>> {
    let mut tasks = store.read(path)?;
    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        return Ok(None);
    };

    if let Some(stage) = fields.stage {
        task.stage = stage;
    }
    if let Some(description) = fields.description {
        task.description = description;
    }
    if let Some(repo) = fields.repo {
        task.repo = if repo.is_empty() { None } else { Some(repo) };
    }
    task.updated_at = now_timestamp();
    let updated = task.clone();

    store.write(path, &tasks)?;
    Ok(Some(updated))
}

/// Remove a task permanently.
///
/// Returns false when no task has the given id; nothing is rewritten then.
pub fn remove_task(store: &dyn TaskStore, path: &Path, id: &str) -> Result<bool> {
    let tasks = store.read(path)?;
    let remaining: Vec<Task> = tasks.iter().filter(|t| t.id != id).cloned().collect();
    if remaining.len() == tasks.len() {
        return Ok(false);
    }
    store.write(path, &remaining)?;
    Ok(true)
}

/// Purge terminal tasks from the store.
///
/// With `keep = Some(k)`, the k done tasks with the most recent `updatedAt`
/// survive and the rest are purged. Without it (or with k = 0) every done
/// task is purged. Non-terminal tasks are never touched, and survivors keep
/// their original order in the file.
pub fn purge_tasks(store: &dyn TaskStore, path: &Path, options: PurgeOptions) -> Result<PurgeResult> {
    let tasks = store.read(path)?;
    let done: Vec<Task> = tasks
        .iter()
        .filter(|t| t.stage.is_terminal())
        .cloned()
        .collect();

    let purged: Vec<Task> = match options.keep {
        Some(keep) if keep > 0 => {
            let mut ranked = done;
            // Stable sort: ties keep their file order.
            ranked.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            if ranked.len() > keep {
                ranked.split_off(keep)
            } else {
                Vec::new()
            }
        }
        _ => done,
    };

    if !options.dry_run && !purged.is_empty() {
        let purged_ids: HashSet<&str> = purged.iter().map(|t| t.id.as_str()).collect();
        let remaining: Vec<Task> = tasks
            .iter()
            .filter(|t| !purged_ids.contains(t.id.as_str()))
            .cloned()
            .collect();
        store.write(path, &remaining)?;
    }

    Ok(PurgeResult {
        count: purged.len(),
        purged,
    })
}

/// Purge with a default retention count.
///
/// `keep` falls back to [`DEFAULT_AUTO_PURGE_KEEP`]. A keep of 0 disables
/// auto-purge entirely; the store is not even read.
pub fn auto_purge_tasks(
    store: &dyn TaskStore,
    path: &Path,
    keep: Option<usize>,
) -> Result<PurgeResult> {
    let keep = keep.unwrap_or(DEFAULT_AUTO_PURGE_KEEP);
    if keep == 0 {
        return Ok(PurgeResult {
            purged: Vec::new(),
            count: 0,
        });
    }
    purge_tasks(
        store,
        path,
        PurgeOptions {
            dry_run: false,
            keep: Some(keep),
        },
    )
}
