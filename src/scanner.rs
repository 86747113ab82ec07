//! Workspace scanning
//!
//! Finds task files across a workspace directory: the directory's own
//! `.tasks.jsonl` plus one in each immediate child directory. Hidden
//! children are skipped and there is no deeper recursion, so a workspace
//! of sibling clones scans in one readdir.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::storage::task_file;

/// A discovered task file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskFileInfo {
    /// Path of the `.tasks.jsonl` file.
    pub path: PathBuf,
    /// Directory that owns the file.
    pub dir: PathBuf,
    /// Display name, the directory's base name.
    pub name: String,
}

/// Task files found in a workspace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    /// Task file in the workspace directory itself, if any.
    pub root: Option<TaskFileInfo>,
    /// Task files in immediate child directories.
    pub repos: Vec<TaskFileInfo>,
}

fn info_for(dir: &Path) -> Option<TaskFileInfo> {
    let path = task_file(dir);
    if !path.is_file() {
        return None;
    }
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    Some(TaskFileInfo {
        path,
        dir: dir.to_path_buf(),
        name,
    })
}

/// Scan a workspace directory for task files.
///
/// Entries that cannot be read are skipped silently; a permission problem
/// in one child should not hide the others.
pub fn scan_task_files(dir: &Path) -> ScanResult {
    let root = info_for(dir);

    let mut repos = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }
            let child = entry.path();
            if !child.is_dir() {
                continue;
            }
            if let Some(info) = info_for(&child) {
                repos.push(info);
            }
        }
    }

    ScanResult { root, repos }
}
