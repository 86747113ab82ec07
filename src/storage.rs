//! Storage layer for task-tracker
//!
//! Tasks live in a single JSONL file, one task per line, `.tasks.jsonl` at
//! a repository root by default. The format is append-friendly: creating a
//! task adds one line without rewriting the file, while updates and removals
//! rewrite the whole file atomically (temp file + rename).
//!
//! Lines that fail to parse are skipped with a warning rather than failing
//! the whole read, so a half-written line never takes the store down.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::task::Task;

/// File name used for task storage inside a repository.
pub const TASK_FILE_NAME: &str = ".tasks.jsonl";

/// Path of the task file for a given directory.
pub fn task_file(dir: &Path) -> PathBuf {
    dir.join(TASK_FILE_NAME)
}

/// Persistence operations over a task file.
///
/// The CLI and GUI only touch storage through this trait, so tests can swap
/// in alternatives without touching the filesystem layout.
pub trait TaskStore {
    /// Read all tasks. A missing file is an empty store.
    fn read(&self, path: &Path) -> Result<Vec<Task>>;

    /// Replace the full contents of the store.
    fn write(&self, path: &Path, tasks: &[Task]) -> Result<()>;

    /// Append a single task without rewriting existing lines.
    fn append(&self, path: &Path, task: &Task) -> Result<()>;
}

/// JSONL-backed store on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl TaskStore for FileStore {
    fn read(&self, path: &Path) -> Result<Vec<Task>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut tasks = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Task>(&line) {
                Ok(task) => tasks.push(task),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        line = index + 1,
                        %err,
                        "skipping malformed line in tasks file"
                    );
                }
            }
        }

        Ok(tasks)
    }

    fn write(&self, path: &Path, tasks: &[Task]) -> Result<()> {
        let mut content = String::new();
        for task in tasks {
            content.push_str(&serde_json::to_string(task)?);
            content.push('\n');
        }
        write_atomic(path, &content)
    }

    fn append(&self, path: &Path, task: &Task) -> Result<()> {
        ensure_parent_dir(path)?;

        let json = serde_json::to_string(task)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", json)?;
        file.sync_all()?;
        Ok(())
    }
}

/// Create the parent directory of a store path if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Write content to a file atomically using a temp file and rename.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(path)?;

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}
