//! task-tracker list command implementation

use std::path::PathBuf;

use crate::cli::resolve_store_path;
use crate::error::Result;
use crate::format::format_task_table;
use crate::storage::FileStore;
use crate::task::Stage;
use crate::tasks::{self, ListFilter};

pub struct ListOptions {
    pub all: bool,
    pub repo: Option<String>,
    pub stage: Option<String>,
    pub json: bool,
    pub storage: Option<PathBuf>,
}

pub fn run(opts: ListOptions) -> Result<()> {
    let stage = opts.stage.as_deref().map(str::parse::<Stage>).transpose()?;
    let path = resolve_store_path(opts.storage)?;

    let tasks = tasks::list_tasks(
        &FileStore,
        &path,
        &ListFilter {
            all: opts.all,
            stage,
            repo: opts.repo,
        },
    )?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        println!("{}", format_task_table(&tasks));
    }
    Ok(())
}
