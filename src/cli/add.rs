//! task-tracker add command implementation

use std::path::PathBuf;

use crate::cli::resolve_store_path;
use crate::error::Result;
use crate::format::format_task;
use crate::storage::FileStore;
use crate::task::Stage;
use crate::tasks::{self, CreateOptions};

pub struct AddOptions {
    pub description: String,
    pub repo: Option<String>,
    pub stage: String,
    pub json: bool,
    pub storage: Option<PathBuf>,
}

pub fn run(opts: AddOptions) -> Result<()> {
    let stage: Stage = opts.stage.parse()?;
    let path = resolve_store_path(opts.storage)?;

    let task = tasks::create_task(
        &FileStore,
        &path,
        &opts.description,
        CreateOptions {
            stage: Some(stage),
            repo: opts.repo,
        },
    )?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Created: {}", format_task(&task));
    }
    Ok(())
}
