//! task-tracker update command implementation

use std::path::PathBuf;

use crate::cli::resolve_store_path;
use crate::error::{Error, Result};
use crate::format::format_task;
use crate::storage::FileStore;
use crate::task::Stage;
use crate::tasks::{self, UpdateFields};

pub struct UpdateOptions {
    pub id: String,
    pub stage: Option<String>,
    pub description: Option<String>,
    pub repo: Option<String>,
    pub json: bool,
    pub storage: Option<PathBuf>,
}

pub fn run(opts: UpdateOptions) -> Result<()> {
    let stage = opts.stage.as_deref().map(str::parse::<Stage>).transpose()?;
    let path = resolve_store_path(opts.storage)?;

    let updated = tasks::update_task(
        &FileStore,
        &path,
        &opts.id,
        UpdateFields {
            stage,
            description: opts.description,
            repo: opts.repo,
        },
    )?;

    let task = updated.ok_or(Error::TaskNotFound(opts.id))?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Updated: {}", format_task(&task));
    }
    Ok(())
}
