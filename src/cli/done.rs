//! task-tracker done command implementation

use std::path::PathBuf;

use crate::cli::resolve_store_path;
use crate::error::{Error, Result};
use crate::format::format_task;
use crate::storage::FileStore;
use crate::task::Stage;
use crate::tasks::{self, UpdateFields};

pub fn run(storage: Option<PathBuf>, id: &str, json: bool) -> Result<()> {
    let path = resolve_store_path(storage)?;

    let updated = tasks::update_task(
        &FileStore,
        &path,
        id,
        UpdateFields {
            stage: Some(Stage::Done),
            ..Default::default()
        },
    )?;

    let task = updated.ok_or_else(|| Error::TaskNotFound(id.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Done: {}", format_task(&task));
    }
    Ok(())
}
