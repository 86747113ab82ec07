//! task-tracker remove command implementation

use std::path::PathBuf;

use serde_json::json;

use crate::cli::resolve_store_path;
use crate::error::{Error, Result};
use crate::storage::FileStore;
use crate::tasks;

pub fn run(storage: Option<PathBuf>, id: &str, json: bool) -> Result<()> {
    let path = resolve_store_path(storage)?;

    if !tasks::remove_task(&FileStore, &path, id)? {
        return Err(Error::TaskNotFound(id.to_string()));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "removed": true }))?);
    } else {
        println!("Removed task: {}", id);
    }
    Ok(())
}
