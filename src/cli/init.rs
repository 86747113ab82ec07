//! task-tracker init command implementation
//!
//! Resolves the storage location and makes sure its directory exists. The
//! task file itself is created lazily on first append.

use std::path::PathBuf;

use crate::cli::resolve_store_path;
use crate::error::Result;
use crate::storage;

pub fn run(storage_override: Option<PathBuf>) -> Result<()> {
    let path = resolve_store_path(storage_override)?;
    storage::ensure_parent_dir(&path)?;
    println!("Storage initialized at: {}", path.display());
    Ok(())
}
