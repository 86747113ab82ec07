//! task-tracker purge command implementation

use std::path::PathBuf;

use serde_json::json;

use crate::cli::resolve_store_path;
use crate::error::Result;
use crate::format::format_task;
use crate::storage::FileStore;
use crate::tasks;

pub struct PurgeOptions {
    pub dry_run: bool,
    pub keep: Option<usize>,
    pub json: bool,
    pub storage: Option<PathBuf>,
}

pub fn run(opts: PurgeOptions) -> Result<()> {
    let path = resolve_store_path(opts.storage)?;

    let result = tasks::purge_tasks(
        &FileStore,
        &path,
        tasks::PurgeOptions {
            dry_run: opts.dry_run,
            keep: opts.keep,
        },
    )?;

    if opts.json {
        let ids: Vec<&str> = result.purged.iter().map(|t| t.id.as_str()).collect();
        let report = json!({ "count": result.count, "ids": ids });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if result.count == 0 {
        println!("No done tasks to purge");
        return Ok(());
    }

    if opts.dry_run {
        println!("Would purge {} task(s)", result.count);
    } else {
        println!("Purged {} task(s)", result.count);
    }
    for task in &result.purged {
        println!("  {}", format_task(task));
    }
    Ok(())
}
