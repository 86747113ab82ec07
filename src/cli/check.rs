//! task-tracker check command implementation
//!
//! The stale-work report: active tasks from storage plus dirty or unpushed
//! repositories across the workspace. Meant to run at the end of an agent
//! session to catch anything left behind.

use std::path::PathBuf;

use serde_json::json;

use crate::cli::resolve_store_path;
use crate::error::Result;
use crate::format::format_check_report;
use crate::git;
use crate::storage::FileStore;
use crate::tasks::{self, ListFilter};

pub struct CheckOptions {
    pub workspace: PathBuf,
    pub json: bool,
    pub storage: Option<PathBuf>,
}

pub fn run(opts: CheckOptions) -> Result<()> {
    let path = resolve_store_path(opts.storage)?;
    let active = tasks::list_tasks(&FileStore, &path, &ListFilter::default())?;
    let repos = git::scan_workspace(&opts.workspace);

    if opts.json {
        let report = json!({ "activeTasks": active, "repoStatus": repos });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_check_report(&active, &repos));
    }
    Ok(())
}
