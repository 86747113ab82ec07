//! task-tracker gui command implementation

use std::path::PathBuf;

use crate::error::Result;

pub fn run(dir: PathBuf, port: u16) -> Result<()> {
    let dir = dir.canonicalize().unwrap_or(dir);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(crate::gui::serve(dir, port))
}
