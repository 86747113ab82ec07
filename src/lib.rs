//! task-tracker - Persistent Task Lifecycle Library
//!
//! This library provides the core functionality for the task-tracker CLI
//! tool, keeping per-repo task lists that survive across agent sessions.
//!
//! # Core Concepts
//!
//! - **Tasks**: Short work items with a stage, stored one JSON object per line
//! - **Stages**: A delivery pipeline vocabulary from `pending` to `done`
//! - **Stores**: A `.tasks.jsonl` file per repo, plus one at the workspace root
//! - **Purging**: Retention policy that trims completed tasks
//! - **Check**: Git-aware report of active tasks and unclean repos
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `error`: Error types and result aliases
//! - `format`: Colored terminal rendering
//! - `git`: Git status inspection using libgit2
//! - `gui`: Local web GUI served over localhost
//! - `id`: Task identifier generation
//! - `scanner`: Workspace discovery of task files
//! - `storage`: Task file reading and atomic writes
//! - `task`: Task and stage data model
//! - `tasks`: Task operations (create, list, update, purge)

pub mod cli;
pub mod error;
pub mod format;
pub mod git;
pub mod gui;
pub mod id;
pub mod scanner;
pub mod storage;
pub mod task;
pub mod tasks;

pub use error::{Error, Result};
