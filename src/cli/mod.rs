//! Command-line interface for task-tracker
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::git;
use crate::storage;

mod add;
mod check;
mod done;
mod gui;
mod init;
mod list;
mod purge;
mod remove;
mod update;

/// task-tracker - Persistent task lifecycle tracker for AI agent sessions
///
/// Tracks tasks in a plain JSONL file at the repository root, so work
/// survives context loss between sessions and across agents.
#[derive(Parser, Debug)]
#[command(name = "task-tracker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Override the storage location
    #[arg(long, global = true, env = "TASK_TRACKER_STORAGE")]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize task storage for the current repository
    Init,

    /// Add a new task
    Add {
        /// Task description
        description: String,

        /// Repository tag for the task
        #[arg(long)]
        repo: Option<String>,

        /// Initial stage
        #[arg(long, default_value = "pending")]
        stage: String,

        /// Output the created task as JSON
        #[arg(long)]
        json: bool,
    },

    /// List tasks (done tasks are hidden by default)
    List {
        /// Include done tasks
        #[arg(long)]
        all: bool,

        /// Only tasks with this repository tag
        #[arg(long)]
        repo: Option<String>,

        /// Only tasks in this stage
        #[arg(long)]
        stage: Option<String>,

        /// Output tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update a task's stage, description, or repo tag
    Update {
        /// Task id
        id: String,

        /// New stage
        #[arg(long)]
        stage: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New repository tag (empty string clears it)
        #[arg(long)]
        repo: Option<String>,

        /// Output the updated task as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark a task as done
    Done {
        /// Task id
        id: String,

        /// Output the updated task as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a task permanently
    Remove {
        /// Task id
        id: String,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Purge done tasks from storage
    Purge {
        /// Show what would be purged without writing
        #[arg(long)]
        dry_run: bool,

        /// Keep the N most recently updated done tasks
        #[arg(long)]
        keep: Option<usize>,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report active tasks and uncommitted or unpushed work
    Check {
        /// Workspace directory to scan for repositories
        #[arg(long, default_value = ".")]
        workspace: PathBuf,

        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the local web GUI
    Gui {
        /// Workspace directory to serve
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Port to listen on (next free port is tried if taken)
        #[arg(long, default_value_t = crate::gui::DEFAULT_PORT)]
        port: u16,
    },
}

/// Resolve the task file path: the explicit override if given, otherwise
/// `.tasks.jsonl` at the enclosing repository root.
pub(crate) fn resolve_store_path(storage: Option<PathBuf>) -> Result<PathBuf> {
    match storage {
        Some(path) => Ok(path),
        None => Ok(storage::task_file(&git::repo_root(None)?)),
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => init::run(self.storage),
            Commands::Add {
                description,
                repo,
                stage,
                json,
            } => add::run(add::AddOptions {
                description,
                repo,
                stage,
                json,
                storage: self.storage,
            }),
            Commands::List {
                all,
                repo,
                stage,
                json,
            } => list::run(list::ListOptions {
                all,
                repo,
                stage,
                json,
                storage: self.storage,
            }),
            Commands::Update {
                id,
                stage,
                description,
                repo,
                json,
            } => update::run(update::UpdateOptions {
                id,
                stage,
                description,
                repo,
                json,
                storage: self.storage,
            }),
            Commands::Done { id, json } => done::run(self.storage, &id, json),
            Commands::Remove { id, json } => remove::run(self.storage, &id, json),
            Commands::Purge {
                dry_run,
                keep,
                json,
            } => purge::run(purge::PurgeOptions {
                dry_run,
                keep,
                json,
                storage: self.storage,
            }),
            Commands::Check { workspace, json } => check::run(check::CheckOptions {
                workspace,
                json,
                storage: self.storage,
            }),
            Commands::Gui { dir, port } => gui::run(dir, port),
        }
    }
}
