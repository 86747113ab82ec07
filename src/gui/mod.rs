//! Local web GUI for browsing and editing tasks.
//!
//! Serves one embedded page plus a small JSON API over the task files found
//! in a workspace directory. The server binds to localhost only.

mod server;
pub mod templates;

pub use server::{serve, DEFAULT_PORT};
