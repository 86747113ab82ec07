//! Error types for task-tracker
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown task id, invalid stage, not in a repository)
//! - 3: Operation failed (I/O, git, serialization)

use thiserror::Error;

/// Exit codes for the task-tracker CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 3;
}

/// Main error type for task-tracker operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid stage: {0}\nValid stages: {valid}", valid = crate::task::Stage::valid_list())]
    InvalidStage(String),

    #[error("Not in a git repository. task-tracker requires a git repository.")]
    RepoNotFound,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 3)
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::TaskNotFound(_)
            | Error::InvalidStage(_)
            | Error::RepoNotFound
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            Error::Git(_) | Error::Io(_) | Error::Json(_) | Error::OperationFailed(_) => {
                exit_codes::OPERATION_FAILED
            }
        }
    }
}

/// Result type alias for task-tracker operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_errors_map_to_exit_code_2() {
        assert_eq!(Error::TaskNotFound("abc".into()).exit_code(), 2);
        assert_eq!(Error::InvalidStage("bogus".into()).exit_code(), 2);
        assert_eq!(Error::RepoNotFound.exit_code(), 2);
    }

    #[test]
    fn operation_failures_map_to_exit_code_3() {
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.exit_code(), 3);
        assert_eq!(Error::OperationFailed("x".into()).exit_code(), 3);
    }

    #[test]
    fn invalid_stage_lists_vocabulary() {
        let msg = Error::InvalidStage("shipped".into()).to_string();
        assert!(msg.starts_with("Invalid stage: shipped"));
        assert!(msg.contains("Valid stages: pending, in-progress"));
        assert!(msg.ends_with("done"));
    }

    #[test]
    fn task_not_found_message() {
        let msg = Error::TaskNotFound("abc123".into()).to_string();
        assert_eq!(msg, "Task not found: abc123");
    }
}
