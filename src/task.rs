//! Task data model
//!
//! A task is a small JSON record tracking one unit of agent work through a
//! fixed lifecycle vocabulary. Records are stored one-per-line in a JSONL
//! file, so every field serializes to a stable, line-friendly shape.

use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle stages, in natural progression order.
///
/// The order is advisory only. Tasks may move between stages freely; the
/// CLI never enforces forward-only transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Pending,
    InProgress,
    Implemented,
    Verified,
    Committed,
    Pushed,
    PrCreated,
    Merged,
    Released,
    Published,
    Done,
}

impl Stage {
    /// All stages in progression order.
    pub const ALL: [Stage; 11] = [
        Stage::Pending,
        Stage::InProgress,
        Stage::Implemented,
        Stage::Verified,
        Stage::Committed,
        Stage::Pushed,
        Stage::PrCreated,
        Stage::Merged,
        Stage::Released,
        Stage::Published,
        Stage::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Pending => "pending",
            Stage::InProgress => "in-progress",
            Stage::Implemented => "implemented",
            Stage::Verified => "verified",
            Stage::Committed => "committed",
            Stage::Pushed => "pushed",
            Stage::PrCreated => "pr-created",
            Stage::Merged => "merged",
            Stage::Released => "released",
            Stage::Published => "published",
            Stage::Done => "done",
        }
    }

    /// Terminal stages are eligible for purging and hidden from default
    /// listings. Only `done` is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Done)
    }

    /// Comma-separated stage names, for error messages and help text.
    pub fn valid_list() -> String {
        Stage::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Pending
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Stage::Pending),
            "in-progress" => Ok(Stage::InProgress),
            "implemented" => Ok(Stage::Implemented),
            "verified" => Ok(Stage::Verified),
            "committed" => Ok(Stage::Committed),
            "pushed" => Ok(Stage::Pushed),
            "pr-created" => Ok(Stage::PrCreated),
            "merged" => Ok(Stage::Merged),
            "released" => Ok(Stage::Released),
            "published" => Ok(Stage::Published),
            "done" => Ok(Stage::Done),
            other => Err(Error::InvalidStage(other.to_string())),
        }
    }
}

/// A tracked task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Short random identifier, 8 URL-safe characters.
    pub id: String,
    /// Free-form summary of the work.
    pub description: String,
    /// Current lifecycle stage.
    pub stage: Stage,
    /// Creation time, RFC 3339 with millisecond precision (UTC).
    pub created_at: String,
    /// Last modification time, same format. Timestamps sort
    /// lexicographically, so retention logic compares them as strings.
    pub updated_at: String,
    /// Optional repository tag for multi-repo workspaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

/// Current UTC time formatted for task timestamps.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
