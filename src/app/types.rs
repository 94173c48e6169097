use std::path::PathBuf;

use serde::Serialize;

use crate::models::Validity;

/// Result of checking one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub profile: String,
    pub validity: Validity,
}

/// What happened to one profile in one store file during `clean`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeletionStatus {
    /// The file was rewritten; `blocks` is 0 when the profile was not in it.
    Removed { blocks: usize },
    /// Dry run: the file was left alone.
    Planned,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deletion {
    pub profile: String,
    pub file: PathBuf,
    #[serde(flatten)]
    pub status: DeletionStatus,
}

impl Deletion {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, DeletionStatus::Failed { .. })
    }
}

/// Summary of a `clean` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub dry_run: bool,
    pub checked: usize,
    /// Profiles rejected by the identity service, in parse order.
    pub invalid: Vec<String>,
    /// Profiles whose check failed for other reasons; never deleted.
    pub skipped: Vec<CheckOutcome>,
    /// One entry per (invalid profile, store file), credentials file first.
    pub deletions: Vec<Deletion>,
}

impl CleanReport {
    pub fn failures(&self) -> impl Iterator<Item = &Deletion> {
        self.deletions.iter().filter(|d| d.is_failure())
    }
}

/// Counts from an `apply` session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub commands: usize,
    pub failed: usize,
}
