//! Snapshot data structures read from the repository.
//!
//! Every value here is derived fresh from git output on each query and never
//! persisted. They serialize to JSON so any front-end can render them.
//!
//! # Public API
//! - [`FileChange`]: One changed path and its [`ChangeKind`]
//! - [`CommitInfo`]: One historical commit
//! - [`BranchInfo`]: One local branch
//! - [`BackupInfo`]: A backup branch with its tip commit
//! - [`DiffStat`] / [`DiffSummary`]: Per-file line counts
//! - [`RepoStatus`]: The facts shown on the main menu

use crate::core::{git_status::ChangeKind, naming::TIMESTAMP_FORMAT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    pub kind: ChangeKind,
    pub path: String,
}

impl FileChange {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub short_hash: String,
    pub message: String,
    pub relative_time: String,
    pub full_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    pub name: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupInfo {
    pub name: String,
    pub for_branch: String,
    /// `YYYYMMDD-HHMMSS`, zero padded so string order is chronological
    pub timestamp: String,
    pub short_hash: String,
    pub message: String,
}

impl BackupInfo {
    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`, or verbatim if it does not parse
    pub fn display_time(&self) -> String {
        chrono::NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| self.timestamp.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStat {
    pub path: String,
    pub additions: usize,
    pub deletions: usize,
    pub is_binary: bool,
    pub is_untracked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub files: Vec<DiffStat>,
    pub total_added: usize,
    pub total_deleted: usize,
}

impl DiffSummary {
    pub fn push(&mut self, stat: DiffStat) {
        self.total_added += stat.additions;
        self.total_deleted += stat.deletions;
        self.files.push(stat);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStatus {
    pub branch: String,
    pub main_branch: String,
    pub is_on_main: bool,
    pub on_experiment: bool,
    pub has_changes: bool,
    pub changed_files: usize,
    pub remote_url: Option<String>,
    pub last_commit: Option<CommitInfo>,
}
