//! Type-safe classification of a changed file.
//!
//! This module defines [`ChangeKind`], the four buckets smooth shows to users
//! instead of git's two-column status codes.
//!
//! # Public API
//! - [`ChangeKind`]: Added, modified, deleted or renamed
//!
//! # Classification
//! Porcelain status lines start with a two-character code (index column, then
//! work-tree column). Precedence is fixed: any `A` or the untracked marker `??`
//! means added, then any `D` means deleted, then any `R` means renamed, and
//! everything else is modified.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeKind {
    /// Classify a two-character porcelain status code
    pub fn from_porcelain(code: &str) -> ChangeKind {
        if code == "??" || code.contains('A') {
            ChangeKind::Added
        } else if code.contains('D') {
            ChangeKind::Deleted
        } else if code.contains('R') {
            ChangeKind::Renamed
        } else {
            ChangeKind::Modified
        }
    }

    /// Human-readable description used in listings
    pub fn description(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed => "renamed",
        }
    }

    /// Single-letter marker for compact listings
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "A",
            ChangeKind::Modified => "M",
            ChangeKind::Deleted => "D",
            ChangeKind::Renamed => "R",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
