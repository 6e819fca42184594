//! smooth - a friendlier front-end for everyday git.
//!
//! Users save, restore, try experiments and sync without learning git's
//! vocabulary. Every operation shells out to the `git` executable; smooth
//! keeps no state of its own besides a small JSON config.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - [`Smooth`]: every user-level operation with its preconditions
//! - [`GitRepo`] and [`GitRunner`]: repository access over the git executable
//! - [`SaveSession`]: the per-file review state machine
//! - [`Config`]: persisted preferences

pub mod commands;
pub mod core;

pub use core::{
    ArgsParser, BackupInfo, BranchInfo, ChangeKind, CommitInfo, Config, ConfigPatch, DiffSummary,
    FileAction, FileChange, GitRepo, GitRunner, IndexParser, Printer, RepoStatus, Result,
    SaveReport, SaveSession, Smooth, SmoothError, SystemGit, Theme,
};
