//! Core functionality for smooth.
//!
//! This module provides the building blocks below the commands: the git
//! runner and repository wrapper, the save/restore/experiment workflows, the
//! config document and the themed output.

pub mod app;
pub mod args_parser;
pub mod command_init;
pub mod config;
pub mod dirs;
pub mod error;
pub mod experiment;
pub mod git;
pub mod git_status;
pub mod index_parser;
pub mod naming;
pub mod output;
pub mod parse;
pub mod restore;
pub mod runner;
pub mod save;
pub mod state;
pub mod theme;

// === Error handling ===
pub use error::{Result, SmoothError};

// === Git access ===
// Every git invocation goes through a runner; GitRepo builds the arguments
pub use git::GitRepo;
pub use runner::{GitRunner, SystemGit};

// === Domain types ===
pub use git_status::ChangeKind;
pub use state::{BackupInfo, BranchInfo, CommitInfo, DiffStat, DiffSummary, FileChange, RepoStatus};

// === Workflows ===
pub use app::Smooth;
pub use experiment::StashOutcome;
pub use restore::{RestoreReport, TrimReport};
pub use save::{FileAction, SaveReport, SaveSession, SaveState, SyncOutcome};

// === Settings and presentation ===
pub use config::{Config, ConfigKey, ConfigPatch};
pub use output::Printer;
pub use theme::Theme;

// === Argument handling ===
// Parser for handling user input like "1 3-5,8" -> [1, 3, 4, 5, 8]
pub use args_parser::ArgsParser;
pub use command_init::{CommandContext, CommandInit};
pub use index_parser::IndexParser;
