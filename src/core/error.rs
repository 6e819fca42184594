//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SmoothError`] which covers every failure mode the
//! application can surface to the user. It uses `thiserror` for ergonomic
//! definitions and offers constructor helpers for the common cases.
//!
//! # Public API
//! - [`SmoothError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SmoothError>`
//!
//! # Error Categories
//! - **Repository**: not a repository, no remote, git command failures
//! - **Preconditions**: uncommitted changes, not on an experiment, nothing to save
//! - **Index parsing**: invalid format, out of bounds, validation errors
//! - **Configuration**: unknown keys, bad values, unwritable config directory

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for smooth
#[derive(Error, Debug)]
pub enum SmoothError {
    // Repository errors
    #[error("Not a git repository")]
    NotInGitRepo,

    #[error(
        "No remote configured. To set one up:\n\n\
         1. Create a repository on your git host\n\
         2. Run: smooth sync --remote https://github.com/USERNAME/REPO.git\n\
         3. Try syncing again"
    )]
    NoRemoteConfigured,

    #[error("git {command} failed: {output}")]
    GitCommand { command: String, output: String },

    // Precondition errors
    #[error("You have unsaved changes. Save or revert them before you {action}.")]
    UncommittedChanges { action: String },

    #[error("'{branch}' is not an experiment")]
    NotOnExperiment { branch: String },

    #[error("No experiment matches '{target}'")]
    ExperimentNotFound { target: String },

    #[error("Experiments are turned off. Enable them with: smooth config set experiments true")]
    ExperimentsDisabled,

    #[error("Invalid experiment name: '{name}'")]
    InvalidExperimentName { name: String },

    #[error("Nothing to do: every file is marked as skip")]
    NothingToSave,

    #[error("A message is required when saving files")]
    CommitMessageRequired,

    #[error("File is not in the list of changes: {path}")]
    UnknownFile { path: String },

    #[error("File [{index}] was given more than one action")]
    ConflictingActions { index: usize },

    #[error("The ignore pattern cannot be empty")]
    EmptyPattern,

    #[error("Backup not found: {name}")]
    BackupNotFound { name: String },

    // Index parsing errors
    #[error("No indices provided. Usage: <command> <indices>\nExample: smooth diff 2")]
    NoIndicesProvided,

    #[error("Invalid index format: {input}. Use format like: 1, 1-3, or 1,3,5")]
    InvalidIndexFormat { input: String },

    #[error("No valid indices provided. Use format like: 1, 1-3, or 1,3,5")]
    NoValidIndices,

    #[error("Invalid range format: '{range}'. Use format like '3-6'")]
    InvalidRangeFormat { range: String },

    #[error("Invalid number in range: '{number}'")]
    InvalidRangeNumber { number: String },

    #[error("Invalid range: start ({start}) must be <= end ({end})")]
    InvalidRangeOrder { start: usize, end: usize },

    #[error("Range {start}-{end} is too large (at most {max} entries)")]
    RangeTooLarge { start: usize, end: usize, max: usize },

    #[error("Invalid number: '{number}'")]
    InvalidNumber { number: String },

    #[error("Index must be positive (got 0)")]
    ZeroIndex,

    #[error("Index {index} is out of range (1-{max} available)")]
    IndexOutOfRange { index: usize, max: usize },

    #[error("Nothing available to select")]
    NothingToSelect,

    // Configuration errors
    #[error("Could not find a configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown setting '{key}'. Known settings: auto-sync, max-backups, experiments, theme")]
    InvalidConfigKey { key: String },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidConfigValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using SmoothError
pub type Result<T> = std::result::Result<T, SmoothError>;

impl SmoothError {
    /// Create a git command failure from the arguments and captured output
    pub fn git_command(args: &[&str], output: impl Into<String>) -> Self {
        Self::GitCommand {
            command: args.join(" "),
            output: output.into(),
        }
    }

    /// Create an uncommitted changes error for the attempted action
    pub fn uncommitted_changes(action: impl Into<String>) -> Self {
        Self::UncommittedChanges {
            action: action.into(),
        }
    }

    pub fn not_on_experiment(branch: impl Into<String>) -> Self {
        Self::NotOnExperiment {
            branch: branch.into(),
        }
    }

    pub fn experiment_not_found(target: impl Into<String>) -> Self {
        Self::ExperimentNotFound {
            target: target.into(),
        }
    }

    pub fn invalid_experiment_name(name: impl Into<String>) -> Self {
        Self::InvalidExperimentName { name: name.into() }
    }

    pub fn unknown_file(path: impl Into<String>) -> Self {
        Self::UnknownFile { path: path.into() }
    }

    pub fn backup_not_found(name: impl Into<String>) -> Self {
        Self::BackupNotFound { name: name.into() }
    }

    /// Create an index out of range error
    pub fn index_out_of_range(index: usize, max: usize) -> Self {
        Self::IndexOutOfRange { index, max }
    }

    /// Create an invalid index format error
    pub fn invalid_index_format(input: impl Into<String>) -> Self {
        Self::InvalidIndexFormat {
            input: input.into(),
        }
    }

    /// Create an invalid range format error
    pub fn invalid_range_format(range: impl Into<String>) -> Self {
        Self::InvalidRangeFormat {
            range: range.into(),
        }
    }

    /// Create an invalid range number error
    pub fn invalid_range_number(number: impl Into<String>) -> Self {
        Self::InvalidRangeNumber {
            number: number.into(),
        }
    }

    /// Create an invalid range order error
    pub fn invalid_range_order(start: usize, end: usize) -> Self {
        Self::InvalidRangeOrder { start, end }
    }

    pub fn range_too_large(start: usize, end: usize, max: usize) -> Self {
        Self::RangeTooLarge { start, end, max }
    }

    /// Create an invalid number error
    pub fn invalid_number(number: impl Into<String>) -> Self {
        Self::InvalidNumber {
            number: number.into(),
        }
    }

    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config_key(key: impl Into<String>) -> Self {
        Self::InvalidConfigKey { key: key.into() }
    }

    pub fn invalid_config_value(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidConfigValue {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True when the failure means no remote is set up, so the caller can ask for one
    pub fn is_no_remote(&self) -> bool {
        matches!(self, Self::NoRemoteConfigured)
    }
}
