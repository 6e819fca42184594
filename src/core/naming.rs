//! Branch naming conventions for experiments and backups.
//!
//! There is no registry of experiments or backups; a branch belongs to one of
//! them purely by its name. Timestamps have whole-second resolution, so two
//! processes creating the same experiment name in the same second collide.

use crate::core::error::{Result, SmoothError};
use chrono::NaiveDateTime;

pub const EXPERIMENT_PREFIX: &str = "experiment-";
pub const BACKUP_PREFIX: &str = "backup/";

/// Zero-padded so lexicographic order equals chronological order
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const TIMESTAMP_LEN: usize = 15;

pub fn format_timestamp(now: NaiveDateTime) -> String {
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Reduce a user-supplied name to something git accepts inside a branch name.
///
/// Whitespace and characters git forbids in ref names become `-`, runs of `-`
/// collapse, and leading/trailing `-` or `.` are dropped.
pub fn sanitize_experiment_name(name: &str) -> Result<String> {
    let mut sanitized = String::with_capacity(name.len());

    for ch in name.trim().chars() {
        let replaced = if ch.is_whitespace()
            || ch.is_control()
            || matches!(ch, '~' | '^' | ':' | '?' | '*' | '[' | '\\' | '/' | '@' | '{' | '}')
        {
            '-'
        } else {
            ch
        };

        if replaced == '-' && sanitized.ends_with('-') {
            continue;
        }
        sanitized.push(replaced);
    }

    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    let sanitized = sanitized
        .trim_matches(|c| c == '-' || c == '.')
        .trim_end_matches(".lock")
        .to_string();

    if sanitized.is_empty() {
        return Err(SmoothError::invalid_experiment_name(name));
    }
    Ok(sanitized)
}

/// `experiment-<sanitized name>-<YYYYMMDD-HHMMSS>`
pub fn experiment_branch_name(name: &str, now: NaiveDateTime) -> Result<String> {
    let sanitized = sanitize_experiment_name(name)?;
    Ok(format!(
        "{EXPERIMENT_PREFIX}{sanitized}-{}",
        format_timestamp(now)
    ))
}

pub fn is_experiment(branch: &str) -> bool {
    branch.starts_with(EXPERIMENT_PREFIX)
}

/// The timestamp suffix of an experiment branch, if it has one
pub fn experiment_timestamp(branch: &str) -> Option<&str> {
    let rest = branch.strip_prefix(EXPERIMENT_PREFIX)?;
    let split = rest.len().checked_sub(TIMESTAMP_LEN)?;
    let stamp = rest.get(split..)?;
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;
    Some(stamp)
}

/// The human part of an experiment branch name
pub fn experiment_label(branch: &str) -> &str {
    let rest = branch.strip_prefix(EXPERIMENT_PREFIX).unwrap_or(branch);
    match experiment_timestamp(branch) {
        Some(stamp) => rest
            .strip_suffix(stamp)
            .map(|s| s.trim_end_matches('-'))
            .unwrap_or(rest),
        None => rest,
    }
}

/// `backup/<branch>/`
pub fn backup_prefix(for_branch: &str) -> String {
    format!("{BACKUP_PREFIX}{for_branch}/")
}

/// `backup/<branch>/<YYYYMMDD-HHMMSS>`
pub fn backup_branch_name(for_branch: &str, now: NaiveDateTime) -> String {
    format!("{}{}", backup_prefix(for_branch), format_timestamp(now))
}

pub fn is_backup(branch: &str) -> bool {
    branch.starts_with(BACKUP_PREFIX)
}
