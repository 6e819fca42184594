//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating smooth command output and error messages.

#![allow(dead_code)]

use predicates::prelude::*;

pub fn not_in_git_repo() -> impl Predicate<str> {
    predicates::str::contains("Not in a git repository")
}

pub fn experiments_disabled() -> impl Predicate<str> {
    predicates::str::contains("Experiments are turned off")
}

/// Error line printed for any failed command
pub fn has_error() -> impl Predicate<str> {
    predicates::str::contains("Error:")
}

pub fn has_file_index(index: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("[{}]", index))
}

/// A file line with its change kind, laid out as in the numbered listing
pub fn has_file(kind: &str, path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{kind:<9}{path}"))
}

pub fn nothing_to_save() -> impl Predicate<str> {
    predicates::str::contains("Nothing to save")
}
