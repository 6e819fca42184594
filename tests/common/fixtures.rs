//! Test data generation utilities and predefined scenarios
//!
//! Provides functions for creating repositories with specific file states
//! and configurations to test various scenarios consistently.

#![allow(dead_code)]

use super::repository::*;
use smooth::core::error::Result;

/// Repository with three committed files, all modified, plus two untracked ones
pub fn create_multi_file_repo() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    git_add(&repo.path, ".")?;
    git_commit(&repo.path, "Initial commit")?;

    modify_test_files(&repo.path, &["file1.txt", "file2.txt", "file3.txt"])?;
    create_test_files(&repo.path, &["file4.txt", "file5.txt"])?;

    Ok(repo)
}

/// Repository where `notes.txt` holds "v1", "v2", ... one commit per version
pub fn create_repo_with_history(versions: usize) -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    for version in 1..=versions {
        create_file(&repo.path, "notes.txt", &format!("v{version}\n"))?;
        git_add(&repo.path, "notes.txt")?;
        git_commit(&repo.path, &format!("Version {version}"))?;
    }

    Ok(repo)
}

/// Repository with one commit and experiments turned on
pub fn create_experiment_repo() -> Result<TestRepo> {
    let repo = setup_test_repo_with_initial_commit()?;
    repo.write_config(r#"{ "experimentsEnabled": true }"#)?;
    Ok(repo)
}
