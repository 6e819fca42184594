//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories in various states and
//! for running the smooth binary against them with an isolated config.

#![allow(dead_code)]

use assert_cmd::prelude::*;
use smooth::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Test repository setup result. Both directories must be kept alive for the
/// duration of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub config_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The smooth binary, run inside this repository with its own config directory
    pub fn smooth(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("smooth")?;
        cmd.current_dir(&self.path)
            .env("SMOOTH_CONFIG_DIR", self.config_dir.path())
            .env("NO_COLOR", "1");
        Ok(cmd)
    }

    /// Same as [`TestRepo::smooth`], with the stdin-capable assert_cmd wrapper
    pub fn smooth_interactive(&self) -> anyhow::Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("smooth")?;
        cmd.current_dir(&self.path)
            .env("SMOOTH_CONFIG_DIR", self.config_dir.path())
            .env("NO_COLOR", "1");
        Ok(cmd)
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.path().join("config.json")
    }

    /// Write a raw config document for the binary to pick up
    pub fn write_config(&self, json: &str) -> Result<()> {
        fs::write(self.config_file(), json)?;
        Ok(())
    }
}

/// Sets up a fresh git repository on `main` with identity and signing configured
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let config_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        config_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// Run git in `repo_path` and return its trimmed stdout
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

pub fn read_file(repo_path: &Path, filename: &str) -> Result<String> {
    Ok(fs::read_to_string(repo_path.join(filename))?)
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

pub fn current_branch(repo_path: &Path) -> Result<String> {
    git(repo_path, &["symbolic-ref", "--short", "HEAD"])
}

/// Local branch names
pub fn branches(repo_path: &Path) -> Result<Vec<String>> {
    Ok(git(repo_path, &["for-each-ref", "--format=%(refname:short)", "refs/heads"])?
        .lines()
        .map(str::to_string)
        .collect())
}

/// `git status --porcelain` is empty
pub fn is_clean(repo_path: &Path) -> Result<bool> {
    Ok(git(repo_path, &["status", "--porcelain"])?.is_empty())
}

/// Creates multiple test files with sequential content
pub fn create_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("content{}\nline 2\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}

/// Modifies multiple test files with new content
pub fn modify_test_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        let content = format!("modified{}\nline 2\nnew line\n", i + 1);
        create_file(repo_path, filename, &content)?;
    }
    Ok(())
}
