//! Repository reads and writes, all through the `git` executable.
//!
//! This module provides [`GitRepo`], the only type that builds git argument
//! lists. Readers parse one invocation's output each; mutating operations are a
//! single invocation (or a short fixed sequence) that either succeeds or
//! returns the captured git output as the error.
//!
//! # Public API
//! - [`GitRepo`]: Status reader and mutating operations over a [`GitRunner`]
//! - [`select_backups`]: Backup filtering and newest-first ordering
//!
//! # Key Features
//! - **Empty repositories**: history and diff readers return empty results
//!   instead of failing before the first commit
//! - **Naming conventions**: experiments and backups are found by branch prefix
//! - **Testability**: every call goes through [`GitRunner`], so workflows can be
//!   exercised against a scripted runner

use crate::core::{
    error::{Result, SmoothError},
    naming::{backup_prefix, experiment_timestamp, is_experiment},
    parse::{
        count_lines, parse_log, parse_numstat, parse_porcelain, parse_refs, pseudo_diff,
        unquote_path, RefEntry, LOG_FORMAT, REF_FORMAT,
    },
    runner::{GitRunner, SystemGit},
    state::{BackupInfo, BranchInfo, CommitInfo, DiffStat, DiffSummary, FileChange},
};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const IGNORE_FILE: &str = ".gitignore";
pub const REMOTE_NAME: &str = "origin";

pub struct GitRepo<R: GitRunner = SystemGit> {
    runner: R,
    workdir: PathBuf,
}

impl GitRepo<SystemGit> {
    /// Open the repository whose working tree contains `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let probe = SystemGit::new(path.as_ref());
        let toplevel = probe
            .run(&["rev-parse", "--show-toplevel"])
            .map_err(|e| match e {
                SmoothError::Io(io) => SmoothError::Io(io),
                _ => SmoothError::NotInGitRepo,
            })?;

        let workdir = PathBuf::from(toplevel.trim());
        log::debug!("Opened repository at {}", workdir.display());
        Ok(GitRepo::with_runner(SystemGit::new(&workdir), workdir))
    }
}

impl<R: GitRunner> GitRepo<R> {
    pub fn with_runner(runner: R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run git and trim surrounding whitespace from its output
    fn git(&self, args: &[&str]) -> Result<String> {
        Ok(self.runner.run(args)?.trim().to_string())
    }

    fn succeeds(&self, args: &[&str]) -> bool {
        self.runner.run(args).is_ok()
    }

    // === Status reader ===

    pub fn current_branch(&self) -> Result<String> {
        match self.git(&["symbolic-ref", "--short", "HEAD"]) {
            Ok(branch) => Ok(branch),
            // Detached HEAD has no symbolic ref
            Err(SmoothError::GitCommand { .. }) => self.git(&["rev-parse", "--abbrev-ref", "HEAD"]),
            Err(e) => Err(e),
        }
    }

    pub fn has_commits(&self) -> bool {
        self.succeeds(&["rev-parse", "--verify", "--quiet", "HEAD"])
    }

    pub fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(!self.git(&["status", "--porcelain"])?.is_empty())
    }

    pub fn is_on_main_branch(&self) -> Result<bool> {
        let branch = self.current_branch()?;
        Ok(branch == "main" || branch == "master")
    }

    /// `main` if it exists, else `master` if it exists, else `main`
    pub fn main_branch_name(&self) -> Result<String> {
        let branches = self.list_branches()?;
        let exists = |name: &str| branches.iter().any(|b| b.name == name);

        let name = if exists("main") {
            "main"
        } else if exists("master") {
            "master"
        } else {
            "main"
        };
        Ok(name.to_string())
    }

    pub fn changed_files(&self) -> Result<Vec<FileChange>> {
        // Untrimmed: the first status column may be a space
        let output = self.runner.run(&["status", "--porcelain"])?;
        Ok(parse_porcelain(&output))
    }

    /// Most recent commits first; empty before the first commit
    pub fn commit_history(&self, limit: usize) -> Result<Vec<CommitInfo>> {
        if !self.has_commits() {
            return Ok(Vec::new());
        }

        let count = format!("-{limit}");
        let output = self.git(&["log", &count, LOG_FORMAT])?;
        Ok(parse_log(&output))
    }

    pub fn last_commit(&self) -> Result<Option<CommitInfo>> {
        Ok(self.commit_history(1)?.into_iter().next())
    }

    fn list_refs(&self) -> Result<Vec<RefEntry>> {
        let output = self.git(&["for-each-ref", REF_FORMAT, "refs/heads"])?;
        Ok(parse_refs(&output))
    }

    pub fn list_branches(&self) -> Result<Vec<BranchInfo>> {
        Ok(self
            .list_refs()?
            .into_iter()
            .map(|r| BranchInfo {
                name: r.name,
                is_current: r.is_current,
            })
            .collect())
    }

    pub fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.list_branches()?.iter().any(|b| b.name == name))
    }

    /// Experiment branches, newest first; names without a timestamp go last
    pub fn list_experiments(&self) -> Result<Vec<BranchInfo>> {
        let mut experiments: Vec<BranchInfo> = self
            .list_branches()?
            .into_iter()
            .filter(|b| is_experiment(&b.name))
            .collect();

        experiments.sort_by(|a, b| experiment_timestamp(&b.name).cmp(&experiment_timestamp(&a.name)));
        Ok(experiments)
    }

    /// Backups made for `for_branch`, newest first
    pub fn list_backups(&self, for_branch: &str) -> Result<Vec<BackupInfo>> {
        Ok(select_backups(self.list_refs()?, for_branch))
    }

    /// Unified diff for one file, or a readable stand-in when git has none
    pub fn file_diff(&self, path: &str) -> Result<String> {
        if self.workdir.join(path).is_dir() {
            return Ok(format!("new directory: {path}\n(contains untracked files)"));
        }

        let diff = if self.has_commits() {
            self.git(&["diff", "HEAD", "--", path])?
        } else {
            self.git(&["diff", "--", path])?
        };
        if !diff.is_empty() {
            return Ok(diff);
        }

        let status = self.git(&["status", "--porcelain", "--", path])?;
        if status.starts_with("??") {
            let content = fs::read(self.workdir.join(path))?;
            return Ok(pseudo_diff(path, &String::from_utf8_lossy(&content)));
        }

        Ok("No changes in this file".to_string())
    }

    /// Per-file line counts between two commits (`to = None` means the working tree)
    pub fn diff_stat_between(&self, from: &str, to: Option<&str>) -> Result<DiffSummary> {
        let mut args = vec!["diff", "--numstat", from];
        if let Some(to) = to {
            args.push(to);
        }

        let mut summary = DiffSummary::default();
        parse_numstat(&self.git(&args)?, &mut summary);
        Ok(summary)
    }

    /// Line counts for everything not yet saved, untracked files included
    pub fn uncommitted_diff_stat(&self) -> Result<DiffSummary> {
        let tracked = if self.has_commits() {
            self.git(&["diff", "--numstat", "HEAD"])?
        } else {
            self.git(&["diff", "--numstat"])?
        };

        let mut summary = DiffSummary::default();
        parse_numstat(&tracked, &mut summary);

        let untracked = self.git(&["ls-files", "--others", "--exclude-standard"])?;
        for line in untracked.lines().filter(|l| !l.is_empty()) {
            let path = unquote_path(line);
            let additions = fs::read(self.workdir.join(&path))
                .map(|content| count_lines(&content))
                .unwrap_or(0);

            summary.push(DiffStat {
                path,
                additions,
                is_untracked: true,
                ..Default::default()
            });
        }

        Ok(summary)
    }

    pub fn remote_url(&self) -> Option<String> {
        self.git(&["remote", "get-url", REMOTE_NAME])
            .ok()
            .filter(|url| !url.is_empty())
    }

    pub fn has_remote(&self) -> bool {
        self.remote_url().is_some()
    }

    // === Mutating operations ===

    pub fn stage_all(&self) -> Result<()> {
        self.git(&["add", "-A"])?;
        Ok(())
    }

    pub fn stage_files<S: AsRef<str>>(&self, paths: &[S]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(AsRef::as_ref));
        self.git(&args)?;
        Ok(())
    }

    /// Commit only `paths`; anything else already staged stays out of the commit
    pub fn commit_paths<S: AsRef<str>>(&self, message: &str, paths: &[S]) -> Result<()> {
        let mut args = vec!["commit", "-m", message, "--"];
        args.extend(paths.iter().map(AsRef::as_ref));
        self.git(&args)?;
        Ok(())
    }

    /// Discard working-tree changes for exactly these paths
    pub fn revert_files<S: AsRef<str>>(&self, paths: &[S]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut args = vec!["checkout", "HEAD", "--"];
        args.extend(paths.iter().map(AsRef::as_ref));
        self.git(&args)?;
        Ok(())
    }

    /// Append `pattern` on a new line, creating the ignore file if needed.
    ///
    /// Appending the same pattern twice writes it twice.
    pub fn append_to_ignore_file(&self, pattern: &str) -> Result<()> {
        let path = self.workdir.join(IGNORE_FILE);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        write!(file, "\n{pattern}")?;
        log::debug!("Appended '{pattern}' to {}", path.display());
        Ok(())
    }

    pub fn add_remote(&self, url: &str) -> Result<()> {
        self.git(&["remote", "add", REMOTE_NAME, url])?;
        Ok(())
    }

    /// Push the current branch to origin and set it as upstream
    pub fn push(&self) -> Result<()> {
        if !self.has_remote() {
            return Err(SmoothError::NoRemoteConfigured);
        }

        let branch = self.current_branch()?;
        self.git(&["push", "-u", REMOTE_NAME, &branch])?;
        Ok(())
    }

    pub fn reset_hard(&self, target: &str) -> Result<()> {
        self.git(&["reset", "--hard", target])?;
        Ok(())
    }

    /// Create `name` at HEAD and switch to it
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.git(&["checkout", "-b", name])?;
        Ok(())
    }

    /// Create `name` at HEAD without switching
    pub fn branch_at_head(&self, name: &str) -> Result<()> {
        self.git(&["branch", name])?;
        Ok(())
    }

    pub fn switch_branch(&self, name: &str) -> Result<()> {
        self.git(&["checkout", name])?;
        Ok(())
    }

    pub fn merge_branch(&self, name: &str) -> Result<()> {
        self.git(&["merge", name])?;
        Ok(())
    }

    pub fn abort_merge(&self) -> Result<()> {
        self.git(&["merge", "--abort"])?;
        Ok(())
    }

    /// Force-delete, even when the branch is not merged anywhere
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        self.git(&["branch", "-D", name])?;
        Ok(())
    }

    /// Stash local changes; returns whether a stash entry was actually created
    pub fn stash(&self) -> Result<bool> {
        let before = self.stash_head();
        self.git(&["stash"])?;
        Ok(self.stash_head() != before)
    }

    pub fn stash_pop(&self) -> Result<()> {
        self.git(&["stash", "pop"])?;
        Ok(())
    }

    fn stash_head(&self) -> Option<String> {
        self.git(&["rev-parse", "--verify", "--quiet", "refs/stash"]).ok()
    }
}

/// Keep the backups of `for_branch` and order them newest first.
///
/// Backups of nested branch names (`backup/feature/x/...` when asking for
/// `feature`) are excluded.
pub fn select_backups(refs: Vec<RefEntry>, for_branch: &str) -> Vec<BackupInfo> {
    let prefix = backup_prefix(for_branch);

    let mut backups: Vec<BackupInfo> = refs
        .into_iter()
        .filter_map(|r| {
            let timestamp = r.name.strip_prefix(&prefix)?;
            if timestamp.is_empty() || timestamp.contains('/') {
                return None;
            }
            Some(BackupInfo {
                timestamp: timestamp.to_string(),
                for_branch: for_branch.to_string(),
                short_hash: r.short_hash,
                message: r.subject,
                name: r.name,
            })
        })
        .collect();

    backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    backups
}
