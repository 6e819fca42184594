//! The save/review workflow.
//!
//! A [`SaveSession`] holds one [`FileAction`] per changed file and walks the
//! states `Review → Input → Executing → [AutoSyncing] → Success | Error`.
//! Execution itself is [`execute_save`], which turns a [`SavePlan`] into git
//! calls in a fixed order: revert, then ignore, then stage and commit.
//!
//! # Public API
//! - [`FileAction`]: What happens to one file
//! - [`SaveSession`]: The per-file action map and its state
//! - [`SavePlan`] / [`execute_save`]: Validated plan and its execution
//! - [`SaveReport`] / [`SyncOutcome`]: What actually happened

use crate::core::{
    error::{Result, SmoothError},
    git::{GitRepo, IGNORE_FILE},
    runner::GitRunner,
    state::FileChange,
};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FileAction {
    #[default]
    Save,
    Revert,
    SkipOnce,
    Ignore,
}

impl FileAction {
    /// Forward cycle: Save → Revert → SkipOnce → Ignore → Save
    pub fn next(self) -> Self {
        match self {
            FileAction::Save => FileAction::Revert,
            FileAction::Revert => FileAction::SkipOnce,
            FileAction::SkipOnce => FileAction::Ignore,
            FileAction::Ignore => FileAction::Save,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FileAction::Save => FileAction::Ignore,
            FileAction::Revert => FileAction::Save,
            FileAction::SkipOnce => FileAction::Revert,
            FileAction::Ignore => FileAction::SkipOnce,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileAction::Save => "save",
            FileAction::Revert => "revert",
            FileAction::SkipOnce => "skip",
            FileAction::Ignore => "ignore",
        }
    }

    /// Accepts the label or its first letter
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "s" | "save" => Some(FileAction::Save),
            "r" | "revert" => Some(FileAction::Revert),
            "k" | "skip" => Some(FileAction::SkipOnce),
            "i" | "ignore" => Some(FileAction::Ignore),
            _ => None,
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub change: FileChange,
    pub action: FileAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    NoChanges,
    Review,
    Input,
    Executing,
    AutoSyncing,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionCounts {
    pub save: usize,
    pub revert: usize,
    pub skip: usize,
    pub ignore: usize,
}

pub struct SaveSession {
    files: Vec<FileItem>,
    state: SaveState,
}

impl SaveSession {
    /// Start reviewing `changes`, every file defaulting to [`FileAction::Save`]
    pub fn new(changes: Vec<FileChange>) -> Self {
        let state = if changes.is_empty() {
            SaveState::NoChanges
        } else {
            SaveState::Review
        };

        let files = changes
            .into_iter()
            .map(|change| FileItem {
                change,
                action: FileAction::default(),
            })
            .collect();

        Self { files, state }
    }

    pub fn files(&self) -> &[FileItem] {
        &self.files
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut FileItem> {
        let count = self.files.len();
        self.files
            .get_mut(index)
            .ok_or_else(|| SmoothError::index_out_of_range(index + 1, count))
    }

    /// Set the action of the file at 0-based `index`
    pub fn set_action(&mut self, index: usize, action: FileAction) -> Result<()> {
        self.item_mut(index)?.action = action;
        Ok(())
    }

    /// Set the action of the file with this path
    pub fn set_action_for(&mut self, path: &str, action: FileAction) -> Result<()> {
        let item = self
            .files
            .iter_mut()
            .find(|item| item.change.path == path)
            .ok_or_else(|| SmoothError::unknown_file(path))?;
        item.action = action;
        Ok(())
    }

    pub fn cycle(&mut self, index: usize, forward: bool) -> Result<FileAction> {
        let item = self.item_mut(index)?;
        item.action = if forward {
            item.action.next()
        } else {
            item.action.previous()
        };
        Ok(item.action)
    }

    pub fn counts(&self) -> ActionCounts {
        let mut counts = ActionCounts::default();
        for item in &self.files {
            match item.action {
                FileAction::Save => counts.save += 1,
                FileAction::Revert => counts.revert += 1,
                FileAction::SkipOnce => counts.skip += 1,
                FileAction::Ignore => counts.ignore += 1,
            }
        }
        counts
    }

    pub fn has_files_to_save(&self) -> bool {
        self.files.iter().any(|item| item.action == FileAction::Save)
    }

    pub fn has_any_action(&self) -> bool {
        self.files
            .iter()
            .any(|item| item.action != FileAction::SkipOnce)
    }

    /// Leave review. A message is only asked for when something will be committed.
    pub fn proceed(&mut self) -> Result<SaveState> {
        if !self.has_any_action() {
            return Err(SmoothError::NothingToSave);
        }

        self.state = if self.has_files_to_save() {
            SaveState::Input
        } else {
            SaveState::Executing
        };
        Ok(self.state)
    }

    /// Return from message input to review without losing any action
    pub fn back(&mut self) {
        if self.state == SaveState::Input {
            self.state = SaveState::Review;
        }
    }

    /// Run the plan, then push if `auto_sync` is on, a remote exists and a commit was made
    pub fn execute<R: GitRunner>(
        &mut self,
        repo: &GitRepo<R>,
        message: Option<&str>,
        auto_sync: bool,
    ) -> Result<SaveReport> {
        if !matches!(self.state, SaveState::Input | SaveState::Executing) {
            self.proceed()?;
        }

        let plan = SavePlan::from_items(&self.files, message)?;

        self.state = SaveState::Executing;
        let mut report = match execute_save(repo, &plan) {
            Ok(report) => report,
            Err(e) => {
                self.state = SaveState::Error;
                return Err(e);
            }
        };

        if report.committed && auto_sync && repo.has_remote() {
            self.state = SaveState::AutoSyncing;
            report.sync = match repo.push() {
                Ok(()) => SyncOutcome::Pushed,
                Err(e) => {
                    log::warn!("Auto-sync failed: {e}");
                    SyncOutcome::Failed(e.to_string())
                }
            };
        }

        self.state = SaveState::Success;
        Ok(report)
    }
}

/// Paths grouped by action, with the commit message when one is needed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavePlan {
    pub message: Option<String>,
    pub save: Vec<String>,
    pub revert: Vec<String>,
    pub ignore: Vec<String>,
    pub skipped: usize,
}

impl SavePlan {
    /// Group items by action. The message is trimmed and must be non-empty when anything is saved.
    pub fn from_items(items: &[FileItem], message: Option<&str>) -> Result<Self> {
        let mut plan = SavePlan::default();
        for item in items {
            let path = item.change.path.clone();
            match item.action {
                FileAction::Save => plan.save.push(path),
                FileAction::Revert => plan.revert.push(path),
                FileAction::Ignore => plan.ignore.push(path),
                FileAction::SkipOnce => plan.skipped += 1,
            }
        }

        if !plan.save.is_empty() {
            let message = message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .ok_or(SmoothError::CommitMessageRequired)?;
            plan.message = Some(message.to_string());
        }

        Ok(plan)
    }

    /// Nothing to save, revert or ignore
    pub fn is_noop(&self) -> bool {
        self.save.is_empty() && self.revert.is_empty() && self.ignore.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SyncOutcome {
    #[default]
    NotAttempted,
    Pushed,
    Failed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub saved: Vec<String>,
    pub reverted: Vec<String>,
    pub ignored: Vec<String>,
    pub skipped: usize,
    pub committed: bool,
    pub sync: SyncOutcome,
}

/// Apply a plan: revert in one call, append each ignore pattern, then stage and commit.
///
/// The first failure stops the remaining steps. Skipped files are never touched,
/// and the commit names its paths so files staged earlier stay out of it.
pub fn execute_save<R: GitRunner>(repo: &GitRepo<R>, plan: &SavePlan) -> Result<SaveReport> {
    let mut report = SaveReport {
        skipped: plan.skipped,
        ..Default::default()
    };

    if plan.is_noop() {
        log::debug!("Nothing to save, revert or ignore");
        return Ok(report);
    }

    if !plan.revert.is_empty() {
        repo.revert_files(&plan.revert)?;
        report.reverted = plan.revert.clone();
    }

    for path in &plan.ignore {
        repo.append_to_ignore_file(path)?;
        report.ignored.push(path.clone());
    }

    if let Some(message) = plan.message.as_deref().filter(|_| !plan.save.is_empty()) {
        let mut paths = plan.save.clone();
        if !plan.ignore.is_empty() && !paths.iter().any(|p| p == IGNORE_FILE) {
            paths.push(IGNORE_FILE.to_string());
        }

        repo.stage_files(&paths)?;
        repo.commit_paths(message, &paths)?;
        report.saved = plan.save.clone();
        report.committed = true;
    }

    log::info!(
        "Saved {}, reverted {}, ignored {}, skipped {}",
        report.saved.len(),
        report.reverted.len(),
        report.ignored.len(),
        report.skipped
    );
    Ok(report)
}
