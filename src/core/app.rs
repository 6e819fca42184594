//! The presentation-facing API.
//!
//! [`Smooth`] bundles one repository with the loaded configuration and exposes
//! every user-level operation. It enforces the preconditions (experiments
//! enabled, clean tree, on an experiment) so front-ends never call the
//! workflow modules with a repository in the wrong state.

use crate::core::{
    config::{Config, ConfigPatch, CONFIG_FILE},
    dirs::get_legacy_config_directory,
    error::{Result, SmoothError},
    experiment::{self, StashOutcome},
    git::GitRepo,
    naming::{is_backup, is_experiment},
    restore::{self, RestoreReport},
    runner::{GitRunner, SystemGit},
    save::{FileAction, SaveReport, SaveSession},
    state::{BackupInfo, BranchInfo, CommitInfo, DiffSummary, FileChange, RepoStatus},
    theme::Theme,
};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

type Clock = fn() -> NaiveDateTime;

fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

pub struct Smooth<R: GitRunner = SystemGit> {
    repo: GitRepo<R>,
    config: Config,
    config_path: PathBuf,
    clock: Clock,
}

impl Smooth<SystemGit> {
    /// Open the repository containing `path` and load the user's config
    pub fn open<P: AsRef<Path>>(path: P, config_dir: Option<&Path>) -> Result<Self> {
        let repo = GitRepo::discover(path)?;
        let config_path = Config::default_path(config_dir)?;
        let legacy_path = match config_dir {
            Some(_) => None,
            None => get_legacy_config_directory().map(|dir| dir.join(CONFIG_FILE)),
        };
        let config = Config::load_with_legacy(&config_path, legacy_path.as_deref());
        Ok(Smooth::new(repo, config, config_path))
    }
}

impl<R: GitRunner> Smooth<R> {
    pub fn new(repo: GitRepo<R>, config: Config, config_path: PathBuf) -> Self {
        Self {
            repo,
            config,
            config_path,
            clock: local_now,
        }
    }

    /// Replace the clock used for experiment and backup timestamps
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn repo(&self) -> &GitRepo<R> {
        &self.repo
    }

    pub fn theme(&self) -> Theme {
        self.config.theme()
    }

    pub fn status(&self) -> Result<RepoStatus> {
        let branch = self.repo.current_branch()?;
        let changes = self.repo.changed_files()?;

        Ok(RepoStatus {
            main_branch: self.repo.main_branch_name()?,
            is_on_main: branch == "main" || branch == "master",
            on_experiment: is_experiment(&branch),
            has_changes: !changes.is_empty(),
            changed_files: changes.len(),
            remote_url: self.repo.remote_url(),
            last_commit: self.repo.last_commit()?,
            branch,
        })
    }

    pub fn changed_files(&self) -> Result<Vec<FileChange>> {
        self.repo.changed_files()
    }

    // === Saving ===

    /// Start an interactive review of the current changes
    pub fn review(&self) -> Result<SaveSession> {
        Ok(SaveSession::new(self.repo.changed_files()?))
    }

    /// Execute a reviewed session, auto-syncing when the config asks for it
    pub fn execute_review(&self, session: &mut SaveSession, message: Option<&str>) -> Result<SaveReport> {
        session.execute(&self.repo, message, self.config.auto_sync_enabled)
    }

    /// Save with explicit per-path actions; unlisted paths default to save
    pub fn save(&self, message: Option<&str>, actions: &[(String, FileAction)]) -> Result<SaveReport> {
        let mut session = self.review()?;
        for (path, action) in actions {
            session.set_action_for(path, *action)?;
        }
        self.execute_review(&mut session, message)
    }

    pub fn add_to_ignore(&self, pattern: &str) -> Result<()> {
        self.repo.append_to_ignore_file(pattern.trim())
    }

    // === History and backups ===

    pub fn commit_history(&self, limit: usize) -> Result<Vec<CommitInfo>> {
        self.repo.commit_history(limit)
    }

    /// Back up the current state and hard-reset to `commit`
    pub fn restore(&self, commit: &str) -> Result<RestoreReport> {
        restore::restore_to_commit(&self.repo, commit, self.config.max_backups, (self.clock)())
    }

    /// Backups of the current branch, newest first
    pub fn backups(&self) -> Result<Vec<BackupInfo>> {
        let branch = self.repo.current_branch()?;
        self.repo.list_backups(&branch)
    }

    pub fn restore_backup(&self, name: &str) -> Result<()> {
        if !is_backup(name) {
            return Err(SmoothError::backup_not_found(name));
        }
        restore::restore_backup(&self.repo, name)
    }

    pub fn delete_backup(&self, name: &str) -> Result<()> {
        if !is_backup(name) || !self.repo.branch_exists(name)? {
            return Err(SmoothError::backup_not_found(name));
        }
        self.repo.delete_branch(name)
    }

    pub fn file_diff(&self, path: &str) -> Result<String> {
        self.repo.file_diff(path)
    }

    pub fn uncommitted_diff_stat(&self) -> Result<DiffSummary> {
        self.repo.uncommitted_diff_stat()
    }

    pub fn diff_stat_between(&self, from: &str, to: Option<&str>) -> Result<DiffSummary> {
        self.repo.diff_stat_between(from, to)
    }

    // === Experiments ===

    fn require_experiments(&self) -> Result<()> {
        if self.config.experiments_enabled {
            Ok(())
        } else {
            Err(SmoothError::ExperimentsDisabled)
        }
    }

    /// The current branch, if it is an experiment and the tree is clean
    fn current_experiment(&self, action: &str) -> Result<String> {
        self.require_experiments()?;

        let branch = self.repo.current_branch()?;
        if !is_experiment(&branch) {
            return Err(SmoothError::not_on_experiment(branch));
        }
        if self.repo.has_uncommitted_changes()? {
            return Err(SmoothError::uncommitted_changes(action));
        }
        Ok(branch)
    }

    pub fn experiments(&self) -> Result<Vec<BranchInfo>> {
        self.require_experiments()?;
        self.repo.list_experiments()
    }

    pub fn create_experiment(&self, name: &str) -> Result<String> {
        self.require_experiments()?;
        experiment::create(&self.repo, name, (self.clock)())
    }

    /// Merge the current experiment into main; returns the experiment's name
    pub fn keep_experiment(&self) -> Result<String> {
        let branch = self.current_experiment("keep this experiment")?;
        experiment::keep(&self.repo, &branch)?;
        Ok(branch)
    }

    /// Delete the current experiment and return to main; returns its name
    pub fn abandon_experiment(&self) -> Result<String> {
        let branch = self.current_experiment("abandon this experiment")?;
        experiment::abandon(&self.repo, &branch)?;
        Ok(branch)
    }

    pub fn switch_experiment(&self, target: &str) -> Result<StashOutcome> {
        self.require_experiments()?;
        experiment::switch(&self.repo, target)
    }

    // === Sync ===

    /// Push the current branch, first adding `origin` when a URL is given and none exists.
    ///
    /// Without a remote this fails with [`SmoothError::NoRemoteConfigured`] so
    /// the caller can ask for a URL and try again.
    pub fn sync(&self, remote_url: Option<&str>) -> Result<()> {
        if let Some(url) = remote_url.map(str::trim).filter(|u| !u.is_empty()) {
            if self.repo.has_remote() {
                log::warn!("Remote 'origin' already exists; ignoring {url}");
            } else {
                self.repo.add_remote(url)?;
                log::info!("Added remote origin {url}");
            }
        }
        self.repo.push()
    }

    // === Settings ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Apply `patch` and persist it; the in-memory config only changes if the write succeeds
    pub fn set_config(&mut self, patch: ConfigPatch) -> Result<&Config> {
        let mut updated = self.config.clone();
        updated.apply(patch);
        updated.save_to(&self.config_path)?;
        self.config = updated;
        Ok(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse::FIELD_SEP, runner::fake::FakeGit};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap()
    }

    fn app(fake: &FakeGit, experiments: bool) -> Smooth<&FakeGit> {
        let config = Config {
            experiments_enabled: experiments,
            ..Config::default()
        };
        Smooth::new(GitRepo::with_runner(fake, "/nowhere"), config, PathBuf::from("/nowhere/config.json"))
            .with_clock(fixed_time)
    }

    #[test]
    fn test_experiments_gated_by_config() {
        let fake = FakeGit::new();
        let smooth = app(&fake, false);

        assert!(matches!(smooth.create_experiment("x"), Err(SmoothError::ExperimentsDisabled)));
        assert!(matches!(smooth.experiments(), Err(SmoothError::ExperimentsDisabled)));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_create_experiment_at_fixed_time() -> Result<()> {
        let fake = FakeGit::new();
        let smooth = app(&fake, true);

        assert_eq!(smooth.create_experiment("foo")?, "experiment-foo-20240307-090502");
        Ok(())
    }

    #[test]
    fn test_keep_requires_experiment_branch() {
        let fake = FakeGit::new().on(&["symbolic-ref"], "main\n");
        let smooth = app(&fake, true);

        assert!(matches!(smooth.keep_experiment(), Err(SmoothError::NotOnExperiment { .. })));
        assert!(!fake.called("merge"));
    }

    #[test]
    fn test_abandon_requires_clean_tree() {
        let fake = FakeGit::new()
            .on(&["symbolic-ref"], "experiment-x-20240101-000000\n")
            .on(&["status"], " M a.txt\n");
        let smooth = app(&fake, true);

        assert!(matches!(
            smooth.abandon_experiment(),
            Err(SmoothError::UncommittedChanges { .. })
        ));
        assert!(!fake.called("branch -D"));
    }

    #[test]
    fn test_status_reports_experiment_and_counts() -> Result<()> {
        let fake = FakeGit::new()
            .on(&["symbolic-ref"], "experiment-x-20240101-000000\n")
            .on(&["status"], "?? a.txt\n M b.txt\n")
            .on(&["for-each-ref"], &format!("master{FIELD_SEP} {FIELD_SEP}abc{FIELD_SEP}tip"))
            .fail(&["remote"], "error: No such remote 'origin'");
        let smooth = app(&fake, true);

        let status = smooth.status()?;

        assert!(status.on_experiment);
        assert!(!status.is_on_main);
        assert_eq!(status.main_branch, "master");
        assert_eq!(status.changed_files, 2);
        assert!(status.remote_url.is_none());
        Ok(())
    }

    #[test]
    fn test_save_with_unknown_path() {
        let fake = FakeGit::new().on(&["status"], " M a.txt\n");
        let smooth = app(&fake, false);

        let result = smooth.save(Some("msg"), &[("zzz.txt".to_string(), FileAction::Revert)]);
        assert!(matches!(result, Err(SmoothError::UnknownFile { .. })));
    }

    #[test]
    fn test_save_applies_actions() -> Result<()> {
        let fake = FakeGit::new().on(&["status"], " M a.txt\n M b.txt\n");
        let smooth = app(&fake, false);

        let report = smooth.save(Some("Only a"), &[("b.txt".to_string(), FileAction::SkipOnce)])?;

        assert_eq!(report.saved, vec!["a.txt"]);
        assert_eq!(report.skipped, 1);
        assert!(fake.called("add -- a.txt"));
        assert!(!fake.called("push"));
        Ok(())
    }

    #[test]
    fn test_sync_adds_remote_when_missing() -> Result<()> {
        let fake = FakeGit::new()
            .fail_once(&["remote", "get-url"], "error: No such remote 'origin'")
            .on(&["remote", "get-url"], "https://example.com/r.git")
            .on(&["symbolic-ref"], "main");
        let smooth = app(&fake, false);

        smooth.sync(Some("https://example.com/r.git"))?;

        assert!(fake.called("remote add origin https://example.com/r.git"));
        assert!(fake.called("push -u origin main"));
        Ok(())
    }

    #[test]
    fn test_sync_without_remote_is_distinguishable() {
        let fake = FakeGit::new().fail(&["remote", "get-url"], "error: No such remote 'origin'");
        let smooth = app(&fake, false);

        assert!(smooth.sync(None).unwrap_err().is_no_remote());
    }

    #[test]
    fn test_restore_backup_rejects_non_backup_names() {
        let fake = FakeGit::new();
        let smooth = app(&fake, false);

        assert!(matches!(
            smooth.restore_backup("main"),
            Err(SmoothError::BackupNotFound { .. })
        ));
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn test_set_config_persists() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.json");
        let fake = FakeGit::new();
        let mut smooth = Smooth::new(GitRepo::with_runner(&fake, "/nowhere"), Config::default(), path.clone());

        smooth.set_config(ConfigPatch::from_setting("experiments", "true")?)?;

        assert!(smooth.config().experiments_enabled);
        assert!(Config::load_from(&path)?.experiments_enabled);
        Ok(())
    }
}
