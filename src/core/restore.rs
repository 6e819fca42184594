//! Restoring earlier versions without losing the current one.
//!
//! Every destructive reset is preceded by a backup branch at HEAD named
//! `backup/<branch>/<timestamp>`. If the backup cannot be created the reset is
//! never attempted. Old backups beyond the configured limit are trimmed
//! best-effort afterwards.

use crate::core::{
    error::{Result, SmoothError},
    git::GitRepo,
    naming::backup_branch_name,
    runner::GitRunner,
};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrimReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreReport {
    pub backup_name: String,
    pub target: String,
    pub trim: TrimReport,
}

/// Create a backup branch at HEAD for the current branch and return its name
pub fn create_backup<R: GitRunner>(repo: &GitRepo<R>, now: NaiveDateTime) -> Result<String> {
    let branch = repo.current_branch()?;
    let name = backup_branch_name(&branch, now);
    repo.branch_at_head(&name)?;
    log::info!("Created backup {name}");
    Ok(name)
}

/// Delete the oldest backups of `branch` so that at most `max_backups` remain.
///
/// Individual deletions may fail; they are logged and the rest still run.
pub fn trim_backups<R: GitRunner>(
    repo: &GitRepo<R>,
    branch: &str,
    max_backups: usize,
) -> Result<TrimReport> {
    let mut report = TrimReport::default();

    for backup in repo.list_backups(branch)?.into_iter().skip(max_backups.max(1)) {
        match repo.delete_branch(&backup.name) {
            Ok(()) => {
                log::debug!("Trimmed old backup {}", backup.name);
                report.deleted.push(backup.name);
            }
            Err(e) => {
                log::warn!("Could not delete old backup {}: {e}", backup.name);
                report.failed.push(backup.name);
            }
        }
    }

    Ok(report)
}

/// Back up HEAD, trim old backups, then hard-reset to `commit`
pub fn restore_to_commit<R: GitRunner>(
    repo: &GitRepo<R>,
    commit: &str,
    max_backups: usize,
    now: NaiveDateTime,
) -> Result<RestoreReport> {
    let branch = repo.current_branch()?;
    let backup_name = create_backup(repo, now)?;

    let trim = trim_backups(repo, &branch, max_backups).unwrap_or_else(|e| {
        log::warn!("Could not list backups to trim: {e}");
        TrimReport::default()
    });

    repo.reset_hard(commit)?;
    log::info!("Restored {branch} to {commit}");

    Ok(RestoreReport {
        backup_name,
        target: commit.to_string(),
        trim,
    })
}

/// Hard-reset the current branch to an existing backup branch
pub fn restore_backup<R: GitRunner>(repo: &GitRepo<R>, name: &str) -> Result<()> {
    if !repo.branch_exists(name)? {
        return Err(SmoothError::backup_not_found(name));
    }

    repo.reset_hard(name)?;
    log::info!("Restored backup {name}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse::FIELD_SEP, runner::fake::FakeGit};
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn backup_refs(stamps: &[&str]) -> String {
        stamps
            .iter()
            .map(|s| format!("backup/main/{s}{FIELD_SEP} {FIELD_SEP}abc1234{FIELD_SEP}work"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_backup_failure_prevents_reset() {
        let fake = FakeGit::new()
            .on(&["symbolic-ref"], "main")
            .fail(&["branch"], "fatal: a branch named 'backup/main/20240501-120000' already exists");
        let repo = GitRepo::with_runner(&fake, "/nowhere");

        let result = restore_to_commit(&repo, "abc1234", 10, fixed_time());

        assert!(result.is_err());
        assert!(!fake.called("reset"));
    }

    #[test]
    fn test_restore_creates_backup_before_reset() -> Result<()> {
        let fake = FakeGit::new().on(&["symbolic-ref"], "main");
        let repo = GitRepo::with_runner(&fake, "/nowhere");

        let report = restore_to_commit(&repo, "abc1234", 10, fixed_time())?;

        assert_eq!(report.backup_name, "backup/main/20240501-120000");
        let calls = fake.calls();
        let backup_at = calls
            .iter()
            .position(|c| c == "branch backup/main/20240501-120000")
            .unwrap();
        let reset_at = calls.iter().position(|c| c == "reset --hard abc1234").unwrap();
        assert!(backup_at < reset_at);
        Ok(())
    }

    #[test]
    fn test_trim_deletes_only_the_oldest() -> Result<()> {
        let fake = FakeGit::new().on(
            &["for-each-ref"],
            &backup_refs(&[
                "20240103-000000",
                "20240101-000000",
                "20240105-000000",
                "20240102-000000",
                "20240104-000000",
            ]),
        );
        let repo = GitRepo::with_runner(&fake, "/nowhere");

        let report = trim_backups(&repo, "main", 3)?;

        assert_eq!(
            report.deleted,
            vec!["backup/main/20240102-000000", "backup/main/20240101-000000"]
        );
        assert!(report.failed.is_empty());
        Ok(())
    }

    #[test]
    fn test_trim_continues_past_failures() -> Result<()> {
        let fake = FakeGit::new()
            .on(
                &["for-each-ref"],
                &backup_refs(&["20240104-000000", "20240103-000000", "20240102-000000", "20240101-000000"]),
            )
            .fail(&["branch", "-D", "backup/main/20240103-000000"], "locked");
        let repo = GitRepo::with_runner(&fake, "/nowhere");

        let report = trim_backups(&repo, "main", 1)?;

        assert_eq!(report.failed, vec!["backup/main/20240103-000000"]);
        assert_eq!(
            report.deleted,
            vec!["backup/main/20240102-000000", "backup/main/20240101-000000"]
        );
        Ok(())
    }

    #[test]
    fn test_trim_under_limit_deletes_nothing() -> Result<()> {
        let fake = FakeGit::new().on(&["for-each-ref"], &backup_refs(&["20240101-000000"]));
        let repo = GitRepo::with_runner(&fake, "/nowhere");

        let report = trim_backups(&repo, "main", 10)?;

        assert!(report.deleted.is_empty());
        assert!(!fake.called("branch -D"));
        Ok(())
    }

    #[test]
    fn test_restore_backup_requires_existing_branch() {
        let fake = FakeGit::new().on(&["for-each-ref"], &backup_refs(&["20240101-000000"]));
        let repo = GitRepo::with_runner(&fake, "/nowhere");

        assert!(matches!(
            restore_backup(&repo, "backup/main/20990101-000000"),
            Err(SmoothError::BackupNotFound { .. })
        ));
        assert!(!fake.called("reset"));

        restore_backup(&repo, "backup/main/20240101-000000").unwrap();
        assert!(fake.called("reset --hard backup/main/20240101-000000"));
    }
}
