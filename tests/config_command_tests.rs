use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, repository::*};

#[cfg(test)]
mod config_command_tests {
    use super::*;

    #[test]
    fn test_config_lists_defaults() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.smooth()?
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("auto-sync"))
            .stdout(predicate::str::contains("max-backups"))
            .stdout(predicate::str::contains("coral"));

        assert!(!repo.config_file().exists());
        Ok(())
    }

    #[test]
    fn test_config_set_then_get() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.smooth()?
            .args(["config", "set", "max-backups", "3"])
            .assert()
            .success();

        repo.smooth()?
            .args(["config", "get", "max-backups"])
            .assert()
            .success()
            .stdout(predicate::str::contains("3"));

        let saved = read_file(repo.config_dir.path(), "config.json")?;
        assert!(saved.contains("\"maxBackups\": 3"));
        Ok(())
    }

    #[test]
    fn test_enabling_experiments_unlocks_them() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.smooth()?
            .args(["experiment", "list"])
            .assert()
            .failure()
            .stdout(assertions::experiments_disabled());

        repo.smooth()?
            .args(["config", "set", "experiments", "on"])
            .assert()
            .success();

        repo.smooth()?
            .args(["experiment", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No experiments yet"));
        Ok(())
    }

    #[test]
    fn test_unknown_key_is_rejected() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.smooth()?
            .args(["config", "set", "colour", "red"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Unknown setting 'colour'"));

        Ok(())
    }

    #[test]
    fn test_corrupt_config_falls_back_to_defaults() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;
        repo.write_config("{ not json")?;

        repo.smooth()?
            .args(["config", "get", "theme"])
            .assert()
            .success()
            .stdout(predicate::str::contains("coral"));

        Ok(())
    }

    #[test]
    fn test_sync_without_remote_can_be_cancelled() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.smooth_interactive()?
            .arg("sync")
            .write_stdin("\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("No remote configured"))
            .stdout(predicate::str::contains("Sync cancelled"));

        Ok(())
    }

    #[test]
    fn test_menu_quits_on_q() -> anyhow::Result<()> {
        let repo = setup_test_repo_with_initial_commit()?;

        repo.smooth_interactive()?
            .write_stdin("q\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Save changes"))
            .stdout(predicate::str::contains("Quit"));

        Ok(())
    }
}
