//! Experiment branch lifecycle: create, keep, abandon and switch.
//!
//! Preconditions (experiments enabled, clean tree, currently on an experiment)
//! are checked by the caller; these functions only sequence the git steps and
//! recover from a failed merge.

use crate::core::{
    error::Result,
    git::GitRepo,
    naming::experiment_branch_name,
    runner::GitRunner,
};
use chrono::NaiveDateTime;

/// What happened to uncommitted changes carried across a switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StashOutcome {
    NothingStashed,
    Restored,
    /// The pop failed; the changes are still in the stash
    StillStashed(String),
}

/// Create `experiment-<name>-<timestamp>` at HEAD and switch to it
pub fn create<R: GitRunner>(repo: &GitRepo<R>, name: &str, now: NaiveDateTime) -> Result<String> {
    let branch = experiment_branch_name(name, now)?;
    repo.create_branch(&branch)?;
    log::info!("Started experiment {branch}");
    Ok(branch)
}

/// Merge the experiment into main.
///
/// On a failed merge the merge is aborted and the experiment branch is checked
/// out again before the merge error is returned.
pub fn keep<R: GitRunner>(repo: &GitRepo<R>, experiment: &str) -> Result<()> {
    let main = repo.main_branch_name()?;
    repo.switch_branch(&main)?;

    if let Err(e) = repo.merge_branch(experiment) {
        if let Err(abort) = repo.abort_merge() {
            log::warn!("Could not abort merge: {abort}");
        }
        if let Err(back) = repo.switch_branch(experiment) {
            log::warn!("Could not switch back to {experiment}: {back}");
        }
        return Err(e);
    }

    log::info!("Merged {experiment} into {main}");
    Ok(())
}

/// Switch to main and force-delete the experiment
pub fn abandon<R: GitRunner>(repo: &GitRepo<R>, experiment: &str) -> Result<()> {
    let main = repo.main_branch_name()?;
    repo.switch_branch(&main)?;
    repo.delete_branch(experiment)?;
    log::info!("Abandoned {experiment}");
    Ok(())
}

/// Switch branches, carrying uncommitted changes across through the stash
pub fn switch<R: GitRunner>(repo: &GitRepo<R>, target: &str) -> Result<StashOutcome> {
    let stashed = if repo.has_uncommitted_changes()? {
        repo.stash()?
    } else {
        false
    };

    if let Err(e) = repo.switch_branch(target) {
        if stashed {
            if let Err(pop) = repo.stash_pop() {
                log::warn!("Could not restore stashed changes: {pop}");
            }
        }
        return Err(e);
    }

    if !stashed {
        return Ok(StashOutcome::NothingStashed);
    }

    match repo.stash_pop() {
        Ok(()) => Ok(StashOutcome::Restored),
        Err(e) => {
            log::warn!("Stash pop after switching to {target} failed: {e}");
            Ok(StashOutcome::StillStashed(e.to_string()))
        }
    }
}
