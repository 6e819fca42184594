use crate::core::{
    command_init::CommandContext,
    error::Result,
    naming::experiment_label,
    runner::GitRunner,
    state::RepoStatus,
};

pub fn execute_status<R: GitRunner>(ctx: &CommandContext<R>) -> Result<()> {
    let status = ctx.app.status()?;
    print_header(ctx, &status);

    if !status.has_changes {
        ctx.printer.info("Nothing changed since your last save.");
        return Ok(());
    }

    ctx.printer
        .section_header(&format!("Changes ({})", status.changed_files));
    ctx.list_files()?;

    let stats = ctx.app.uncommitted_diff_stat()?;
    if !stats.is_empty() {
        println!(
            "\n  {} {}",
            ctx.printer.theme().success(&format!("+{}", stats.total_added)),
            ctx.printer.theme().error(&format!("-{}", stats.total_deleted)),
        );
    }
    println!();
    Ok(())
}

/// Branch, last save and remote, as shown above every listing
pub fn print_header<R: GitRunner>(ctx: &CommandContext<R>, status: &RepoStatus) {
    let theme = ctx.printer.theme();

    let branch = if status.on_experiment {
        format!(
            "{} {}",
            theme.warning("experiment"),
            theme.accent(experiment_label(&status.branch))
        )
    } else {
        theme.accent(&status.branch).to_string()
    };
    println!("\n{} {}", theme.muted("On"), branch);

    match &status.last_commit {
        Some(commit) => println!(
            "{} {} {}",
            theme.muted("Last save"),
            commit.message,
            theme.muted(&format!("({})", commit.relative_time))
        ),
        None => println!("{}", theme.muted("No saves yet")),
    }

    if let Some(url) = &status.remote_url {
        println!("{} {}", theme.muted("Syncs to"), url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        app::Smooth, config::Config, git::GitRepo, runner::fake::FakeGit,
    };
    use std::path::PathBuf;

    fn context(fake: &FakeGit) -> CommandContext<&FakeGit> {
        let repo = GitRepo::with_runner(fake, "/nowhere");
        CommandContext::new(Smooth::new(repo, Config::default(), PathBuf::from("/nowhere/c.json")))
    }

    #[test]
    fn test_status_clean_tree() -> Result<()> {
        let fake = FakeGit::new().on(&["symbolic-ref"], "main");
        execute_status(&context(&fake))?;
        assert!(!fake.called("diff --numstat"));
        Ok(())
    }

    #[test]
    fn test_status_with_changes_reads_stats() -> Result<()> {
        let fake = FakeGit::new()
            .on(&["symbolic-ref"], "main")
            .on(&["status"], " M a.txt\n")
            .on(&["diff", "--numstat"], "3\t1\ta.txt");
        execute_status(&context(&fake))?;
        assert!(fake.called("diff --numstat HEAD"));
        Ok(())
    }
}
