use crate::commands::{
    diff::print_summary,
    history::{print_commits, DEFAULT_LOG_LIMIT},
};
use crate::core::{
    command_init::CommandContext,
    error::Result,
    index_parser::IndexParser,
    restore::RestoreReport,
    runner::GitRunner,
    state::CommitInfo,
};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct RestoreArgs {
    /// Index of the save to go back to, as shown by `smooth log`
    pub index: Option<String>,

    /// Restore an exact commit instead of an index
    #[arg(long, conflicts_with = "index")]
    pub commit: Option<String>,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub fn execute_restore<R: GitRunner>(ctx: &CommandContext<R>, args: RestoreArgs) -> Result<()> {
    let (target, label) = match args.commit {
        Some(commit) => (commit.clone(), commit),
        None => match pick_commit(ctx, args.index.as_deref())? {
            Some(commit) => (
                commit.full_hash.clone(),
                format!("{} {}", commit.short_hash, commit.message),
            ),
            None => return Ok(()),
        },
    };

    if !confirm_discard(ctx, &format!("Go back to {label}?"), args.yes)? {
        ctx.printer.info("Restore cancelled.");
        return Ok(());
    }

    let report = ctx.app.restore(&target)?;
    print_restore_report(ctx, &label, &report);
    Ok(())
}

/// Resolve `index` against the recent history, prompting when it is missing
fn pick_commit<R: GitRunner>(ctx: &CommandContext<R>, index: Option<&str>) -> Result<Option<CommitInfo>> {
    let commits = ctx.app.commit_history(DEFAULT_LOG_LIMIT)?;

    let input = match index {
        Some(index) => index.to_string(),
        None => {
            if commits.is_empty() {
                ctx.printer.info("No saves yet.");
                return Ok(None);
            }
            ctx.printer.section_header("Choose a save to go back to");
            print_commits(ctx, &commits);
            match ctx.printer.prompt("Index:")? {
                Some(input) if !input.is_empty() => input,
                _ => return Ok(None),
            }
        }
    };

    let chosen = IndexParser::parse_one(&input, commits.len())?;
    Ok(commits.into_iter().nth(chosen - 1))
}

/// Warn about unsaved work that a hard reset would drop, then ask unless `yes`
pub fn confirm_discard<R: GitRunner>(ctx: &CommandContext<R>, question: &str, yes: bool) -> Result<bool> {
    let unsaved = ctx.app.uncommitted_diff_stat()?;
    if !unsaved.is_empty() {
        ctx.printer
            .warning("These unsaved changes will be lost (a backup keeps only saved work):");
        println!();
        print_summary(ctx, &unsaved);
    }

    if yes {
        return Ok(true);
    }
    ctx.printer.confirm(question)
}

fn print_restore_report<R: GitRunner>(ctx: &CommandContext<R>, label: &str, report: &RestoreReport) {
    ctx.printer.success(&format!("Restored {label}"));
    ctx.printer.hint(&format!(
        "  Your previous state is kept as {}",
        report.backup_name
    ));

    if !report.trim.deleted.is_empty() {
        ctx.printer.hint(&format!(
            "  Removed {} old backup(s)",
            report.trim.deleted.len()
        ));
    }
    for name in &report.trim.failed {
        ctx.printer
            .warning(&format!("Could not remove old backup {name}"));
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        app::Smooth, config::Config, error::SmoothError, git::GitRepo, parse::FIELD_SEP,
        runner::fake::FakeGit,
    };
    use std::path::PathBuf;

    fn context(fake: &FakeGit) -> CommandContext<&FakeGit> {
        let repo = GitRepo::with_runner(fake, "/nowhere");
        CommandContext::new(Smooth::new(repo, Config::default(), PathBuf::from("/nowhere/c.json")))
    }

    fn history() -> String {
        [
            format!("bbb2222{FIELD_SEP}Second{FIELD_SEP}1 hour ago{FIELD_SEP}bbb2222full"),
            format!("aaa1111{FIELD_SEP}First{FIELD_SEP}2 hours ago{FIELD_SEP}aaa1111full"),
        ]
        .join("\n")
    }

    #[test]
    fn test_restore_by_index_resets_to_full_hash() -> Result<()> {
        let fake = FakeGit::new()
            .on(&["log"], &history())
            .on(&["symbolic-ref"], "main");
        let args = RestoreArgs {
            index: Some("2".to_string()),
            yes: true,
            ..Default::default()
        };

        execute_restore(&context(&fake), args)?;

        assert!(fake.called("branch backup/main/"));
        assert!(fake.called("reset --hard aaa1111full"));
        Ok(())
    }

    #[test]
    fn test_restore_index_out_of_range() {
        let fake = FakeGit::new().on(&["log"], &history());
        let args = RestoreArgs {
            index: Some("3".to_string()),
            yes: true,
            ..Default::default()
        };

        let result = execute_restore(&context(&fake), args);

        assert!(matches!(result, Err(SmoothError::IndexOutOfRange { index: 3, max: 2 })));
        assert!(!fake.called("reset"));
    }

    #[test]
    fn test_restore_by_commit() -> Result<()> {
        let fake = FakeGit::new().on(&["symbolic-ref"], "main");
        let args = RestoreArgs {
            commit: Some("deadbeef".to_string()),
            yes: true,
            ..Default::default()
        };

        execute_restore(&context(&fake), args)?;

        assert!(fake.called("reset --hard deadbeef"));
        assert!(!fake.called("log"));
        Ok(())
    }
}
