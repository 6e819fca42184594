use crate::core::{
    command_init::CommandContext,
    error::Result,
    runner::GitRunner,
    state::CommitInfo,
};

pub const DEFAULT_LOG_LIMIT: usize = 20;

pub fn execute_log<R: GitRunner>(ctx: &CommandContext<R>, limit: usize) -> Result<()> {
    let commits = ctx.app.commit_history(limit)?;
    if commits.is_empty() {
        ctx.printer.info("No saves yet.");
        return Ok(());
    }

    ctx.printer.section_header("Saves");
    print_commits(ctx, &commits);
    ctx.printer
        .hint("\nRun `smooth restore <index>` to go back to one of these");
    Ok(())
}

pub fn print_commits<R: GitRunner>(ctx: &CommandContext<R>, commits: &[CommitInfo]) {
    let theme = ctx.printer.theme();
    for (i, commit) in commits.iter().enumerate() {
        let label = format!(
            "{} {} {}",
            theme.accent(&commit.short_hash),
            commit.message,
            theme.muted(&format!("({})", commit.relative_time))
        );
        ctx.printer.numbered(i + 1, &label);
    }
}
