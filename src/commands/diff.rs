use crate::core::{
    command_init::CommandContext,
    error::Result,
    runner::GitRunner,
    state::DiffSummary,
};

/// Show per-file diffs for the given indices, or a line-count summary without any
pub fn execute_diff<R: GitRunner>(ctx: &CommandContext<R>, indices: Vec<String>) -> Result<()> {
    if indices.is_empty() {
        let summary = ctx.app.uncommitted_diff_stat()?;
        if summary.is_empty() {
            ctx.printer.info("Nothing changed since your last save.");
            return Ok(());
        }
        ctx.printer.section_header("Unsaved changes");
        print_summary(ctx, &summary);
        ctx.printer.hint("\nRun `smooth diff <index>` to see a file's changes");
        return Ok(());
    }

    let files = ctx.select_files(&indices)?;
    let theme = ctx.printer.theme();

    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if files.len() > 1 {
            println!("{}", theme.accent(&format!("═══ {} ═══", file.path)));
        }
        ctx.printer.diff(&ctx.app.file_diff(&file.path)?);
    }

    Ok(())
}

/// `+added -deleted path` lines followed by the totals
pub fn print_summary<R: GitRunner>(ctx: &CommandContext<R>, summary: &DiffSummary) {
    let theme = ctx.printer.theme();

    for stat in &summary.files {
        let counts = if stat.is_binary {
            format!("{:>13}", "binary")
        } else {
            format!("{:>6} {:>6}", format!("+{}", stat.additions), format!("-{}", stat.deletions))
        };
        let marker = if stat.is_untracked { " (new)" } else { "" };
        println!("  {} {}{}", theme.muted(&counts), stat.path, theme.muted(marker));
    }

    println!(
        "\n  {} file(s), {} {}",
        summary.files.len(),
        theme.success(&format!("+{}", summary.total_added)),
        theme.error(&format!("-{}", summary.total_deleted))
    );
}
