use crate::commands::restore::confirm_discard;
use crate::core::{
    command_init::CommandContext,
    error::Result,
    index_parser::IndexParser,
    runner::GitRunner,
    state::BackupInfo,
};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct BackupsArgs {
    /// Backup to restore (or delete with --delete)
    pub index: Option<String>,

    /// Delete the chosen backup instead of restoring it
    #[arg(long, requires = "index")]
    pub delete: bool,

    /// Don't ask for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

pub fn execute_backups<R: GitRunner>(ctx: &CommandContext<R>, args: BackupsArgs) -> Result<()> {
    let backups = ctx.app.backups()?;

    let Some(index) = args.index else {
        if backups.is_empty() {
            ctx.printer
                .info("No backups yet. One is made every time you restore.");
            return Ok(());
        }
        ctx.printer.section_header("Backups");
        print_backups(ctx, &backups);
        ctx.printer
            .hint("\nRun `smooth backups <index>` to restore one, or add --delete to remove it");
        return Ok(());
    };

    let chosen = IndexParser::parse_one(&index, backups.len())?;
    let backup = &backups[chosen - 1];

    if args.delete {
        if !args.yes && !ctx.printer.confirm(&format!("Delete backup from {}?", backup.display_time()))? {
            ctx.printer.info("Nothing deleted.");
            return Ok(());
        }
        ctx.app.delete_backup(&backup.name)?;
        ctx.printer
            .success(&format!("Deleted backup {}", backup.name));
        println!();
        return Ok(());
    }

    let question = format!("Restore the backup from {}?", backup.display_time());
    if !confirm_discard(ctx, &question, args.yes)? {
        ctx.printer.info("Restore cancelled.");
        return Ok(());
    }

    ctx.app.restore_backup(&backup.name)?;
    ctx.printer
        .success(&format!("Restored backup from {}", backup.display_time()));
    println!();
    Ok(())
}

pub fn print_backups<R: GitRunner>(ctx: &CommandContext<R>, backups: &[BackupInfo]) {
    let theme = ctx.printer.theme();
    for (i, backup) in backups.iter().enumerate() {
        let label = format!(
            "{} {} {}",
            theme.accent(&backup.display_time()),
            theme.muted(&backup.short_hash),
            backup.message
        );
        ctx.printer.numbered(i + 1, &label);
    }
}
