use crate::core::{
    command_init::CommandContext,
    error::Result,
    runner::GitRunner,
};

/// Push the current branch, asking for a remote URL when none is set up
pub fn execute_sync<R: GitRunner>(ctx: &CommandContext<R>, remote: Option<&str>) -> Result<()> {
    match ctx.app.sync(remote) {
        Ok(()) => {}
        Err(e) if e.is_no_remote() => {
            ctx.printer.error(&e.to_string());
            let url = match ctx.printer.prompt("Remote URL (leave empty to cancel):")? {
                Some(url) if !url.is_empty() => url,
                _ => {
                    ctx.printer.info("Sync cancelled.");
                    return Ok(());
                }
            };
            ctx.app.sync(Some(&url))?;
        }
        Err(e) => return Err(e),
    }

    let target = ctx.app.repo().remote_url().unwrap_or_default();
    ctx.printer.success(&format!("Synced to {target}"));
    println!();
    Ok(())
}
