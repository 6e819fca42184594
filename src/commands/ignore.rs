use crate::core::{
    command_init::CommandContext,
    error::{Result, SmoothError},
    runner::GitRunner,
};

/// Append `pattern` to .gitignore without saving
pub fn execute_ignore<R: GitRunner>(ctx: &CommandContext<R>, pattern: &str) -> Result<()> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(SmoothError::EmptyPattern);
    }

    ctx.app.add_to_ignore(pattern)?;
    ctx.printer
        .success(&format!("Added '{pattern}' to .gitignore"));
    ctx.printer.hint("  Save to keep this change");
    println!();
    Ok(())
}
