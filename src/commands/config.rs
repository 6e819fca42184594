use crate::core::{
    command_init::CommandContext,
    config::{ConfigKey, ConfigPatch},
    error::Result,
    output::Printer,
    runner::GitRunner,
};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show every setting
    List,

    /// Show one setting
    Get { key: String },

    /// Change a setting, e.g. `smooth config set experiments on`
    Set { key: String, value: String },
}

pub fn execute_config<R: GitRunner>(
    ctx: &mut CommandContext<R>,
    command: Option<ConfigCommand>,
) -> Result<()> {
    match command.unwrap_or(ConfigCommand::List) {
        ConfigCommand::List => {
            print_settings(ctx);
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let key = ConfigKey::parse(&key)?;
            println!("{}", ctx.app.config().get(key));
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            set_value(ctx, &key, &value)?;
            Ok(())
        }
    }
}

/// Validate, persist and apply one setting; the printer picks up a new theme immediately
pub fn set_value<R: GitRunner>(ctx: &mut CommandContext<R>, key: &str, value: &str) -> Result<()> {
    let patch = ConfigPatch::from_setting(key, value)?;
    let key = ConfigKey::parse(key)?;

    let updated = ctx.app.set_config(patch)?.get(key);
    ctx.printer = Printer::new(ctx.app.theme());

    ctx.printer
        .success(&format!("{} is now {updated}", key.name()));
    println!();
    Ok(())
}

pub fn print_settings<R: GitRunner>(ctx: &CommandContext<R>) {
    let theme = ctx.printer.theme();
    ctx.printer.section_header("Settings");
    for (key, value) in ctx.app.config().entries() {
        println!("  {:<12} {}", key.name(), theme.accent(&value));
    }
    println!();
    ctx.printer.hint(&format!(
        "Stored in {}",
        ctx.app.config_path().display()
    ));
}
