//! The interactive main menu shown when smooth runs without a subcommand.
//!
//! Each entry delegates to the same `execute_*` function the subcommand uses.
//! Errors from an entry are printed and the menu is shown again; only `q` or
//! end of input leaves the loop.

use crate::commands::{
    backups::{execute_backups, BackupsArgs},
    config::{print_settings, set_value},
    experiment::{execute_experiment, ExperimentCommand},
    restore::{execute_restore, RestoreArgs},
    save::{execute_save, SaveArgs},
    status::print_header,
    sync::execute_sync,
};
use crate::core::{
    command_init::CommandContext,
    error::Result,
    index_parser::IndexParser,
    runner::GitRunner,
    state::RepoStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Save,
    Restore,
    Keep,
    Abandon,
    Backups,
    Experiments,
    Sync,
    Settings,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Save => "Save changes",
            MenuItem::Restore => "Go back to an earlier save",
            MenuItem::Keep => "Keep this experiment",
            MenuItem::Abandon => "Abandon this experiment",
            MenuItem::Backups => "Backups",
            MenuItem::Experiments => "Experiments",
            MenuItem::Sync => "Sync",
            MenuItem::Settings => "Settings",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Entries available in the current state
pub fn menu_items(status: &RepoStatus, experiments_enabled: bool) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::Save, MenuItem::Restore];
    if experiments_enabled && status.on_experiment {
        items.push(MenuItem::Keep);
        items.push(MenuItem::Abandon);
    }
    items.push(MenuItem::Backups);
    if experiments_enabled {
        items.push(MenuItem::Experiments);
    }
    items.extend([MenuItem::Sync, MenuItem::Settings, MenuItem::Quit]);
    items
}

pub fn execute_menu<R: GitRunner>(ctx: &mut CommandContext<R>) -> Result<()> {
    loop {
        let status = ctx.app.status()?;
        print_header(ctx, &status);
        if status.has_changes {
            ctx.printer.hint(&format!(
                "{} unsaved change(s)",
                status.changed_files
            ));
        }

        let items = menu_items(&status, ctx.app.config().experiments_enabled);
        println!();
        for (i, item) in items.iter().enumerate() {
            ctx.printer.numbered(i + 1, item.label());
        }

        let Some(input) = ctx.printer.prompt("Choose:")? else {
            return Ok(());
        };
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let item = match IndexParser::parse_one(&input, items.len()) {
            Ok(index) => items[index - 1],
            Err(e) => {
                ctx.printer.error(&e.to_string());
                continue;
            }
        };
        if item == MenuItem::Quit {
            return Ok(());
        }

        if let Err(e) = run_item(ctx, item) {
            log::debug!("Menu entry {item:?} failed: {e}");
            ctx.printer.error(&e.to_string());
        }
    }
}

fn run_item<R: GitRunner>(ctx: &mut CommandContext<R>, item: MenuItem) -> Result<()> {
    match item {
        MenuItem::Save => execute_save(ctx, SaveArgs::default()),
        MenuItem::Restore => execute_restore(ctx, RestoreArgs::default()),
        MenuItem::Keep => execute_experiment(ctx, Some(ExperimentCommand::Keep)),
        MenuItem::Abandon => execute_experiment(ctx, Some(ExperimentCommand::Abandon { yes: false })),
        MenuItem::Backups => backups_menu(ctx),
        MenuItem::Experiments => experiments_menu(ctx),
        MenuItem::Sync => execute_sync(ctx, None),
        MenuItem::Settings => settings_menu(ctx),
        MenuItem::Quit => Ok(()),
    }
}

fn backups_menu<R: GitRunner>(ctx: &CommandContext<R>) -> Result<()> {
    execute_backups(ctx, BackupsArgs::default())?;
    if ctx.app.backups()?.is_empty() {
        return Ok(());
    }

    match ctx.printer.prompt("Backup to restore (Enter to go back):")? {
        Some(index) if !index.is_empty() => execute_backups(
            ctx,
            BackupsArgs {
                index: Some(index),
                ..Default::default()
            },
        ),
        _ => Ok(()),
    }
}

fn experiments_menu<R: GitRunner>(ctx: &CommandContext<R>) -> Result<()> {
    execute_experiment(ctx, Some(ExperimentCommand::List))?;

    let Some(input) = ctx
        .printer
        .prompt("'new <name>' to start one, a number or name to switch (Enter to go back):")?
    else {
        return Ok(());
    };

    if let Some(name) = input.strip_prefix("new ") {
        execute_experiment(ctx, Some(ExperimentCommand::New { name: name.to_string() }))
    } else if !input.is_empty() {
        execute_experiment(ctx, Some(ExperimentCommand::Switch { target: input }))
    } else {
        Ok(())
    }
}

fn settings_menu<R: GitRunner>(ctx: &mut CommandContext<R>) -> Result<()> {
    loop {
        print_settings(ctx);

        let Some(input) = ctx
            .printer
            .prompt("Type '<setting> <value>' to change one (Enter to go back):")?
        else {
            return Ok(());
        };
        if input.is_empty() {
            return Ok(());
        }

        match input.split_once(char::is_whitespace) {
            Some((key, value)) => {
                if let Err(e) = set_value(ctx, key, value.trim()) {
                    ctx.printer.error(&e.to_string());
                }
            }
            None => ctx
                .printer
                .error(&format!("Expected a setting and a value, e.g. 'theme ocean' (got '{input}')")),
        }
    }
}
