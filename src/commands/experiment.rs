use crate::core::{
    command_init::CommandContext,
    error::{Result, SmoothError},
    experiment::StashOutcome,
    naming::experiment_label,
    runner::GitRunner,
    state::BranchInfo,
};
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ExperimentCommand {
    /// List experiments, newest first
    List,

    /// Start a new experiment from where you are now
    New {
        /// A short name, e.g. "dark mode"
        name: String,
    },

    /// Merge the current experiment into main
    Keep,

    /// Throw away the current experiment and go back to main
    Abandon {
        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Switch to another experiment (by index, name or full branch) or back to main
    Switch { target: String },
}

pub fn execute_experiment<R: GitRunner>(
    ctx: &CommandContext<R>,
    command: Option<ExperimentCommand>,
) -> Result<()> {
    match command.unwrap_or(ExperimentCommand::List) {
        ExperimentCommand::List => list_experiments(ctx),
        ExperimentCommand::New { name } => {
            let branch = ctx.app.create_experiment(&name)?;
            ctx.printer
                .success(&format!("Started experiment {}", experiment_label(&branch)));
            ctx.printer.hint(&format!("  Working on {branch}"));
            println!();
            Ok(())
        }
        ExperimentCommand::Keep => {
            let branch = ctx.app.keep_experiment()?;
            ctx.printer.success(&format!(
                "Kept experiment {}: its saves are now part of main",
                experiment_label(&branch)
            ));
            ctx.printer
                .hint(&format!("  The branch {branch} is still there if you need it"));
            println!();
            Ok(())
        }
        ExperimentCommand::Abandon { yes } => {
            if !yes && !ctx.printer.confirm("Abandon this experiment and everything saved on it?")? {
                ctx.printer.info("Experiment kept as is.");
                return Ok(());
            }
            let branch = ctx.app.abandon_experiment()?;
            ctx.printer
                .success(&format!("Abandoned experiment {}", experiment_label(&branch)));
            println!();
            Ok(())
        }
        ExperimentCommand::Switch { target } => switch_to(ctx, &target),
    }
}

fn list_experiments<R: GitRunner>(ctx: &CommandContext<R>) -> Result<()> {
    let experiments = ctx.app.experiments()?;
    if experiments.is_empty() {
        ctx.printer
            .info("No experiments yet. Start one with: smooth experiment new <name>");
        return Ok(());
    }

    let theme = ctx.printer.theme();
    ctx.printer.section_header("Experiments");
    for (i, experiment) in experiments.iter().enumerate() {
        let marker = if experiment.is_current { " (current)" } else { "" };
        let label = format!(
            "{}{} {}",
            theme.accent(experiment_label(&experiment.name)),
            theme.success(marker),
            theme.muted(&experiment.name)
        );
        ctx.printer.numbered(i + 1, &label);
    }
    println!();
    Ok(())
}

/// Branch named by `target`: a 1-based index, a full branch name, or a label
pub fn resolve_experiment(target: &str, experiments: &[BranchInfo]) -> Option<String> {
    let target = target.trim();

    if let Ok(index) = target.parse::<usize>() {
        if index >= 1 && index <= experiments.len() {
            return Some(experiments[index - 1].name.clone());
        }
    }

    experiments
        .iter()
        .find(|e| e.name == target)
        .or_else(|| experiments.iter().find(|e| experiment_label(&e.name) == target))
        .map(|e| e.name.clone())
}

fn switch_to<R: GitRunner>(ctx: &CommandContext<R>, target: &str) -> Result<()> {
    let experiments = ctx.app.experiments()?;
    let main = ctx.app.repo().main_branch_name()?;

    let branch = if target == main {
        main
    } else {
        resolve_experiment(target, &experiments)
            .ok_or_else(|| SmoothError::experiment_not_found(target))?
    };

    match ctx.app.switch_experiment(&branch)? {
        StashOutcome::NothingStashed => {}
        StashOutcome::Restored => ctx.printer.hint("  Your unsaved changes came along"),
        StashOutcome::StillStashed(reason) => {
            ctx.printer.warning(&format!(
                "Your changes are still in the stash ({reason}). Run `git stash pop` once you are ready."
            ));
        }
    }

    ctx.printer.success(&format!("Now on {branch}"));
    println!();
    Ok(())
}
