use clap::{Parser, Subcommand};
use env_logger::Env;
use smooth::commands::*;
use smooth::core::{
    command_init::{CommandContext, CommandInit},
    error::{Result, SmoothError},
    output::Printer,
};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "smooth")]
#[command(about = "Save, restore and experiment without learning git")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Directory holding config.json (defaults to the per-user config directory)
    #[arg(long, global = true, env = "SMOOTH_CONFIG_DIR", value_name = "DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show what changed since the last save
    Status,
    /// Save your changes, reviewing each file unless flags are given
    Save(SaveArgs),
    /// Show changes for files by index (e.g. "1 3-5,8"), or a summary
    Diff {
        /// File indices to diff
        indices: Vec<String>,
    },
    /// List recent saves
    Log {
        /// How many saves to show
        #[arg(short = 'n', long, default_value_t = DEFAULT_LOG_LIMIT)]
        limit: usize,
    },
    /// Go back to an earlier save (a backup of the current state is kept)
    Restore(RestoreArgs),
    /// List, restore or delete backups made by restore
    Backups(BackupsArgs),
    /// Try something out on the side
    Experiment {
        #[command(subcommand)]
        command: Option<ExperimentCommand>,
    },
    /// Stop tracking files matching a pattern
    Ignore {
        /// Pattern to add to .gitignore, e.g. "*.log"
        pattern: String,
    },
    /// Upload your saves to the remote
    Sync {
        /// Remote URL to use when none is set up yet
        #[arg(long, value_name = "URL")]
        remote: Option<String>,
    },
    /// Show or change settings
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommand>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let mut ctx = match CommandInit::initialize(cli.config_dir.as_deref()) {
        Ok(ctx) => ctx,
        Err(SmoothError::NotInGitRepo) => {
            let printer = Printer::default();
            printer.error("Not in a git repository");
            printer.hint("Run `git init` here to start tracking this folder");
            process::exit(1);
        }
        Err(e) => {
            Printer::default().error(&e.to_string());
            process::exit(1);
        }
    };

    if let Err(e) = run(&mut ctx, cli.command) {
        log::debug!("Command failed: {e:?}");
        ctx.printer.error(&e.to_string());
        process::exit(1);
    }
}

fn run(ctx: &mut CommandContext, command: Option<Commands>) -> Result<()> {
    let Some(command) = command else {
        return execute_menu(ctx);
    };

    match command {
        Commands::Status => execute_status(ctx),
        Commands::Save(args) => execute_save(ctx, args),
        Commands::Diff { indices } => execute_diff(ctx, indices),
        Commands::Log { limit } => execute_log(ctx, limit),
        Commands::Restore(args) => execute_restore(ctx, args),
        Commands::Backups(args) => execute_backups(ctx, args),
        Commands::Experiment { command } => execute_experiment(ctx, command),
        Commands::Ignore { pattern } => execute_ignore(ctx, &pattern),
        Commands::Sync { remote } => execute_sync(ctx, remote.as_deref()),
        Commands::Config { command } => execute_config(ctx, command),
    }
}
