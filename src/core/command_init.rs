//! Centralized setup shared by every command.
//!
//! [`CommandInit`] opens the repository in the current directory, loads the
//! config and builds the themed [`Printer`]. Commands receive the resulting
//! [`CommandContext`] instead of repeating those steps.
//!
//! # Initialization Steps
//! 1. **Git repository validation**: the working directory must be inside a repository
//! 2. **Config loading**: from the override directory or the per-user default
//! 3. **Theme**: chosen once from the loaded config

use crate::core::{
    app::Smooth,
    args_parser::ArgsParser,
    error::{Result, SmoothError},
    output::Printer,
    runner::{GitRunner, SystemGit},
    state::FileChange,
};
use std::env;
use std::path::Path;

pub struct CommandContext<R: GitRunner = SystemGit> {
    pub app: Smooth<R>,
    pub printer: Printer,
}

pub struct CommandInit;

impl CommandInit {
    pub fn initialize(config_dir: Option<&Path>) -> Result<CommandContext> {
        let current_dir = env::current_dir()?;
        let app = Smooth::open(&current_dir, config_dir)?;
        let printer = Printer::new(app.theme());

        log::debug!(
            "Initialized in {} with theme {}",
            app.repo().workdir().display(),
            app.theme().id
        );

        Ok(CommandContext { app, printer })
    }
}

impl<R: GitRunner> CommandContext<R> {
    pub fn new(app: Smooth<R>) -> Self {
        let printer = Printer::new(app.theme());
        Self { app, printer }
    }

    /// Resolve index arguments against the current list of changed files
    pub fn select_files(&self, args: &[String]) -> Result<Vec<FileChange>> {
        let files = self.app.changed_files()?;
        if files.is_empty() {
            return Err(SmoothError::NothingToSelect);
        }
        Ok(ArgsParser::select(args, &files)?.into_iter().cloned().collect())
    }

    /// Print the changed files as a numbered list, returning them
    pub fn list_files(&self) -> Result<Vec<FileChange>> {
        let files = self.app.changed_files()?;
        for (i, file) in files.iter().enumerate() {
            println!("{}", self.printer.file_line(i + 1, file.kind, &file.path, ""));
        }
        Ok(files)
    }
}
