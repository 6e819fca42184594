use crate::core::{
    args_parser::ArgsParser,
    command_init::CommandContext,
    error::{Result, SmoothError},
    index_parser::IndexParser,
    runner::GitRunner,
    save::{FileAction, SaveReport, SaveSession, SaveState, SyncOutcome},
};
use clap::Args;
use std::collections::HashMap;

#[derive(Args, Debug, Default)]
pub struct SaveArgs {
    /// Describe what this save contains
    #[arg(short, long)]
    pub message: Option<String>,

    /// Discard changes to these files (e.g. "1 3-5")
    #[arg(long, num_args = 1.., value_name = "INDEX")]
    pub revert: Vec<String>,

    /// Leave these files alone this time
    #[arg(long, num_args = 1.., value_name = "INDEX")]
    pub skip: Vec<String>,

    /// Add these files to .gitignore
    #[arg(long, num_args = 1.., value_name = "INDEX")]
    pub ignore: Vec<String>,
}

impl SaveArgs {
    fn has_actions(&self) -> bool {
        !self.revert.is_empty() || !self.skip.is_empty() || !self.ignore.is_empty()
    }
}

/// One line typed during interactive review
#[derive(Debug, PartialEq, Eq)]
pub enum ReviewInput {
    Continue,
    Quit,
    Set(Vec<usize>, FileAction),
    Cycle(Vec<usize>, bool),
}

pub fn parse_review_input(line: &str) -> Result<ReviewInput> {
    let line = line.trim();
    let mut words = line.split_whitespace();

    let first = match words.next() {
        None => return Ok(ReviewInput::Continue),
        Some(word) => word.to_ascii_lowercase(),
    };
    let rest: Vec<&str> = words.collect();

    match first.as_str() {
        "q" | "quit" if rest.is_empty() => return Ok(ReviewInput::Quit),
        "n" | "next" => return Ok(ReviewInput::Cycle(IndexParser::parse(&rest.join(" "))?, true)),
        "p" | "prev" => return Ok(ReviewInput::Cycle(IndexParser::parse(&rest.join(" "))?, false)),
        _ => {}
    }

    let mut tokens: Vec<&str> = line.split_whitespace().collect();
    let action = tokens
        .pop()
        .and_then(FileAction::parse)
        .ok_or_else(|| SmoothError::invalid_index_format(line))?;

    let indices = IndexParser::parse(&tokens.join(" "))?;
    if indices.is_empty() {
        return Err(SmoothError::NoValidIndices);
    }
    Ok(ReviewInput::Set(indices, action))
}

pub fn execute_save<R: GitRunner>(ctx: &CommandContext<R>, args: SaveArgs) -> Result<()> {
    let mut session = ctx.app.review()?;
    if session.state() == SaveState::NoChanges {
        ctx.printer.info("Nothing to save: no changes since your last save.");
        return Ok(());
    }

    if args.message.is_none() && !args.has_actions() {
        return review_interactively(ctx, session);
    }

    apply_flags(&mut session, &args)?;
    let report = ctx.app.execute_review(&mut session, args.message.as_deref())?;
    print_report(ctx, &report);
    Ok(())
}

/// Apply `--revert/--skip/--ignore`; an index may only get one action
fn apply_flags(session: &mut SaveSession, args: &SaveArgs) -> Result<()> {
    let count = session.files().len();
    let mut assigned: HashMap<usize, FileAction> = HashMap::new();

    for (values, action) in [
        (&args.revert, FileAction::Revert),
        (&args.skip, FileAction::SkipOnce),
        (&args.ignore, FileAction::Ignore),
    ] {
        if values.is_empty() {
            continue;
        }
        for index in ArgsParser::parse_indices(values, count)? {
            if assigned.insert(index, action).is_some() {
                return Err(SmoothError::ConflictingActions { index });
            }
            session.set_action(index - 1, action)?;
        }
    }

    Ok(())
}

fn print_review<R: GitRunner>(ctx: &CommandContext<R>, session: &SaveSession) {
    let theme = ctx.printer.theme();
    ctx.printer.section_header("Review your changes");

    for (i, item) in session.files().iter().enumerate() {
        let tag = match item.action {
            FileAction::Save => theme.success("save"),
            FileAction::Revert => theme.error("revert"),
            FileAction::SkipOnce => theme.muted("skip"),
            FileAction::Ignore => theme.warning("ignore"),
        };
        let suffix = format!("  → {tag}");
        println!(
            "{}",
            ctx.printer
                .file_line(i + 1, item.change.kind, &item.change.path, &suffix)
        );
    }

    let counts = session.counts();
    println!(
        "\n  {}",
        theme.muted(&format!(
            "{} to save, {} to revert, {} skipped, {} to ignore",
            counts.save, counts.revert, counts.skip, counts.ignore
        ))
    );
    ctx.printer.hint(
        "  Type '<indices> <s|r|k|i>' to set (save, revert, skip, ignore), 'n <indices>' to cycle, Enter to continue, q to quit",
    );
}

fn review_interactively<R: GitRunner>(ctx: &CommandContext<R>, mut session: SaveSession) -> Result<()> {
    loop {
        print_review(ctx, &session);

        let Some(line) = ctx.printer.prompt(">")? else {
            ctx.printer.info("Save cancelled.");
            return Ok(());
        };

        let input = match parse_review_input(&line) {
            Ok(input) => input,
            Err(e) => {
                ctx.printer.error(&e.to_string());
                continue;
            }
        };

        match input {
            ReviewInput::Quit => {
                ctx.printer.info("Save cancelled.");
                return Ok(());
            }
            ReviewInput::Set(indices, action) => {
                if let Err(e) = IndexParser::validate(&indices, session.files().len()) {
                    ctx.printer.error(&e.to_string());
                    continue;
                }
                for index in indices {
                    session.set_action(index - 1, action)?;
                }
            }
            ReviewInput::Cycle(indices, forward) => {
                if let Err(e) = IndexParser::validate(&indices, session.files().len()) {
                    ctx.printer.error(&e.to_string());
                    continue;
                }
                for index in indices {
                    session.cycle(index - 1, forward)?;
                }
            }
            ReviewInput::Continue => match session.proceed() {
                Ok(SaveState::Input) => {
                    let Some(message) = ctx.printer.prompt("Describe this save:")? else {
                        ctx.printer.info("Save cancelled.");
                        return Ok(());
                    };
                    if message.is_empty() {
                        ctx.printer.error(&SmoothError::CommitMessageRequired.to_string());
                        session.back();
                        continue;
                    }
                    let report = ctx.app.execute_review(&mut session, Some(&message))?;
                    print_report(ctx, &report);
                    return Ok(());
                }
                Ok(_) => {
                    let report = ctx.app.execute_review(&mut session, None)?;
                    print_report(ctx, &report);
                    return Ok(());
                }
                Err(e) => ctx.printer.error(&e.to_string()),
            },
        }
    }
}

pub fn print_report<R: GitRunner>(ctx: &CommandContext<R>, report: &SaveReport) {
    if report.committed {
        ctx.printer
            .success(&format!("Saved {} file(s)", report.saved.len()));
    }
    if !report.reverted.is_empty() {
        ctx.printer
            .success(&format!("Reverted {} file(s)", report.reverted.len()));
    }
    if !report.ignored.is_empty() {
        ctx.printer
            .success(&format!("Added {} pattern(s) to .gitignore", report.ignored.len()));
        if !report.committed {
            ctx.printer.hint("  .gitignore was updated but not saved yet");
        }
    }
    if report.skipped > 0 {
        ctx.printer
            .hint(&format!("  Skipped {} file(s)", report.skipped));
    }

    match &report.sync {
        SyncOutcome::NotAttempted => {}
        SyncOutcome::Pushed => ctx.printer.success("Synced"),
        SyncOutcome::Failed(reason) => ctx
            .printer
            .warning(&format!("Saved, but sync failed: {reason}")),
    }
    println!();
}
