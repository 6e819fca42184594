//! Unified output formatting for consistent CLI presentation.
//!
//! Every command prints through a [`Printer`], which owns the [`Theme`] chosen
//! from configuration. Message shapes are fixed; only the colors vary.
//!
//! # Design Principles
//! - **Consistent structure**: errors, successes and warnings each have one shape
//! - **Standardized spacing**: a blank line before messages and headers
//! - **Theme-driven color**: no color is hard-coded outside [`Theme`]

use crate::core::{
    error::Result,
    git_status::ChangeKind,
    theme::Theme,
};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    theme: Theme,
}

impl Printer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Formats and prints an error message
    ///
    /// # Format
    /// ```text
    ///
    /// ✕ Error: <message>
    ///
    /// ```
    pub fn error(&self, message: &str) {
        println!("\n{} {}\n", self.theme.error("✕ Error:"), message);
    }

    /// Formats and prints a success message
    ///
    /// # Format
    /// ```text
    ///
    /// ✓ <message>
    /// ```
    pub fn success(&self, message: &str) {
        println!("\n{} {}", self.theme.success("✓"), message);
    }

    pub fn warning(&self, message: &str) {
        println!("\n{} {}", self.theme.warning("!"), message);
    }

    pub fn info(&self, message: &str) {
        println!("\n{message}\n");
    }

    /// Muted one-liner, used for hints under other messages
    pub fn hint(&self, message: &str) {
        println!("{}", self.theme.muted(message));
    }

    /// Formats and prints a section header
    ///
    /// # Format
    /// ```text
    ///
    /// <header>:
    ///
    /// ```
    pub fn section_header(&self, header: &str) {
        println!("\n{}:\n", self.theme.accent(header));
    }

    /// `[n] label`, with the index muted
    pub fn numbered(&self, index: usize, label: &str) {
        println!("  {} {}", self.theme.muted(&format!("[{index}]")), label);
    }

    /// One changed file: `[n] <kind>  <path>`, colored by kind
    pub fn file_line(&self, index: usize, kind: ChangeKind, path: &str, suffix: &str) -> String {
        format!(
            "  {} {}{}{}",
            self.theme.muted(&format!("[{index}]")),
            self.theme.kind(kind, &format!("{:<9}", kind.description())),
            self.theme.kind(kind, path),
            suffix
        )
    }

    /// Print a unified diff with additions and removals colored
    pub fn diff(&self, diff: &str) {
        for line in diff.lines() {
            let styled = if line.starts_with("+++") || line.starts_with("---") {
                self.theme.muted(line)
            } else if line.starts_with('+') {
                self.theme.success(line)
            } else if line.starts_with('-') {
                self.theme.error(line)
            } else if line.starts_with("@@") {
                self.theme.accent(line)
            } else {
                line.into()
            };
            println!("{styled}");
        }
    }

    /// Print `question` and read one trimmed line from stdin.
    ///
    /// Returns `None` once stdin is exhausted.
    pub fn prompt(&self, question: &str) -> Result<Option<String>> {
        print!("\n{} ", self.theme.accent(question));
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Yes/no prompt; anything other than `y` or `yes` is a no
    pub fn confirm(&self, question: &str) -> Result<bool> {
        let answer = self.prompt(&format!("{question} [y/N]"))?;
        Ok(answer.as_deref().is_some_and(is_yes))
    }
}

pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
