//! Color themes for terminal output.
//!
//! A [`Theme`] is an immutable palette chosen once from the configured theme id
//! and handed to the [`Printer`](crate::core::output::Printer). Nothing here is
//! global, so two printers with different themes can coexist.
//!
//! # Color Scheme
//! Every theme maps change kinds the same way the status listing reads them:
//! added, modified, deleted and renamed each get their own color, except in
//! `mono`, which prints plain text.

use crate::core::git_status::ChangeKind;
use colored::{Color, ColoredString, Colorize};

pub const DEFAULT_THEME: &str = "coral";
pub const THEME_IDS: &[&str] = &["coral", "ocean", "forest", "mono"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    accent: Option<Color>,
    success: Option<Color>,
    warning: Option<Color>,
    error: Option<Color>,
    muted: Option<Color>,
    added: Option<Color>,
    modified: Option<Color>,
    deleted: Option<Color>,
    renamed: Option<Color>,
}

const CORAL: Theme = Theme {
    id: "coral",
    accent: Some(Color::TrueColor {
        r: 255,
        g: 127,
        b: 80,
    }),
    success: Some(Color::Green),
    warning: Some(Color::Yellow),
    error: Some(Color::Red),
    muted: Some(Color::BrightBlack),
    added: Some(Color::Green),
    modified: Some(Color::Yellow),
    deleted: Some(Color::Red),
    renamed: Some(Color::Blue),
};

const OCEAN: Theme = Theme {
    id: "ocean",
    accent: Some(Color::Cyan),
    success: Some(Color::BrightCyan),
    warning: Some(Color::BrightYellow),
    error: Some(Color::BrightRed),
    muted: Some(Color::BrightBlack),
    added: Some(Color::BrightCyan),
    modified: Some(Color::BrightBlue),
    deleted: Some(Color::BrightRed),
    renamed: Some(Color::Magenta),
};

const FOREST: Theme = Theme {
    id: "forest",
    accent: Some(Color::Green),
    success: Some(Color::BrightGreen),
    warning: Some(Color::Yellow),
    error: Some(Color::Red),
    muted: Some(Color::BrightBlack),
    added: Some(Color::BrightGreen),
    modified: Some(Color::Yellow),
    deleted: Some(Color::Red),
    renamed: Some(Color::Cyan),
};

const MONO: Theme = Theme {
    id: "mono",
    accent: None,
    success: None,
    warning: None,
    error: None,
    muted: None,
    added: None,
    modified: None,
    deleted: None,
    renamed: None,
};

impl Theme {
    /// Look up a theme by id; unknown ids fall back to coral
    pub fn from_id(id: &str) -> Theme {
        match id {
            "ocean" => OCEAN,
            "forest" => FOREST,
            "mono" => MONO,
            "coral" => CORAL,
            other => {
                log::debug!("Unknown theme '{other}', using {DEFAULT_THEME}");
                CORAL
            }
        }
    }

    pub fn is_known(id: &str) -> bool {
        THEME_IDS.contains(&id)
    }

    fn paint(text: &str, color: Option<Color>) -> ColoredString {
        match color {
            Some(color) => text.color(color),
            None => text.normal(),
        }
    }

    pub fn accent(&self, text: &str) -> ColoredString {
        Self::paint(text, self.accent)
    }

    pub fn success(&self, text: &str) -> ColoredString {
        Self::paint(text, self.success)
    }

    pub fn warning(&self, text: &str) -> ColoredString {
        Self::paint(text, self.warning)
    }

    pub fn error(&self, text: &str) -> ColoredString {
        Self::paint(text, self.error)
    }

    pub fn muted(&self, text: &str) -> ColoredString {
        Self::paint(text, self.muted)
    }

    /// Color text the way its change kind is shown in listings
    pub fn kind(&self, kind: ChangeKind, text: &str) -> ColoredString {
        let color = match kind {
            ChangeKind::Added => self.added,
            ChangeKind::Modified => self.modified,
            ChangeKind::Deleted => self.deleted,
            ChangeKind::Renamed => self.renamed,
        };
        Self::paint(text, color)
    }
}

impl Default for Theme {
    fn default() -> Self {
        CORAL
    }
}
