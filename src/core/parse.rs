//! Parsers for git's script-friendly text output.
//!
//! Each function turns the output of one git invocation into typed values.
//! They are pure so the formats can be tested without a repository; any change
//! to git's output formatting shows up here first.

use crate::core::{
    git_status::ChangeKind,
    state::{CommitInfo, DiffStat, DiffSummary, FileChange},
};

/// Field separator used in every custom `--format` string.
///
/// ASCII unit separator: it cannot appear in ref names and is vanishingly rare
/// in commit subjects, unlike `|`.
pub const FIELD_SEP: char = '\u{1f}';

/// `git log` format producing `short|subject|relative date|full` records
pub const LOG_FORMAT: &str = "--format=%h%x1f%s%x1f%cr%x1f%H";

/// `git for-each-ref` format producing `name|head marker|short hash|subject` records
pub const REF_FORMAT: &str =
    "--format=%(refname:short)%1f%(HEAD)%1f%(objectname:short)%1f%(contents:subject)";

/// One local branch as listed by `for-each-ref`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefEntry {
    pub name: String,
    pub is_current: bool,
    pub short_hash: String,
    pub subject: String,
}

/// Parse `git status --porcelain` output into changed files.
///
/// The output must not have been trimmed: the first column is significant.
pub fn parse_porcelain(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter_map(|line| {
            let code = line.get(..2)?;
            let raw_path = line.get(3..)?;
            if raw_path.is_empty() {
                return None;
            }

            let kind = ChangeKind::from_porcelain(code);
            let path = match raw_path.split_once(" -> ") {
                Some((_, new_path)) if code.contains('R') || code.contains('C') => new_path,
                _ => raw_path,
            };

            Some(FileChange::new(kind, unquote_path(path)))
        })
        .collect()
}

/// Undo git's C-style quoting of unusual paths (`"dir/a b\303\244.txt"`)
pub fn unquote_path(path: &str) -> String {
    let inner = match path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return path.to_string(),
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.bytes().peekable();

    while let Some(b) = chars.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match chars.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'"') => bytes.push(b'"'),
            Some(b'\\') => bytes.push(b'\\'),
            Some(d @ b'0'..=b'7') => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match chars.peek() {
                        Some(&o @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(o - b'0');
                            chars.next();
                        }
                        _ => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => {
                bytes.push(b'\\');
                bytes.push(other);
            }
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Parse `git log` output produced with [`LOG_FORMAT`]
pub fn parse_log(output: &str) -> Vec<CommitInfo> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(4, FIELD_SEP);
            Some(CommitInfo {
                short_hash: parts.next()?.to_string(),
                message: parts.next()?.to_string(),
                relative_time: parts.next()?.to_string(),
                full_hash: parts.next()?.to_string(),
            })
        })
        .collect()
}

/// Parse `git for-each-ref` output produced with [`REF_FORMAT`]
pub fn parse_refs(output: &str) -> Vec<RefEntry> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.splitn(4, FIELD_SEP);
            let name = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            let head = parts.next()?;
            Some(RefEntry {
                name: name.to_string(),
                is_current: head.trim() == "*",
                short_hash: parts.next().unwrap_or_default().to_string(),
                subject: parts.next().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

/// Parse `git diff --numstat` output into `summary`.
///
/// Binary files report `-` for both counts and are flagged instead of counted.
pub fn parse_numstat(output: &str, summary: &mut DiffSummary) {
    for line in output.lines() {
        let mut parts = line.splitn(3, '\t');
        let (Some(added), Some(deleted), Some(path)) = (parts.next(), parts.next(), parts.next())
        else {
            continue;
        };

        let mut stat = DiffStat {
            path: path.to_string(),
            ..Default::default()
        };

        if added == "-" || deleted == "-" {
            stat.is_binary = true;
        } else {
            stat.additions = added.trim().parse().unwrap_or(0);
            stat.deletions = deleted.trim().parse().unwrap_or(0);
        }

        summary.push(stat);
    }
}

/// Number of lines in a file body, counting an unterminated last line
pub fn count_lines(content: &[u8]) -> usize {
    if content.is_empty() {
        return 0;
    }
    let newlines = content.iter().filter(|&&b| b == b'\n').count();
    if content.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}

/// Render an untracked file as if every line were an addition
pub fn pseudo_diff(path: &str, content: &str) -> String {
    let mut result = format!("new file: {path}\n---\n");
    for line in content.lines() {
        result.push_str("+ ");
        result.push_str(line);
        result.push('\n');
    }
    result
}
