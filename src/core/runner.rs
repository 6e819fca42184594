//! The single boundary between smooth and the external `git` executable.
//!
//! Everything else in the crate talks to git through [`GitRunner`], which makes
//! the workflow code testable against a scripted runner instead of a real repository.

use crate::core::error::{Result, SmoothError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs one git invocation and returns its standard output.
///
/// A non-zero exit status becomes [`SmoothError::GitCommand`] carrying the
/// combined stdout/stderr, trimmed, as the diagnostic. The caller blocks until
/// the process exits; there is no retry and no timeout.
pub trait GitRunner {
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// Runs the `git` found on `PATH` inside a working directory
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        log::debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let combined = format!("{}\n{}", stdout.trim(), stderr.trim());
            log::debug!("git {} exited with {}", args.join(" "), output.status);
            return Err(SmoothError::git_command(args, combined.trim()));
        }

        Ok(stdout)
    }
}

impl<R: GitRunner + ?Sized> GitRunner for &R {
    fn run(&self, args: &[&str]) -> Result<String> {
        (**self).run(args)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted runner for unit tests.

    use super::GitRunner;
    use crate::core::error::{Result, SmoothError};
    use std::cell::RefCell;

    struct Rule {
        prefix: Vec<String>,
        reply: std::result::Result<String, String>,
        once: bool,
    }

    /// Answers invocations from a list of prefix rules and records every call.
    ///
    /// The first rule whose arguments are a prefix of the call wins; unmatched
    /// calls succeed with empty output. Rules added with `once`/`fail_once`
    /// are dropped after their first match.
    #[derive(Default)]
    pub struct FakeGit {
        rules: RefCell<Vec<Rule>>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeGit {
        pub fn new() -> Self {
            Self::default()
        }

        fn rule(self, prefix: &[&str], reply: std::result::Result<String, String>, once: bool) -> Self {
            self.rules.borrow_mut().push(Rule {
                prefix: prefix.iter().map(|s| s.to_string()).collect(),
                reply,
                once,
            });
            self
        }

        pub fn on(self, prefix: &[&str], output: &str) -> Self {
            self.rule(prefix, Ok(output.to_string()), false)
        }

        pub fn fail(self, prefix: &[&str], output: &str) -> Self {
            self.rule(prefix, Err(output.to_string()), false)
        }

        pub fn once(self, prefix: &[&str], output: &str) -> Self {
            self.rule(prefix, Ok(output.to_string()), true)
        }

        pub fn fail_once(self, prefix: &[&str], output: &str) -> Self {
            self.rule(prefix, Err(output.to_string()), true)
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        pub fn called(&self, prefix: &str) -> bool {
            self.calls.borrow().iter().any(|c| c.starts_with(prefix))
        }
    }

    impl GitRunner for FakeGit {
        fn run(&self, args: &[&str]) -> Result<String> {
            self.calls.borrow_mut().push(args.join(" "));

            let mut rules = self.rules.borrow_mut();
            let position = rules.iter().position(|rule| {
                rule.prefix.len() <= args.len()
                    && rule.prefix.iter().zip(args).all(|(p, a)| p == a)
            });

            let reply = match position {
                Some(i) if rules[i].once => Some(rules.remove(i).reply),
                Some(i) => Some(rules[i].reply.clone()),
                None => None,
            };

            match reply {
                Some(Ok(output)) => Ok(output),
                Some(Err(output)) => Err(SmoothError::git_command(args, output)),
                None => Ok(String::new()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeGit;
    use super::*;

    #[test]
    fn test_system_git_reports_failure_output() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let git = SystemGit::new(temp_dir.path());

        let err = git.run(&["rev-parse", "--git-dir"]).unwrap_err();
        match err {
            SmoothError::GitCommand { command, output } => {
                assert_eq!(command, "rev-parse --git-dir");
                assert!(!output.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_system_git_returns_stdout() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let git = SystemGit::new(temp_dir.path());

        let version = git.run(&["--version"]).unwrap();
        assert!(version.starts_with("git version"));
    }

    #[test]
    fn test_fake_matches_first_prefix_rule() {
        let git = FakeGit::new()
            .on(&["branch", "-D"], "deleted")
            .fail(&["branch"], "boom");

        assert_eq!(git.run(&["branch", "-D", "x"]).unwrap(), "deleted");
        assert!(git.run(&["branch", "y"]).is_err());
        assert_eq!(git.run(&["status"]).unwrap(), "");
        assert_eq!(git.calls(), vec!["branch -D x", "branch y", "status"]);
    }

    #[test]
    fn test_fake_once_rules_are_consumed() {
        let git = FakeGit::new()
            .fail_once(&["rev-parse"], "missing")
            .on(&["rev-parse"], "abc");

        assert!(git.run(&["rev-parse", "HEAD"]).is_err());
        assert_eq!(git.run(&["rev-parse", "HEAD"]).unwrap(), "abc");
    }
}
