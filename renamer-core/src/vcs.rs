//! Version control collaborator used by the analyzer.
//!
//! The analyzer only needs three answers from version control, so they sit
//! behind [`VersionControl`]. [`GitCli`] answers them by running `git`.

use crate::error::RenamerError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub trait VersionControl {
    /// Name of the checked-out branch
    fn current_branch(&self) -> Result<String>;

    /// Whether `name` resolves to a commit
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// File moves between two branch states as `(old, new)` paths relative
    /// to the project root
    fn renamed_files(&self, base: &str, target: &str) -> Result<Vec<(PathBuf, PathBuf)>>;
}

/// `git` run as a child process inside the project directory
#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
}

impl GitCli {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))
    }

    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(RenamerError::Git {
                command: args.first().copied().unwrap_or_default().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        String::from_utf8(output.stdout).context("Invalid UTF-8 in git output")
    }
}

impl VersionControl for GitCli {
    fn current_branch(&self) -> Result<String> {
        let name = self.run_checked(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(name.trim().to_string())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        // Outside a repository every rev fails to resolve
        self.run_checked(&["rev-parse", "--git-dir"])?;

        let rev = format!("{}^{{commit}}", name);
        let output = self.run(&["rev-parse", "--verify", "--quiet", &rev])?;
        if output.status.success() {
            return Ok(true);
        }
        // --quiet exits 1 silently for a rev that does not resolve
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if output.status.code() == Some(1) && stderr.is_empty() {
            return Ok(false);
        }
        Err(RenamerError::Git {
            command: "rev-parse".to_string(),
            stderr,
        }
        .into())
    }

    fn renamed_files(&self, base: &str, target: &str) -> Result<Vec<(PathBuf, PathBuf)>> {
        let output = self.run_checked(&[
            "diff",
            "--name-status",
            "--find-renames",
            "-z",
            "--relative",
            base,
            target,
            "--",
        ])?;
        Ok(parse_name_status(&output))
    }
}

/// Extract renames from `git diff --name-status -z` output.
///
/// Records are NUL separated: a status, then one path, or two paths for
/// renames (`R<score>`) and copies (`C<score>`).
pub fn parse_name_status(output: &str) -> Vec<(PathBuf, PathBuf)> {
    let mut renames = Vec::new();
    let mut fields = output.split('\0').filter(|f| !f.is_empty());

    while let Some(status) = fields.next() {
        let two_paths = status.starts_with('R') || status.starts_with('C');
        let Some(first) = fields.next() else {
            break;
        };
        if !two_paths {
            continue;
        }
        let Some(second) = fields.next() else {
            break;
        };
        if status.starts_with('R') {
            renames.push((PathBuf::from(first), PathBuf::from(second)));
        }
    }

    renames
}
