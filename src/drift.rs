//! Post-generation drift check against the committed tree
//!
//! Read-only and idempotent: the working tree is never touched, only
//! diffed. Without git on the search path the check is skipped and counts
//! as clean, so generation keeps working in tool-less environments.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of comparing generated output with the committed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriftResult {
    /// No tracked file under the checked paths differs.
    Clean,
    /// Uncommitted differences exist; the full diff text is kept.
    Dirty { diff: String },
    /// git is not installed; the check could not run.
    SkippedNoGit,
}

impl DriftResult {
    pub fn is_clean(&self) -> bool {
        !matches!(self, DriftResult::Dirty { .. })
    }
}

/// Diff the given paths against what is committed. Nonzero exit from
/// `git diff --exit-code` means uncommitted differences exist.
pub fn check(root: &Path, paths: &[PathBuf]) -> io::Result<DriftResult> {
    let git = match which::which("git") {
        Ok(path) => path,
        Err(_) => {
            eprintln!("warning: git not found, skipping drift check");
            return Ok(DriftResult::SkippedNoGit);
        }
    };

    let mut cmd = Command::new(git);
    cmd.current_dir(root).args(["diff", "--exit-code"]);
    for path in paths {
        cmd.arg(path);
    }
    let output = cmd.output()?;

    if output.status.success() {
        Ok(DriftResult::Clean)
    } else {
        Ok(DriftResult::Dirty {
            diff: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
