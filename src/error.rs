//! Unified error types for portunus-tasks using thiserror

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for build-task operations
#[derive(Error, Debug)]
pub enum TaskError {
    /// Every resolution strategy for a tool came up empty. The hints list
    /// carries one remediation line per failed strategy; all of them are
    /// part of the message.
    #[error("{tool} not found\n{}", .hints.join("\n"))]
    ToolNotFound { tool: String, hints: Vec<String> },

    /// The generator ran and returned a nonzero exit status. `stderr` is the
    /// tool's own output, untouched.
    #[error("{tool} failed:\n{stderr}")]
    GenerationFailed { tool: String, stderr: String },

    /// The project root does not contain the expected schema layout.
    #[error("cannot find {} relative to {}\n  run from the project root or pass --root", .missing.display(), .root.display())]
    LayoutInvalid { root: PathBuf, missing: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
