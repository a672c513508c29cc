//! gofmt verification for the Go server sources
//!
//! Cross-platform replacement for `test -z "$(gofmt -l .)"`.

use std::path::Path;
use std::process::Command;

/// Outcome of a formatting check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FmtStatus {
    Formatted,
    /// `gofmt -l` listed files; one path per line.
    Unformatted { files: String },
    /// gofmt is missing or failed to run.
    ToolError { message: String },
}

impl FmtStatus {
    pub fn exit_code(&self) -> u8 {
        match self {
            FmtStatus::Formatted => 0,
            FmtStatus::Unformatted { .. } => 1,
            FmtStatus::ToolError { .. } => 2,
        }
    }
}

pub fn fmt_check(dir: &Path) -> FmtStatus {
    let gofmt = match which::which("gofmt") {
        Ok(path) => path,
        Err(_) => {
            return FmtStatus::ToolError {
                message: "gofmt not found on PATH\n  install Go from https://go.dev/dl/"
                    .to_string(),
            }
        }
    };

    let output = match Command::new(gofmt).arg("-l").arg(dir).output() {
        Ok(output) => output,
        Err(err) => {
            return FmtStatus::ToolError {
                message: format!("gofmt failed to start: {err}"),
            }
        }
    };

    if !output.status.success() {
        return FmtStatus::ToolError {
            message: format!(
                "gofmt failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        };
    }

    let files = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if files.is_empty() {
        FmtStatus::Formatted
    } else {
        FmtStatus::Unformatted { files }
    }
}
