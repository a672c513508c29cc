//! Synchronous execution of generator commands

use std::io;

use crate::invoke::Invocation;

/// What one generator run produced.
///
/// Some generators chat on stderr even when they succeed, so a clean exit
/// with stderr text is still a success; the text is kept as a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success { warnings: String },
    /// Nonzero exit status, with the tool's stderr exactly as captured.
    Failure { stderr: String },
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success { .. })
    }
}

/// Run one command to completion, capturing stdout and stderr separately.
/// One invocation per call; no retry, no timeout.
pub fn run(invocation: &Invocation) -> io::Result<GenerationOutcome> {
    let output = invocation.command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        Ok(GenerationOutcome::Success { warnings: stderr })
    } else {
        Ok(GenerationOutcome::Failure { stderr })
    }
}
