//! Build tasks for the Portunus door access project
//!
//! Regenerates protobuf stubs for the Go server and the Nanopb firmware,
//! verifies that committed stubs match freshly generated output, and carries
//! the small cross-platform chores (artifact cleanup, gofmt checks) that
//! would otherwise need a POSIX shell.

pub mod clean;
pub mod config;
pub mod drift;
pub mod envcheck;
pub mod error;
pub mod fmtcheck;
pub mod invoke;
pub mod layout;
pub mod orchestrate;
pub mod resolve;
pub mod runner;

// Re-export main types
pub use config::ToolConfig;
pub use drift::DriftResult;
pub use error::TaskError;
pub use invoke::Invocation;
pub use layout::{GenTarget, ProjectLayout, ProtoTarget};
pub use orchestrate::{run_generation, RunReport, TargetReport};
pub use resolve::{resolve, ProbeStrategy, ResolvedTool, StrategyKind};
pub use runner::GenerationOutcome;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_binds_fixed_paths() {
        let layout = ProjectLayout::new("/work/portunus");
        let target = layout.target(ProtoTarget::Go);
        assert!(target.out_dir.ends_with("server/api"));
        assert!(target.proto_file.ends_with("proto/portunus/v1/portunus.proto"));
    }
}
