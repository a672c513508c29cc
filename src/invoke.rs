//! Exact command lines for each generator's calling convention
//!
//! `protoc` has one fixed convention. Nanopb has two mutually exclusive
//! ones: the standalone CLI takes separate include/output/options flags,
//! while `grpc_tools.protoc` embeds the options path inside a single
//! `--nanopb_out` flag. The flag syntax must match the tool that actually
//! resolved; mixing them produces a usage error from the tool, not a typed
//! one.

use std::fmt;
use std::process::Command;

use crate::layout::GenTarget;
use crate::resolve::{ResolvedTool, StrategyKind};

/// A fully-formed external command, ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn from_tool(tool: &ResolvedTool) -> Self {
        Self {
            program: tool.program.clone(),
            args: tool.args.clone(),
        }
    }

    fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// protoc with the Go plugin.
pub fn go_stubs(protoc: &ResolvedTool, target: &GenTarget) -> Invocation {
    Invocation::from_tool(protoc)
        .arg(format!("-I{}", target.proto_dir.display()))
        .arg(format!("--go_out={}", target.out_dir.display()))
        .arg("--go_opt=paths=source_relative")
        .arg(target.proto_file.display().to_string())
}

/// Nanopb, in whichever install form resolution found.
pub fn nanopb_stubs(generator: &ResolvedTool, target: &GenTarget) -> Invocation {
    match generator.kind {
        StrategyKind::Standalone => {
            let mut invocation = Invocation::from_tool(generator)
                .arg(format!("-I{}", target.proto_dir.display()))
                .arg(format!("-D{}", target.out_dir.display()));
            if let Some(options) = &target.options_file {
                invocation = invocation.arg(format!("-f{}", options.display()));
            }
            invocation.arg(target.proto_file.display().to_string())
        }
        StrategyKind::PythonModule => {
            let out = match &target.options_file {
                Some(options) => format!(
                    "--options-path={}:{}",
                    options.display(),
                    target.out_dir.display()
                ),
                None => target.out_dir.display().to_string(),
            };
            Invocation::from_tool(generator)
                .arg(format!("--proto_path={}", target.proto_dir.display()))
                .arg(format!("--nanopb_out={}", out))
                .arg(target.proto_file.display().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ProjectLayout, ProtoTarget};

    fn standalone(program: &str) -> ResolvedTool {
        ResolvedTool {
            program: program.to_string(),
            args: Vec::new(),
            kind: StrategyKind::Standalone,
        }
    }

    fn module_tool() -> ResolvedTool {
        ResolvedTool {
            program: "/usr/bin/python3".to_string(),
            args: vec!["-m".to_string(), "grpc_tools.protoc".to_string()],
            kind: StrategyKind::PythonModule,
        }
    }

    #[test]
    fn test_go_convention() {
        let layout = ProjectLayout::new("/p");
        let invocation = go_stubs(&standalone("/usr/bin/protoc"), &layout.target(ProtoTarget::Go));

        assert_eq!(invocation.program, "/usr/bin/protoc");
        assert_eq!(
            invocation.args,
            vec![
                "-I/p/proto",
                "--go_out=/p/server/api",
                "--go_opt=paths=source_relative",
                "/p/proto/portunus/v1/portunus.proto",
            ]
        );
    }

    #[test]
    fn test_nanopb_standalone_convention() {
        let layout = ProjectLayout::new("/p");
        let invocation = nanopb_stubs(
            &standalone("/usr/bin/nanopb_generator"),
            &layout.target(ProtoTarget::Nanopb),
        );

        assert_eq!(
            invocation.args,
            vec![
                "-I/p/proto",
                "-D/p/access_module/components/proto",
                "-f/p/proto/nanopb/portunus.options",
                "/p/proto/portunus/v1/portunus.proto",
            ]
        );
    }

    #[test]
    fn test_nanopb_module_convention() {
        let layout = ProjectLayout::new("/p");
        let invocation = nanopb_stubs(&module_tool(), &layout.target(ProtoTarget::Nanopb));

        assert_eq!(invocation.program, "/usr/bin/python3");
        assert_eq!(
            invocation.args,
            vec![
                "-m",
                "grpc_tools.protoc",
                "--proto_path=/p/proto",
                "--nanopb_out=--options-path=/p/proto/nanopb/portunus.options:/p/access_module/components/proto",
                "/p/proto/portunus/v1/portunus.proto",
            ]
        );
    }

    #[test]
    fn test_conventions_are_never_interchanged() {
        let layout = ProjectLayout::new("/p");
        let target = layout.target(ProtoTarget::Nanopb);

        let standalone_args = nanopb_stubs(&standalone("nanopb_generator"), &target).args;
        assert!(standalone_args.iter().all(|a| !a.starts_with("--nanopb_out")));
        assert!(standalone_args.iter().all(|a| !a.starts_with("--proto_path")));

        let module_args = nanopb_stubs(&module_tool(), &target).args;
        assert!(module_args.iter().all(|a| !a.starts_with("-D")));
        assert!(module_args.iter().all(|a| !a.starts_with("-f")));
        assert!(module_args.iter().all(|a| !a.starts_with("-I")));
    }

    #[test]
    fn test_display_joins_program_and_args() {
        let layout = ProjectLayout::new("/p");
        let invocation = go_stubs(&standalone("protoc"), &layout.target(ProtoTarget::Go));
        let rendered = invocation.to_string();
        assert!(rendered.starts_with("protoc -I/p/proto"));
    }
}
