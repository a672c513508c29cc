//! Environment doctor: probe every external tool the tasks can need
//!
//! Generation-required tools (protoc, protoc-gen-go, a Nanopb generator)
//! make the check fail when missing; git and gofmt only gate optional
//! checks and are reported as warnings.

use std::process::Command;

use crate::config::ToolConfig;
use crate::error::TaskError;
use crate::orchestrate::{resolve_nanopb, resolve_protoc, resolve_protoc_gen_go};
use crate::resolve::ResolvedTool;

/// First line of `--version` output, from stdout then stderr.
fn version_line(mut cmd: Command) -> Option<String> {
    let output = cmd.arg("--version").output().ok()?;
    let mut line = String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .unwrap_or("")
        .to_string();
    if line.is_empty() {
        line = String::from_utf8_lossy(&output.stderr)
            .lines()
            .next()
            .unwrap_or("")
            .to_string();
    }
    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

fn report_required(name: &str, resolved: Result<ResolvedTool, TaskError>) -> bool {
    match resolved {
        Ok(tool) => {
            let version =
                version_line(tool.command()).unwrap_or_else(|| "<no version output>".to_string());
            eprintln!("[VER] {name}: {version}");
            true
        }
        Err(err) => {
            eprintln!("[WARN] {err}");
            false
        }
    }
}

/// Probe everything; `true` when all generation-required tools are present.
pub fn env_check(config: &ToolConfig) -> bool {
    let mut ok = true;

    ok &= report_required("protoc", resolve_protoc(config));
    ok &= report_required("protoc-gen-go", resolve_protoc_gen_go());
    ok &= report_required("nanopb generator", resolve_nanopb(config));

    match which::which("git") {
        Ok(_) => {
            let version = version_line(Command::new("git"))
                .unwrap_or_else(|| "<no version output>".to_string());
            eprintln!("[VER] git: {version}");
        }
        Err(_) => eprintln!("[WARN] git not found; `proto --check` will be skipped"),
    }

    match which::which("gofmt") {
        // gofmt takes no --version flag; report where it was found instead.
        Ok(path) => eprintln!("[VER] gofmt: {}", path.display()),
        Err(_) => eprintln!(
            "[WARN] gofmt not found; `fmt-check` will not run (install Go from https://go.dev/dl/)"
        ),
    }

    if ok {
        eprintln!("[OK] environment looks good");
    }
    ok
}
