//! Sequencing: resolve, build, run per target, then the optional drift check
//!
//! Targets are processed one at a time, in request order. A failed target is
//! recorded and the next one still runs: a missing Nanopb toolchain must not
//! block regenerating the Go stubs. Only an invalid project layout aborts
//! the whole run, before any tool is resolved.

use std::path::PathBuf;

use crate::config::ToolConfig;
use crate::drift::{self, DriftResult};
use crate::error::TaskError;
use crate::invoke;
use crate::layout::{ProjectLayout, ProtoTarget};
use crate::resolve::{self, PathLookup, PinnedPath, ProbeStrategy, PythonModule, ResolvedTool, StrategyKind};
use crate::runner::{self, GenerationOutcome};

const PROTOC_HINT: &str = "https://github.com/protocolbuffers/protobuf/releases";
const PROTOC_GEN_GO_HINT: &str =
    "go install google.golang.org/protobuf/cmd/protoc-gen-go@latest";
const NANOPB_CLI_HINT: &str = "pip install nanopb (provides the nanopb_generator CLI)";
const NANOPB_MODULE_HINT: &str =
    "pip install grpcio-tools (provides grpc_tools.protoc), or add nanopb as an ESP-IDF managed component";

/// Result of one target's generation attempt.
#[derive(Debug)]
pub struct TargetReport {
    pub target: ProtoTarget,
    pub result: Result<GenerationOutcome, TaskError>,
}

impl TargetReport {
    pub fn succeeded(&self) -> bool {
        matches!(&self.result, Ok(outcome) if outcome.is_success())
    }
}

/// Aggregate result of a whole `proto` run.
#[derive(Debug)]
pub struct RunReport {
    /// One entry per requested target, in request order.
    pub targets: Vec<TargetReport>,
    /// `None` when no check was requested, or when generation failed.
    pub drift: Option<DriftResult>,
}

impl RunReport {
    pub fn generation_ok(&self) -> bool {
        self.targets.iter().all(TargetReport::succeeded)
    }

    /// 0 = generated (and clean, if checked); 1 = generation failure;
    /// 2 = generation succeeded but drift was detected.
    pub fn exit_code(&self) -> u8 {
        if !self.generation_ok() {
            1
        } else if matches!(&self.drift, Some(DriftResult::Dirty { .. })) {
            2
        } else {
            0
        }
    }
}

pub fn resolve_protoc(config: &ToolConfig) -> Result<ResolvedTool, TaskError> {
    let mut strategies: Vec<Box<dyn ProbeStrategy>> = Vec::new();
    if let Some(pin) = &config.tools.protoc {
        strategies.push(Box::new(PinnedPath::new(pin, StrategyKind::Standalone)));
    }
    strategies.push(Box::new(PathLookup::new("protoc", PROTOC_HINT)));
    resolve::resolve("protoc", &strategies)
}

pub fn resolve_protoc_gen_go() -> Result<ResolvedTool, TaskError> {
    let strategies: Vec<Box<dyn ProbeStrategy>> =
        vec![Box::new(PathLookup::new("protoc-gen-go", PROTOC_GEN_GO_HINT))];
    resolve::resolve("protoc-gen-go", &strategies)
}

pub fn resolve_nanopb(config: &ToolConfig) -> Result<ResolvedTool, TaskError> {
    let mut strategies: Vec<Box<dyn ProbeStrategy>> = Vec::new();
    if let Some(pin) = &config.tools.nanopb_generator {
        strategies.push(Box::new(PinnedPath::new(pin, StrategyKind::Standalone)));
    }
    strategies.push(Box::new(PathLookup::new("nanopb_generator", NANOPB_CLI_HINT)));

    let mut module = PythonModule::new("grpc_tools.protoc", NANOPB_MODULE_HINT);
    if let Some(python) = &config.tools.python {
        module = module.prefer_interpreter(python.to_string_lossy());
    }
    strategies.push(Box::new(module));

    resolve::resolve("nanopb generator", &strategies)
}

/// Resolve, build, and run the generator for one target.
fn generate(
    layout: &ProjectLayout,
    config: &ToolConfig,
    target: ProtoTarget,
) -> Result<GenerationOutcome, TaskError> {
    let gen_target = layout.target(target);

    let invocation = match target {
        ProtoTarget::Go => {
            let protoc = resolve_protoc(config)?;
            // protoc finds the plugin on PATH itself; only its presence is
            // checked here so the failure is actionable instead of protoc's
            // "program not found or is not executable".
            resolve_protoc_gen_go()?;
            invoke::go_stubs(&protoc, &gen_target)
        }
        ProtoTarget::Nanopb => {
            let generator = resolve_nanopb(config)?;
            invoke::nanopb_stubs(&generator, &gen_target)
        }
    };

    println!(
        "[proto:{}] generating → {}",
        target.tag(),
        gen_target.out_dir.display()
    );

    match runner::run(&invocation)? {
        GenerationOutcome::Success { warnings } => {
            if !warnings.is_empty() {
                eprint!("{warnings}");
            }
            println!("[proto:{}] done", target.tag());
            Ok(GenerationOutcome::Success { warnings })
        }
        GenerationOutcome::Failure { stderr } => Err(TaskError::GenerationFailed {
            tool: invocation.program,
            stderr,
        }),
    }
}

/// Run generation for the requested targets, then the optional drift check.
///
/// Per-target failures are recorded in the report; only `LayoutInvalid` (or
/// an I/O failure in the drift check itself) aborts with an error.
pub fn run_generation(
    layout: &ProjectLayout,
    config: &ToolConfig,
    requested: &[ProtoTarget],
    check_drift: bool,
) -> Result<RunReport, TaskError> {
    layout.validate(requested)?;

    let mut targets = Vec::new();
    for &target in requested {
        let result = generate(layout, config, target);
        if let Err(err) = &result {
            eprintln!("error: {err}");
        }
        targets.push(TargetReport { target, result });
    }

    let generation_ok = targets.iter().all(TargetReport::succeeded);

    // Diffing half-generated output would only report noise, so the check
    // needs every requested target to have succeeded.
    let drift = if check_drift && generation_ok {
        let paths: Vec<PathBuf> = requested
            .iter()
            .map(|&target| layout.target(target).out_dir)
            .collect();
        let result = drift::check(layout.root(), &paths)?;
        match &result {
            DriftResult::Clean => println!("[proto:check] generated code is up to date"),
            DriftResult::Dirty { diff } => {
                eprintln!("error: generated protobuf code differs from committed files");
                eprintln!("       regenerate with `portunus-tasks proto` and commit the changes");
                if !diff.is_empty() {
                    println!("{diff}");
                }
            }
            DriftResult::SkippedNoGit => {}
        }
        Some(result)
    } else {
        None
    };

    Ok(RunReport { targets, drift })
}
