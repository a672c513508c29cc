//! External tool discovery with ordered fallback strategies
//!
//! Each tool is located by trying a fixed-priority list of strategies; the
//! first probe that succeeds wins and later strategies are never probed.
//! Probes are read-only: a PATH lookup, or one interpreter import check.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::TaskError;

/// Which kind of strategy located the tool. The Nanopb command builder
/// dispatches on this: the standalone CLI and the grpc_tools module take
/// incompatible flag syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Standalone,
    PythonModule,
}

/// A located tool: how to start it, and which strategy found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTool {
    pub program: String,
    /// Leading fixed arguments, e.g. `-m grpc_tools.protoc`
    pub args: Vec<String>,
    pub kind: StrategyKind,
}

impl ResolvedTool {
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

/// One way of locating an external tool.
pub trait ProbeStrategy {
    /// Try to locate the tool. `Some` carries the ready invocation prefix.
    fn probe(&self) -> Option<ResolvedTool>;

    /// One remediation line shown when this strategy fails.
    fn install_hint(&self) -> String;
}

/// Standalone executable on the search path.
pub struct PathLookup {
    tool: String,
    hint: String,
}

impl PathLookup {
    pub fn new(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            hint: hint.into(),
        }
    }
}

impl ProbeStrategy for PathLookup {
    fn probe(&self) -> Option<ResolvedTool> {
        let path = which::which(&self.tool).ok()?;
        Some(ResolvedTool {
            program: path.to_string_lossy().into_owned(),
            args: Vec::new(),
            kind: StrategyKind::Standalone,
        })
    }

    fn install_hint(&self) -> String {
        format!("install: {}", self.hint)
    }
}

/// A Python module invoked through the host interpreter (`python -m <module>`).
///
/// The probe finds an interpreter from the candidate list, then asks it to
/// import the module; exit status zero means the module is usable.
pub struct PythonModule {
    module: String,
    hint: String,
    interpreters: Vec<String>,
}

impl PythonModule {
    pub fn new(module: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            hint: hint.into(),
            interpreters: vec!["python3".to_string(), "python".to_string()],
        }
    }

    /// Put a pinned interpreter ahead of the standard candidates.
    pub fn prefer_interpreter(mut self, path: impl Into<String>) -> Self {
        self.interpreters.insert(0, path.into());
        self
    }
}

impl ProbeStrategy for PythonModule {
    fn probe(&self) -> Option<ResolvedTool> {
        let python = self
            .interpreters
            .iter()
            .find_map(|candidate| which::which(candidate).ok())?;
        let status = Command::new(&python)
            .args(["-c", &format!("import {}", self.module)])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .ok()?;
        if !status.success() {
            return None;
        }
        Some(ResolvedTool {
            program: python.to_string_lossy().into_owned(),
            args: vec!["-m".to_string(), self.module.clone()],
            kind: StrategyKind::PythonModule,
        })
    }

    fn install_hint(&self) -> String {
        format!("install: {}", self.hint)
    }
}

/// An absolute path pinned in the project's tool config. A pin whose file is
/// missing fails its probe, so resolution falls through to the standard
/// strategies instead of aborting on a stale config entry.
pub struct PinnedPath {
    path: PathBuf,
    kind: StrategyKind,
}

impl PinnedPath {
    pub fn new(path: impl Into<PathBuf>, kind: StrategyKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl ProbeStrategy for PinnedPath {
    fn probe(&self) -> Option<ResolvedTool> {
        if !self.path.is_file() {
            return None;
        }
        Some(ResolvedTool {
            program: self.path.to_string_lossy().into_owned(),
            args: Vec::new(),
            kind: self.kind,
        })
    }

    fn install_hint(&self) -> String {
        format!(
            "pinned path {} does not exist; fix [tools] in {}",
            self.path.display(),
            crate::config::CONFIG_FILE
        )
    }
}

/// Try each strategy in priority order; the first hit wins. When every probe
/// fails, the error carries one hint line per strategy so the caller can show
/// all of them.
pub fn resolve(
    tool: &str,
    strategies: &[Box<dyn ProbeStrategy>],
) -> Result<ResolvedTool, TaskError> {
    let mut hints = Vec::new();
    for strategy in strategies {
        if let Some(found) = strategy.probe() {
            return Ok(found);
        }
        hints.push(format!("  {}", strategy.install_hint()));
    }
    Err(TaskError::ToolNotFound {
        tool: tool.to_string(),
        hints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingProbe {
        hits: Rc<Cell<u32>>,
        found: bool,
        hint: &'static str,
    }

    impl CountingProbe {
        fn new(found: bool, hint: &'static str) -> (Box<Self>, Rc<Cell<u32>>) {
            let hits = Rc::new(Cell::new(0));
            (
                Box::new(Self {
                    hits: Rc::clone(&hits),
                    found,
                    hint,
                }),
                hits,
            )
        }
    }

    impl ProbeStrategy for CountingProbe {
        fn probe(&self) -> Option<ResolvedTool> {
            self.hits.set(self.hits.get() + 1);
            self.found.then(|| ResolvedTool {
                program: "fake".to_string(),
                args: Vec::new(),
                kind: StrategyKind::Standalone,
            })
        }

        fn install_hint(&self) -> String {
            self.hint.to_string()
        }
    }

    #[test]
    fn test_first_hit_short_circuits() {
        let (first, first_hits) = CountingProbe::new(true, "first");
        let (second, second_hits) = CountingProbe::new(true, "second");
        let strategies: Vec<Box<dyn ProbeStrategy>> = vec![first, second];

        resolve("tool", &strategies).expect("first strategy hits");
        assert_eq!(first_hits.get(), 1);
        assert_eq!(second_hits.get(), 0);
    }

    #[test]
    fn test_all_hints_collected_on_failure() {
        let (first, _) = CountingProbe::new(false, "install: pip install nanopb");
        let (second, _) = CountingProbe::new(false, "install: pip install grpcio-tools");
        let strategies: Vec<Box<dyn ProbeStrategy>> = vec![first, second];
        let err = resolve("nanopb generator", &strategies).expect_err("no strategy hits");
        let message = err.to_string();
        assert!(message.contains("nanopb generator not found"));
        assert!(message.contains("pip install nanopb"));
        assert!(message.contains("pip install grpcio-tools"));
    }

    #[test]
    fn test_path_lookup_finds_sh() {
        let found = PathLookup::new("sh", "unused")
            .probe()
            .expect("sh is on PATH");
        assert_eq!(found.kind, StrategyKind::Standalone);
        assert!(found.args.is_empty());
    }

    #[test]
    fn test_path_lookup_misses_unknown_tool() {
        assert!(PathLookup::new("portunus-no-such-tool-xyz", "unused")
            .probe()
            .is_none());
    }

    #[test]
    fn test_pinned_path_probe() {
        let file = tempfile::NamedTempFile::new().expect("create temp file");
        let hit = PinnedPath::new(file.path(), StrategyKind::Standalone)
            .probe()
            .expect("existing pin resolves");
        assert_eq!(hit.program, file.path().to_string_lossy());

        let missing = PinnedPath::new("/no/such/binary", StrategyKind::Standalone);
        assert!(missing.probe().is_none());
        assert!(missing.install_hint().contains("/no/such/binary"));
    }

    #[cfg(unix)]
    #[test]
    fn test_python_module_probe_rejects_failing_import() {
        // `false` exits nonzero for any argv: the probe finds the
        // "interpreter" but the import check must still reject it.
        let mut probe = PythonModule::new("grpc_tools.protoc", "unused");
        probe.interpreters = vec!["false".to_string()];
        assert!(probe.probe().is_none());
    }

    #[test]
    fn test_python_module_probe_without_interpreter() {
        let mut probe = PythonModule::new("grpc_tools.protoc", "unused");
        probe.interpreters = vec!["portunus-no-such-python".to_string()];
        assert!(probe.probe().is_none());
    }
}
