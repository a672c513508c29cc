//! Fixed Portunus project layout and its validation
//!
//! All paths are static relative to the project root: one schema file feeds
//! both stub sets, and each stub set has a fixed output directory. Nothing
//! here is discovered at runtime.

use std::path::{Path, PathBuf};

use crate::error::TaskError;

pub const PROTO_DIR: &str = "proto";
pub const PROTO_FILE: &str = "proto/portunus/v1/portunus.proto";
pub const NANOPB_OPTIONS: &str = "proto/nanopb/portunus.options";
pub const GO_OUT_DIR: &str = "server/api";
pub const NANOPB_OUT_DIR: &str = "access_module/components/proto";

/// One generated-stub consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtoTarget {
    /// Go stubs for the server (`protoc` + `protoc-gen-go`)
    Go,
    /// Nanopb C stubs for the ESP32 access module
    Nanopb,
}

impl ProtoTarget {
    /// Tag used in progress output, e.g. `[proto:go]`
    pub fn tag(&self) -> &'static str {
        match self {
            ProtoTarget::Go => "go",
            ProtoTarget::Nanopb => "nanopb",
        }
    }
}

/// Everything needed to generate one target's stubs.
#[derive(Debug, Clone)]
pub struct GenTarget {
    pub target: ProtoTarget,
    pub proto_dir: PathBuf,
    pub proto_file: PathBuf,
    pub out_dir: PathBuf,
    /// Nanopb field-size options; `None` for targets that take no options file
    pub options_file: Option<PathBuf>,
}

/// The fixed relative paths, bound to a project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn proto_file(&self) -> PathBuf {
        self.root.join(PROTO_FILE)
    }

    pub fn options_file(&self) -> PathBuf {
        self.root.join(NANOPB_OPTIONS)
    }

    /// Check that the schema (and, when the firmware target is requested,
    /// its options file) exists. Runs once, before any tool resolution.
    pub fn validate(&self, requested: &[ProtoTarget]) -> Result<(), TaskError> {
        if !self.proto_file().exists() {
            return Err(TaskError::LayoutInvalid {
                root: self.root.clone(),
                missing: PathBuf::from(PROTO_FILE),
            });
        }
        if requested.contains(&ProtoTarget::Nanopb) && !self.options_file().exists() {
            return Err(TaskError::LayoutInvalid {
                root: self.root.clone(),
                missing: PathBuf::from(NANOPB_OPTIONS),
            });
        }
        Ok(())
    }

    /// Static generation descriptor for one target.
    pub fn target(&self, target: ProtoTarget) -> GenTarget {
        match target {
            ProtoTarget::Go => GenTarget {
                target,
                proto_dir: self.root.join(PROTO_DIR),
                proto_file: self.proto_file(),
                out_dir: self.root.join(GO_OUT_DIR),
                options_file: None,
            },
            ProtoTarget::Nanopb => GenTarget {
                target,
                proto_dir: self.root.join(PROTO_DIR),
                proto_file: self.proto_file(),
                out_dir: self.root.join(NANOPB_OUT_DIR),
                options_file: Some(self.options_file()),
            },
        }
    }
}
