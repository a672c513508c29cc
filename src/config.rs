//! Optional tool-path pins read from `portunus-tasks.toml`
//!
//! The file lives at the project root and is entirely optional; most
//! checkouts will not have one. Pins exist for machines where the right
//! generator is installed somewhere the search path does not reach.
//!
//! ```toml
//! [tools]
//! protoc = "/opt/protobuf/bin/protoc"
//! nanopb-generator = "/home/me/.local/bin/nanopb_generator"
//! python = "/usr/bin/python3"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "portunus-tasks.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    pub tools: Tools,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub protoc: Option<PathBuf>,
    #[serde(rename = "nanopb-generator")]
    pub nanopb_generator: Option<PathBuf>,
    pub python: Option<PathBuf>,
}

impl ToolConfig {
    /// Read `<root>/portunus-tasks.toml` if present. A malformed file is
    /// reported and ignored rather than aborting the run.
    pub fn load(root: &Path) -> Self {
        let path = root.join(CONFIG_FILE);
        let Ok(text) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match toml::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("warning: ignoring {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let config = ToolConfig::load(dir.path());
        assert!(config.tools.protoc.is_none());
        assert!(config.tools.nanopb_generator.is_none());
        assert!(config.tools.python.is_none());
    }

    #[test]
    fn test_pins_parse() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[tools]\nprotoc = \"/opt/protobuf/bin/protoc\"\nnanopb-generator = \"/opt/nanopb/generator\"\n",
        )
        .expect("write config");

        let config = ToolConfig::load(dir.path());
        assert_eq!(
            config.tools.protoc,
            Some(PathBuf::from("/opt/protobuf/bin/protoc"))
        );
        assert_eq!(
            config.tools.nanopb_generator,
            Some(PathBuf::from("/opt/nanopb/generator"))
        );
        assert!(config.tools.python.is_none());
    }

    #[test]
    fn test_malformed_file_falls_back_to_empty() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        fs::write(dir.path().join(CONFIG_FILE), "[tools\nprotoc = ").expect("write config");

        let config = ToolConfig::load(dir.path());
        assert!(config.tools.protoc.is_none());
    }
}
