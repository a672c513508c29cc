//! Recursive removal of build artifacts
//!
//! Cross-platform replacement for `rm -rf dir/ && rm -f file`: paths that
//! do not exist are fine, directories are removed recursively.

use std::fs;
use std::path::{Path, PathBuf};

/// Remove one file or directory tree. Missing paths count as success.
pub fn remove(path: &Path) -> bool {
    if !path.exists() {
        return true;
    }

    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Ok(()) => true,
        Err(err) => {
            eprintln!("warning: could not remove {}: {}", path.display(), err);
            false
        }
    }
}

/// Remove every given path; `true` only if all removals succeeded. A failed
/// path does not stop the remaining ones from being removed.
pub fn clean_all(paths: &[PathBuf]) -> bool {
    paths.iter().fold(true, |ok, path| remove(path) && ok)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_counts_as_removed() {
        assert!(remove(Path::new("/no/such/portunus/artifact")));
    }

    #[test]
    fn test_removes_files_and_trees() {
        let dir = tempfile::TempDir::new().expect("create temp dir");
        let file = dir.path().join("coverage.out");
        let tree = dir.path().join("bin/nested");
        fs::write(&file, "data").expect("write file");
        fs::create_dir_all(&tree).expect("mkdir tree");
        fs::write(tree.join("server"), "elf").expect("write artifact");

        assert!(clean_all(&[file.clone(), dir.path().join("bin")]));
        assert!(!file.exists());
        assert!(!dir.path().join("bin").exists());
    }
}
