//! Clean Use Case
//!
//! Removes the artifacts a pipeline run produces. Source and template files
//! are never removed, even when an output path is configured to point at one.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ArtifactPaths;
use crate::infrastructure::fs::remove_if_exists;

/// Options for the clean command
#[derive(Debug, Clone, Copy, Default)]
pub struct CleanOptions {
    /// Report what would be removed without removing it
    pub dry_run: bool,
}

/// Result of a clean operation
#[derive(Debug, Clone, Default)]
pub struct CleanResult {
    /// Files that were deleted (or would be deleted in dry run)
    pub deleted: Vec<PathBuf>,
    /// Outputs that point at an input and were left alone
    pub protected: Vec<PathBuf>,
    /// Errors that occurred
    pub errors: Vec<String>,
}

impl CleanResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Remove produced artifacts and typesetting side files
pub fn clean(paths: &ArtifactPaths, options: &CleanOptions) -> CleanResult {
    let mut result = CleanResult::default();
    let inputs = paths.inputs();

    let candidates = paths
        .outputs()
        .into_iter()
        .map(Path::to_path_buf)
        .chain(paths.side_files());

    for path in candidates {
        if inputs.contains(&path.as_path()) {
            result.protected.push(path);
            continue;
        }
        if !path.is_file() {
            continue;
        }
        if options.dry_run {
            result.deleted.push(path);
            continue;
        }
        match remove_if_exists(&path) {
            Ok(true) => result.deleted.push(path),
            Ok(false) => {}
            Err(e) => result.errors.push(format!("{}: {}", path.display(), e)),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::tempdir;

    fn touch_all(paths: &ArtifactPaths) {
        for p in paths.inputs().iter().chain(paths.outputs().iter()) {
            fs::write(p, "x").unwrap();
        }
        for p in paths.side_files() {
            fs::write(p, "x").unwrap();
        }
    }

    #[test]
    fn removes_outputs_and_side_files_only() {
        let dir = tempdir().unwrap();
        let paths = Config::default().artifact_paths(dir.path());
        touch_all(&paths);

        let result = clean(&paths, &CleanOptions::default());

        assert!(result.is_success());
        assert_eq!(result.deleted.len(), 7);
        for p in paths.outputs() {
            assert!(!p.exists(), "{} should be gone", p.display());
        }
        for p in paths.inputs() {
            assert!(p.exists(), "{} must survive", p.display());
        }
    }

    #[test]
    fn reports_outputs_in_production_order_then_side_files() {
        let dir = tempdir().unwrap();
        let paths = Config::default().artifact_paths(dir.path());
        touch_all(&paths);

        let result = clean(&paths, &CleanOptions { dry_run: true });

        let mut expected: Vec<PathBuf> = paths.outputs().iter().map(|p| p.to_path_buf()).collect();
        expected.extend(paths.side_files());
        assert_eq!(result.deleted, expected);
    }

    #[test]
    fn dry_run_deletes_nothing() {
        let dir = tempdir().unwrap();
        let paths = Config::default().artifact_paths(dir.path());
        touch_all(&paths);

        let result = clean(&paths, &CleanOptions { dry_run: true });

        assert_eq!(result.deleted.len(), 7);
        assert!(paths.rendered.exists());
    }

    #[test]
    fn output_aliasing_an_input_is_protected() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.paths.capture = config.paths.header.clone();
        let paths = config.artifact_paths(dir.path());
        touch_all(&paths);

        let result = clean(&paths, &CleanOptions::default());

        assert_eq!(result.protected, vec![paths.header.clone()]);
        assert!(paths.header.exists());
    }

    #[test]
    fn missing_outputs_are_skipped_silently() {
        let dir = tempdir().unwrap();
        let paths = Config::default().artifact_paths(dir.path());
        let result = clean(&paths, &CleanOptions::default());
        assert!(result.deleted.is_empty());
        assert!(result.is_success());
    }
}
