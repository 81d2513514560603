//! Custom assertion macros for CLI tests.
//!
//! These macros provide descriptive failure messages to aid debugging.

use std::path::Path;

/// List files in a directory (for failure messages)
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    files.sort();
    files
}

/// Assert that a file exists in the test work directory.
#[macro_export]
macro_rules! assert_produced {
    ($env:expr, $path:expr) => {
        assert!(
            $env.exists($path),
            "Expected '{}' to exist, but it doesn't.\n\
             Work dir: {:?}\n\
             Files found: {:?}",
            $path,
            $env.work_dir.path(),
            $crate::common::list_files($env.work_dir.path())
        );
    };
}

/// Assert that a file does NOT exist in the test work directory.
#[macro_export]
macro_rules! assert_not_produced {
    ($env:expr, $path:expr) => {
        assert!(
            !$env.exists($path),
            "Expected '{}' to NOT exist, but it does.\n\
             Files found: {:?}",
            $path,
            $crate::common::list_files($env.work_dir.path())
        );
    };
}

/// Assert the exit code, dumping output on mismatch.
#[macro_export]
macro_rules! assert_exit_code {
    ($result:expr, $code:expr) => {
        assert_eq!(
            $result.exit_code,
            $code,
            "Unexpected exit code\nstdout:\n{}\nstderr:\n{}",
            $result.stdout,
            $result.stderr
        );
    };
}

/// Assert that output (stdout or stderr) contains expected pattern.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $pattern:expr) => {
        assert!(
            $result.stdout.contains($pattern) || $result.stderr.contains($pattern),
            "Expected output to contain '{}'\n\
             stdout:\n{}\n\
             stderr:\n{}",
            $pattern,
            $result.stdout,
            $result.stderr
        );
    };
}
