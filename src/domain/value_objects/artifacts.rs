//! Artifact paths - every file the pipeline reads or writes
//!
//! Relative names are resolved against the work directory once, up front,
//! so no step depends on the process's current directory.

use std::path::{Path, PathBuf};

/// Resolved input and output paths for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub work_dir: PathBuf,
    pub source: PathBuf,
    pub executable: PathBuf,
    pub capture: PathBuf,
    pub header: PathBuf,
    pub footer: PathBuf,
    pub document: PathBuf,
    pub rendered: PathBuf,
}

impl ArtifactPaths {
    /// File stem of the assembled document (`compile` for `compile.tex`)
    pub fn jobname(&self) -> String {
        self.document
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "texput".to_string())
    }

    /// Files the pipeline produces, in production order
    pub fn outputs(&self) -> [&Path; 4] {
        [
            &self.executable,
            &self.capture,
            &self.document,
            &self.rendered,
        ]
    }

    /// Files the pipeline only ever reads
    pub fn inputs(&self) -> [&Path; 3] {
        [&self.source, &self.header, &self.footer]
    }

    /// Side files left by the typesetting tool next to the rendered document
    pub fn side_files(&self) -> Vec<PathBuf> {
        let dir = self.rendered.parent().unwrap_or(&self.work_dir);
        let job = self.jobname();
        ["aux", "log", "out"]
            .iter()
            .map(|ext| dir.join(format!("{}.{}", job, ext)))
            .collect()
    }
}

/// Join `path` onto `base` unless it is already absolute
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else if path.as_os_str().is_empty() || path == Path::new(".") {
        base.to_path_buf()
    } else {
        base.join(path)
    }
}
