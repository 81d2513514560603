//! Configuration type definitions

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{resolve, ArtifactPaths, ToolCommand};
use crate::error::PipelineResult;

use super::loader::{self, ConfigWarning, LoadedConfig};

/// File names, relative to the work directory unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub source: PathBuf,
    pub executable: PathBuf,
    pub capture: PathBuf,
    pub header: PathBuf,
    pub footer: PathBuf,
    pub document: PathBuf,
    pub rendered: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("mp11.ml"),
            executable: PathBuf::from("grader"),
            capture: PathBuf::from("out"),
            header: PathBuf::from("latexHeader.tex"),
            footer: PathBuf::from("latexFooter.tex"),
            document: PathBuf::from("compile.tex"),
            rendered: PathBuf::from("compile.pdf"),
        }
    }
}

/// Compile step configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileConfig {
    #[serde(default = "default_compiler")]
    pub command: ToolCommand,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            command: default_compiler(),
            timeout_secs: None,
        }
    }
}

fn default_compiler() -> ToolCommand {
    ToolCommand::new("ocamlc", ["-o", "{executable}", "{source}"])
}

/// Run step configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Extra arguments passed to the compiled program
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Render step configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_typesetter")]
    pub command: ToolCommand,

    /// Accept a non-zero exit when the rendered document was still produced
    #[serde(default = "default_true")]
    pub keep_going: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            command: default_typesetter(),
            keep_going: true,
            timeout_secs: None,
        }
    }
}

fn default_typesetter() -> ToolCommand {
    ToolCommand::new("pdflatex", ["-interaction=nonstopmode", "{document}"])
}

/// View step configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_viewer")]
    pub command: ToolCommand,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_viewer(),
        }
    }
}

/// Platform document opener
pub fn default_viewer() -> ToolCommand {
    if cfg!(target_os = "macos") {
        ToolCommand::new("open", ["{rendered}"])
    } else if cfg!(windows) {
        ToolCommand::new("cmd", ["/C", "start", "", "{rendered}"])
    } else {
        ToolCommand::new("xdg-open", ["{rendered}"])
    }
}

fn default_true() -> bool {
    true
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory all relative paths resolve against; tools run here
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub compile: CompileConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub view: ViewConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            paths: PathsConfig::default(),
            compile: CompileConfig::default(),
            run: RunConfig::default(),
            render: RenderConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PipelineResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PipelineResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit file, project file, user file, or defaults; env overrides applied
    pub fn discover(explicit: Option<&Path>, work_dir: Option<&Path>) -> PipelineResult<LoadedConfig> {
        loader::discover(explicit, work_dir)
    }

    /// Apply environment variable overrides (TEXRUN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Render the configuration as TOML (used by `init`)
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    pub fn compile_timeout(&self) -> Option<Duration> {
        self.compile.timeout_secs.map(Duration::from_secs)
    }

    pub fn run_timeout(&self) -> Option<Duration> {
        self.run.timeout_secs.map(Duration::from_secs)
    }

    pub fn render_timeout(&self) -> Option<Duration> {
        self.render.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve every path against the work directory.
    ///
    /// A relative work directory is anchored at `cwd` so tools launched with
    /// a different current directory still see the same files.
    pub fn artifact_paths(&self, cwd: &Path) -> ArtifactPaths {
        let work_dir = resolve(cwd, &self.work_dir);
        let at = |p: &Path| resolve(&work_dir, p);
        ArtifactPaths {
            source: at(&self.paths.source),
            executable: at(&self.paths.executable),
            capture: at(&self.paths.capture),
            header: at(&self.paths.header),
            footer: at(&self.paths.footer),
            document: at(&self.paths.document),
            rendered: at(&self.paths.rendered),
            work_dir,
        }
    }
}
