//! Error types for texrun
//!
//! Every pipeline failure names the step it happened in, which in turn picks
//! the process exit code.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::value_objects::Step;

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Exit code for configuration and usage errors
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for failures outside any step
pub const EXIT_OTHER: i32 = 1;

/// Main error type for pipeline operations
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Compiler failed, was missing, or the source file does not exist
    #[error("compile failed: {message}")]
    Compile {
        message: String,
        command: Option<String>,
        code: Option<i32>,
        diagnostics: String,
    },

    /// The compiled program failed at runtime
    #[error("program failed: {message}")]
    Runtime {
        message: String,
        command: Option<String>,
        code: Option<i32>,
        diagnostics: String,
    },

    /// Missing or unreadable input, or an output that could not be written
    #[error("I/O error on {path}: {source}")]
    Io {
        step: Step,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Typesetting tool failed without producing a document
    #[error("render failed: {message}")]
    Render {
        message: String,
        command: Option<String>,
        code: Option<i32>,
        diagnostics: String,
    },

    /// A tool ran past its configured timeout and was killed
    #[error("{step} step timed out after {seconds}s: {command}")]
    Timeout {
        step: Step,
        command: String,
        seconds: u64,
    },

    /// Invalid configuration file
    #[error("invalid config {file}: {message}")]
    Config { file: PathBuf, message: String },
}

impl PipelineError {
    /// Build the step-specific tool failure variant
    pub fn tool_failure(
        step: Step,
        message: impl Into<String>,
        command: Option<String>,
        code: Option<i32>,
        diagnostics: impl Into<String>,
    ) -> Self {
        let message = message.into();
        let diagnostics = diagnostics.into();
        match step {
            Step::Compile => Self::Compile {
                message,
                command,
                code,
                diagnostics,
            },
            Step::Run => Self::Runtime {
                message,
                command,
                code,
                diagnostics,
            },
            Step::Render => Self::Render {
                message,
                command,
                code,
                diagnostics,
            },
            Step::Assemble | Step::View => Self::Io {
                step,
                path: PathBuf::new(),
                source: std::io::Error::other(message),
            },
        }
    }

    pub fn io(step: Step, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            step,
            path: path.into(),
            source,
        }
    }

    /// Step the error happened in (`None` for configuration errors)
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::Compile { .. } => Some(Step::Compile),
            Self::Runtime { .. } => Some(Step::Run),
            Self::Render { .. } => Some(Step::Render),
            Self::Io { step, .. } | Self::Timeout { step, .. } => Some(*step),
            Self::Config { .. } => None,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self.step() {
            Some(step) => step.exit_code(),
            None => EXIT_CONFIG,
        }
    }

    /// Short machine-readable code for JSON output
    pub fn code(&self) -> &'static str {
        match self {
            Self::Compile { .. } => "compile_error",
            Self::Runtime { .. } => "runtime_error",
            Self::Io { .. } => "io_error",
            Self::Render { .. } => "render_error",
            Self::Timeout { .. } => "timeout",
            Self::Config { .. } => "config_error",
        }
    }

    /// Tool diagnostic text, if the failing tool produced any
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::Compile { diagnostics, .. }
            | Self::Runtime { diagnostics, .. }
            | Self::Render { diagnostics, .. }
                if !diagnostics.trim().is_empty() =>
            {
                Some(diagnostics)
            }
            _ => None,
        }
    }

    /// The command line that failed, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Compile { command, .. }
            | Self::Runtime { command, .. }
            | Self::Render { command, .. } => command.as_deref(),
            Self::Timeout { command, .. } => Some(command),
            _ => None,
        }
    }
}
