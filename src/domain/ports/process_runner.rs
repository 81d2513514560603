//! ProcessRunner port - abstraction over launching external tools
//!
//! The pipeline never touches `std::process` directly; it describes the
//! invocation and lets an implementation run it.
//!
//! Implementations:
//! - `SystemProcessRunner` - real subprocesses
//! - scripted fakes in tests

use std::fs::File;
use std::path::Path;
use std::time::Duration;

use crate::domain::value_objects::ToolCommand;

/// Where the child's standard output goes
#[derive(Debug)]
pub enum StdoutTarget {
    /// Collect into [`ProcessOutput::stdout`]
    Capture,
    /// Redirect into an already-open file
    File(File),
}

/// A fully expanded invocation
#[derive(Debug)]
pub struct ProcessRequest<'a> {
    pub command: &'a ToolCommand,
    pub cwd: &'a Path,
    pub stdout: StdoutTarget,
    pub timeout: Option<Duration>,
}

impl<'a> ProcessRequest<'a> {
    pub fn new(command: &'a ToolCommand, cwd: &'a Path) -> Self {
        Self {
            command,
            cwd,
            stdout: StdoutTarget::Capture,
            timeout: None,
        }
    }

    pub fn stdout_to(mut self, file: File) -> Self {
        self.stdout = StdoutTarget::File(file);
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Result of a finished (or killed) child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if terminated by a signal or killed on timeout
    pub code: Option<i32>,
    pub success: bool,
    /// Empty when stdout was redirected to a file
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ProcessOutput {
    /// Tool diagnostics: stderr, or stdout when stderr is empty
    pub fn diagnostics(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim_end()
        } else {
            self.stderr.trim_end()
        }
    }
}

/// Failure to launch or supervise a child process
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The program does not exist or is not on PATH
    #[error("program '{program}' not found")]
    NotFound { program: String },

    /// The program exists but could not be started
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on or reading from the child failed
    #[error("I/O error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Launches external programs
pub trait ProcessRunner {
    /// Run to completion (or timeout), blocking the caller
    fn run(&self, request: ProcessRequest<'_>) -> Result<ProcessOutput, ProcessError>;

    /// Start without waiting; the child outlives this call
    fn spawn_detached(&self, command: &ToolCommand, cwd: &Path) -> Result<(), ProcessError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, request: ProcessRequest<'_>) -> Result<ProcessOutput, ProcessError> {
        (**self).run(request)
    }

    fn spawn_detached(&self, command: &ToolCommand, cwd: &Path) -> Result<(), ProcessError> {
        (**self).spawn_detached(command, cwd)
    }
}
