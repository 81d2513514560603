//! Shared JSON event types for consistent CLI output.
//!
//! Every line on stdout in `--json` mode is one of these objects, tagged by
//! its `event` field.

use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use texrun::{ContentHash, PipelineError, PipelineEvent, Step};

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Event emitted when a command starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub version: &'static str,
    pub timestamp: String,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            event: "start",
            command,
            version: env!("CARGO_PKG_VERSION"),
            timestamp: now(),
        }
    }
}

/// Event emitted when a command completes.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<usize>,
}

impl<'a> CompleteEvent<'a> {
    pub fn success(command: &'a str) -> Self {
        Self {
            event: "complete",
            command,
            success: true,
            duration_ms: None,
            artifact: None,
            warnings: None,
        }
    }

    pub fn failure(command: &'a str) -> Self {
        Self {
            success: false,
            ..Self::success(command)
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_artifact(mut self, artifact: impl Into<PathBuf>) -> Self {
        self.artifact = Some(artifact.into());
        self
    }

    pub fn with_warnings(mut self, warnings: usize) -> Self {
        self.warnings = Some(warnings);
        self
    }
}

/// Event emitted when a command fails.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    pub event: &'static str,
    pub code: &'static str,
    pub message: String,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,
}

impl ErrorEvent {
    pub fn new(code: &'static str, message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            event: "error",
            code,
            message: message.into(),
            exit_code,
            step: None,
            command: None,
            diagnostics: None,
        }
    }

    pub fn from_pipeline_error(err: &PipelineError) -> Self {
        Self {
            step: err.step(),
            command: err.command().map(str::to_string),
            diagnostics: err.diagnostics().map(str::to_string),
            ..Self::new(err.code(), err.to_string(), err.exit_code())
        }
    }
}

/// One pipeline progress event.
#[derive(Debug, Clone, Serialize)]
pub struct StepEvent {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<ContentHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<usize>,
    pub timestamp: String,
}

impl StepEvent {
    fn empty(event: &'static str, step: Option<Step>) -> Self {
        Self {
            event,
            step,
            command: None,
            output: None,
            artifact: None,
            hash: None,
            duration_ms: None,
            message: None,
            steps: None,
            timestamp: now(),
        }
    }

    pub fn from_event(event: PipelineEvent) -> Self {
        match event {
            PipelineEvent::StepStarted { step } => Self::empty("step_start", Some(step)),
            PipelineEvent::CommandLaunched { step, command } => Self {
                command: Some(command),
                ..Self::empty("command", Some(step))
            },
            PipelineEvent::ToolOutput { step, text } => Self {
                output: Some(text),
                ..Self::empty("tool_output", Some(step))
            },
            PipelineEvent::StepFinished {
                step,
                artifact,
                hash,
                duration,
            } => Self {
                artifact,
                hash,
                duration_ms: Some(duration.as_millis() as u64),
                ..Self::empty("step_complete", Some(step))
            },
            PipelineEvent::StepWarning { step, message } => Self {
                message: Some(message),
                ..Self::empty("warning", Some(step))
            },
            PipelineEvent::StepFailed { step, message } => Self {
                message: Some(message),
                ..Self::empty("step_failed", Some(step))
            },
            PipelineEvent::Completed { steps } => Self {
                steps: Some(steps),
                ..Self::empty("pipeline_complete", None)
            },
        }
    }
}
