//! Pipeline Event Port
//!
//! Provides an observable interface for pipeline runs.
//! Enables console progress, JSON event streams, and assertions in tests.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::{ContentHash, Step};

/// Event emitted while the pipeline runs
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A step is about to run
    StepStarted { step: Step },

    /// An external command is being launched (detailed)
    CommandLaunched { step: Step, command: String },

    /// Raw tool output, emitted after the tool exits (detailed)
    ToolOutput { step: Step, text: String },

    /// A step produced its artifact
    StepFinished {
        step: Step,
        artifact: Option<PathBuf>,
        hash: Option<ContentHash>,
        duration: Duration,
    },

    /// Non-fatal problem (render diagnostics, viewer launch failure)
    StepWarning { step: Step, message: String },

    /// A step failed; no further steps will run
    StepFailed { step: Step, message: String },

    /// The requested steps all finished
    Completed { steps: usize },
}

/// Trait for receiving pipeline events
///
/// Implementations:
/// - ConsoleEventSink: human progress lines on the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait PipelineEventSink {
    /// Handle a pipeline event
    fn on_event(&self, event: PipelineEvent);

    /// Whether this sink wants `CommandLaunched` / `ToolOutput` events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PipelineEventSink for NoopEventSink {
    fn on_event(&self, _event: PipelineEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
