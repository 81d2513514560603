//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod pipeline_events;
pub mod process_runner;

pub use pipeline_events::{NoopEventSink, PipelineEvent, PipelineEventSink};
pub use process_runner::{
    ProcessError, ProcessOutput, ProcessRequest, ProcessRunner, StdoutTarget,
};
