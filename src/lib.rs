//! texrun - compile, run, typeset, view
//!
//! texrun compiles a program, captures what it prints, wraps the capture in
//! header and footer templates, and hands the result to a typesetting tool.
//! The compiler, the typesetter and the viewer stay external programs; this
//! crate sequences them and reports failures per step.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{clean, CleanOptions, PipelineOptions, PipelineReport, PipelineRunner};
pub use config::{Config, ConfigWarning};
pub use domain::ports::{NoopEventSink, PipelineEvent, PipelineEventSink, ProcessRunner};
pub use domain::value_objects::{ArtifactPaths, ContentHash, Step, ToolCommand};
pub use error::{PipelineError, PipelineResult};
pub use infrastructure::SystemProcessRunner;
