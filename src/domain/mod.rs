//! Domain Layer
//!
//! Pipeline vocabulary without I/O.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (Step, ToolCommand, ArtifactPaths, ContentHash)
//! - `ports/` - Interface definitions for infrastructure (ProcessRunner, PipelineEventSink)
//!
//! Everything that launches a process or writes a file goes through a port
//! or lives in `infrastructure`.

pub mod ports;
pub mod value_objects;
