//! Domain Value Objects
//!
//! Immutable value types that represent pipeline concepts.

mod artifacts;
mod hash;
mod step;
mod tool_command;

pub use artifacts::{resolve, ArtifactPaths};
pub use hash::ContentHash;
pub use step::Step;
pub use tool_command::ToolCommand;
