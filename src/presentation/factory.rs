//! Use Case Factory
//!
//! Wires use cases to their infrastructure implementations.

use crate::config::Config;
use crate::domain::ports::PipelineEventSink;
use crate::application::PipelineRunner;
use crate::domain::value_objects::ArtifactPaths;
use crate::infrastructure::SystemProcessRunner;

/// Create a pipeline runner that launches real subprocesses
pub fn create_pipeline_runner<'a>(
    config: &'a Config,
    paths: ArtifactPaths,
    events: &'a dyn PipelineEventSink,
) -> PipelineRunner<'a, SystemProcessRunner> {
    PipelineRunner::new(SystemProcessRunner::new(), config, paths, events)
}

/// Resolve artifact paths relative to the process's current directory
pub fn resolve_paths(config: &Config) -> std::io::Result<ArtifactPaths> {
    let cwd = std::env::current_dir()?;
    Ok(config.artifact_paths(&cwd))
}
