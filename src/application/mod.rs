//! Application Layer
//!
//! Use cases that orchestrate domain ports and infrastructure:
//! - `pipeline` - compile, run, assemble, render, view
//! - `clean` - remove produced artifacts

pub mod clean;
pub mod pipeline;

pub use clean::{clean, CleanOptions, CleanResult};
pub use pipeline::{PipelineOptions, PipelineReport, PipelineRunner, StepRecord};
