//! Pipeline Use Case
//!
//! Sequences the external tools and file assembly:
//! - compile the source with the configured compiler
//! - run the executable, capturing stdout
//! - assemble header ++ capture ++ footer
//! - typeset the assembled document
//! - open the result (best effort)

mod diagnostics;
mod options;
mod result;
mod runner;

pub use diagnostics::typesetter_diagnostics;
pub use options::PipelineOptions;
pub use result::{PipelineReport, StepRecord};
pub use runner::PipelineRunner;
