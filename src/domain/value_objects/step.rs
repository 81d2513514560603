//! Step value object - one stage of the pipeline
//!
//! Steps are totally ordered: compile, run, assemble, render, view.
//! Each failing step maps to its own process exit code.

use serde::{Deserialize, Serialize};

/// A single pipeline stage
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Invoke the compiler on the source file
    Compile,
    /// Run the compiled program, capturing stdout
    Run,
    /// Concatenate header, capture and footer
    Assemble,
    /// Invoke the typesetting tool
    Render,
    /// Open the rendered document (best effort)
    View,
}

impl Step {
    /// All steps in execution order
    pub const ALL: [Step; 5] = [
        Step::Compile,
        Step::Run,
        Step::Assemble,
        Step::Render,
        Step::View,
    ];

    /// Stable lowercase name used in messages and JSON events
    pub fn name(&self) -> &'static str {
        match self {
            Step::Compile => "compile",
            Step::Run => "run",
            Step::Assemble => "assemble",
            Step::Render => "render",
            Step::View => "view",
        }
    }

    /// Process exit code used when this step fails.
    ///
    /// `View` never fails the pipeline, so its code is never observed.
    pub fn exit_code(&self) -> i32 {
        match self {
            Step::Compile => 10,
            Step::Run => 11,
            Step::Assemble => 12,
            Step::Render => 13,
            Step::View => 14,
        }
    }

    /// Steps up to and including `last`
    pub fn through(last: Step) -> impl Iterator<Item = Step> {
        Self::ALL.into_iter().filter(move |s| *s <= last)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
