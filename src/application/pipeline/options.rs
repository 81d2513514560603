//! Pipeline options

use crate::domain::value_objects::Step;

/// Options for a full pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Last step to execute
    pub stop_after: Step,
    /// Whether to open the rendered document at the end
    pub view: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            stop_after: Step::View,
            view: true,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the last step to run
    pub fn with_stop_after(mut self, step: Step) -> Self {
        self.stop_after = step;
        self
    }

    /// Enable or disable the viewer
    pub fn with_view(mut self, view: bool) -> Self {
        self.view = view;
        self
    }

    /// Steps this run will execute, in order
    pub fn planned_steps(&self) -> Vec<Step> {
        Step::through(self.stop_after)
            .filter(|s| *s != Step::View || self.view)
            .collect()
    }
}
