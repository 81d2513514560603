//! Pipeline result types

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::value_objects::{ContentHash, Step};

/// One completed step
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    pub step: Step,
    /// Artifact produced by the step (`None` for view)
    pub artifact: Option<PathBuf>,
    pub hash: Option<ContentHash>,
    pub duration: Duration,
    /// Non-fatal diagnostics surfaced by the step
    pub warnings: Vec<String>,
}

impl StepRecord {
    pub fn new(step: Step) -> Self {
        Self {
            step,
            artifact: None,
            hash: None,
            duration: Duration::ZERO,
            warnings: Vec::new(),
        }
    }
}

/// Result of a full pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineReport {
    pub steps: Vec<StepRecord>,
}

impl PipelineReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    /// Record for `step`, if it ran
    pub fn get(&self, step: Step) -> Option<&StepRecord> {
        self.steps.iter().find(|r| r.step == step)
    }

    /// Artifact of the last step that produced one
    pub fn final_artifact(&self) -> Option<&Path> {
        self.steps
            .iter()
            .rev()
            .find_map(|r| r.artifact.as_deref())
    }

    pub fn warning_count(&self) -> usize {
        self.steps.iter().map(|r| r.warnings.len()).sum()
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|r| r.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_artifact_skips_view() {
        let mut report = PipelineReport::new();
        let mut render = StepRecord::new(Step::Render);
        render.artifact = Some(PathBuf::from("compile.pdf"));
        render.warnings.push("Overfull \\hbox".into());
        report.push(render);
        report.push(StepRecord::new(Step::View));

        assert_eq!(report.final_artifact(), Some(Path::new("compile.pdf")));
        assert_eq!(report.warning_count(), 1);
        assert!(report.get(Step::Compile).is_none());
    }
}
