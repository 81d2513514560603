//! Build command UI views

use std::path::Path;

use texrun::{ArtifactPaths, PipelineReport};

use crate::ui::blocks::{CommandHeader, ResultSummary};
use crate::ui::sinks::{display_path, format_duration};
use crate::ui::theme::Icon;

pub fn render_build_header(
    paths: &ArtifactPaths,
    config_source: Option<&Path>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Build, "texrun build");
    header.add("Work dir", paths.work_dir.display().to_string());
    header.add("Source", display_path(&paths.source, &paths.work_dir));
    header.add(
        "Config",
        config_source
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(defaults)".to_string()),
    );
    header.render(supports_color, supports_unicode)
}

pub fn render_build_summary(
    report: &PipelineReport,
    base: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let warnings = report.warning_count();
    let mut summary = if warnings == 0 {
        ResultSummary::success("Build Complete")
    } else {
        ResultSummary::partial("Build Complete with Warnings")
    };

    summary.add_stat("steps run", report.steps.len());
    if let Some(artifact) = report.final_artifact() {
        summary.add_line(format!("output: {}", display_path(artifact, base)));
    }
    summary.add_line(format!("took {}", format_duration(report.total_duration())));
    if warnings > 0 {
        summary.add_stat(if warnings == 1 { "warning" } else { "warnings" }, warnings);
        summary.with_next_step("Re-run with -vv to see the full tool output");
    }

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;
    use texrun::application::StepRecord;
    use texrun::Step;

    fn record(step: Step, artifact: Option<&str>, ms: u64) -> StepRecord {
        let mut r = StepRecord::new(step);
        r.artifact = artifact.map(PathBuf::from);
        r.duration = Duration::from_millis(ms);
        r
    }

    #[test]
    fn summary_for_clean_build() {
        let mut report = PipelineReport::new();
        report.push(record(Step::Compile, Some("/job/grader"), 300));
        report.push(record(Step::Run, Some("/job/out"), 100));
        report.push(record(Step::Assemble, Some("/job/compile.tex"), 2));
        report.push(record(Step::Render, Some("/job/compile.pdf"), 900));

        let rendered = render_build_summary(&report, Path::new("/job"), false, false);

        insta::assert_snapshot!(rendered, @r###"
        [OK] Build Complete
          4 steps run
          output: compile.pdf
          took 1.3s
        "###);
    }

    #[test]
    fn summary_with_render_warnings() {
        let mut report = PipelineReport::new();
        let mut render = record(Step::Render, Some("/job/compile.pdf"), 10);
        render.warnings.push("! Undefined control sequence.".into());
        report.push(render);

        let rendered = render_build_summary(&report, Path::new("/job"), false, false);
        assert!(rendered.starts_with("[WARN] Build Complete with Warnings"));
        assert!(rendered.contains("1 warning\n"));
        assert!(rendered.contains("Next: Re-run with -vv"));
    }

    #[test]
    fn header_shows_defaults_without_config_file() {
        let paths = texrun::Config::default().artifact_paths(Path::new("/job"));
        let rendered = render_build_header(&paths, None, false, false);
        assert!(rendered.contains("Source: mp11.ml"));
        assert!(rendered.contains("Config: (defaults)"));
    }
}
