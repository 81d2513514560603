//! Init command UI views

use std::path::{Path, PathBuf};

use crate::ui::blocks::ResultSummary;
use crate::ui::sinks::display_path;

/// What `init` did in the work directory
#[derive(Debug, Clone, Default)]
pub struct InitOutcome {
    pub written: Vec<PathBuf>,
    pub kept: Vec<PathBuf>,
    pub missing_tools: Vec<String>,
}

pub fn render_init_result(
    outcome: &InitOutcome,
    base: &Path,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if outcome.missing_tools.is_empty() {
        ResultSummary::success("Initialized")
    } else {
        ResultSummary::partial("Initialized with Warnings")
    };

    for path in &outcome.written {
        summary.add_line(format!("wrote {}", display_path(path, base)));
    }
    for path in &outcome.kept {
        summary.add_line(format!("kept {}", display_path(path, base)));
    }
    for tool in &outcome.missing_tools {
        summary.add_warning(format!("'{}' was not found on PATH", tool));
    }
    summary.with_next_step("Run `texrun` to build");

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_written_and_kept_files() {
        let outcome = InitOutcome {
            written: vec![PathBuf::from("/job/texrun.toml")],
            kept: vec![PathBuf::from("/job/latexHeader.tex")],
            missing_tools: vec![],
        };

        let rendered = render_init_result(&outcome, Path::new("/job"), false, false);

        insta::assert_snapshot!(rendered, @r###"
        [OK] Initialized
          wrote texrun.toml
          kept latexHeader.tex
          -> Next: Run `texrun` to build
        "###);
    }

    #[test]
    fn missing_tools_are_warnings() {
        let outcome = InitOutcome {
            missing_tools: vec!["ocamlc".into()],
            ..InitOutcome::default()
        };
        let rendered = render_init_result(&outcome, Path::new("/job"), false, false);
        assert!(rendered.starts_with("[WARN] Initialized with Warnings"));
        assert!(rendered.contains("'ocamlc' was not found on PATH"));
    }
}
