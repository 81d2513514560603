//! Clean command UI views

use std::path::Path;

use texrun::application::CleanResult;

use crate::ui::blocks::ResultSummary;
use crate::ui::sinks::display_path;

pub fn render_clean_result(
    result: &CleanResult,
    base: &Path,
    dry_run: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = if dry_run {
        "Dry Run Complete"
    } else if result.deleted.is_empty() && result.errors.is_empty() {
        "Nothing to Clean"
    } else if result.is_success() {
        "Clean Complete"
    } else {
        "Clean Incomplete"
    };

    let mut summary = if result.is_success() {
        ResultSummary::success(title)
    } else {
        ResultSummary::partial(title)
    };

    let verb = if dry_run { "would delete" } else { "deleted" };
    for path in &result.deleted {
        summary.add_line(format!("{} {}", verb, display_path(path, base)));
    }
    for path in &result.protected {
        summary.add_line(format!("kept {} (also an input)", display_path(path, base)));
    }
    for error in &result.errors {
        summary.add_warning(error.clone());
    }

    if dry_run && !result.deleted.is_empty() {
        summary.with_next_step("Run without --dry-run to delete");
    }

    summary.render(supports_color, supports_unicode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn dry_run_lists_files_and_hint() {
        let result = CleanResult {
            deleted: vec![PathBuf::from("/job/grader"), PathBuf::from("/job/compile.aux")],
            ..CleanResult::default()
        };

        let rendered = render_clean_result(&result, Path::new("/job"), true, false, false);

        insta::assert_snapshot!(rendered, @r###"
        [OK] Dry Run Complete
          would delete grader
          would delete compile.aux
          -> Next: Run without --dry-run to delete
        "###);
    }

    #[test]
    fn nothing_to_clean() {
        let rendered =
            render_clean_result(&CleanResult::default(), Path::new("/job"), false, false, false);
        assert_eq!(rendered, "[OK] Nothing to Clean\n");
    }

    #[test]
    fn errors_mark_result_incomplete() {
        let result = CleanResult {
            errors: vec!["/job/out: permission denied".into()],
            ..CleanResult::default()
        };
        let rendered = render_clean_result(&result, Path::new("/job"), false, false, false);
        assert!(rendered.starts_with("[WARN] Clean Incomplete"));
        assert!(rendered.contains("/job/out: permission denied"));
    }
}
