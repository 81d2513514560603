use texrun::PipelineError;

use crate::ui::json::emit_event;
use crate::ui::json::events::ErrorEvent;
use crate::ui::theme::{dim, Icon};

/// Diagnostic lines shown before the rest is elided
const MAX_DIAGNOSTIC_LINES: usize = 30;

fn format_pipeline_error(err: &PipelineError, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        err
    );

    if let Some(command) = err.command() {
        out.push_str(&format!("  command: {}\n", command));
    }

    if let Some(diagnostics) = err.diagnostics() {
        let lines: Vec<&str> = diagnostics.lines().collect();
        for line in lines.iter().take(MAX_DIAGNOSTIC_LINES) {
            out.push_str("  | ");
            out.push_str(line);
            out.push('\n');
        }
        if lines.len() > MAX_DIAGNOSTIC_LINES {
            let more = format!(
                "  ... {} more lines",
                lines.len() - MAX_DIAGNOSTIC_LINES
            );
            out.push_str(&dim(&more, supports_color));
            out.push('\n');
        }
    }

    if let PipelineError::Config { .. } = err {
        out.push_str("  Run 'texrun init' to write a fresh texrun.toml.\n");
    }

    out
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(pipeline) = err.downcast_ref::<PipelineError>() {
        return format_pipeline_error(pipeline, supports_color, supports_unicode);
    }

    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        err
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    out
}

/// Process exit code for an error returned by a command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PipelineError>()
        .map(PipelineError::exit_code)
        .unwrap_or(texrun::error::EXIT_OTHER)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let event = match err.downcast_ref::<PipelineError>() {
            Some(pipeline) => ErrorEvent::from_pipeline_error(pipeline),
            None => ErrorEvent::new("error", format!("{:#}", err), exit_code(err)),
        };
        let _ = emit_event(&event);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    if caps.is_ci && std::env::var("GITHUB_ACTIONS").is_ok() {
        println!("::error title=texrun::{}", err);
    }

    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use texrun::Step;

    #[test]
    fn format_compile_error_shows_command_and_diagnostics() {
        let err = anyhow::Error::new(PipelineError::tool_failure(
            Step::Compile,
            "compiler exited with status 2",
            Some("ocamlc -o grader mp11.ml".into()),
            Some(2),
            "File \"mp11.ml\", line 3\nError: Unbound value x",
        ));

        let out = format_error(&err, false, false);

        insta::assert_snapshot!(out, @r###"
        [FAIL] compile failed: compiler exited with status 2
          command: ocamlc -o grader mp11.ml
          | File "mp11.ml", line 3
          | Error: Unbound value x
        "###);
    }

    #[test]
    fn format_error_elides_long_diagnostics() {
        let diagnostics = (0..40).map(|i| format!("line {}", i)).collect::<Vec<_>>();
        let err = anyhow::Error::new(PipelineError::tool_failure(
            Step::Render,
            "typesetter exited with status 1",
            None,
            Some(1),
            diagnostics.join("\n"),
        ));

        let out = format_error(&err, false, false);
        assert!(out.contains("line 29"));
        assert!(!out.contains("line 30\n"));
        assert!(out.contains("... 10 more lines"));
    }

    #[test]
    fn format_plain_error_lists_causes() {
        let err = anyhow::anyhow!("disk full").context("failed to write texrun.toml");
        let out = format_error(&err, false, true);
        assert!(out.starts_with("✗ failed to write texrun.toml"));
        assert!(out.contains("caused by: disk full"));
    }

    #[test]
    fn exit_code_follows_failing_step() {
        let err = anyhow::Error::new(PipelineError::io(
            Step::Assemble,
            "/job/latexFooter.tex",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
        assert_eq!(exit_code(&err), 12);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
