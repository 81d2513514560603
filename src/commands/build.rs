//! Build command handler
//!
//! Runs compile, run, assemble, render and view against the resolved
//! configuration.

use std::time::Instant;

use anyhow::{Context, Result};

use texrun::presentation::factory::{create_pipeline_runner, resolve_paths};
use texrun::presentation::BuildArgs;
use texrun::{PipelineOptions, Step};

use super::{load_config, print_config_warnings, GlobalOptions};
use crate::ui::json::emit_event;
use crate::ui::json::events::{CompleteEvent, StartEvent};
use crate::ui::sinks::{ConsoleEventSink, JsonEventSink};
use crate::ui::views::build::{render_build_header, render_build_summary};

pub fn cmd_build(global: &GlobalOptions, args: &BuildArgs) -> Result<()> {
    let ui = global.ui();
    let mut loaded = load_config(global)?;
    args.apply(&mut loaded.config);
    print_config_warnings(&loaded, &ui);

    let config = loaded.config;
    let paths = resolve_paths(&config).context("failed to read the current directory")?;
    let options = PipelineOptions::new()
        .with_stop_after(args.stop_after.unwrap_or(Step::View))
        .with_view(config.view.enabled);

    if ui.json {
        let started = Instant::now();
        let _ = emit_event(&StartEvent::new("build"));

        let sink = JsonEventSink::stdout();
        let runner = create_pipeline_runner(&config, paths, &sink);
        let elapsed = || started.elapsed().as_millis() as u64;

        return match runner.run_all(&options) {
            Ok(report) => {
                let mut event = CompleteEvent::success("build")
                    .with_duration(elapsed())
                    .with_warnings(report.warning_count());
                if let Some(artifact) = report.final_artifact() {
                    event = event.with_artifact(artifact);
                }
                let _ = emit_event(&event);
                Ok(())
            }
            Err(err) => {
                let _ = emit_event(&CompleteEvent::failure("build").with_duration(elapsed()));
                Err(err.into())
            }
        };
    }

    if ui.shows_commands() {
        print!(
            "{}",
            render_build_header(&paths, loaded.source.as_deref(), ui.color, ui.unicode)
        );
    }

    let base = paths.work_dir.clone();
    let sink = ConsoleEventSink::terminal(ui, base.clone());
    let report = create_pipeline_runner(&config, paths, &sink).run_all(&options)?;

    println!();
    print!(
        "{}",
        render_build_summary(&report, &base, ui.color, ui.unicode)
    );
    Ok(())
}
