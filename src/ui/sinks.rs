//! Event sinks for the build command
//!
//! `ConsoleEventSink` prints one line per step for humans, `JsonEventSink`
//! streams NDJSON for CI.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use texrun::{PipelineEvent, PipelineEventSink};

use crate::ui::context::UiContext;
use crate::ui::json::events::StepEvent;
use crate::ui::json::write_typed_event;
use crate::ui::theme::{dim, Icon};

/// Compact duration for progress lines
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

/// Show `path` relative to `base` when it lives inside it
pub fn display_path(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
fn into_writer<W>(lock: Mutex<W>) -> W {
    match lock.into_inner() {
        Ok(w) => w,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Human progress output. Warnings go to the error stream.
pub struct ConsoleEventSink<W: Write = io::Stdout, E: Write = io::Stderr> {
    ui: UiContext,
    base: PathBuf,
    out: Mutex<W>,
    err: Mutex<E>,
}

impl ConsoleEventSink {
    pub fn terminal(ui: UiContext, base: impl Into<PathBuf>) -> Self {
        Self::with_writers(ui, base, io::stdout(), io::stderr())
    }
}

impl<W: Write, E: Write> ConsoleEventSink<W, E> {
    pub fn with_writers(ui: UiContext, base: impl Into<PathBuf>, out: W, err: E) -> Self {
        Self {
            ui,
            base: base.into(),
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    #[cfg(test)]
    fn into_writers(self) -> (W, E) {
        (into_writer(self.out), into_writer(self.err))
    }

    fn render(&self, event: PipelineEvent) -> Option<String> {
        let (color, unicode) = (self.ui.color, self.ui.unicode);
        match event {
            PipelineEvent::StepStarted { step } if self.ui.shows_commands() => Some(format!(
                "{} {}",
                Icon::Progress.colored(color, unicode),
                step
            )),
            PipelineEvent::StepStarted { .. } => None,
            PipelineEvent::CommandLaunched { command, .. } => Some(format!(
                "  {} {}",
                Icon::Arrow.colored(color, unicode),
                dim(&command, color)
            )),
            PipelineEvent::ToolOutput { text, .. } if self.ui.shows_tool_output() => {
                let mut out = String::new();
                for line in text.lines() {
                    out.push_str("    ");
                    out.push_str(&dim(line, color));
                    out.push('\n');
                }
                out.pop();
                (!out.is_empty()).then_some(out)
            }
            PipelineEvent::ToolOutput { .. } => None,
            PipelineEvent::StepFinished {
                step,
                artifact,
                hash,
                duration,
            } => {
                let mut line = format!(
                    "{} {:<8}",
                    Icon::Success.colored(color, unicode),
                    step.name()
                );
                if let Some(artifact) = artifact {
                    line.push(' ');
                    line.push_str(&display_path(&artifact, &self.base));
                }
                if let Some(hash) = hash {
                    line.push(' ');
                    line.push_str(&dim(hash.short(), color));
                }
                line.push(' ');
                line.push_str(&dim(&format!("({})", format_duration(duration)), color));
                Some(line)
            }
            PipelineEvent::StepWarning { step, message } => Some(format!(
                "{} {}: {}",
                Icon::Warning.colored(color, unicode),
                step,
                message
            )),
            // The command's error report covers failures, with diagnostics.
            PipelineEvent::StepFailed { .. } => None,
            PipelineEvent::Completed { .. } => None,
        }
    }
}

impl<W: Write, E: Write> PipelineEventSink for ConsoleEventSink<W, E> {
    fn on_event(&self, event: PipelineEvent) {
        let to_err = matches!(event, PipelineEvent::StepWarning { .. });
        let Some(line) = self.render(event) else {
            return;
        };
        if to_err {
            if let Ok(mut err) = self.err.lock() {
                let _ = writeln!(err, "{}", line);
            }
        } else if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.ui.shows_commands()
    }
}

/// NDJSON progress output
pub struct JsonEventSink<W: Write = io::Stdout> {
    out: Mutex<W>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> JsonEventSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        into_writer(self.out)
    }
}

impl<W: Write> PipelineEventSink for JsonEventSink<W> {
    fn on_event(&self, event: PipelineEvent) {
        if let Ok(mut out) = self.out.lock() {
            let _ = write_typed_event(&mut *out, &StepEvent::from_event(event));
        }
    }
}
