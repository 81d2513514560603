//! Pipeline Runner
//!
//! Executes compile, run, assemble, render and view in order. The first
//! failing step aborts everything after it; view failures are only reported.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::domain::ports::{
    PipelineEvent, PipelineEventSink, ProcessOutput, ProcessRequest, ProcessRunner,
};
use crate::domain::value_objects::{ArtifactPaths, ContentHash, Step, ToolCommand};
use crate::error::{PipelineError, PipelineResult};
use crate::infrastructure::fs;

use super::diagnostics::{tail, typesetter_diagnostics};
use super::options::PipelineOptions;
use super::result::{PipelineReport, StepRecord};

const DIAGNOSTIC_TAIL_LINES: usize = 40;

/// Outcome of a single step before timing and hashing are attached
struct StepOutcome {
    artifact: Option<PathBuf>,
    warnings: Vec<String>,
}

impl StepOutcome {
    fn produced(path: PathBuf) -> Self {
        Self {
            artifact: Some(path),
            warnings: Vec::new(),
        }
    }
}

/// Runs the pipeline against one resolved set of artifact paths
pub struct PipelineRunner<'a, R: ProcessRunner> {
    runner: R,
    config: &'a Config,
    paths: ArtifactPaths,
    events: &'a dyn PipelineEventSink,
}

impl<'a, R: ProcessRunner> PipelineRunner<'a, R> {
    pub fn new(
        runner: R,
        config: &'a Config,
        paths: ArtifactPaths,
        events: &'a dyn PipelineEventSink,
    ) -> Self {
        Self {
            runner,
            config,
            paths,
            events,
        }
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Run every planned step, stopping at the first failure
    pub fn run_all(&self, options: &PipelineOptions) -> PipelineResult<PipelineReport> {
        let mut report = PipelineReport::new();
        for step in options.planned_steps() {
            report.push(self.execute(step)?);
        }
        self.events.on_event(PipelineEvent::Completed {
            steps: report.steps.len(),
        });
        Ok(report)
    }

    /// Compile the source file, returning the executable path
    pub fn compile(&self) -> PipelineResult<PathBuf> {
        self.execute(Step::Compile).map(|r| self.artifact_or(r, &self.paths.executable))
    }

    /// Run the executable with stdout redirected, returning the capture path
    pub fn run(&self) -> PipelineResult<PathBuf> {
        self.execute(Step::Run).map(|r| self.artifact_or(r, &self.paths.capture))
    }

    /// Concatenate header, capture and footer, returning the document path
    pub fn assemble(&self) -> PipelineResult<PathBuf> {
        self.execute(Step::Assemble).map(|r| self.artifact_or(r, &self.paths.document))
    }

    /// Typeset the document, returning the rendered path and its warnings
    pub fn render(&self) -> PipelineResult<StepRecord> {
        self.execute(Step::Render)
    }

    /// Open the rendered document. Never fails.
    pub fn view(&self) {
        // view_step only reports problems as warnings
        let _ = self.execute(Step::View);
    }

    fn artifact_or(&self, record: StepRecord, fallback: &std::path::Path) -> PathBuf {
        record.artifact.unwrap_or_else(|| fallback.to_path_buf())
    }

    fn execute(&self, step: Step) -> PipelineResult<StepRecord> {
        self.events.on_event(PipelineEvent::StepStarted { step });
        let started = Instant::now();

        let outcome = match step {
            Step::Compile => self.compile_step(),
            Step::Run => self.run_step(),
            Step::Assemble => self.assemble_step(),
            Step::Render => self.render_step(),
            Step::View => Ok(self.view_step()),
        };

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                self.events.on_event(PipelineEvent::StepFailed {
                    step,
                    message: err.to_string(),
                });
                return Err(err);
            }
        };

        let duration = started.elapsed();
        let hash = outcome
            .artifact
            .as_deref()
            .and_then(|p| ContentHash::from_file(p).ok());

        for warning in &outcome.warnings {
            self.events.on_event(PipelineEvent::StepWarning {
                step,
                message: warning.clone(),
            });
        }
        self.events.on_event(PipelineEvent::StepFinished {
            step,
            artifact: outcome.artifact.clone(),
            hash: hash.clone(),
            duration,
        });

        Ok(StepRecord {
            step,
            artifact: outcome.artifact,
            hash,
            duration,
            warnings: outcome.warnings,
        })
    }

    fn compile_step(&self) -> PipelineResult<StepOutcome> {
        let source = &self.paths.source;
        if !source.is_file() {
            return Err(PipelineError::tool_failure(
                Step::Compile,
                format!("source file not found: {}", source.display()),
                None,
                None,
                "",
            ));
        }

        let command = self.config.compile.command.expand(&self.paths);
        let output = self.launch(
            Step::Compile,
            &command,
            ProcessRequest::new(&command, &self.paths.work_dir)
                .with_timeout(self.config.compile_timeout()),
        )?;

        if !output.success {
            return Err(self.exit_failure(Step::Compile, &command, &output, output.diagnostics()));
        }

        if !self.paths.executable.is_file() {
            return Err(PipelineError::tool_failure(
                Step::Compile,
                format!(
                    "compiler exited successfully but {} was not produced",
                    self.paths.executable.display()
                ),
                Some(command.to_string()),
                output.code,
                output.diagnostics(),
            ));
        }

        Ok(StepOutcome::produced(self.paths.executable.clone()))
    }

    fn run_step(&self) -> PipelineResult<StepOutcome> {
        let executable = &self.paths.executable;
        if !executable.is_file() {
            return Err(PipelineError::tool_failure(
                Step::Run,
                format!("executable not found: {}", executable.display()),
                None,
                None,
                "",
            ));
        }

        let command = ToolCommand::new(
            executable.display().to_string(),
            self.config.run.args.iter().cloned(),
        )
        .expand(&self.paths);

        // Capture goes to a staging file; it replaces the old capture only
        // once the program has exited successfully.
        let capture = &self.paths.capture;
        let staged =
            fs::staging_file_for(capture).map_err(|e| PipelineError::io(Step::Run, capture, e))?;
        let stdout = staged
            .as_file()
            .try_clone()
            .map_err(|e| PipelineError::io(Step::Run, capture, e))?;

        let output = self.launch(
            Step::Run,
            &command,
            ProcessRequest::new(&command, &self.paths.work_dir)
                .stdout_to(stdout)
                .with_timeout(self.config.run_timeout()),
        )?;

        if !output.success {
            return Err(self.exit_failure(Step::Run, &command, &output, output.diagnostics()));
        }

        fs::persist(staged, capture).map_err(|e| PipelineError::io(Step::Run, capture, e))?;

        let mut outcome = StepOutcome::produced(capture.clone());
        if !output.stderr.trim().is_empty() {
            outcome
                .warnings
                .push(format!("program wrote to stderr: {}", tail(&output.stderr, 5)));
        }
        Ok(outcome)
    }

    fn assemble_step(&self) -> PipelineResult<StepOutcome> {
        let p = &self.paths;
        let inputs = [p.header.as_path(), p.capture.as_path(), p.footer.as_path()];
        fs::concat_files(&inputs, &p.document)
            .map_err(|e| PipelineError::io(Step::Assemble, e.path, e.source))?;
        Ok(StepOutcome::produced(p.document.clone()))
    }

    fn render_step(&self) -> PipelineResult<StepOutcome> {
        let document = &self.paths.document;
        if !document.is_file() {
            return Err(PipelineError::io(
                Step::Render,
                document,
                std::io::Error::new(std::io::ErrorKind::NotFound, "assembled document not found"),
            ));
        }

        // A rendered file present after the run was produced by this run.
        let rendered = &self.paths.rendered;
        fs::remove_if_exists(rendered).map_err(|e| PipelineError::io(Step::Render, rendered, e))?;

        let command = self.config.render.command.expand(&self.paths);
        let output = self.launch(
            Step::Render,
            &command,
            ProcessRequest::new(&command, &self.paths.work_dir)
                .with_timeout(self.config.render_timeout()),
        )?;

        let log = format!("{}\n{}", output.stdout, output.stderr);
        let mut warnings = typesetter_diagnostics(&log);
        let produced = rendered.is_file();

        match (output.success, produced) {
            (true, true) => Ok(StepOutcome {
                artifact: Some(rendered.clone()),
                warnings,
            }),
            (false, true) if self.config.render.keep_going => {
                warnings.push(format!(
                    "{} exited with {}; keeping the rendered document",
                    command.program(),
                    describe_status(output.code)
                ));
                Ok(StepOutcome {
                    artifact: Some(rendered.clone()),
                    warnings,
                })
            }
            (true, false) => Err(PipelineError::tool_failure(
                Step::Render,
                format!("{} was not produced", rendered.display()),
                Some(command.to_string()),
                output.code,
                render_diagnostics(&warnings, &log),
            )),
            (false, _) => Err(self.exit_failure(
                Step::Render,
                &command,
                &output,
                &render_diagnostics(&warnings, &log),
            )),
        }
    }

    fn view_step(&self) -> StepOutcome {
        let command = self.config.view.command.expand(&self.paths);
        let mut outcome = StepOutcome {
            artifact: None,
            warnings: Vec::new(),
        };

        if !self.paths.rendered.is_file() {
            outcome.warnings.push(format!(
                "nothing to view: {} does not exist",
                self.paths.rendered.display()
            ));
            return outcome;
        }

        self.announce(Step::View, &command);
        if let Err(e) = self.runner.spawn_detached(&command, &self.paths.work_dir) {
            outcome
                .warnings
                .push(format!("could not open viewer: {}", e));
        }
        outcome
    }

    fn announce(&self, step: Step, command: &ToolCommand) {
        if self.events.wants_detailed_events() {
            self.events.on_event(PipelineEvent::CommandLaunched {
                step,
                command: command.to_string(),
            });
        }
    }

    /// Launch a blocking tool, mapping launch failures and timeouts to `step`
    fn launch(
        &self,
        step: Step,
        command: &ToolCommand,
        request: ProcessRequest<'_>,
    ) -> PipelineResult<ProcessOutput> {
        self.announce(step, command);
        let timeout = request.timeout;

        let output = self.runner.run(request).map_err(|e| {
            PipelineError::tool_failure(step, e.to_string(), Some(command.to_string()), None, "")
        })?;

        if self.events.wants_detailed_events() {
            let text = format!("{}{}", output.stdout, output.stderr);
            if !text.trim().is_empty() {
                self.events.on_event(PipelineEvent::ToolOutput { step, text });
            }
        }

        if output.timed_out {
            return Err(PipelineError::Timeout {
                step,
                command: command.to_string(),
                seconds: timeout.map(|t: Duration| t.as_secs()).unwrap_or_default(),
            });
        }

        Ok(output)
    }

    fn exit_failure(
        &self,
        step: Step,
        command: &ToolCommand,
        output: &ProcessOutput,
        diagnostics: &str,
    ) -> PipelineError {
        PipelineError::tool_failure(
            step,
            format!("{} exited with {}", command.program(), describe_status(output.code)),
            Some(command.to_string()),
            output.code,
            diagnostics,
        )
    }
}

fn describe_status(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn render_diagnostics(extracted: &[String], log: &str) -> String {
    if extracted.is_empty() {
        tail(log, DIAGNOSTIC_TAIL_LINES)
    } else {
        extracted.join("\n")
    }
}
