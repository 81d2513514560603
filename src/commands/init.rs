//! Init command - write a texrun.toml and template stubs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;

use texrun::config::PROJECT_CONFIG_FILE;
use texrun::infrastructure::fs::atomic_write;
use texrun::{Config, SystemProcessRunner};

use super::GlobalOptions;
use crate::ui::context::UiContext;
use crate::ui::json::emit_event;
use crate::ui::views::init::{render_init_result, InitOutcome};

const HEADER_STUB: &str = "\\documentclass{article}\n\\begin{document}\n\\begin{verbatim}\n";
const FOOTER_STUB: &str = "\n\\end{verbatim}\n\\end{document}\n";

pub fn cmd_init(global: &GlobalOptions, force: bool, yes: bool) -> Result<()> {
    let ui = global.ui();
    let dir = global
        .requested_work_dir()
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let config_path = global
        .config
        .clone()
        .unwrap_or_else(|| dir.join(PROJECT_CONFIG_FILE));

    if config_path.exists() && !force && !confirm_overwrite(&config_path, &ui, yes)? {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let mut outcome = InitOutcome::default();

    atomic_write(&config_path, config.to_toml().as_bytes())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    outcome.written.push(config_path);

    for (name, stub) in [
        (&config.paths.header, HEADER_STUB),
        (&config.paths.footer, FOOTER_STUB),
    ] {
        let path = dir.join(name);
        if path.exists() {
            outcome.kept.push(path);
            continue;
        }
        atomic_write(&path, stub.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        outcome.written.push(path);
    }

    // Tools are checked as they would run, env overrides included.
    let effective = Config::default().with_env_overrides();
    for command in [&effective.compile.command, &effective.render.command] {
        if !SystemProcessRunner::check_available(command.program()) {
            outcome.missing_tools.push(command.program().to_string());
        }
    }

    if ui.json {
        let display = |list: &[PathBuf]| -> Vec<String> {
            list.iter().map(|p| p.display().to_string()).collect()
        };
        let _ = emit_event(&serde_json::json!({
            "event": "complete",
            "command": "init",
            "success": true,
            "written": display(&outcome.written),
            "kept": display(&outcome.kept),
            "missing_tools": outcome.missing_tools,
        }));
    } else {
        print!(
            "{}",
            render_init_result(&outcome, &dir, ui.color, ui.unicode)
        );
    }

    Ok(())
}

/// Ask before replacing an existing config. Never prompts in JSON mode,
/// with `--yes`, or without a terminal on stdin.
fn confirm_overwrite(path: &Path, ui: &UiContext, yes: bool) -> Result<bool> {
    if ui.json || yes || !std::io::stdin().is_terminal() {
        return Ok(false);
    }

    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    Ok(confirmed)
}
