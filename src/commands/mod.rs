//! Command handlers for the texrun binary

pub mod build;
pub mod clean;
pub mod init;

use std::path::PathBuf;

use anyhow::Result;

use texrun::config::LoadedConfig;
use texrun::presentation::{Cli, ColorWhen};
use texrun::Config;

use crate::ui::context::UiContext;
use crate::ui::json::emit_event;
use crate::ui::theme::Icon;

/// Flags shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub json: bool,
    pub verbose: u8,
    pub color: Option<ColorWhen>,
    pub config: Option<PathBuf>,
    pub work_dir: Option<PathBuf>,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            verbose: cli.verbose,
            color: cli.color,
            config: cli.config.clone(),
            work_dir: cli.work_dir.clone(),
        }
    }

    pub fn ui(&self) -> UiContext {
        UiContext::new(self.json, self.verbose, self.color)
    }

    /// Work directory from `-C`, falling back to `TEXRUN_WORK_DIR`
    fn requested_work_dir(&self) -> Option<PathBuf> {
        self.work_dir.clone().or_else(|| {
            std::env::var_os("TEXRUN_WORK_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

/// Discover configuration and apply `-C` on top of it
pub fn load_config(global: &GlobalOptions) -> Result<LoadedConfig> {
    let work_dir = global.requested_work_dir();
    let mut loaded = Config::discover(global.config.as_deref(), work_dir.as_deref())?;
    if let Some(dir) = &global.work_dir {
        loaded.config.work_dir = dir.clone();
    }
    Ok(loaded)
}

/// Report unknown config keys without failing the command
pub fn print_config_warnings(loaded: &LoadedConfig, ui: &UiContext) {
    for warning in &loaded.warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        let mut message = format!("unknown config key '{}' in {}", warning.key, location);
        if let Some(suggestion) = &warning.suggestion {
            message.push_str(&format!(" (did you mean '{}'?)", suggestion));
        }

        if ui.json {
            let _ = emit_event(&serde_json::json!({
                "event": "warning",
                "kind": "config",
                "message": message,
            }));
        } else {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                message
            );
        }
    }
}
