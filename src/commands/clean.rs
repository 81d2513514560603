//! Clean command handler
//!
//! Removes produced artifacts and typesetting side files.

use anyhow::{bail, Context, Result};

use texrun::presentation::factory::resolve_paths;
use texrun::{clean, CleanOptions};

use super::{load_config, print_config_warnings, GlobalOptions};
use crate::ui::json::emit_event;
use crate::ui::views::clean::render_clean_result;

pub fn cmd_clean(global: &GlobalOptions, dry_run: bool) -> Result<()> {
    let ui = global.ui();
    let loaded = load_config(global)?;
    print_config_warnings(&loaded, &ui);

    let paths = resolve_paths(&loaded.config).context("failed to read the current directory")?;
    let result = clean(&paths, &CleanOptions { dry_run });

    if ui.json {
        let display = |list: &[std::path::PathBuf]| -> Vec<String> {
            list.iter().map(|p| p.display().to_string()).collect()
        };
        let _ = emit_event(&serde_json::json!({
            "event": "complete",
            "command": "clean",
            "dry_run": dry_run,
            "success": result.is_success(),
            "deleted": display(&result.deleted),
            "protected": display(&result.protected),
            "errors": result.errors,
        }));
    } else {
        print!(
            "{}",
            render_clean_result(&result, &paths.work_dir, dry_run, ui.color, ui.unicode)
        );
    }

    if !result.is_success() {
        bail!("failed to remove {} file(s)", result.errors.len());
    }
    Ok(())
}
