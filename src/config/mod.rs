//! Configuration module for texrun
//!
//! Implements configuration hierarchy:
//! 1. CLI flags (highest priority, applied by the command layer)
//! 2. Environment variables (TEXRUN_*)
//! 3. Explicit `--config` file, else project config (`<work_dir>/texrun.toml`)
//! 4. User config (`<config_dir>/texrun/config.toml`)
//! 5. Built-in defaults (lowest priority)
//!
//! Files are merged section by section: a layer that sets `[render]`
//! replaces the whole `[render]` section below it.

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE};
pub use types::{
    default_viewer, CompileConfig, Config, PathsConfig, RenderConfig, RunConfig, ViewConfig,
};
