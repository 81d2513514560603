//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ToolCommand;
use crate::error::{PipelineError, PipelineResult};

use super::types::Config;

/// Project config file name, looked up in the work directory
pub const PROJECT_CONFIG_FILE: &str = "texrun.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// A configuration plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when built-in defaults were used
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PipelineResult<(Config, Vec<ConfigWarning>)> {
    let (_content, config, warnings) = parse_file(path)?;
    Ok((config, warnings))
}

fn config_error(path: &Path, message: impl ToString) -> PipelineError {
    PipelineError::Config {
        file: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Read and deserialize one file, keeping the raw text for section checks
fn parse_file(path: &Path) -> PipelineResult<(String, Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| config_error(path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| config_error(path, e))?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((content, config, warnings))
}

/// Resolve the configuration files to use and merge them.
///
/// Layers, lowest first:
/// 1. Built-in defaults
/// 2. `<config_dir>/texrun/config.toml`
/// 3. `explicit` (must exist), else `<work_dir>/texrun.toml`
///
/// A higher layer replaces a lower one section by section (`[paths]`,
/// `[compile]`, ...). Environment overrides are applied last.
pub fn discover(explicit: Option<&Path>, work_dir: Option<&Path>) -> PipelineResult<LoadedConfig> {
    let loaded = discover_layers(explicit, work_dir, user_config_path())?;
    Ok(LoadedConfig {
        config: with_env_overrides(loaded.config, |key| std::env::var(key).ok()),
        ..loaded
    })
}

/// [`discover`] without env overrides, with the user config path supplied
pub(crate) fn discover_layers(
    explicit: Option<&Path>,
    work_dir: Option<&Path>,
    user_config: Option<PathBuf>,
) -> PipelineResult<LoadedConfig> {
    let top = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = work_dir
                .unwrap_or(Path::new("."))
                .join(PROJECT_CONFIG_FILE);
            project.is_file().then_some(project)
        }
    };
    let user = user_config.filter(|p| p.is_file() && Some(p) != top.as_ref());

    let mut loaded = LoadedConfig {
        config: Config::default(),
        source: None,
        warnings: Vec::new(),
    };

    for path in user.into_iter().chain(top) {
        let (content, layer, warnings) = parse_file(&path)?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| config_error(&path, e))?;
        overlay(&mut loaded.config, layer, &table);
        loaded.warnings.extend(warnings);
        loaded.source = Some(path);
    }

    Ok(loaded)
}

/// Replace every section of `base` that `table` actually sets.
///
/// A section header with nothing under it (only commented examples) does
/// not reset the lower layer to defaults.
fn overlay(base: &mut Config, layer: Config, table: &toml::Table) {
    if table.contains_key("work_dir") {
        base.work_dir = layer.work_dir;
    }
    if sets_section(table, "paths") {
        base.paths = layer.paths;
    }
    if sets_section(table, "compile") {
        base.compile = layer.compile;
    }
    if sets_section(table, "run") {
        base.run = layer.run;
    }
    if sets_section(table, "render") {
        base.render = layer.render;
    }
    if sets_section(table, "view") {
        base.view = layer.view;
    }
}

fn sets_section(table: &toml::Table, key: &str) -> bool {
    match table.get(key) {
        Some(toml::Value::Table(t)) => !t.is_empty(),
        Some(_) => true,
        None => false,
    }
}

/// `<config_dir>/texrun/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("texrun").join("config.toml"))
}

/// Apply environment variable overrides (TEXRUN_* prefix)
pub fn with_env_overrides(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(dir) = get_env("TEXRUN_WORK_DIR").filter(|v| !v.trim().is_empty()) {
        config.work_dir = PathBuf::from(dir);
    }

    if let Some(cmd) = get_env("TEXRUN_COMPILER").and_then(|v| ToolCommand::parse(&v)) {
        config.compile.command = cmd;
    }

    if let Some(cmd) = get_env("TEXRUN_TYPESETTER").and_then(|v| ToolCommand::parse(&v)) {
        config.render.command = cmd;
    }

    if let Some(cmd) = get_env("TEXRUN_VIEWER").and_then(|v| ToolCommand::parse(&v)) {
        config.view.command = cmd;
    }

    if let Some(val) = get_env("TEXRUN_NO_VIEW") {
        config.view.enabled = is_falsy(&val);
    }

    if let Some(val) = get_env("TEXRUN_KEEP_GOING") {
        config.render.keep_going = !is_falsy(&val);
    }

    config
}

fn is_falsy(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "" | "0" | "false" | "no" | "off")
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "work_dir",
        "paths",
        "source",
        "executable",
        "capture",
        "header",
        "footer",
        "document",
        "rendered",
        "compile",
        "command",
        "timeout_secs",
        "run",
        "args",
        "render",
        "keep_going",
        "view",
        "enabled",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_key_finds_near_miss() {
        assert_eq!(suggest_key("keep_goin"), Some("keep_going".to_string()));
        assert_eq!(suggest_key("totally_unrelated"), None);
    }

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn falsy_values() {
        for v in ["0", "false", "No", " off ", ""] {
            assert!(is_falsy(v), "{v:?} should be falsy");
        }
        assert!(!is_falsy("1"));
        assert!(!is_falsy("true"));
    }
}
