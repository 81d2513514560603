//! Tool command value object - an external program plus its arguments
//!
//! Arguments may reference artifact paths through placeholders such as
//! `{source}` or `{document}`; they are expanded against [`ArtifactPaths`]
//! right before the command is launched.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactPaths;

/// An external program invocation
///
/// Serialized as a flat array (`["pdflatex", "-interaction=nonstopmode", "{document}"]`)
/// where the first element is the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a whitespace-separated command line (used for env overrides).
    ///
    /// Returns `None` when the line is blank.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let program = parts.next()?;
        Some(Self::new(program, parts))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Expand placeholders in the program and every argument.
    pub fn expand(&self, paths: &ArtifactPaths) -> ToolCommand {
        ToolCommand {
            program: expand_placeholders(&self.program, paths),
            args: self
                .args
                .iter()
                .map(|a| expand_placeholders(a, paths))
                .collect(),
        }
    }
}

fn expand_placeholders(arg: &str, paths: &ArtifactPaths) -> String {
    if !arg.contains('{') {
        return arg.to_string();
    }

    let display = |p: &Path| p.display().to_string();
    arg.replace("{source}", &display(&paths.source))
        .replace("{executable}", &display(&paths.executable))
        .replace("{capture}", &display(&paths.capture))
        .replace("{header}", &display(&paths.header))
        .replace("{footer}", &display(&paths.footer))
        .replace("{document}", &display(&paths.document))
        .replace("{rendered}", &display(&paths.rendered))
        .replace("{jobname}", &paths.jobname())
        .replace("{work_dir}", &display(&paths.work_dir))
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for ToolCommand {
    type Error = String;

    fn try_from(mut parts: Vec<String>) -> Result<Self, Self::Error> {
        if parts.is_empty() || parts[0].trim().is_empty() {
            return Err("command must name a program as its first element".to_string());
        }
        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
        })
    }
}

impl From<ToolCommand> for Vec<String> {
    fn from(cmd: ToolCommand) -> Self {
        let mut parts = Vec::with_capacity(cmd.args.len() + 1);
        parts.push(cmd.program);
        parts.extend(cmd.args);
        parts
    }
}
