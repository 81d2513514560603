//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --color, --verbose, --config, --work-dir) are inherited by all subcommands
//! - Running without a subcommand behaves like `texrun build` with defaults

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::domain::value_objects::Step;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// texrun - compile a program, capture its output, and typeset it
#[derive(Parser, Debug)]
#[command(name = "texrun")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'texrun' without arguments to build with the current directory's defaults.")]
pub struct Cli {
    /// Output format for CI (NDJSON events on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v shows commands, -vv also shows tool output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: <work-dir>/texrun.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding the inputs; tools run here
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile, run, assemble, typeset and open the result
    Build(BuildArgs),

    /// Remove produced artifacts (never sources or templates)
    Clean {
        /// Show what would be removed
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a texrun.toml and template stubs into the work directory
    Init {
        /// Overwrite an existing texrun.toml
        #[arg(short, long)]
        force: bool,

        /// Skip interactive prompts
        #[arg(short, long)]
        yes: bool,
    },
}

/// Per-run overrides for the build command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildArgs {
    /// Source file to compile
    #[arg(long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Header template
    #[arg(long, value_name = "PATH")]
    pub header: Option<PathBuf>,

    /// Footer template
    #[arg(long, value_name = "PATH")]
    pub footer: Option<PathBuf>,

    /// Compiled executable
    #[arg(long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// File receiving the program's standard output
    #[arg(long, value_name = "PATH")]
    pub capture: Option<PathBuf>,

    /// Assembled document
    #[arg(long, value_name = "PATH")]
    pub document: Option<PathBuf>,

    /// Rendered document produced by the typesetter
    #[arg(long, value_name = "PATH")]
    pub rendered: Option<PathBuf>,

    /// Do not open the rendered document
    #[arg(long)]
    pub no_view: bool,

    /// Last step to run
    #[arg(long, value_enum, value_name = "STEP")]
    pub stop_after: Option<Step>,

    /// Fail on any non-zero typesetter exit
    #[arg(long)]
    pub strict_render: bool,
}

impl BuildArgs {
    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        let paths = &mut config.paths;
        let overrides = [
            (&self.source, &mut paths.source),
            (&self.header, &mut paths.header),
            (&self.footer, &mut paths.footer),
            (&self.executable, &mut paths.executable),
            (&self.capture, &mut paths.capture),
            (&self.document, &mut paths.document),
            (&self.rendered, &mut paths.rendered),
        ];
        for (value, slot) in overrides {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }

        if self.no_view {
            config.view.enabled = false;
        }
        if self.strict_render {
            config.render.keep_going = false;
        }
    }
}
