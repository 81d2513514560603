//! texrun CLI - compile a program, capture its output, typeset it
//!
//! Usage: texrun [OPTIONS] [COMMAND]
//!
//! Commands:
//!   build   Compile, run, assemble, typeset and open the result (default)
//!   clean   Remove produced artifacts
//!   init    Write a texrun.toml and template stubs

mod commands;
mod ui;

use clap::Parser;

use texrun::presentation::{BuildArgs, Cli, Commands};

use commands::GlobalOptions;

fn main() {
    let cli = Cli::parse();
    let global = GlobalOptions::from_cli(&cli);

    let result = match &cli.command {
        None => commands::build::cmd_build(&global, &BuildArgs::default()),
        Some(Commands::Build(args)) => commands::build::cmd_build(&global, args),
        Some(Commands::Clean { dry_run }) => commands::clean::cmd_clean(&global, *dry_run),
        Some(Commands::Init { force, yes }) => commands::init::cmd_init(&global, *force, *yes),
    };

    if let Err(err) = result {
        ui::error::print_error(&err, global.json);
        std::process::exit(ui::error::exit_code(&err));
    }
}
