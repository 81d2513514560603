//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Argument definitions and CLI-to-config overrides
//! - `factory` - Creates use cases with proper dependencies
//!
//! ## Usage
//!
//! ```ignore
//! use texrun::presentation::factory;
//!
//! let paths = factory::resolve_paths(&config)?;
//! let runner = factory::create_pipeline_runner(&config, paths, &sink);
//! let report = runner.run_all(&options)?;
//! ```

pub mod cli;
pub mod factory;

pub use cli::{BuildArgs, Cli, ColorWhen, Commands};
pub use factory::create_pipeline_runner;
