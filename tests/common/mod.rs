//! Common test utilities for texrun CLI tests.
//!
//! This module provides:
//! - `TestEnv`: isolated work directory and HOME
//! - Assertion macros: `assert_produced!`, `assert_exit_code!`, etc.
//! - Fixtures: stand-in tools and job files

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

// Each test binary uses a different subset.
#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
