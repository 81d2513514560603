//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports:
//! - `process` - `SystemProcessRunner` for the `ProcessRunner` port
//! - `fs` - atomic writes, concatenation and removal on the local disk

pub mod fs;
pub mod process;

pub use process::SystemProcessRunner;
