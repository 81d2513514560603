//! Property tests for texrun.
//!
//! Properties use randomized input generation to protect invariants like
//! "assembly preserves byte order" and "hashes depend only on content".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/assemble.rs"]
mod assemble;

#[path = "properties/tool_command.rs"]
mod tool_command;
