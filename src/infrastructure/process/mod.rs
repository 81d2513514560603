//! Process adapters

mod system;

pub use system::SystemProcessRunner;
