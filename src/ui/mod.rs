pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod sinks;
pub mod terminal;
pub mod theme;
pub mod views;
