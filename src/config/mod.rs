//! Configuration helpers shared by CLI commands.

pub mod duration;

pub use duration::parse_duration;
