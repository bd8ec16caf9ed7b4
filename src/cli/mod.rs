pub mod commands;
pub mod runs;
pub mod serve;

pub use commands::{Cli, Commands};
