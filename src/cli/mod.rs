//! Command-line interface module.

mod args;
pub mod assets;
pub mod serve;
pub mod status;

pub use args::{Cli, Commands};
